//! Service account credentials authenticated with self-signed JWTs.
//!
//! Google APIs accept a JWT signed with the service account key directly as a bearer token,
//! so no round trip to the OAuth token endpoint is needed. The token carries the requested
//! scopes in its `scope` claim, or the service audience when no scope is requested.
use super::{AuthError, Credentials, token::CachedToken};
use crate::transport::DEFAULT_HOST;
use async_trait::async_trait;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use std::{
    fmt,
    sync::{Mutex, PoisonError},
    time::{Duration, SystemTime, UNIX_EPOCH},
};
use tonic::metadata::AsciiMetadataValue;

const TOKEN_LIFETIME: Duration = Duration::from_secs(3600);

/// The fields of a service account key file used for authentication.
#[derive(Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub quota_project_id: Option<String>,
}

impl fmt::Debug for ServiceAccountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountKey")
            .field("client_email", &self.client_email)
            .field("private_key_id", &self.private_key_id)
            .field("project_id", &self.project_id)
            .field("quota_project_id", &self.quota_project_id)
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct Claims<'a> {
    iss: &'a str,
    sub: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    aud: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    scope: Option<String>,
    iat: u64,
    exp: u64,
}

/// Credentials backed by a service account key.
pub struct ServiceAccountCredentials {
    client_email: String,
    key_id: Option<String>,
    encoding_key: EncodingKey,
    scopes: Vec<String>,
    audience: String,
    quota_project_id: Option<String>,
    cached: Mutex<Option<CachedToken>>,
}

impl ServiceAccountCredentials {
    /// Builds credentials from a parsed key, requesting `scopes` in every token.
    ///
    /// # Returns
    ///
    /// * `Ok(ServiceAccountCredentials)` - The key is a valid RSA private key.
    /// * `Err(AuthError::InvalidPrivateKey)` - The PEM could not be parsed.
    pub fn new(key: ServiceAccountKey, scopes: &[String]) -> Result<Self, AuthError> {
        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())
            .map_err(AuthError::InvalidPrivateKey)?;

        Ok(Self {
            client_email: key.client_email,
            key_id: key.private_key_id,
            encoding_key,
            scopes: scopes.to_vec(),
            audience: format!("https://{DEFAULT_HOST}/"),
            quota_project_id: key.quota_project_id,
            cached: Mutex::new(None),
        })
    }

    /// The service account identity (`client_email` of the key file).
    pub fn client_email(&self) -> &str {
        &self.client_email
    }

    fn sign(&self, now: SystemTime) -> Result<CachedToken, AuthError> {
        let iat = now
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        let expires_at = now + TOKEN_LIFETIME;

        let claims = Claims {
            iss: &self.client_email,
            sub: &self.client_email,
            aud: self.scopes.is_empty().then_some(self.audience.as_str()),
            scope: (!self.scopes.is_empty()).then(|| self.scopes.join(" ")),
            iat,
            exp: iat + TOKEN_LIFETIME.as_secs(),
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key_id.clone();

        let jwt = jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(AuthError::Signing)?;

        CachedToken::bearer(&jwt, expires_at)
    }
}

#[async_trait]
impl Credentials for ServiceAccountCredentials {
    async fn authorization(&self) -> Result<AsciiMetadataValue, AuthError> {
        let now = SystemTime::now();
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);

        match cached.as_ref() {
            Some(token) if token.is_fresh(now) => Ok(token.header.clone()),
            _ => {
                let token = self.sign(now)?;
                let header = token.header.clone();
                *cached = Some(token);
                Ok(header)
            }
        }
    }

    fn quota_project_id(&self) -> Option<&str> {
        self.quota_project_id.as_deref()
    }
}

impl fmt::Debug for ServiceAccountCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccountCredentials")
            .field("client_email", &self.client_email)
            .field("key_id", &self.key_id)
            .field("scopes", &self.scopes)
            .field("quota_project_id", &self.quota_project_id)
            .finish_non_exhaustive()
    }
}
