//! User credentials, as written by `gcloud auth application-default login`.
//!
//! The refresh token is exchanged for a short lived access token at the OAuth 2.0 token
//! endpoint on the first call, and again whenever the cached token is about to expire.
use super::{
    AuthError, Credentials,
    token::{self, CachedToken, TokenCache},
};
use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use tonic::metadata::AsciiMetadataValue;
use tracing::debug;

/// Google's OAuth 2.0 token endpoint.
pub const TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The fields of an `authorized_user` credentials file.
#[derive(Clone, Deserialize)]
pub struct AuthorizedUserKey {
    pub client_id: String,
    pub client_secret: String,
    pub refresh_token: String,
    #[serde(default)]
    pub quota_project_id: Option<String>,
    /// Token endpoint override. [`TOKEN_URI`] when absent.
    #[serde(default)]
    pub token_uri: Option<String>,
}

impl fmt::Debug for AuthorizedUserKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizedUserKey")
            .field("client_id", &self.client_id)
            .field("quota_project_id", &self.quota_project_id)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}

/// Credentials backed by a user refresh token.
pub struct AuthorizedUserCredentials {
    key: AuthorizedUserKey,
    token_uri: String,
    http: reqwest::Client,
    cache: TokenCache,
}

impl AuthorizedUserCredentials {
    /// # Returns
    ///
    /// * `Ok(AuthorizedUserCredentials)` - Ready to exchange the refresh token on first use.
    /// * `Err(AuthError::HttpClient)` - The HTTP client could not be initialized.
    pub fn new(key: AuthorizedUserKey) -> Result<Self, AuthError> {
        let token_uri = key.token_uri.clone().unwrap_or_else(|| TOKEN_URI.to_string());

        Ok(Self {
            key,
            token_uri,
            http: token::http_client()?,
            cache: TokenCache::default(),
        })
    }

    pub fn client_id(&self) -> &str {
        &self.key.client_id
    }

    async fn refresh(&self) -> Result<CachedToken, AuthError> {
        debug!(
            client_id = %self.key.client_id,
            token_uri = %self.token_uri,
            "Exchanging refresh token"
        );

        let response = self
            .http
            .post(&self.token_uri)
            .form(&[
                ("grant_type", "refresh_token"),
                ("client_id", self.key.client_id.as_str()),
                ("client_secret", self.key.client_secret.as_str()),
                ("refresh_token", self.key.refresh_token.as_str()),
            ])
            .send()
            .await
            .map_err(AuthError::TokenRequest)?;

        token::read_token_response(response).await
    }
}

#[async_trait]
impl Credentials for AuthorizedUserCredentials {
    async fn authorization(&self) -> Result<AsciiMetadataValue, AuthError> {
        self.cache.get_or_refresh(|| self.refresh()).await
    }

    fn quota_project_id(&self) -> Option<&str> {
        self.key.quota_project_id.as_deref()
    }
}

impl fmt::Debug for AuthorizedUserCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthorizedUserCredentials")
            .field("client_id", &self.key.client_id)
            .field("token_uri", &self.token_uri)
            .field("quota_project_id", &self.key.quota_project_id)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const AUTHORIZED_USER: &str = include_str!("../../tests/fixtures/authorized_user.json");

    #[test]
    fn defaults_to_the_google_token_endpoint() {
        let key: AuthorizedUserKey = serde_json::from_str(AUTHORIZED_USER).unwrap();
        let credentials = AuthorizedUserCredentials::new(key).unwrap();

        assert_eq!(credentials.token_uri, TOKEN_URI);
        assert_eq!(credentials.client_id(), "abc.apps.googleusercontent.com");
        assert_eq!(credentials.quota_project_id(), Some("adc-quota-project"));
    }

    #[test]
    fn debug_does_not_leak_secrets() {
        let key: AuthorizedUserKey = serde_json::from_str(AUTHORIZED_USER).unwrap();
        let debug = format!("{:?}", AuthorizedUserCredentials::new(key.clone()).unwrap());
        let key_debug = format!("{key:?}");

        for debug in [debug, key_debug] {
            assert!(!debug.contains("1//refresh"));
            assert!(!debug.contains("\"secret\""));
        }
    }
}
