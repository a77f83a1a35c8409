//! Credentials of the service account attached to the workload (Compute Engine, GKE, Cloud
//! Run, ...), served by the metadata server.
use super::{
    AuthError, Credentials,
    token::{self, CachedToken, TokenCache},
};
use async_trait::async_trait;
use std::fmt;
use tonic::metadata::AsciiMetadataValue;
use tracing::debug;

/// Environment variable overriding the metadata server host.
pub const METADATA_HOST_ENV_VAR: &str = "GCE_METADATA_HOST";

/// The metadata server host on Google Cloud.
pub const DEFAULT_METADATA_HOST: &str = "metadata.google.internal";

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

const PRODUCT_NAME_FILE: &str = "/sys/class/dmi/id/product_name";

/// Access tokens of the default service account, fetched from the metadata server.
pub struct MetadataServerCredentials {
    host: String,
    scopes: Vec<String>,
    http: reqwest::Client,
    cache: TokenCache,
}

impl MetadataServerCredentials {
    /// Credentials fetched from the metadata server at `host` (`host[:port]`), constrained to
    /// `scopes`.
    pub fn new(host: impl Into<String>, scopes: &[String]) -> Result<Self, AuthError> {
        Ok(Self {
            host: host.into(),
            scopes: scopes.to_vec(),
            http: token::http_client()?,
            cache: TokenCache::default(),
        })
    }

    async fn refresh(&self) -> Result<CachedToken, AuthError> {
        let url = format!("http://{}{TOKEN_PATH}", self.host);
        debug!(url = %url, "Fetching access token from the metadata server");

        let mut request = self.http.get(&url).header("Metadata-Flavor", "Google");
        if !self.scopes.is_empty() {
            request = request.query(&[("scopes", self.scopes.join(","))]);
        }

        let response = request.send().await.map_err(AuthError::TokenRequest)?;
        token::read_token_response(response).await
    }
}

#[async_trait]
impl Credentials for MetadataServerCredentials {
    async fn authorization(&self) -> Result<AsciiMetadataValue, AuthError> {
        self.cache.get_or_refresh(|| self.refresh()).await
    }
}

impl fmt::Debug for MetadataServerCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetadataServerCredentials")
            .field("host", &self.host)
            .field("scopes", &self.scopes)
            .finish_non_exhaustive()
    }
}

/// Whether the machine reports itself as a Google Cloud VM.
///
/// Only the DMI product name is read; no request is sent.
pub(super) fn on_google_cloud() -> bool {
    std::fs::read_to_string(PRODUCT_NAME_FILE)
        .map(|name| name.trim_start().starts_with("Google"))
        .unwrap_or(false)
}
