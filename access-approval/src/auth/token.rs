//! Access tokens and their cache.
//!
//! Credentials minting tokens (locally or through a token endpoint) keep the last one and hand
//! it out until it is about to expire.
use super::AuthError;
use serde::Deserialize;
use std::time::{Duration, SystemTime};
use tonic::metadata::AsciiMetadataValue;

// Tokens are renewed this long before they expire.
pub(super) const REFRESH_MARGIN: Duration = Duration::from_secs(60);

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub(super) struct CachedToken {
    pub(super) header: AsciiMetadataValue,
    pub(super) expires_at: SystemTime,
}

impl CachedToken {
    pub(super) fn bearer(token: &str, expires_at: SystemTime) -> Result<Self, AuthError> {
        let mut header = AsciiMetadataValue::try_from(format!("Bearer {token}"))?;
        header.set_sensitive(true);
        Ok(Self { header, expires_at })
    }

    pub(super) fn is_fresh(&self, now: SystemTime) -> bool {
        now + REFRESH_MARGIN < self.expires_at
    }
}

/// Successful OAuth 2.0 token response.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    expires_in: u64,
}

/// HTTP client used to reach token endpoints.
pub(super) fn http_client() -> Result<reqwest::Client, AuthError> {
    reqwest::Client::builder()
        .timeout(HTTP_TIMEOUT)
        .build()
        .map_err(AuthError::HttpClient)
}

/// Turns the answer of a token endpoint into a [`CachedToken`].
pub(super) async fn read_token_response(
    response: reqwest::Response,
) -> Result<CachedToken, AuthError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(AuthError::TokenEndpoint { status, body });
    }

    let token: TokenResponse = response.json().await.map_err(AuthError::TokenRequest)?;

    CachedToken::bearer(
        &token.access_token,
        SystemTime::now() + Duration::from_secs(token.expires_in),
    )
}

/// The last token fetched over the network.
///
/// The lock is held while refreshing, so concurrent calls wait for a single request.
#[derive(Default)]
pub(super) struct TokenCache(tokio::sync::Mutex<Option<CachedToken>>);

impl TokenCache {
    pub(super) async fn get_or_refresh<F, Fut>(
        &self,
        refresh: F,
    ) -> Result<AsciiMetadataValue, AuthError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CachedToken, AuthError>>,
    {
        let mut cached = self.0.lock().await;

        if let Some(token) = cached.as_ref().filter(|t| t.is_fresh(SystemTime::now())) {
            return Ok(token.header.clone());
        }

        let token = refresh().await?;
        let header = token.header.clone();
        *cached = Some(token);
        Ok(header)
    }
}
