use super::{AuthError, Credentials};
use async_trait::async_trait;
use std::fmt;
use tonic::metadata::AsciiMetadataValue;

/// A bearer token minted outside of this crate (e.g. `gcloud auth print-access-token`).
#[derive(Clone)]
pub struct AccessToken {
    token: String,
    quota_project_id: Option<String>,
}

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            quota_project_id: None,
        }
    }

    /// Bills quota to `project` for every call made with this token.
    pub fn with_quota_project(mut self, project: impl Into<String>) -> Self {
        self.quota_project_id = Some(project.into());
        self
    }
}

#[async_trait]
impl Credentials for AccessToken {
    async fn authorization(&self) -> Result<AsciiMetadataValue, AuthError> {
        let mut value = AsciiMetadataValue::try_from(format!("Bearer {}", self.token))?;
        value.set_sensitive(true);
        Ok(value)
    }

    fn quota_project_id(&self) -> Option<&str> {
        self.quota_project_id.as_deref()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("quota_project_id", &self.quota_project_id)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn bearer_header() {
        let token = AccessToken::new("ya29.token");
        assert_eq!(
            token.authorization().await.unwrap().to_str().unwrap(),
            "Bearer ya29.token"
        );
        assert_eq!(token.quota_project_id(), None);
    }

    #[tokio::test]
    async fn rejects_tokens_that_cannot_be_headers() {
        let token = AccessToken::new("line\nbreak");
        assert!(matches!(
            token.authorization().await,
            Err(AuthError::InvalidHeader(_))
        ));
    }

    #[test]
    fn debug_does_not_leak_the_token() {
        let token = AccessToken::new("ya29.secret").with_quota_project("billing");
        let debug = format!("{token:?}");
        assert!(!debug.contains("ya29.secret"));
        assert!(debug.contains("billing"));
    }
}
