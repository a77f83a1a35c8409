//! Credential resolution.
use super::{TransportError, TransportOptions};
use crate::auth::{AuthError, Credentials};
use std::sync::Arc;
use tonic::metadata::AsciiMetadataValue;
use tracing::debug;

/// Credentials ready to be attached to a channel.
pub(crate) struct Resolved {
    pub(crate) credentials: Arc<dyn Credentials>,
    pub(crate) quota_project: Option<AsciiMetadataValue>,
}

/// Fails when both explicit credentials and a credentials file are given.
pub(crate) fn check_credential_args(options: &TransportOptions) -> Result<(), TransportError> {
    if options.credentials.is_some() && options.credentials_file.is_some() {
        return Err(TransportError::DuplicateCredentialArgs);
    }
    Ok(())
}

/// Produces the credentials a built channel authenticates with.
///
/// Explicit credentials win, then the credentials file, then ambient discovery through the
/// configured [`crate::auth::CredentialsProvider`]. An explicit quota project wins over the one
/// carried by the credentials.
pub(crate) fn resolve_credentials(options: &TransportOptions) -> Result<Resolved, TransportError> {
    check_credential_args(options)?;

    let scopes = options.effective_scopes();
    let provider = &options.credentials_provider;

    let credentials = match (&options.credentials, &options.credentials_file) {
        (Some(credentials), _) => credentials.clone(),
        (None, Some(path)) => provider.load_from_file(path, &scopes)?,
        (None, None) => provider.default_credentials(&scopes)?,
    };

    let quota_project = options
        .quota_project_id
        .as_deref()
        .or_else(|| credentials.quota_project_id())
        .map(AsciiMetadataValue::try_from)
        .transpose()
        .map_err(AuthError::from)?;

    debug!(
        credentials = ?credentials,
        quota_project = ?quota_project,
        "Resolved credentials"
    );

    Ok(Resolved {
        credentials,
        quota_project,
    })
}
