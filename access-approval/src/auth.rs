//! # Authentication
//!
//! Credential handles attached to every call made through a transport built by this crate.
//!
//! The transport only sees two seams:
//!
//! * **[`Credentials`]:** Produces the `authorization` metadata for an outgoing call.
//! * **[`CredentialsProvider`]:** Loads credentials from a file or discovers them from the
//!   process environment. [`ApplicationDefault`] is the provider used unless the caller
//!   configures another one.
//!
//! Supported credential sources:
//!
//! * [`AccessToken`]: a bearer token obtained elsewhere.
//! * [`ServiceAccountCredentials`]: a service account key file, authenticated with self-signed JWTs.
//! * [`AuthorizedUserCredentials`]: the user credentials written by
//!   `gcloud auth application-default login`, exchanged at the OAuth 2.0 token endpoint.
//! * [`MetadataServerCredentials`]: the service account attached to the workload, fetched from
//!   the metadata server.
use async_trait::async_trait;
use std::{fmt, path::Path, path::PathBuf, sync::Arc};
use tonic::metadata::{AsciiMetadataValue, errors::InvalidMetadataValue};

mod access_token;
mod application_default;
mod authorized_user;
mod metadata_server;
mod service_account;
mod token;

pub use access_token::AccessToken;
pub use application_default::{ApplicationDefault, CREDENTIALS_ENV_VAR, load_credentials_from_file};
pub use authorized_user::{AuthorizedUserCredentials, AuthorizedUserKey, TOKEN_URI};
pub use metadata_server::{DEFAULT_METADATA_HOST, METADATA_HOST_ENV_VAR, MetadataServerCredentials};
pub use service_account::{ServiceAccountCredentials, ServiceAccountKey};

/// Errors produced while loading or using credentials.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error(
        "Could not automatically determine credentials. Set GOOGLE_APPLICATION_CREDENTIALS or run `gcloud auth application-default login`"
    )]
    DefaultCredentialsNotFound,
    #[error("Failed to read credentials file '{}': {source}", path.display())]
    ReadCredentialsFile {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid credentials file '{}': {source}", path.display())]
    InvalidCredentialsFile {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Credentials of type '{0}' are not supported")]
    UnsupportedCredentialsType(String),
    #[error("Invalid service account private key: '{0}'")]
    InvalidPrivateKey(#[source] jsonwebtoken::errors::Error),
    #[error("Failed to sign the service account token: '{0}'")]
    Signing(#[source] jsonwebtoken::errors::Error),
    #[error("Credentials produced an invalid authorization header: '{0}'")]
    InvalidHeader(#[from] InvalidMetadataValue),
    #[error("Failed to build the HTTP client used for token requests: '{0}'")]
    HttpClient(#[source] reqwest::Error),
    #[error("Token request failed: '{0}'")]
    TokenRequest(#[source] reqwest::Error),
    #[error("The token endpoint answered {status}: {body}")]
    TokenEndpoint {
        status: reqwest::StatusCode,
        body: String,
    },
}

/// Authentication material attached to outgoing calls.
///
/// The value is requested once per call, so implementations minting tokens cache them.
#[async_trait]
pub trait Credentials: fmt::Debug + Send + Sync {
    /// The value of the `authorization` metadata entry (e.g. `Bearer <token>`).
    async fn authorization(&self) -> Result<AsciiMetadataValue, AuthError>;

    /// The project billed for quota, when the credentials carry one.
    fn quota_project_id(&self) -> Option<&str> {
        None
    }
}

/// Loads credentials on behalf of the transport.
///
/// Loading does not touch the network: tokens are fetched on the first call.
pub trait CredentialsProvider: fmt::Debug + Send + Sync {
    /// Loads credentials from a credentials file, constrained to `scopes`.
    fn load_from_file(
        &self,
        path: &Path,
        scopes: &[String],
    ) -> Result<Arc<dyn Credentials>, AuthError>;

    /// Discovers credentials from the environment, constrained to `scopes`.
    fn default_credentials(&self, scopes: &[String]) -> Result<Arc<dyn Credentials>, AuthError>;
}
