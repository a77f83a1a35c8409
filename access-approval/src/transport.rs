//! # Access Approval Transport
//!
//! The transport is the public surface of this crate. It is constructed once per client and
//! exposes one bound call per remote operation.
//!
//! ## Construction
//!
//! 1. **Credential resolution**: explicit credentials, a credentials file, or the ambient
//!    environment (see [`crate::auth`]). Skipped when the caller injects a channel.
//! 2. **Channel construction**: a single lazily connected `tonic` channel to the service host,
//!    or to the mutual TLS endpoint when one is requested. Skipped when the caller injects a
//!    channel.
//! 3. **Dispatch**: each operation's [`crate::UnaryCall`] is bound on first access and cached for
//!    the lifetime of the transport.
//!
//! ## Errors
//!
//! Construction fails with a [`TransportError`]. Calls fail with the `tonic::Status` returned by
//! the channel or the server, untouched.
mod channel;
mod credentials;
mod grpc;

pub use channel::{
    AuthenticatedChannel, DEFAULT_PORT, QUOTA_PROJECT_HEADER, default_mtls_endpoint,
    with_default_port,
};
pub use grpc::{
    AccessApprovalGrpcTransport, ApproveApprovalRequestCall, DeleteAccessApprovalSettingsCall,
    DismissApprovalRequestCall, GetAccessApprovalSettingsCall, GetApprovalRequestCall,
    ListApprovalRequestsCall, UpdateAccessApprovalSettingsCall,
};

use crate::{
    BoxError,
    auth::{ApplicationDefault, AuthError, Credentials, CredentialsProvider},
};
use std::{fmt, path::PathBuf, sync::Arc};

/// The hostname of the Access Approval service.
pub const DEFAULT_HOST: &str = "accessapproval.googleapis.com";

/// The OAuth scopes requested when the caller does not ask for any.
pub const AUTH_SCOPES: &[&str] = &["https://www.googleapis.com/auth/cloud-platform"];

/// Environment variable billing quota to a project.
pub const QUOTA_PROJECT_ENV_VAR: &str = "GOOGLE_CLOUD_QUOTA_PROJECT";

/// Environment variable selecting the mutual TLS endpoint (`always`, `never` or `auto`).
pub const USE_MTLS_ENDPOINT_ENV_VAR: &str = "GOOGLE_API_USE_MTLS_ENDPOINT";

/// Errors that can occur while constructing a transport.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("'credentials' and 'credentials_file' are mutually exclusive")]
    DuplicateCredentialArgs,
    #[error("Authentication failed: '{0}'")]
    Auth(#[from] AuthError),
    #[error("Failed to create the mutual TLS channel: '{0}'")]
    MutualTls(#[from] MutualTlsChannelError),
    #[error("Invalid TLS configuration: '{0}'")]
    Tls(#[source] tonic::transport::Error),
    #[error("Invalid endpoint '{0}': {1}")]
    InvalidEndpoint(String, #[source] tonic::transport::Error),
}

/// Errors that can occur while assembling mutual TLS material.
#[derive(Debug, thiserror::Error)]
pub enum MutualTlsChannelError {
    #[error("The client certificate source failed: '{0}'")]
    ClientCertSource(#[source] BoxError),
    #[error("The client certificate or private key was rejected: '{0}'")]
    Tls(#[source] tonic::transport::Error),
}

type CertSourceFn = dyn Fn() -> Result<(Vec<u8>, Vec<u8>), BoxError> + Send + Sync;

/// A callback providing the client certificate chain and private key, both PEM encoded.
#[derive(Clone)]
pub struct ClientCertSource(Arc<CertSourceFn>);

impl ClientCertSource {
    pub fn new(
        source: impl Fn() -> Result<(Vec<u8>, Vec<u8>), BoxError> + Send + Sync + 'static,
    ) -> Self {
        Self(Arc::new(source))
    }

    /// A source reading the certificate chain and the private key from PEM files.
    pub fn from_files(cert_path: impl Into<PathBuf>, key_path: impl Into<PathBuf>) -> Self {
        let cert_path = cert_path.into();
        let key_path = key_path.into();
        Self::new(move || Ok((std::fs::read(&cert_path)?, std::fs::read(&key_path)?)))
    }

    /// Invokes the callback.
    pub fn load(&self) -> Result<(Vec<u8>, Vec<u8>), BoxError> {
        (self.0)()
    }
}

impl fmt::Debug for ClientCertSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientCertSource(..)")
    }
}

/// Construction parameters of an [`AccessApprovalGrpcTransport`].
///
/// `credentials`, `credentials_file`, `scopes`, `api_mtls_endpoint`, `use_mtls_endpoint` and
/// `client_cert_source` are ignored when a channel is injected with [`AccessApprovalGrpcTransport::with_channel`], but
/// `credentials` and `credentials_file` are still mutually exclusive.
#[derive(Clone)]
pub struct TransportOptions {
    /// The hostname to connect to. A `:443` port is assumed when none is given, and a host
    /// starting with `http://` is dialed verbatim without TLS.
    pub host: String,
    /// Credentials attached to every call. Discovered from the environment when `None`.
    pub credentials: Option<Arc<dyn Credentials>>,
    /// A credentials file to load instead of discovering credentials.
    pub credentials_file: Option<PathBuf>,
    /// OAuth scopes to request. [`AUTH_SCOPES`] when `None` or empty.
    pub scopes: Option<Vec<String>>,
    /// The mutual TLS endpoint. Overrides `host` when set.
    pub api_mtls_endpoint: Option<String>,
    /// Dial the mutual TLS variant of `host` (see [`default_mtls_endpoint`]) when no
    /// `api_mtls_endpoint` is given.
    pub use_mtls_endpoint: bool,
    /// Client certificate material for the mutual TLS endpoint.
    pub client_cert_source: Option<ClientCertSource>,
    /// A project to bill for quota.
    pub quota_project_id: Option<String>,
    /// Where credentials are loaded from.
    pub credentials_provider: Arc<dyn CredentialsProvider>,
}

impl Default for TransportOptions {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            credentials: None,
            credentials_file: None,
            scopes: None,
            api_mtls_endpoint: None,
            use_mtls_endpoint: false,
            client_cert_source: None,
            quota_project_id: None,
            credentials_provider: Arc::new(ApplicationDefault::from_env()),
        }
    }
}

impl TransportOptions {
    /// Default options adjusted by the process environment.
    ///
    /// See [`TransportOptions::from_lookup`] for the variables read.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Default options adjusted by the variables returned from `lookup`:
    ///
    /// * `GOOGLE_CLOUD_QUOTA_PROJECT` sets the quota project.
    /// * `GOOGLE_API_USE_MTLS_ENDPOINT=always` sets `use_mtls_endpoint`.
    /// * The ambient credential discovery locations (see [`ApplicationDefault::from_lookup`]).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut options = Self {
            credentials_provider: Arc::new(ApplicationDefault::from_lookup(&lookup)),
            ..Self::default()
        };

        options.quota_project_id = lookup(QUOTA_PROJECT_ENV_VAR).filter(|v| !v.is_empty());
        options.use_mtls_endpoint = lookup(USE_MTLS_ENDPOINT_ENV_VAR).as_deref() == Some("always");

        options
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    pub fn with_credentials(mut self, credentials: Arc<dyn Credentials>) -> Self {
        self.credentials = Some(credentials);
        self
    }

    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    pub fn with_scopes(mut self, scopes: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.scopes = Some(scopes.into_iter().map(Into::into).collect());
        self
    }

    pub fn with_api_mtls_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_mtls_endpoint = Some(endpoint.into());
        self
    }

    pub fn with_use_mtls_endpoint(mut self, use_mtls_endpoint: bool) -> Self {
        self.use_mtls_endpoint = use_mtls_endpoint;
        self
    }

    pub fn with_client_cert_source(mut self, source: ClientCertSource) -> Self {
        self.client_cert_source = Some(source);
        self
    }

    pub fn with_quota_project_id(mut self, project: impl Into<String>) -> Self {
        self.quota_project_id = Some(project.into());
        self
    }

    pub fn with_credentials_provider(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials_provider = provider;
        self
    }

    /// The mutual TLS endpoint a built channel dials, if any.
    ///
    /// `api_mtls_endpoint` wins. Otherwise, with `use_mtls_endpoint`, it is derived from the
    /// current `host`. Plaintext hosts and hosts without a mutual TLS variant are dialed as
    /// configured.
    pub fn mtls_endpoint(&self) -> Option<String> {
        if let Some(endpoint) = &self.api_mtls_endpoint {
            return Some(endpoint.clone());
        }

        if !self.use_mtls_endpoint || self.host.starts_with("http://") {
            return None;
        }

        let derived = default_mtls_endpoint(self.host.trim_start_matches("https://"));
        derived.contains(".mtls.").then_some(derived)
    }

    /// The scopes credentials are constrained to.
    pub fn effective_scopes(&self) -> Vec<String> {
        match &self.scopes {
            Some(scopes) if !scopes.is_empty() => scopes.clone(),
            _ => AUTH_SCOPES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl fmt::Debug for TransportOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransportOptions")
            .field("host", &self.host)
            .field("credentials", &self.credentials)
            .field("credentials_file", &self.credentials_file)
            .field("scopes", &self.scopes)
            .field("api_mtls_endpoint", &self.api_mtls_endpoint)
            .field("use_mtls_endpoint", &self.use_mtls_endpoint)
            .field("client_cert_source", &self.client_cert_source)
            .field("quota_project_id", &self.quota_project_id)
            .field("credentials_provider", &self.credentials_provider)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults() {
        let options = TransportOptions::from_lookup(lookup(&[]));

        assert_eq!(options.host, "accessapproval.googleapis.com");
        assert_eq!(
            options.effective_scopes(),
            vec!["https://www.googleapis.com/auth/cloud-platform".to_string()]
        );
        assert!(options.api_mtls_endpoint.is_none());
        assert!(!options.use_mtls_endpoint);
        assert!(options.mtls_endpoint().is_none());
        assert!(options.quota_project_id.is_none());
    }

    #[test]
    fn empty_scopes_fall_back_to_the_default_scopes() {
        let options = TransportOptions::from_lookup(lookup(&[])).with_scopes(Vec::<String>::new());

        assert_eq!(options.effective_scopes().len(), 1);

        let options = options.with_scopes(["https://www.googleapis.com/auth/userinfo.email"]);
        assert_eq!(
            options.effective_scopes(),
            vec!["https://www.googleapis.com/auth/userinfo.email".to_string()]
        );
    }

    #[test]
    fn environment_overrides() {
        let options = TransportOptions::from_lookup(lookup(&[
            (QUOTA_PROJECT_ENV_VAR, "billing-project"),
            (USE_MTLS_ENDPOINT_ENV_VAR, "always"),
        ]));

        assert_eq!(options.quota_project_id.as_deref(), Some("billing-project"));
        assert!(options.use_mtls_endpoint);
        assert!(options.api_mtls_endpoint.is_none());
        assert_eq!(
            options.mtls_endpoint().as_deref(),
            Some("accessapproval.mtls.googleapis.com")
        );

        let options = TransportOptions::from_lookup(lookup(&[(USE_MTLS_ENDPOINT_ENV_VAR, "never")]));
        assert!(!options.use_mtls_endpoint);
        assert!(options.mtls_endpoint().is_none());
    }

    #[test]
    fn mtls_endpoint_follows_the_host_set_after_the_environment() {
        let options = TransportOptions::from_lookup(lookup(&[(USE_MTLS_ENDPOINT_ENV_VAR, "always")]));

        let sandbox = options.clone().with_host("accessapproval.sandbox.googleapis.com");
        assert_eq!(
            sandbox.mtls_endpoint().as_deref(),
            Some("accessapproval.mtls.sandbox.googleapis.com")
        );

        assert!(options.clone().with_host("http://localhost:9000").mtls_endpoint().is_none());
        assert!(options.clone().with_host("localhost:8080").mtls_endpoint().is_none());

        let explicit = options
            .with_host("http://localhost:9000")
            .with_api_mtls_endpoint("approval.mtls.example.com");
        assert_eq!(
            explicit.mtls_endpoint().as_deref(),
            Some("approval.mtls.example.com")
        );
    }

    #[test]
    fn client_cert_source_reports_missing_files() {
        let source = ClientCertSource::from_files("/nonexistent/cert.pem", "/nonexistent/key.pem");
        assert!(source.load().is_err());
    }
}
