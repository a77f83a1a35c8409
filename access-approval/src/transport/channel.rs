//! Channel construction.
//!
//! A transport owns exactly one channel. When the caller does not inject one it is built here,
//! once, and wrapped in an [`AuthenticatedChannel`] so every call carries the resolved
//! credentials.
use super::{MutualTlsChannelError, TransportError, TransportOptions, credentials::Resolved};
use crate::{BoxError, auth::Credentials};
use std::{
    fmt,
    sync::Arc,
    task::{Context, Poll},
};
use tonic::{
    Status,
    codegen::{BoxFuture, Service, http},
    metadata::{AsciiMetadataValue, MetadataMap},
    transport::{Channel, ClientTlsConfig, Endpoint, Identity},
};
use tracing::debug;

/// Port assumed when a host does not name one.
pub const DEFAULT_PORT: u16 = 443;

/// Metadata entry billing a call to a quota project.
pub const QUOTA_PROJECT_HEADER: &str = "x-goog-user-project";

/// Appends [`DEFAULT_PORT`] to `host` unless it already contains a port separator.
pub fn with_default_port(host: &str) -> String {
    if host.contains(':') {
        host.to_string()
    } else {
        format!("{host}:{DEFAULT_PORT}")
    }
}

/// Derives the mutual TLS endpoint of a `googleapis.com` host.
///
/// `foo.googleapis.com` becomes `foo.mtls.googleapis.com` and `foo.sandbox.googleapis.com`
/// becomes `foo.mtls.sandbox.googleapis.com`. Other hosts are returned unchanged.
pub fn default_mtls_endpoint(host: &str) -> String {
    if host.contains(".mtls.") {
        return host.to_string();
    }

    for domain in [".sandbox.googleapis.com", ".googleapis.com"] {
        if let Some(name) = host.strip_suffix(domain) {
            return format!("{name}.mtls{domain}");
        }
    }

    host.to_string()
}

/// A channel attaching credentials, and the quota project when there is one, to every call.
///
/// The `authorization` value is awaited before the request is handed to the inner channel. A
/// credential failure fails the call with `UNAUTHENTICATED` without sending anything.
#[derive(Clone)]
pub struct AuthenticatedChannel<S = Channel> {
    inner: S,
    credentials: Arc<dyn Credentials>,
    quota_project: Option<AsciiMetadataValue>,
}

impl<S> AuthenticatedChannel<S> {
    pub fn new(
        inner: S,
        credentials: Arc<dyn Credentials>,
        quota_project: Option<AsciiMetadataValue>,
    ) -> Self {
        Self {
            inner,
            credentials,
            quota_project,
        }
    }

    /// The channel requests are forwarded to.
    pub fn get_ref(&self) -> &S {
        &self.inner
    }
}

impl<S: fmt::Debug> fmt::Debug for AuthenticatedChannel<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthenticatedChannel")
            .field("inner", &self.inner)
            .field("credentials", &self.credentials)
            .field("quota_project", &self.quota_project)
            .finish()
    }
}

impl<S, B> Service<http::Request<B>> for AuthenticatedChannel<S>
where
    S: Service<http::Request<B>> + Clone + Send + 'static,
    S::Future: Send,
    S::Error: Into<BoxError>,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = BoxError;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx).map_err(Into::into)
    }

    fn call(&mut self, mut request: http::Request<B>) -> Self::Future {
        // The clone may not be ready: keep it and send through the instance that was polled.
        let ready = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, ready);
        let credentials = self.credentials.clone();
        let quota_project = self.quota_project.clone();

        Box::pin(async move {
            let authorization = credentials
                .authorization()
                .await
                .map_err(|e| Status::unauthenticated(e.to_string()))?;

            let mut metadata = MetadataMap::from_headers(std::mem::take(request.headers_mut()));
            metadata.insert("authorization", authorization);
            if let Some(project) = quota_project {
                metadata.insert(QUOTA_PROJECT_HEADER, project);
            }
            *request.headers_mut() = metadata.into_headers();

            inner.call(request).await.map_err(Into::into)
        })
    }
}

/// Wraps `channel` so every call carries `resolved` credentials.
pub(crate) fn authenticate<S>(channel: S, resolved: Resolved) -> AuthenticatedChannel<S> {
    AuthenticatedChannel::new(channel, resolved.credentials, resolved.quota_project)
}

/// Builds the channel described by `options`.
///
/// The channel connects lazily on its first call, so this needs a Tokio runtime but no network.
///
/// # Returns
///
/// * `Ok((host, channel))` - The host actually dialed, and the channel.
/// * `Err(TransportError)` - The endpoint is invalid or the TLS material was rejected.
pub(crate) fn build_channel(
    options: &TransportOptions,
) -> Result<(String, Channel), TransportError> {
    if let Some(mtls_endpoint) = options.mtls_endpoint() {
        let host = with_default_port(&mtls_endpoint);
        let tls = mutual_tls_config(options)?;

        let endpoint = endpoint(&format!("https://{host}"))?
            .tls_config(tls)
            .map_err(MutualTlsChannelError::Tls)?;

        debug!(
            host = %host,
            client_cert = options.client_cert_source.is_some(),
            "Built mutual TLS channel"
        );
        return Ok((host, endpoint.connect_lazy()));
    }

    if options.host.starts_with("http://") {
        let endpoint = endpoint(&options.host)?;
        debug!(host = %options.host, "Built plaintext channel");
        return Ok((options.host.clone(), endpoint.connect_lazy()));
    }

    let host = with_default_port(options.host.trim_start_matches("https://"));
    let endpoint = endpoint(&format!("https://{host}"))?
        .tls_config(ClientTlsConfig::new().with_webpki_roots())
        .map_err(TransportError::Tls)?;

    debug!(host = %host, "Built TLS channel");
    Ok((host, endpoint.connect_lazy()))
}

fn endpoint(uri: &str) -> Result<Endpoint, TransportError> {
    Endpoint::from_shared(uri.to_string())
        .map_err(|e| TransportError::InvalidEndpoint(uri.to_string(), e))
}

/// TLS configuration of the mutual TLS endpoint.
///
/// The client certificate source is called once. Without one, the platform default TLS
/// configuration is used.
fn mutual_tls_config(
    options: &TransportOptions,
) -> Result<ClientTlsConfig, MutualTlsChannelError> {
    let config = ClientTlsConfig::new().with_webpki_roots();

    match &options.client_cert_source {
        Some(source) => {
            let (cert, key) = source.load().map_err(MutualTlsChannelError::ClientCertSource)?;
            Ok(config.identity(Identity::from_pem(cert, key)))
        }
        None => Ok(config),
    }
}
