//! Ambient credential discovery.
//!
//! Credentials are looked up, in order, from:
//!
//! 1. The file named by `GOOGLE_APPLICATION_CREDENTIALS`.
//! 2. The gcloud well known file written by `gcloud auth application-default login`.
//! 3. The metadata server, when `GCE_METADATA_HOST` names one or the machine is a Google Cloud VM.
use super::{
    AuthError, AuthorizedUserCredentials, AuthorizedUserKey, Credentials, CredentialsProvider,
    DEFAULT_METADATA_HOST, METADATA_HOST_ENV_VAR, MetadataServerCredentials,
    ServiceAccountCredentials, ServiceAccountKey, metadata_server,
};
use serde::Deserialize;
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::debug;

/// Environment variable naming an explicit credentials file.
pub const CREDENTIALS_ENV_VAR: &str = "GOOGLE_APPLICATION_CREDENTIALS";

const WELL_KNOWN_FILE: &str = "application_default_credentials.json";

#[derive(Deserialize)]
struct FileHeader {
    #[serde(rename = "type")]
    kind: String,
}

/// Loads credentials from a JSON credentials file.
///
/// `service_account` and `authorized_user` files are supported.
pub fn load_credentials_from_file(
    path: &Path,
    scopes: &[String],
) -> Result<Arc<dyn Credentials>, AuthError> {
    let invalid = |source| AuthError::InvalidCredentialsFile {
        path: path.to_path_buf(),
        source,
    };

    let content = fs::read(path).map_err(|source| AuthError::ReadCredentialsFile {
        path: path.to_path_buf(),
        source,
    })?;

    let value: serde_json::Value = serde_json::from_slice(&content).map_err(invalid)?;
    let header = FileHeader::deserialize(&value).map_err(invalid)?;

    match header.kind.as_str() {
        "service_account" => {
            let key = ServiceAccountKey::deserialize(&value).map_err(invalid)?;
            debug!(
                path = %path.display(),
                client_email = %key.client_email,
                "Loaded service account credentials"
            );
            Ok(Arc::new(ServiceAccountCredentials::new(key, scopes)?))
        }
        "authorized_user" => {
            let key = AuthorizedUserKey::deserialize(&value).map_err(invalid)?;
            debug!(
                path = %path.display(),
                client_id = %key.client_id,
                "Loaded authorized user credentials"
            );
            Ok(Arc::new(AuthorizedUserCredentials::new(key)?))
        }
        other => Err(AuthError::UnsupportedCredentialsType(other.to_string())),
    }
}

/// The default [`CredentialsProvider`]: application default credentials.
#[derive(Debug, Clone, Default)]
pub struct ApplicationDefault {
    credentials_file: Option<PathBuf>,
    well_known_file: Option<PathBuf>,
    metadata_host: Option<String>,
}

impl ApplicationDefault {
    /// Creates a provider with explicit discovery locations.
    ///
    /// # Arguments
    ///
    /// * `credentials_file` - The value `GOOGLE_APPLICATION_CREDENTIALS` would hold.
    /// * `well_known_file` - The gcloud application default credentials file.
    ///
    /// The metadata server is not consulted unless [`ApplicationDefault::with_metadata_host`]
    /// names one.
    pub fn new(credentials_file: Option<PathBuf>, well_known_file: Option<PathBuf>) -> Self {
        Self {
            credentials_file,
            well_known_file,
            metadata_host: None,
        }
    }

    /// Falls back to the metadata server at `host` when no credentials file is found.
    pub fn with_metadata_host(mut self, host: impl Into<String>) -> Self {
        self.metadata_host = Some(host.into());
        self
    }

    /// Creates a provider reading its discovery locations from the process environment.
    ///
    /// On a Google Cloud VM the default metadata server is used as the last resort.
    pub fn from_env() -> Self {
        let provider = Self::from_lookup(|key| std::env::var(key).ok());

        if provider.metadata_host.is_none() && metadata_server::on_google_cloud() {
            return provider.with_metadata_host(DEFAULT_METADATA_HOST);
        }
        provider
    }

    /// Creates a provider reading its discovery locations through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty());

        Self {
            credentials_file: non_empty(CREDENTIALS_ENV_VAR).map(PathBuf::from),
            well_known_file: well_known_file(&lookup),
            metadata_host: non_empty(METADATA_HOST_ENV_VAR),
        }
    }
}

impl CredentialsProvider for ApplicationDefault {
    fn load_from_file(
        &self,
        path: &Path,
        scopes: &[String],
    ) -> Result<Arc<dyn Credentials>, AuthError> {
        load_credentials_from_file(path, scopes)
    }

    fn default_credentials(&self, scopes: &[String]) -> Result<Arc<dyn Credentials>, AuthError> {
        // An explicit variable pointing nowhere is an error, not a reason to keep looking.
        if let Some(path) = &self.credentials_file {
            debug!(path = %path.display(), "Using credentials from {CREDENTIALS_ENV_VAR}");
            return load_credentials_from_file(path, scopes);
        }

        if let Some(path) = self.well_known_file.as_ref().filter(|path| path.is_file()) {
            debug!(path = %path.display(), "Using gcloud application default credentials");
            return load_credentials_from_file(path, scopes);
        }

        match &self.metadata_host {
            Some(host) => {
                debug!(host = %host, "Using metadata server credentials");
                Ok(Arc::new(MetadataServerCredentials::new(host.clone(), scopes)?))
            }
            None => Err(AuthError::DefaultCredentialsNotFound),
        }
    }
}

fn well_known_file(lookup: &impl Fn(&str) -> Option<String>) -> Option<PathBuf> {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.is_empty()).map(PathBuf::from);

    let config_dir = non_empty("CLOUDSDK_CONFIG").or_else(|| {
        if cfg!(windows) {
            non_empty("APPDATA").map(|dir| dir.join("gcloud"))
        } else {
            non_empty("HOME").map(|dir| dir.join(".config").join("gcloud"))
        }
    })?;

    Some(config_dir.join(WELL_KNOWN_FILE))
}
