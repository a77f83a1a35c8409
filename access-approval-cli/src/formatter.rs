use access_approval::{TransportError, tonic::Status};
use colored::*;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

/// The name of a resource that was deleted.
pub struct Deleted(pub String);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<String> for FormattedString {
    fn from(value: String) -> Self {
        FormattedString(value)
    }
}

impl From<Deleted> for FormattedString {
    fn from(Deleted(name): Deleted) -> Self {
        FormattedString(format!("{} {}", "Deleted".green().bold(), name))
    }
}

impl From<Status> for FormattedString {
    fn from(status: Status) -> Self {
        FormattedString(format!(
            "{} code={:?} message={:?}",
            "gRPC Failed:".red().bold(),
            status.code(),
            status.message()
        ))
    }
}

impl From<anyhow::Error> for FormattedString {
    fn from(err: anyhow::Error) -> Self {
        let title = match err.downcast_ref::<TransportError>() {
            Some(TransportError::Auth(_)) => "Authentication Error:",
            Some(TransportError::MutualTls(_) | TransportError::Tls(_)) => "TLS Error:",
            Some(_) => "Connection Error:",
            None => "Error:",
        };

        FormattedString(format!("{}\n\n'{:#}'", title.red().bold(), err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use access_approval::auth::AuthError;

    #[test]
    fn status_shows_code_and_message() {
        colored::control::set_override(false);

        let formatted = FormattedString::from(Status::not_found("no such request"));

        assert_eq!(
            formatted.0,
            "gRPC Failed: code=NotFound message=\"no such request\""
        );
    }

    #[test]
    fn transport_errors_are_titled_by_kind() {
        colored::control::set_override(false);

        let err = anyhow::Error::from(TransportError::Auth(AuthError::DefaultCredentialsNotFound));
        assert!(FormattedString::from(err).0.starts_with("Authentication Error:"));

        let err = anyhow::Error::from(TransportError::DuplicateCredentialArgs);
        assert!(FormattedString::from(err).0.starts_with("Connection Error:"));
    }
}
