//! # CLI
//!
//! This module defines the command-line interface of `access-approval` using `clap`.
//!
//! Connection flags are global and map one to one onto
//! [`TransportOptions`](access_approval::TransportOptions). Each subcommand maps onto one remote
//! operation.
use access_approval::DEFAULT_HOST;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "access-approval", version, about = "Cloud Access Approval CLI")]
pub struct Cli {
    #[command(flatten)]
    pub connection: ConnectionArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args)]
pub struct ConnectionArgs {
    /// The service host. Prefix with http:// to connect without TLS (e.g. a local emulator)
    #[arg(long, global = true, env = "ACCESS_APPROVAL_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Path to a service account key file. Application default credentials are used otherwise
    #[arg(long, global = true)]
    pub credentials_file: Option<PathBuf>,

    /// A bearer token to authenticate with (e.g. the output of `gcloud auth print-access-token`)
    #[arg(long, global = true, env = "ACCESS_APPROVAL_ACCESS_TOKEN", hide_env_values = true)]
    pub access_token: Option<String>,

    /// The project billed for quota
    #[arg(long, global = true)]
    pub quota_project: Option<String>,

    /// Connect to this mutual TLS endpoint instead of the host
    #[arg(long, global = true)]
    pub mtls_endpoint: Option<String>,

    /// PEM client certificate chain presented to the mutual TLS endpoint
    #[arg(long, global = true, requires = "client_key")]
    pub client_cert: Option<PathBuf>,

    /// PEM private key of the client certificate
    #[arg(long, global = true, requires = "client_cert")]
    pub client_key: Option<PathBuf>,

    /// OAuth scope to request. Can be repeated
    #[arg(long = "scope", global = true)]
    pub scopes: Vec<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List approval requests of a project, folder or organization
    ///
    /// ## Examples:
    ///
    /// ```bash
    /// access-approval list projects/my-project --filter ALL
    /// ```
    List {
        /// The parent resource (e.g. projects/my-project)
        parent: String,
        /// One of PENDING (default), ACTIVE, DISMISSED, HISTORY or ALL
        #[arg(long, default_value = "")]
        filter: String,
        #[arg(long, default_value_t = 0)]
        page_size: i32,
        #[arg(long, default_value = "")]
        page_token: String,
    },

    /// Get an approval request
    Get {
        /// Approval request name (e.g. projects/my-project/approvalRequests/1234)
        name: String,
    },

    /// Approve a pending approval request
    Approve {
        /// Approval request name
        name: String,
        /// When the approval expires, in seconds since the Unix epoch
        #[arg(long)]
        expire_time: Option<i64>,
    },

    /// Dismiss a pending approval request
    Dismiss {
        /// Approval request name
        name: String,
    },

    /// Get the Access Approval settings of a resource
    GetSettings {
        /// Settings name (e.g. projects/my-project/accessApprovalSettings)
        name: String,
    },

    /// Update the Access Approval settings of a resource
    ///
    /// Only the fields named by `--update-mask` are changed. Without a mask, the fields given on
    /// the command line are updated.
    UpdateSettings {
        /// Settings name
        name: String,
        /// Email address notified of new approval requests. Can be repeated
        #[arg(long = "notification-email")]
        notification_emails: Vec<String>,
        /// Cloud product to enroll with the BLOCK_ALL level (e.g. all, compute.googleapis.com).
        /// Can be repeated
        #[arg(long = "enroll")]
        enrolled_services: Vec<String>,
        /// Comma separated field paths to update
        #[arg(long, value_delimiter = ',')]
        update_mask: Vec<String>,
    },

    /// Delete the Access Approval settings of a resource
    DeleteSettings {
        /// Settings name
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn connection_flags_are_global() {
        let cli = Cli::try_parse_from([
            "access-approval",
            "get",
            "projects/p/approvalRequests/1",
            "--host",
            "http://localhost:9000",
            "--scope",
            "a",
            "--scope",
            "b",
        ])
        .unwrap();

        assert_eq!(cli.connection.host, "http://localhost:9000");
        assert_eq!(cli.connection.scopes, vec!["a", "b"]);
        assert!(matches!(cli.command, Commands::Get { name } if name == "projects/p/approvalRequests/1"));
    }

    #[test]
    fn client_cert_requires_a_key() {
        let result = Cli::try_parse_from([
            "access-approval",
            "--client-cert",
            "cert.pem",
            "dismiss",
            "projects/p/approvalRequests/1",
        ]);

        assert!(result.is_err());
    }

    #[test]
    fn update_mask_is_comma_separated() {
        let cli = Cli::try_parse_from([
            "access-approval",
            "update-settings",
            "projects/p/accessApprovalSettings",
            "--notification-email",
            "a@example.com",
            "--update-mask",
            "notification_emails,enrolled_services",
        ])
        .unwrap();

        match cli.command {
            Commands::UpdateSettings {
                update_mask,
                notification_emails,
                ..
            } => {
                assert_eq!(update_mask, vec!["notification_emails", "enrolled_services"]);
                assert_eq!(notification_emails, vec!["a@example.com"]);
            }
            _ => panic!("Expected update-settings"),
        }
    }
}
