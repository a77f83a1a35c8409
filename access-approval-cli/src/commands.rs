//! # Command Execution
//!
//! Turns the parsed command line into one call on an [`AccessApprovalGrpcTransport`]:
//!
//! 1. **Options**: [`ConnectionArgs`] are layered over [`TransportOptions::from_env`].
//! 2. **Request**: the subcommand is converted into the typed request message.
//! 3. **Dispatch**: the request is sent through the matching bound call of the transport.
//!
//! Server errors are not failures of the tool itself, so they are handed back inside
//! [`Output`] instead of the `anyhow` error.
use crate::cli::{Commands, ConnectionArgs};
use access_approval::{
    AccessApprovalGrpcTransport, ClientCertSource, TransportOptions,
    auth::AccessToken,
    model::{
        AccessApprovalSettings, ApproveApprovalRequestMessage, DeleteAccessApprovalSettingsMessage,
        DismissApprovalRequestMessage, EnrolledService, EnrollmentLevel,
        GetAccessApprovalSettingsMessage, GetApprovalRequestMessage, ListApprovalRequestsMessage,
        UpdateAccessApprovalSettingsMessage,
    },
    prost_types::{FieldMask, Timestamp},
    tonic::{Response, Status},
};
use std::{fmt::Debug, sync::Arc};

pub enum Output {
    /// A response message, pretty printed.
    Message(Result<String, Status>),
    /// The name of a deleted resource.
    Deleted(Result<String, Status>),
}

impl ConnectionArgs {
    /// Builds the transport options, with the flags taking precedence over the environment.
    pub fn into_options(self) -> TransportOptions {
        let mut options = TransportOptions::from_env().with_host(self.host);

        if let Some(token) = self.access_token {
            options = options.with_credentials(Arc::new(AccessToken::new(token)));
        }
        if let Some(path) = self.credentials_file {
            options = options.with_credentials_file(path);
        }
        if let Some(project) = self.quota_project {
            options = options.with_quota_project_id(project);
        }
        if !self.scopes.is_empty() {
            options = options.with_scopes(self.scopes);
        }
        if let Some(endpoint) = self.mtls_endpoint {
            options = options.with_api_mtls_endpoint(endpoint);
        }
        if let (Some(cert), Some(key)) = (self.client_cert, self.client_key) {
            options = options.with_client_cert_source(ClientCertSource::from_files(cert, key));
        }

        options
    }
}

/// Executes `command` against the Access Approval service.
pub async fn run(connection: ConnectionArgs, command: Commands) -> anyhow::Result<Output> {
    let options = connection.into_options();
    tracing::debug!(?options, "Creating transport");

    let transport = AccessApprovalGrpcTransport::new(options)?;

    let output = match command {
        Commands::List {
            parent,
            filter,
            page_size,
            page_token,
        } => {
            let request = ListApprovalRequestsMessage {
                parent,
                filter,
                page_size,
                page_token,
            };
            message(transport.list_approval_requests().call(request).await)
        }
        Commands::Get { name } => {
            let request = GetApprovalRequestMessage { name };
            message(transport.get_approval_request().call(request).await)
        }
        Commands::Approve { name, expire_time } => {
            let request = ApproveApprovalRequestMessage {
                name,
                expire_time: expire_time.map(|seconds| Timestamp { seconds, nanos: 0 }),
            };
            message(transport.approve_approval_request().call(request).await)
        }
        Commands::Dismiss { name } => {
            let request = DismissApprovalRequestMessage { name };
            message(transport.dismiss_approval_request().call(request).await)
        }
        Commands::GetSettings { name } => {
            let request = GetAccessApprovalSettingsMessage { name };
            message(transport.get_access_approval_settings().call(request).await)
        }
        Commands::UpdateSettings {
            name,
            notification_emails,
            enrolled_services,
            update_mask,
        } => {
            let request = update_settings_request(
                name,
                notification_emails,
                enrolled_services,
                update_mask,
            );
            message(transport.update_access_approval_settings().call(request).await)
        }
        Commands::DeleteSettings { name } => {
            let request = DeleteAccessApprovalSettingsMessage { name: name.clone() };
            let result = transport.delete_access_approval_settings().call(request).await;
            Output::Deleted(result.map(|_| name))
        }
    };

    Ok(output)
}

fn message<T: Debug>(result: Result<Response<T>, Status>) -> Output {
    Output::Message(result.map(|response| format!("{:#?}", response.into_inner())))
}

fn update_settings_request(
    name: String,
    notification_emails: Vec<String>,
    enrolled_services: Vec<String>,
    mut update_mask: Vec<String>,
) -> UpdateAccessApprovalSettingsMessage {
    if update_mask.is_empty() {
        if !notification_emails.is_empty() {
            update_mask.push("notification_emails".to_string());
        }
        if !enrolled_services.is_empty() {
            update_mask.push("enrolled_services".to_string());
        }
    }

    let enrolled_services = enrolled_services
        .into_iter()
        .map(|cloud_product| EnrolledService {
            cloud_product,
            enrollment_level: EnrollmentLevel::BlockAll as i32,
        })
        .collect();

    UpdateAccessApprovalSettingsMessage {
        settings: Some(AccessApprovalSettings {
            name,
            notification_emails,
            enrolled_services,
            enrolled_ancestor: false,
        }),
        update_mask: (!update_mask.is_empty()).then_some(FieldMask { paths: update_mask }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_mask_defaults_to_the_given_fields() {
        let request = update_settings_request(
            "projects/p/accessApprovalSettings".to_string(),
            vec!["a@example.com".to_string()],
            vec![],
            vec![],
        );

        assert_eq!(
            request.update_mask.unwrap().paths,
            vec!["notification_emails".to_string()]
        );
    }

    #[test]
    fn enrolled_services_block_all() {
        let request = update_settings_request(
            "projects/p/accessApprovalSettings".to_string(),
            vec![],
            vec!["all".to_string()],
            vec!["enrolled_services".to_string()],
        );

        let settings = request.settings.unwrap();
        assert_eq!(settings.enrolled_services.len(), 1);
        assert_eq!(
            settings.enrolled_services[0].enrollment_level,
            EnrollmentLevel::BlockAll as i32
        );
    }

    #[test]
    fn nothing_to_update_sends_no_mask() {
        let request = update_settings_request(
            "projects/p/accessApprovalSettings".to_string(),
            vec![],
            vec![],
            vec![],
        );

        assert!(request.update_mask.is_none());
    }
}
