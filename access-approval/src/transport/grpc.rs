use super::{
    TransportError, TransportOptions,
    channel::{self, AuthenticatedChannel},
    credentials,
};
use crate::{grpc::unary::UnaryCall, model::*, operation::Operation};
use std::{fmt, sync::OnceLock};
use tonic_prost::ProstCodec;
use tracing::debug;

pub type ListApprovalRequestsCall<S> =
    UnaryCall<S, ProstCodec<ListApprovalRequestsMessage, ListApprovalRequestsResponse>>;
pub type GetApprovalRequestCall<S> =
    UnaryCall<S, ProstCodec<GetApprovalRequestMessage, ApprovalRequest>>;
pub type ApproveApprovalRequestCall<S> =
    UnaryCall<S, ProstCodec<ApproveApprovalRequestMessage, ApprovalRequest>>;
pub type DismissApprovalRequestCall<S> =
    UnaryCall<S, ProstCodec<DismissApprovalRequestMessage, ApprovalRequest>>;
pub type GetAccessApprovalSettingsCall<S> =
    UnaryCall<S, ProstCodec<GetAccessApprovalSettingsMessage, AccessApprovalSettings>>;
pub type UpdateAccessApprovalSettingsCall<S> =
    UnaryCall<S, ProstCodec<UpdateAccessApprovalSettingsMessage, AccessApprovalSettings>>;
pub type DeleteAccessApprovalSettingsCall<S> =
    UnaryCall<S, ProstCodec<DeleteAccessApprovalSettingsMessage, ()>>;

/// One once-cell per operation.
struct Stubs<S> {
    list_approval_requests: OnceLock<ListApprovalRequestsCall<S>>,
    get_approval_request: OnceLock<GetApprovalRequestCall<S>>,
    approve_approval_request: OnceLock<ApproveApprovalRequestCall<S>>,
    dismiss_approval_request: OnceLock<DismissApprovalRequestCall<S>>,
    get_access_approval_settings: OnceLock<GetAccessApprovalSettingsCall<S>>,
    update_access_approval_settings: OnceLock<UpdateAccessApprovalSettingsCall<S>>,
    delete_access_approval_settings: OnceLock<DeleteAccessApprovalSettingsCall<S>>,
}

impl<S> Default for Stubs<S> {
    fn default() -> Self {
        Self {
            list_approval_requests: OnceLock::new(),
            get_approval_request: OnceLock::new(),
            approve_approval_request: OnceLock::new(),
            dismiss_approval_request: OnceLock::new(),
            get_access_approval_settings: OnceLock::new(),
            update_access_approval_settings: OnceLock::new(),
            delete_access_approval_settings: OnceLock::new(),
        }
    }
}

/// gRPC transport for the Access Approval service.
///
/// Owns a single channel and a dispatch table holding one [`UnaryCall`] per remote operation.
/// Entries are bound on first access and returned from the table afterwards; they are never
/// replaced. The table is safe to populate from several threads at once: every caller observes
/// the same entry.
///
/// Calls return the `tonic::Status` produced by the channel or the server as is. Approval
/// semantics (for instance `NOT_FOUND` or `FAILED_PRECONDITION` on approve) are decided by the
/// server.
pub struct AccessApprovalGrpcTransport<S = AuthenticatedChannel> {
    host: String,
    channel: S,
    stubs: Stubs<S>,
}

impl AccessApprovalGrpcTransport {
    /// Resolves credentials and builds an authenticated channel from `options`.
    ///
    /// The channel connects lazily, so this must run inside a Tokio runtime but does not touch
    /// the network.
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - The transport, with an empty dispatch table.
    /// * `Err(TransportError)` - Conflicting credential arguments, no usable credentials, or
    ///   TLS material that could not be assembled.
    pub fn new(options: TransportOptions) -> Result<Self, TransportError> {
        let resolved = credentials::resolve_credentials(&options)?;
        let (host, built) = channel::build_channel(&options)?;

        Ok(Self {
            host,
            channel: channel::authenticate(built, resolved),
            stubs: Stubs::default(),
        })
    }
}

impl<S> AccessApprovalGrpcTransport<S>
where
    S: Clone,
{
    /// Uses `channel` as is. Credential resolution and channel construction are skipped, the
    /// channel is expected to carry its own authentication.
    ///
    /// `options` are only checked for conflicting credential arguments and used for the host.
    pub fn with_channel(channel: S, options: TransportOptions) -> Result<Self, TransportError> {
        credentials::check_credential_args(&options)?;
        debug!(host = %options.host, "Using injected channel, skipping credential resolution");

        Ok(Self {
            host: channel::with_default_port(&options.host),
            channel,
            stubs: Stubs::default(),
        })
    }

    /// Uses `channel` as is, against the default host.
    pub fn from_channel(channel: S) -> Self {
        Self {
            host: channel::with_default_port(super::DEFAULT_HOST),
            channel,
            stubs: Stubs::default(),
        }
    }

    /// The channel every call is sent over.
    pub fn channel(&self) -> &S {
        &self.channel
    }

    /// The host the channel targets, including the port.
    pub fn host(&self) -> &str {
        &self.host
    }

    fn bind<C>(&self, operation: Operation) -> UnaryCall<S, C> {
        debug!(
            operation = %operation,
            accessor = operation.accessor_name(),
            "Binding dispatch entry"
        );
        UnaryCall::new(self.channel.clone(), operation)
    }

    /// Lists approval requests associated with a project, folder, or organization.
    ///
    /// Approval requests can be filtered by state (pending, active, dismissed). The order is
    /// reverse chronological.
    pub fn list_approval_requests(&self) -> &ListApprovalRequestsCall<S> {
        self.stubs
            .list_approval_requests
            .get_or_init(|| self.bind(Operation::ListApprovalRequests))
    }

    /// Gets an approval request. Returns `NOT_FOUND` if the request does not exist.
    pub fn get_approval_request(&self) -> &GetApprovalRequestCall<S> {
        self.stubs
            .get_approval_request
            .get_or_init(|| self.bind(Operation::GetApprovalRequest))
    }

    /// Approves a request and returns the updated `ApprovalRequest`.
    ///
    /// Returns `NOT_FOUND` if the request does not exist, and `FAILED_PRECONDITION` if the
    /// request exists but is not in a pending state.
    pub fn approve_approval_request(&self) -> &ApproveApprovalRequestCall<S> {
        self.stubs
            .approve_approval_request
            .get_or_init(|| self.bind(Operation::ApproveApprovalRequest))
    }

    /// Dismisses a request and returns the updated `ApprovalRequest`.
    ///
    /// Dismissing only records that the customer does not wish to act on the request. A
    /// dismissed request can still be approved. Pending requests not acted upon are dismissed
    /// by the server after 14 days.
    ///
    /// Returns `NOT_FOUND` if the request does not exist, and `FAILED_PRECONDITION` if the
    /// request exists but is not in a pending state.
    pub fn dismiss_approval_request(&self) -> &DismissApprovalRequestCall<S> {
        self.stubs
            .dismiss_approval_request
            .get_or_init(|| self.bind(Operation::DismissApprovalRequest))
    }

    /// Gets the settings associated with a project, folder, or organization.
    pub fn get_access_approval_settings(&self) -> &GetAccessApprovalSettingsCall<S> {
        self.stubs
            .get_access_approval_settings
            .get_or_init(|| self.bind(Operation::GetAccessApprovalSettings))
    }

    /// Updates the settings associated with a project, folder, or organization.
    ///
    /// Settings to update are determined by the value of `update_mask`.
    pub fn update_access_approval_settings(&self) -> &UpdateAccessApprovalSettingsCall<S> {
        self.stubs
            .update_access_approval_settings
            .get_or_init(|| self.bind(Operation::UpdateAccessApprovalSettings))
    }

    /// Deletes the settings associated with a project, folder, or organization.
    ///
    /// This only deletes the settings at that level: inherited settings still apply afterwards.
    /// If the resource is an organization, `FAILED_PRECONDITION` is returned.
    pub fn delete_access_approval_settings(&self) -> &DeleteAccessApprovalSettingsCall<S> {
        self.stubs
            .delete_access_approval_settings
            .get_or_init(|| self.bind(Operation::DeleteAccessApprovalSettings))
    }

    /// The operations whose dispatch entry has been bound, in declaration order.
    pub fn cached_operations(&self) -> Vec<Operation> {
        let stubs = &self.stubs;
        let bound = [
            stubs.list_approval_requests.get().is_some(),
            stubs.get_approval_request.get().is_some(),
            stubs.approve_approval_request.get().is_some(),
            stubs.dismiss_approval_request.get().is_some(),
            stubs.get_access_approval_settings.get().is_some(),
            stubs.update_access_approval_settings.get().is_some(),
            stubs.delete_access_approval_settings.get().is_some(),
        ];

        Operation::ALL
            .into_iter()
            .zip(bound)
            .filter_map(|(operation, bound)| bound.then_some(operation))
            .collect()
    }
}

impl<S: fmt::Debug + Clone> fmt::Debug for AccessApprovalGrpcTransport<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessApprovalGrpcTransport")
            .field("host", &self.host)
            .field("channel", &self.channel)
            .field("cached_operations", &self.cached_operations())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone)]
    struct NoChannel;

    #[test]
    fn entries_are_bound_on_first_access_only() {
        let transport = AccessApprovalGrpcTransport::from_channel(NoChannel);
        assert!(transport.cached_operations().is_empty());

        let first = transport.approve_approval_request();
        let second = transport.approve_approval_request();

        assert!(std::ptr::eq(first, second));
        assert_eq!(
            transport.cached_operations(),
            vec![Operation::ApproveApprovalRequest]
        );
    }

    #[test]
    fn entries_carry_their_operation_path() {
        let transport = AccessApprovalGrpcTransport::from_channel(NoChannel);

        assert_eq!(
            transport.delete_access_approval_settings().path().as_str(),
            "/google.cloud.accessapproval.v1.AccessApproval/DeleteAccessApprovalSettings"
        );
        assert_eq!(
            transport.list_approval_requests().operation(),
            Operation::ListApprovalRequests
        );
    }

    #[test]
    fn injected_channel_host_gets_the_default_port() {
        let transport = AccessApprovalGrpcTransport::from_channel(NoChannel);
        assert_eq!(transport.host(), "accessapproval.googleapis.com:443");

        let transport = AccessApprovalGrpcTransport::with_channel(
            NoChannel,
            TransportOptions::default().with_host("localhost:8080"),
        )
        .unwrap();
        assert_eq!(transport.host(), "localhost:8080");
    }
}
