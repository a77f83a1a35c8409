//! # Remote Operations
//!
//! The closed set of unary methods exposed by `google.cloud.accessapproval.v1.AccessApproval`.
//!
//! Every [`Operation`] owns a fixed wire path of the form `/<package>.<Service>/<Method>`,
//! which is what the dispatch table binds its calls to.
use http::uri::PathAndQuery;
use std::{fmt, str::FromStr};

/// Fully qualified name of the remote service.
pub const SERVICE_NAME: &str = "google.cloud.accessapproval.v1.AccessApproval";

/// One remote procedure of the Access Approval service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Operation {
    ListApprovalRequests,
    GetApprovalRequest,
    ApproveApprovalRequest,
    DismissApprovalRequest,
    GetAccessApprovalSettings,
    UpdateAccessApprovalSettings,
    DeleteAccessApprovalSettings,
}

impl Operation {
    /// All operations, in declaration order of the service.
    pub const ALL: [Operation; 7] = [
        Operation::ListApprovalRequests,
        Operation::GetApprovalRequest,
        Operation::ApproveApprovalRequest,
        Operation::DismissApprovalRequest,
        Operation::GetAccessApprovalSettings,
        Operation::UpdateAccessApprovalSettings,
        Operation::DeleteAccessApprovalSettings,
    ];

    /// The method name as declared in the protobuf service (e.g. `GetApprovalRequest`).
    pub const fn method_name(self) -> &'static str {
        match self {
            Operation::ListApprovalRequests => "ListApprovalRequests",
            Operation::GetApprovalRequest => "GetApprovalRequest",
            Operation::ApproveApprovalRequest => "ApproveApprovalRequest",
            Operation::DismissApprovalRequest => "DismissApprovalRequest",
            Operation::GetAccessApprovalSettings => "GetAccessApprovalSettings",
            Operation::UpdateAccessApprovalSettings => "UpdateAccessApprovalSettings",
            Operation::DeleteAccessApprovalSettings => "DeleteAccessApprovalSettings",
        }
    }

    /// The name of the transport accessor bound to this operation (e.g. `get_approval_request`).
    pub const fn accessor_name(self) -> &'static str {
        match self {
            Operation::ListApprovalRequests => "list_approval_requests",
            Operation::GetApprovalRequest => "get_approval_request",
            Operation::ApproveApprovalRequest => "approve_approval_request",
            Operation::DismissApprovalRequest => "dismiss_approval_request",
            Operation::GetAccessApprovalSettings => "get_access_approval_settings",
            Operation::UpdateAccessApprovalSettings => "update_access_approval_settings",
            Operation::DeleteAccessApprovalSettings => "delete_access_approval_settings",
        }
    }

    /// The HTTP/2 path of the method (e.g. `/google.cloud.accessapproval.v1.AccessApproval/GetApprovalRequest`).
    pub fn path(self) -> PathAndQuery {
        let path = format!("/{}/{}", SERVICE_NAME, self.method_name());
        PathAndQuery::from_str(&path).expect("valid gRPC path")
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", SERVICE_NAME, self.method_name())
    }
}
