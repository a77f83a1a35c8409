//! # Access Approval
//!
//! `access-approval` is a gRPC transport binding for the Cloud Access Approval API
//! (`google.cloud.accessapproval.v1.AccessApproval`). It turns typed request messages into
//! unary gRPC calls and hands back the typed responses.
//!
//! The approval workflow itself (states, expiration, settings inheritance) lives on the
//! server. This crate only moves messages.
//!
//! ## Key Components
//!
//! * **[`AccessApprovalGrpcTransport`]:** The main entry point. It resolves credentials, builds
//!   the channel and exposes one cached [`UnaryCall`] per remote operation.
//! * **[`TransportOptions`]:** Construction parameters (host, credentials, scopes, mutual TLS,
//!   quota project).
//! * **[`auth`]:** Credential handles and the ambient credential discovery used when the caller
//!   does not provide any.
//! * **[`model`]:** The protobuf messages exchanged with the service.
//!
//! ## Example
//!
//! ```rust,no_run
//! use access_approval::{AccessApprovalGrpcTransport, TransportOptions};
//! use access_approval::model::GetApprovalRequestMessage;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = AccessApprovalGrpcTransport::new(TransportOptions::default())?;
//!
//! let request = GetApprovalRequestMessage {
//!     name: "projects/my-project/approvalRequests/1234".to_string(),
//! };
//!
//! let approval = transport.get_approval_request().call(request).await?;
//! println!("{:?}", approval.into_inner());
//! # Ok(())
//! # }
//! ```
//!
//! ## Feature Flags (Internal use only)
//!
//! * `gen-proto`: Enables the binary that regenerates the message model from the `.proto` source.
//!
//! ## Re-exports
//!
//! This crate re-exports `prost`, `prost-types` and `tonic` to ensure that consumers
//! use compatible versions of these underlying dependencies.
pub mod auth;
pub mod grpc;
pub mod model;
pub mod operation;
pub mod transport;

pub use grpc::unary::UnaryCall;
pub use operation::Operation;
pub use transport::{
    AUTH_SCOPES, AccessApprovalGrpcTransport, ClientCertSource, DEFAULT_HOST, TransportError,
    TransportOptions,
};

// Re-exports
pub use prost;
pub use prost_types;
pub use tonic;

/// Type alias for the standard boxed error used in generic bounds.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;
