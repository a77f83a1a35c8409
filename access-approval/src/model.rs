//! # Message Model
//!
//! Protobuf messages of the `google.cloud.accessapproval.v1` package.
//!
//! The Rust sources under `src/generated` are produced from
//! `proto/google/cloud/accessapproval/v1/accessapproval.proto` by the
//! `generate-access-approval` binary (`gen-proto` feature) and checked in, so
//! building this crate does not require `protoc`.
//!
//! `google.protobuf.Empty` maps to `()` and the other well known types come
//! from [`prost_types`].
#[allow(clippy::all)]
mod generated {
    include!("generated/google.cloud.accessapproval.v1.rs");
}

pub use generated::*;
