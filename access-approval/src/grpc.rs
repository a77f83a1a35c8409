//! # Generic gRPC Transport
//!
//! This module contains the low-level building block used by the dispatch table: a unary call
//! bound once to a channel, a wire path and a codec.
//!
//! Serialization is a type parameter of each bound call rather than logic of this crate. The
//! transport binds every operation to a `tonic_prost::ProstCodec` over its request and response
//! messages.
pub mod unary;
