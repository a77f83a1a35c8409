//! # Bound Unary Call
//!
//! A [`UnaryCall`] is the dispatch entry of one remote operation. It is built once per transport
//! and operation, and then invoked any number of times.
//!
//! ## How it works
//!
//! The call keeps its own `tonic::client::Grpc` handle over a clone of the transport channel,
//! the fixed HTTP/2 path of the operation and the codec type that turns the typed request into
//! bytes and the bytes back into the typed response.
//!
//! Errors coming back from the channel or the server are returned as the very `tonic::Status`
//! that was received. Nothing is retried, translated or logged here.
use crate::{BoxError, operation::Operation};
use http::uri::PathAndQuery;
use http_body::Body as HttpBody;
use std::{fmt, marker::PhantomData};
use tonic::{Status, client::GrpcService, codec::Codec};

/// A unary gRPC call bound to a channel, a method path and a codec.
pub struct UnaryCall<S, C> {
    client: tonic::client::Grpc<S>,
    operation: Operation,
    path: PathAndQuery,
    codec: PhantomData<fn() -> C>,
}

impl<S, C> UnaryCall<S, C> {
    /// Binds `operation` to `channel`.
    pub fn new(channel: S, operation: Operation) -> Self {
        Self {
            client: tonic::client::Grpc::new(channel),
            operation,
            path: operation.path(),
            codec: PhantomData,
        }
    }

    /// The remote operation this call is bound to.
    pub fn operation(&self) -> Operation {
        self.operation
    }

    /// The HTTP/2 path every request of this call is sent to.
    pub fn path(&self) -> &PathAndQuery {
        &self.path
    }
}

impl<S, C> UnaryCall<S, C>
where
    S: GrpcService<tonic::body::Body> + Clone,
    S::Error: Into<BoxError>,
    S::ResponseBody: HttpBody<Data = tonic::codegen::Bytes> + Send + 'static,
    <S::ResponseBody as HttpBody>::Error: Into<BoxError> + Send,
    C: Codec + Default,
    C::Encode: Send + Sync + 'static,
    C::Decode: Send + Sync + 'static,
{
    /// Sends `request` over the channel and waits for the single response.
    ///
    /// # Returns
    ///
    /// * `Ok(Response)` - The decoded response message, with the response metadata.
    /// * `Err(Status)` - The status returned by the channel or the server, unchanged.
    pub async fn call(
        &self,
        request: impl tonic::IntoRequest<C::Encode>,
    ) -> Result<tonic::Response<C::Decode>, Status> {
        // Grpc handles are cheap to clone and each call needs its own mutable one.
        let mut client = self.client.clone();

        client.ready().await.map_err(|e| {
            let e: BoxError = e.into();
            Status::unknown(format!("Service was not ready: {e}"))
        })?;

        client
            .unary(request.into_request(), self.path.clone(), C::default())
            .await
    }
}

impl<S: Clone, C> Clone for UnaryCall<S, C> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            operation: self.operation,
            path: self.path.clone(),
            codec: PhantomData,
        }
    }
}

impl<S, C> fmt::Debug for UnaryCall<S, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UnaryCall")
            .field("operation", &self.operation)
            .field("path", &self.path)
            .finish()
    }
}
