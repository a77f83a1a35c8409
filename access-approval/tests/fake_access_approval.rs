#![allow(dead_code)]

use access_approval::model::{
    AccessApprovalSettings, ApprovalRequest, ApproveApprovalRequestMessage, ApproveDecision,
    DeleteAccessApprovalSettingsMessage, DismissApprovalRequestMessage, DismissDecision,
    GetAccessApprovalSettingsMessage, GetApprovalRequestMessage, ListApprovalRequestsMessage,
    ListApprovalRequestsResponse, UpdateAccessApprovalSettingsMessage, approval_request::Decision,
};
use access_approval::prost::Message;
use std::collections::BTreeMap;
use std::convert::Infallible;
use std::future::{Ready, ready};
use std::sync::{Arc, Mutex};
use std::task::{Context, Poll};
use tonic::codegen::{Body, BoxFuture, StdError, http};
use tonic::{Request, Response, Status};
use tonic_prost::ProstCodec;

const SERVICE: &str = "/google.cloud.accessapproval.v1.AccessApproval/";

/// A call as observed by the fake server.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub path: String,
    pub authorization: Option<String>,
    pub quota_project: Option<String>,
}

#[derive(Default)]
pub struct State {
    pub requests: BTreeMap<String, ApprovalRequest>,
    pub settings: BTreeMap<String, AccessApprovalSettings>,
    pub calls: Vec<RecordedCall>,
}

/// In-memory Access Approval service, used as the channel of a transport.
///
/// It mimics the documented server behavior closely enough to exercise the transport:
/// `NOT_FOUND` for unknown names and `FAILED_PRECONDITION` when acting on a decided request
/// or deleting organization settings.
#[derive(Clone, Default)]
pub struct FakeAccessApproval {
    state: Arc<Mutex<State>>,
}

impl FakeAccessApproval {
    pub fn with_pending_request(self, name: &str) -> Self {
        let request = ApprovalRequest {
            name: name.to_string(),
            requested_resource_name: "//compute.googleapis.com/projects/p/zones/z/instances/i"
                .to_string(),
            ..Default::default()
        };
        self.state
            .lock()
            .unwrap()
            .requests
            .insert(name.to_string(), request);
        self
    }

    pub fn with_settings(self, settings: AccessApprovalSettings) -> Self {
        self.state
            .lock()
            .unwrap()
            .settings
            .insert(settings.name.clone(), settings);
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().unwrap().calls.clone()
    }
}

fn not_found(name: &str) -> Status {
    Status::not_found(format!("{name} not found"))
}

fn pending(state: &mut State, name: &str) -> Result<ApprovalRequest, Status> {
    let request = state.requests.get(name).ok_or_else(|| not_found(name))?;
    if request.decision.is_some() {
        return Err(Status::failed_precondition(format!(
            "{name} is not in a pending state"
        )));
    }
    Ok(request.clone())
}

fn list(
    state: &mut State,
    req: ListApprovalRequestsMessage,
) -> Result<ListApprovalRequestsResponse, Status> {
    let prefix = format!("{}/approvalRequests/", req.parent);
    let approval_requests = state
        .requests
        .values()
        .rev()
        .filter(|r| r.name.starts_with(&prefix))
        .filter(|r| match req.filter.as_str() {
            "" | "PENDING" => r.decision.is_none(),
            "ACTIVE" => matches!(r.decision, Some(Decision::Approve(_))),
            "DISMISSED" => matches!(r.decision, Some(Decision::Dismiss(_))),
            _ => true,
        })
        .cloned()
        .collect();

    Ok(ListApprovalRequestsResponse {
        approval_requests,
        next_page_token: String::new(),
    })
}

fn get(state: &mut State, req: GetApprovalRequestMessage) -> Result<ApprovalRequest, Status> {
    state
        .requests
        .get(&req.name)
        .cloned()
        .ok_or_else(|| not_found(&req.name))
}

fn approve(
    state: &mut State,
    req: ApproveApprovalRequestMessage,
) -> Result<ApprovalRequest, Status> {
    let mut request = pending(state, &req.name)?;
    request.decision = Some(Decision::Approve(ApproveDecision {
        approve_time: None,
        expire_time: req.expire_time,
    }));
    state.requests.insert(req.name, request.clone());
    Ok(request)
}

fn dismiss(
    state: &mut State,
    req: DismissApprovalRequestMessage,
) -> Result<ApprovalRequest, Status> {
    let mut request = pending(state, &req.name)?;
    request.decision = Some(Decision::Dismiss(DismissDecision { dismiss_time: None }));
    state.requests.insert(req.name, request.clone());
    Ok(request)
}

fn get_settings(
    state: &mut State,
    req: GetAccessApprovalSettingsMessage,
) -> Result<AccessApprovalSettings, Status> {
    state
        .settings
        .get(&req.name)
        .cloned()
        .ok_or_else(|| not_found(&req.name))
}

fn update_settings(
    state: &mut State,
    req: UpdateAccessApprovalSettingsMessage,
) -> Result<AccessApprovalSettings, Status> {
    let settings = req
        .settings
        .ok_or_else(|| Status::invalid_argument("settings is required"))?;
    state.settings.insert(settings.name.clone(), settings.clone());
    Ok(settings)
}

fn delete_settings(
    state: &mut State,
    req: DeleteAccessApprovalSettingsMessage,
) -> Result<(), Status> {
    if req.name.starts_with("organizations/") {
        return Err(Status::failed_precondition(
            "organization settings cannot be deleted",
        ));
    }
    state
        .settings
        .remove(&req.name)
        .map(|_| ())
        .ok_or_else(|| not_found(&req.name))
}

type Handler<Req, Resp> = fn(&mut State, Req) -> Result<Resp, Status>;

struct Method<Req, Resp> {
    state: Arc<Mutex<State>>,
    handler: Handler<Req, Resp>,
}

impl<Req, Resp> tonic::server::UnaryService<Req> for Method<Req, Resp>
where
    Resp: Send + 'static,
{
    type Response = Resp;
    type Future = Ready<Result<Response<Resp>, Status>>;

    fn call(&mut self, request: Request<Req>) -> Self::Future {
        let mut state = self.state.lock().unwrap();
        ready((self.handler)(&mut state, request.into_inner()).map(Response::new))
    }
}

fn unary<Req, Resp, B>(
    state: Arc<Mutex<State>>,
    handler: Handler<Req, Resp>,
    req: http::Request<B>,
) -> BoxFuture<http::Response<tonic::body::Body>, Infallible>
where
    Req: Message + Default + Send + 'static,
    Resp: Message + Send + 'static,
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    Box::pin(async move {
        let mut grpc = tonic::server::Grpc::new(ProstCodec::<Resp, Req>::default());
        Ok(grpc.unary(Method { state, handler }, req).await)
    })
}

fn header(req: &http::Request<impl Sized>, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

impl<B> tonic::codegen::Service<http::Request<B>> for FakeAccessApproval
where
    B: Body + Send + 'static,
    B::Error: Into<StdError> + Send + 'static,
{
    type Response = http::Response<tonic::body::Body>;
    type Error = Infallible;
    type Future = BoxFuture<Self::Response, Self::Error>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: http::Request<B>) -> Self::Future {
        self.state.lock().unwrap().calls.push(RecordedCall {
            path: req.uri().path().to_string(),
            authorization: header(&req, "authorization"),
            quota_project: header(&req, "x-goog-user-project"),
        });

        let state = self.state.clone();
        let method = req
            .uri()
            .path()
            .strip_prefix(SERVICE)
            .unwrap_or_default()
            .to_string();

        match method.as_str() {
            "ListApprovalRequests" => unary(state, list, req),
            "GetApprovalRequest" => unary(state, get, req),
            "ApproveApprovalRequest" => unary(state, approve, req),
            "DismissApprovalRequest" => unary(state, dismiss, req),
            "GetAccessApprovalSettings" => unary(state, get_settings, req),
            "UpdateAccessApprovalSettings" => unary(state, update_settings, req),
            "DeleteAccessApprovalSettings" => unary(state, delete_settings, req),
            _ => Box::pin(async move {
                let mut response = http::Response::new(tonic::body::Body::default());
                let headers = response.headers_mut();
                headers.insert(
                    Status::GRPC_STATUS,
                    (tonic::Code::Unimplemented as i32).into(),
                );
                headers.insert(
                    http::header::CONTENT_TYPE,
                    tonic::metadata::GRPC_CONTENT_TYPE,
                );
                Ok(response)
            }),
        }
    }
}
