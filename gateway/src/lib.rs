pub mod auth;
pub mod config;
pub mod errors;
pub mod metrics_defs;
pub mod publisher;
pub mod record;
#[cfg(test)]
pub(crate) mod testutils;

use crate::auth::TokenValidator;
use crate::errors::GatewayError;
use crate::publisher::RecordPublisher;
use crate::record::validate_record;
use http_body_util::{BodyExt, combinators::BoxBody};
use hyper::body::{Bytes, Incoming};
use hyper::service::Service;
use hyper::{Method, Request, Response, StatusCode};
use serde::Deserialize;
use serde_json::{Value, json};
use shared::http::{json_response, run_http_service};
use std::pin::Pin;
use std::sync::Arc;

pub type GatewayBody = BoxBody<Bytes, GatewayError>;

/// Builds the AWS-backed state and serves the gateway until the process
/// is stopped.
pub async fn run(config: config::Config) -> Result<(), GatewayError> {
    let sdk_config = shared::aws::load_sdk_config(&config.region).await;
    let queue = Arc::new(shared::queue::SqsQueue::new(
        &sdk_config,
        config.queue_url.clone(),
    ));
    let secrets = Arc::new(shared::secrets::SsmSecretSource::new(&sdk_config));

    let state = Arc::new(GatewayState {
        auth: TokenValidator::new(secrets, config.credential_parameter.clone()),
        publisher: RecordPublisher::new(queue),
    });

    tracing::info!(
        host = %config.listener.host,
        port = config.listener.port,
        queue_url = %config.queue_url,
        credential_parameter = %config.credential_parameter,
        "starting ingress gateway"
    );
    run_http_service(&config.listener.host, config.listener.port, GatewayService { state }).await
}

pub struct GatewayState {
    pub auth: TokenValidator,
    pub publisher: RecordPublisher,
}

#[derive(Clone)]
pub struct GatewayService {
    state: Arc<GatewayState>,
}

impl GatewayService {
    pub fn new(state: Arc<GatewayState>) -> Self {
        Self { state }
    }
}

impl Service<Request<Incoming>> for GatewayService {
    type Response = Response<GatewayBody>;
    type Error = GatewayError;
    type Future =
        Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send + 'static>>;

    fn call(&self, req: Request<Incoming>) -> Self::Future {
        let state = self.state.clone();
        Box::pin(async move { Ok(handle(state, req).await) })
    }
}

async fn handle<B>(state: Arc<GatewayState>, req: Request<B>) -> Response<GatewayBody>
where
    B: hyper::body::Body,
{
    match (req.method(), req.uri().path()) {
        (&Method::GET, "/health") => json_response(StatusCode::OK, &json!({"status": "healthy"})),
        (&Method::GET, "/") => json_response(
            StatusCode::OK,
            &json!({
                "service": "courier ingress gateway",
                "endpoints": {
                    "/health": "Health check",
                    "/api/message": "POST - Send message to queue",
                },
            }),
        ),
        (&Method::POST, "/api/message") => match submit(&state, req.into_body()).await {
            Ok(response) => response,
            Err(error) => rejection_response(error),
        },
        _ => json_response(StatusCode::NOT_FOUND, &json!({"error": "Not found"})),
    }
}

#[derive(Deserialize)]
struct SubmitRequest {
    token: Option<String>,
    data: Option<Value>,
}

/// The core submit flow: parse, authenticate, validate, enqueue.
///
/// Check order is fixed so callers see deterministic errors: body shape
/// first, then token presence, token correctness, record schema.
async fn submit<B>(
    state: &GatewayState,
    body: B,
) -> Result<Response<GatewayBody>, GatewayError>
where
    B: hyper::body::Body,
{
    let bytes = body
        .collect()
        .await
        .map_err(|_| GatewayError::InvalidBody)?
        .to_bytes();
    let request: SubmitRequest =
        serde_json::from_slice(&bytes).map_err(|_| GatewayError::InvalidBody)?;

    let token = request
        .token
        .filter(|token| !token.is_empty())
        .ok_or(GatewayError::MissingToken)?;
    if !state.auth.validate(&token).await? {
        return Err(GatewayError::InvalidToken);
    }

    validate_record(request.data.as_ref())?;
    // validate_record only passes when the container is present
    let data = request.data.unwrap_or_default();

    let message_id = state.publisher.publish(&data).await?;
    shared::counter!(metrics_defs::SUBMISSIONS_ACCEPTED).increment(1);

    Ok(json_response(
        StatusCode::OK,
        &json!({
            "status": "success",
            "message": "Message sent to queue",
            "message_id": message_id,
        }),
    ))
}

fn rejection_response(error: GatewayError) -> Response<GatewayBody> {
    let status = error.status();
    match status {
        StatusCode::INTERNAL_SERVER_ERROR => {
            tracing::error!(error = %error, "submission failed on an internal fault")
        }
        StatusCode::UNAUTHORIZED => tracing::warn!(error = %error, "submission not authenticated"),
        _ => tracing::debug!(error = %error, "submission rejected"),
    }
    shared::counter!(metrics_defs::SUBMISSIONS_REJECTED).increment(1);

    json_response(status, &json!({"error": error.public_message()}))
}
