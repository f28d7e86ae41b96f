use crate::record::RecordError;
use hyper::StatusCode;
use shared::queue::QueueError;
use shared::secrets::SecretError;
use thiserror::Error;

/// Errors raised while handling a submission.
///
/// Authentication and validation variants are surfaced to the caller
/// verbatim; infrastructure variants map to an opaque 500 so internal
/// details never leak.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Invalid JSON payload")]
    InvalidBody,

    #[error("Missing token in payload")]
    MissingToken,

    #[error("Invalid token")]
    InvalidToken,

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error("credential store error: {0}")]
    Credential(#[from] SecretError),

    #[error("queue error: {0}")]
    Queue(#[from] QueueError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub fn status(&self) -> StatusCode {
        match self {
            GatewayError::InvalidBody | GatewayError::Record(_) => StatusCode::BAD_REQUEST,
            GatewayError::MissingToken | GatewayError::InvalidToken => StatusCode::UNAUTHORIZED,
            GatewayError::Credential(_) | GatewayError::Queue(_) | GatewayError::Io(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// The message shown to the caller. Internal faults collapse to a
    /// generic message; the full error is logged separately.
    pub fn public_message(&self) -> String {
        match self.status() {
            StatusCode::INTERNAL_SERVER_ERROR => "Internal server error".to_string(),
            _ => self.to_string(),
        }
    }
}
