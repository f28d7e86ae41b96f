use shared::object_store::ObjectStoreError;
use shared::queue::QueueError;
use thiserror::Error;

/// Failures while relaying one queue item. Every variant leaves the
/// item undeleted, so it reappears for redelivery once the queue's
/// visibility timeout elapses.
#[derive(Error, Debug)]
pub enum RelayError {
    /// A body that does not parse points at a producer bug; it is
    /// surfaced loudly rather than silently dropped.
    #[error("malformed body for item {id}: {message}")]
    MalformedBody { id: String, message: String },

    #[error("failed to serialize stored object: {0}")]
    Serialize(String),

    #[error(transparent)]
    Store(#[from] ObjectStoreError),

    /// Persistence succeeded but the acknowledging delete did not. The
    /// redelivered item will produce a duplicate object under a fresh
    /// key suffix, never a duplicate delete.
    #[error(transparent)]
    Queue(#[from] QueueError),
}
