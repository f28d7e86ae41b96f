use serde_json::Value;
use shared::queue::{MessageQueue, QueueError};
use std::sync::Arc;

/// Provenance tag attached to every message this gateway enqueues.
pub const PROVENANCE_TAG: &str = "gateway";

/// Serializes validated records and hands them to the queue.
pub struct RecordPublisher {
    queue: Arc<dyn MessageQueue>,
}

impl RecordPublisher {
    pub fn new(queue: Arc<dyn MessageQueue>) -> Self {
        Self { queue }
    }

    /// Enqueues one record and returns the queue-assigned identifier.
    pub async fn publish(&self, record: &Value) -> Result<String, QueueError> {
        let body = serde_json::to_string(record).map_err(|e| QueueError::Send(e.to_string()))?;
        let message_id = self.queue.send(body, PROVENANCE_TAG).await?;
        tracing::info!(%message_id, "record enqueued");
        Ok(message_id)
    }
}
