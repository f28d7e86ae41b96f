use shared::queue::{MessageQueue, QueueError, QueueItem};
use std::sync::Arc;

/// Items requested per poll. SQS caps a single receive at 10.
pub const MAX_BATCH_SIZE: i32 = 10;

/// Long-poll wait, the SQS maximum, to keep empty-poll overhead low.
pub const LONG_POLL_SECS: i32 = 20;

/// Long-polls the queue in batches and acknowledges processed items.
#[derive(Clone)]
pub struct QueueConsumer {
    queue: Arc<dyn MessageQueue>,
}

impl QueueConsumer {
    pub fn new(queue: Arc<dyn MessageQueue>) -> Self {
        Self { queue }
    }

    /// Receives the next batch, failing open: a transient poll error
    /// must not crash the worker loop, so it is logged and an empty
    /// batch returned. The loop retries after its idle delay.
    pub async fn receive_batch(&self) -> Vec<QueueItem> {
        match self.queue.receive(MAX_BATCH_SIZE, LONG_POLL_SECS).await {
            Ok(items) => {
                if !items.is_empty() {
                    tracing::debug!(count = items.len(), "received batch from queue");
                }
                items
            }
            Err(error) => {
                tracing::error!(%error, "failed to poll queue");
                Vec::new()
            }
        }
    }

    /// Deletes one delivery. Called by the relay processor only after
    /// the item's payload has been durably persisted.
    pub async fn acknowledge(&self, receipt_handle: &str) -> Result<(), QueueError> {
        self.queue.delete(receipt_handle).await
    }
}
