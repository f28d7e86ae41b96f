use crate::consumer::QueueConsumer;
use crate::errors::RelayError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use shared::object_store::ObjectStore;
use shared::queue::QueueItem;
use std::sync::Arc;

/// Provenance tag recorded in every stored object's metadata.
pub const PROVENANCE_TAG: &str = "relay-worker";

pub const KEY_PREFIX: &str = "messages";

#[derive(Serialize)]
struct StoredObject {
    data: Value,
    metadata: StoredMetadata,
}

#[derive(Serialize)]
struct StoredMetadata {
    message_id: String,
    processed_at: String,
    source: &'static str,
}

/// Persists one queue item's payload to durable storage, then
/// acknowledges the delivery.
pub struct RelayProcessor {
    store: Arc<dyn ObjectStore>,
    consumer: QueueConsumer,
}

impl RelayProcessor {
    pub fn new(store: Arc<dyn ObjectStore>, consumer: QueueConsumer) -> Self {
        Self { store, consumer }
    }

    /// Relays one delivery and returns the storage key it was written
    /// under. Persistence is attempted before deletion, never the
    /// reverse: the worst failure mode is a duplicate stored object,
    /// never a silently lost record.
    pub async fn process(&self, item: &QueueItem) -> Result<String, RelayError> {
        let data: Value =
            serde_json::from_str(&item.body).map_err(|e| RelayError::MalformedBody {
                id: item.id.clone(),
                message: e.to_string(),
            })?;

        let now = Utc::now();
        let key = storage_key(&item.id, now);
        let object = StoredObject {
            data,
            metadata: StoredMetadata {
                message_id: item.id.clone(),
                processed_at: now.to_rfc3339(),
                source: PROVENANCE_TAG,
            },
        };
        let body =
            serde_json::to_vec_pretty(&object).map_err(|e| RelayError::Serialize(e.to_string()))?;

        self.store.put(&key, body, "application/json").await?;
        self.consumer.acknowledge(&item.receipt_handle).await?;

        tracing::info!(id = %item.id, %key, "item persisted and acknowledged");
        Ok(key)
    }
}

/// Key layout: `messages/<YYYY>/<MM>/<DD>/<HH>/<item id>_<suffix>.json`
/// with UTC hour-granularity path segments. The 8-hex random suffix
/// keeps a redelivered item from colliding with an earlier, already
/// persisted attempt whose delete was not acknowledged.
pub fn storage_key(message_id: &str, processed_at: DateTime<Utc>) -> String {
    let suffix: u32 = rand::random();
    format!(
        "{KEY_PREFIX}/{}/{message_id}_{suffix:08x}.json",
        processed_at.format("%Y/%m/%d/%H")
    )
}
