use async_trait::async_trait;
use shared::object_store::{ObjectStore, ObjectStoreError};
use shared::queue::{MessageQueue, QueueError, QueueItem};
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

pub fn item(id: &str, body: &str) -> QueueItem {
    QueueItem {
        id: id.to_string(),
        body: body.to_string(),
        receipt_handle: format!("receipt-{id}"),
        attributes: HashMap::from([("source".to_string(), "gateway".to_string())]),
    }
}

/// Queue serving scripted receive batches and recording deletes.
pub struct ScriptedQueue {
    batches: Mutex<VecDeque<Vec<QueueItem>>>,
    fail_receive: bool,
    fail_delete: bool,
    pub deleted: Mutex<Vec<String>>,
}

impl ScriptedQueue {
    pub fn with_batches(batches: Vec<Vec<QueueItem>>) -> Self {
        Self {
            batches: Mutex::new(batches.into()),
            fail_receive: false,
            fail_delete: false,
            deleted: Mutex::new(Vec::new()),
        }
    }

    pub fn empty() -> Self {
        Self::with_batches(Vec::new())
    }

    pub fn failing_receive() -> Self {
        Self {
            fail_receive: true,
            ..Self::empty()
        }
    }

    pub fn failing_delete() -> Self {
        Self {
            fail_delete: true,
            ..Self::empty()
        }
    }
}

#[async_trait]
impl MessageQueue for ScriptedQueue {
    async fn send(&self, _body: String, _source: &str) -> Result<String, QueueError> {
        Err(QueueError::Send("not supported by ScriptedQueue".to_string()))
    }

    async fn receive(
        &self,
        _max_messages: i32,
        _wait_time_secs: i32,
    ) -> Result<Vec<QueueItem>, QueueError> {
        if self.fail_receive {
            return Err(QueueError::Receive("endpoint unreachable".to_string()));
        }
        Ok(self.batches.lock().unwrap().pop_front().unwrap_or_default())
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError> {
        if self.fail_delete {
            return Err(QueueError::Delete("endpoint unreachable".to_string()));
        }
        self.deleted.lock().unwrap().push(receipt_handle.to_string());
        Ok(())
    }
}

/// Object store recording writes, or refusing every write.
pub struct RecordingStore {
    fail_put: bool,
    pub puts: Mutex<Vec<(String, Vec<u8>, String)>>,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            fail_put: false,
            puts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_put: true,
            puts: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl ObjectStore for RecordingStore {
    async fn put(
        &self,
        key: &str,
        body: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ObjectStoreError> {
        if self.fail_put {
            return Err(ObjectStoreError::Put {
                key: key.to_string(),
                message: "bucket unreachable".to_string(),
            });
        }
        self.puts
            .lock()
            .unwrap()
            .push((key.to_string(), body, content_type.to_string()));
        Ok(())
    }
}
