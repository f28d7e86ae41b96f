use async_trait::async_trait;
use shared::queue::{MessageQueue, QueueError, QueueItem};
use shared::secrets::{SecretError, SecretSource};
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;

/// Secret source serving a fixed value, or failing every fetch.
pub struct StaticSecretSource {
    value: Option<String>,
    pub fetches: AtomicUsize,
}

impl StaticSecretSource {
    pub fn new(value: &str) -> Self {
        Self {
            value: Some(value.to_string()),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            value: None,
            fetches: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl SecretSource for StaticSecretSource {
    async fn fetch(&self, name: &str) -> Result<String, SecretError> {
        self.fetches
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.value.clone().ok_or_else(|| SecretError::Fetch {
            name: name.to_string(),
            message: "store unreachable".to_string(),
        })
    }
}

/// Queue recording sent messages, or refusing every send.
pub struct RecordingQueue {
    fail_send: bool,
    pub sent: Mutex<Vec<(String, String)>>,
}

impl RecordingQueue {
    pub fn new() -> Self {
        Self {
            fail_send: false,
            sent: Mutex::new(Vec::new()),
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_send: true,
            sent: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl MessageQueue for RecordingQueue {
    async fn send(&self, body: String, source: &str) -> Result<String, QueueError> {
        if self.fail_send {
            return Err(QueueError::Send("endpoint unreachable".to_string()));
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push((body, source.to_string()));
        Ok(format!("msg-{}", sent.len()))
    }

    async fn receive(
        &self,
        _max_messages: i32,
        _wait_time_secs: i32,
    ) -> Result<Vec<QueueItem>, QueueError> {
        Ok(Vec::new())
    }

    async fn delete(&self, _receipt_handle: &str) -> Result<(), QueueError> {
        Ok(())
    }
}
