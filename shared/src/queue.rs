use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sqs::types::MessageAttributeValue;
use std::collections::HashMap;
use thiserror::Error;

/// Name of the message attribute carrying the producing component.
pub const SOURCE_ATTRIBUTE: &str = "source";

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("failed to send message: {0}")]
    Send(String),

    #[error("failed to receive messages: {0}")]
    Receive(String),

    #[error("failed to delete message: {0}")]
    Delete(String),
}

/// One delivery of a queued item.
///
/// The receipt handle belongs to this delivery, not to the item:
/// redelivery of the same item produces a fresh handle.
#[derive(Debug, Clone)]
pub struct QueueItem {
    pub id: String,
    pub body: String,
    pub receipt_handle: String,
    pub attributes: HashMap<String, String>,
}

/// A durable queue with at-least-once delivery semantics.
///
/// An item received but not deleted becomes visible again once the
/// queue's visibility timeout elapses.
#[async_trait]
pub trait MessageQueue: Send + Sync {
    /// Enqueues a message body tagged with the producing component.
    /// Returns the queue-assigned message id.
    async fn send(&self, body: String, source: &str) -> Result<String, QueueError>;

    /// Receives up to `max_messages` items, long-polling for up to
    /// `wait_time_secs` seconds. Attributes are returned with each item.
    async fn receive(
        &self,
        max_messages: i32,
        wait_time_secs: i32,
    ) -> Result<Vec<QueueItem>, QueueError>;

    /// Deletes one delivery of an item. Consumes the receipt handle.
    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError>;
}

/// Amazon SQS implementation of [`MessageQueue`].
pub struct SqsQueue {
    client: aws_sdk_sqs::Client,
    queue_url: String,
}

impl SqsQueue {
    pub fn new(sdk_config: &SdkConfig, queue_url: String) -> Self {
        Self {
            client: aws_sdk_sqs::Client::new(sdk_config),
            queue_url,
        }
    }
}

#[async_trait]
impl MessageQueue for SqsQueue {
    async fn send(&self, body: String, source: &str) -> Result<String, QueueError> {
        let source_attribute = MessageAttributeValue::builder()
            .data_type("String")
            .string_value(source)
            .build()
            .map_err(|e| QueueError::Send(e.to_string()))?;

        let output = self
            .client
            .send_message()
            .queue_url(&self.queue_url)
            .message_body(body)
            .message_attributes(SOURCE_ATTRIBUTE, source_attribute)
            .send()
            .await
            .map_err(|e| QueueError::Send(e.to_string()))?;

        output
            .message_id()
            .map(str::to_string)
            .ok_or_else(|| QueueError::Send("response carried no message id".to_string()))
    }

    async fn receive(
        &self,
        max_messages: i32,
        wait_time_secs: i32,
    ) -> Result<Vec<QueueItem>, QueueError> {
        let output = self
            .client
            .receive_message()
            .queue_url(&self.queue_url)
            .max_number_of_messages(max_messages)
            .wait_time_seconds(wait_time_secs)
            .message_attribute_names("All")
            .send()
            .await
            .map_err(|e| QueueError::Receive(e.to_string()))?;

        let items = output
            .messages()
            .iter()
            .filter_map(|message| {
                let (Some(id), Some(receipt_handle)) =
                    (message.message_id(), message.receipt_handle())
                else {
                    // Cannot acknowledge a delivery without a handle; the
                    // item will reappear after the visibility timeout.
                    tracing::warn!("dropping received message without id or receipt handle");
                    return None;
                };

                let attributes = message
                    .message_attributes()
                    .map(|attrs| {
                        attrs
                            .iter()
                            .filter_map(|(name, value)| {
                                value.string_value().map(|v| (name.clone(), v.to_string()))
                            })
                            .collect()
                    })
                    .unwrap_or_default();

                Some(QueueItem {
                    id: id.to_string(),
                    body: message.body().unwrap_or_default().to_string(),
                    receipt_handle: receipt_handle.to_string(),
                    attributes,
                })
            })
            .collect();

        Ok(items)
    }

    async fn delete(&self, receipt_handle: &str) -> Result<(), QueueError> {
        self.client
            .delete_message()
            .queue_url(&self.queue_url)
            .receipt_handle(receipt_handle)
            .send()
            .await
            .map_err(|e| QueueError::Delete(e.to_string()))?;

        Ok(())
    }
}
