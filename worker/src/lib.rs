pub mod config;
pub mod consumer;
pub mod errors;
pub mod metrics_defs;
pub mod processor;
#[cfg(test)]
pub(crate) mod testutils;

use crate::consumer::QueueConsumer;
use crate::processor::RelayProcessor;
use shared::object_store::ObjectStore;
use shared::queue::MessageQueue;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

/// Cumulative relay outcomes across the worker's lifetime.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Counters {
    pub processed: u64,
    pub errors: u64,
}

/// The relay worker: a single sequential loop that drains the queue
/// into durable storage. No internal parallelism; the queue's
/// visibility timeout is the only concurrency-control device relied on.
pub struct Worker {
    consumer: QueueConsumer,
    processor: RelayProcessor,
    poll_interval: Duration,
    shutdown: AtomicBool,
}

impl Worker {
    pub fn new(
        queue: Arc<dyn MessageQueue>,
        store: Arc<dyn ObjectStore>,
        poll_interval: Duration,
    ) -> Self {
        let consumer = QueueConsumer::new(queue);
        let processor = RelayProcessor::new(store, consumer.clone());
        Self {
            consumer,
            processor,
            poll_interval,
            shutdown: AtomicBool::new(false),
        }
    }

    /// Asks the loop to stop after its current iteration. In-flight
    /// work completes naturally; nothing is forcibly aborted.
    pub fn shutdown(&self) {
        self.shutdown.store(true, Ordering::Relaxed);
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::Relaxed)
    }

    /// One poll/drain iteration. Items are processed one at a time in
    /// receipt order; a failed item is counted, logged, and left for
    /// redelivery. Returns the batch size received.
    pub async fn run_once(&self, counters: &mut Counters) -> usize {
        let batch = self.consumer.receive_batch().await;

        for item in &batch {
            match self.processor.process(item).await {
                Ok(_) => {
                    counters.processed += 1;
                    shared::counter!(metrics_defs::ITEMS_RELAYED).increment(1);
                }
                Err(error) => {
                    counters.errors += 1;
                    shared::counter!(metrics_defs::ITEMS_FAILED).increment(1);
                    tracing::error!(
                        id = %item.id,
                        %error,
                        "failed to process item; leaving it for redelivery"
                    );
                }
            }
        }

        if batch.is_empty() {
            shared::counter!(metrics_defs::EMPTY_POLLS).increment(1);
        } else {
            tracing::info!(
                processed = counters.processed,
                errors = counters.errors,
                "relay progress"
            );
        }

        batch.len()
    }

    /// Drives the consumer until shutdown is requested. An empty batch
    /// is followed by the idle delay; a non-empty batch is not, since
    /// more work is probably waiting.
    pub async fn run(&self) {
        tracing::info!(
            poll_interval_secs = self.poll_interval.as_secs(),
            "relay worker started"
        );
        let mut counters = Counters::default();

        while !self.is_shutting_down() {
            if self.run_once(&mut counters).await == 0 && !self.is_shutting_down() {
                tokio::time::sleep(self.poll_interval).await;
            }
        }

        tracing::info!(
            processed = counters.processed,
            errors = counters.errors,
            "relay worker stopped"
        );
    }
}

/// Builds the AWS-backed worker and runs it until interrupted.
pub async fn run(config: config::Config) {
    let sdk_config = shared::aws::load_sdk_config(&config.region).await;
    let queue = Arc::new(shared::queue::SqsQueue::new(
        &sdk_config,
        config.queue_url.clone(),
    ));
    let store = Arc::new(shared::object_store::S3ObjectStore::new(
        &sdk_config,
        config.bucket.clone(),
    ));

    tracing::info!(
        queue_url = %config.queue_url,
        bucket = %config.bucket,
        "starting relay worker"
    );

    let worker = Arc::new(Worker::new(
        queue,
        store,
        Duration::from_secs(config.poll_interval_secs),
    ));

    let handle = worker.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received; finishing current batch");
            handle.shutdown();
        }
    });

    worker.run().await;
}
