//! Batching reporter - owns the flush cycle
//!
//! Instrumentation hands encoded span records to a [`Reporter`] handle;
//! the [`ReporterRunner`] task buffers them and flushes a [`SpanBatch`]
//! through the sender when the batch fills or the flush interval elapses.
//! Delivery is at-most-once at this layer: a failed flush is logged and
//! the batch is dropped. Wrap the transport if you need retries.

use crate::sender::HttpSender;
use bytes::Bytes;
use latu_core::SpanBatch;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

/// Tuning for the reporter's flush cycle
#[derive(Debug, Clone)]
pub struct ReporterConfig {
    /// Flush as soon as this many records are buffered
    pub batch_size: usize,
    /// Flush partial batches after this many milliseconds
    pub flush_interval_ms: u64,
    /// Capacity of the record channel; reports beyond it are dropped
    pub channel_capacity: usize,
}

impl Default for ReporterConfig {
    fn default() -> Self {
        Self {
            batch_size: 100,
            flush_interval_ms: 1000,
            channel_capacity: 4096,
        }
    }
}

/// Handle for queueing span records
///
/// Cheap to clone; dropping every handle closes the channel and lets the
/// runner drain and exit.
#[derive(Clone)]
pub struct Reporter {
    tx: mpsc::Sender<Bytes>,
}

impl Reporter {
    /// Queue one encoded span record for the next flush
    ///
    /// Returns `false` when the record was dropped because the channel is
    /// full or the runner has stopped. Never blocks.
    pub fn report(&self, record: impl Into<Bytes>) -> bool {
        match self.tx.try_send(record.into()) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(_)) => {
                warn!("reporter channel full, span dropped");
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                warn!("reporter stopped, span dropped");
                false
            }
        }
    }
}

/// Reporter runner - buffers records and drives the sender
pub struct ReporterRunner {
    rx: mpsc::Receiver<Bytes>,
    sender: Arc<HttpSender>,
    batch_size: usize,
    flush_interval_ms: u64,
}

/// Create a connected handle/runner pair
///
/// Spawn the runner on a worker task; `send` blocks on transport I/O and
/// must not run on a latency-sensitive event loop.
pub fn build(sender: Arc<HttpSender>, config: ReporterConfig) -> (Reporter, ReporterRunner) {
    let (tx, rx) = mpsc::channel(config.channel_capacity);
    (
        Reporter { tx },
        ReporterRunner {
            rx,
            sender,
            batch_size: config.batch_size,
            flush_interval_ms: config.flush_interval_ms,
        },
    )
}

impl ReporterRunner {
    /// Run the flush cycle until every [`Reporter`] handle is dropped
    ///
    /// 1. Receive records from the channel
    /// 2. Flush immediately when the buffer hits `batch_size`
    /// 3. Timer-based flush for partial batches (latency bound)
    /// 4. On shutdown, drain the remaining buffer before exiting
    pub async fn run(mut self) {
        info!(
            endpoint = %self.sender.endpoint(),
            batch_size = self.batch_size,
            flush_interval_ms = self.flush_interval_ms,
            "reporter started"
        );

        let mut buffer: Vec<Bytes> = Vec::with_capacity(self.batch_size);
        let mut interval =
            tokio::time::interval(tokio::time::Duration::from_millis(self.flush_interval_ms));
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first tick completes immediately; skip it so an empty
        // reporter does not flush at startup
        interval.tick().await;

        loop {
            tokio::select! {
                received = self.rx.recv() => match received {
                    Some(record) => {
                        buffer.push(record);
                        if buffer.len() >= self.batch_size {
                            self.flush(&mut buffer).await;
                        }
                    }
                    None => break,
                },
                _ = interval.tick() => {
                    self.flush(&mut buffer).await;
                }
            }
        }

        // Channel closed - drain whatever is left
        info!(remaining = buffer.len(), "reporter shutting down, draining buffer");
        self.flush(&mut buffer).await;
        info!("reporter shutdown complete");
    }

    /// Send the buffered records as one batch
    ///
    /// A failed flush drops the batch; the error is logged here because
    /// no caller remains to observe it.
    async fn flush(&self, buffer: &mut Vec<Bytes>) {
        if buffer.is_empty() {
            return;
        }

        let batch = SpanBatch::from_records(std::mem::take(buffer));
        let count = batch.len();
        match self.sender.send(batch).await {
            Ok(()) => debug!(spans = count, "batch flushed"),
            Err(e) => error!(spans = count, error = %e, "flush failed, batch dropped"),
        }
    }
}
