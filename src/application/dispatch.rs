//! Outbound dispatch queue.
//!
//! Event handlers append messages with [`DispatchQueue::enqueue`]; a single
//! drain at a time removes them from the head and posts them to the sink.
//! A failed post is logged and dropped, and the drain moves on to the next
//! message.
//!
//! Draining is triggered either reactively (woken by every enqueue, with
//! overlapping wake-ups coalesced) or on a fixed interval. See [`Trigger`].

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use parking_lot::Mutex;
use tokio::sync::{Mutex as DrainLock, Notify};
use tokio::time::{interval, sleep, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::port::MessageSink;

/// When the queue is drained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Drain as soon as messages are enqueued.
    Reactive,
    /// Drain on a fixed wall-clock interval.
    Periodic(Duration),
}

/// Counts from one drain pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DrainReport {
    /// Messages the sink accepted.
    pub delivered: usize,
    /// Messages the sink rejected or failed to deliver.
    pub failed: usize,
}

impl DrainReport {
    #[must_use]
    pub const fn attempted(&self) -> usize {
        self.delivered + self.failed
    }
}

/// FIFO buffer of outbound messages in front of a sink.
pub struct DispatchQueue {
    pending: Mutex<VecDeque<String>>,
    drain_lock: DrainLock<()>,
    ready: Notify,
    sink: Arc<dyn MessageSink>,
    post_spacing: Duration,
}

impl DispatchQueue {
    /// Create a queue delivering to `sink`, pausing `post_spacing` between posts.
    #[must_use]
    pub fn new(sink: Arc<dyn MessageSink>, post_spacing: Duration) -> Self {
        Self {
            pending: Mutex::new(VecDeque::new()),
            drain_lock: DrainLock::new(()),
            ready: Notify::new(),
            sink,
            post_spacing,
        }
    }

    /// Append a message to the tail and wake the reactive drainer.
    pub fn enqueue(&self, message: impl Into<String>) {
        let depth = {
            let mut pending = self.pending.lock();
            pending.push_back(message.into());
            pending.len()
        };
        debug!(depth, "Message enqueued");
        self.ready.notify_one();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    fn pop(&self) -> Option<String> {
        self.pending.lock().pop_front()
    }

    /// Deliver queued messages until the queue is empty.
    ///
    /// Only one drain runs at a time; a concurrent caller waits for the
    /// active drain to finish and then drains whatever is left.
    pub async fn drain(&self) -> DrainReport {
        let _guard = self.drain_lock.lock().await;
        let mut report = DrainReport::default();

        while let Some(message) = self.pop() {
            if report.attempted() > 0 && !self.post_spacing.is_zero() {
                sleep(self.post_spacing).await;
            }

            match self.sink.post(&message).await {
                Ok(()) => {
                    report.delivered += 1;
                    debug!(sink = self.sink.name(), "Message delivered");
                }
                Err(e) => {
                    report.failed += 1;
                    error!(
                        sink = self.sink.name(),
                        failed_at = %Utc::now().to_rfc3339(),
                        error = %e,
                        "Failed to deliver message"
                    );
                }
            }
        }

        if report.attempted() > 0 {
            info!(
                sink = self.sink.name(),
                delivered = report.delivered,
                failed = report.failed,
                "Dispatch queue drained"
            );
        }

        report
    }

    /// Drive the queue forever according to `trigger`.
    pub async fn run(self: Arc<Self>, trigger: Trigger) {
        match trigger {
            Trigger::Reactive => {
                info!(sink = self.sink.name(), "Dispatcher started (reactive)");
                loop {
                    self.ready.notified().await;
                    self.drain().await;
                }
            }
            Trigger::Periodic(period) => {
                info!(
                    sink = self.sink.name(),
                    interval_secs = period.as_secs_f64(),
                    "Dispatcher started (periodic)"
                );
                let mut ticker = interval(period);
                ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
                loop {
                    ticker.tick().await;
                    if !self.is_empty() {
                        self.drain().await;
                    }
                }
            }
        }
    }
}
