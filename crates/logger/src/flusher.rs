//! Periodic flusher
//!
//! Background task that drains a buffered [`PointWriter`] on every tick of
//! its flush interval, so quiet periods do not leave points stranded in the
//! buffer. On shutdown it performs one final flush.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::writer::PointWriter;

/// Shortest accepted tick period
const MIN_PERIOD: Duration = Duration::from_millis(1);

/// Handle to a running flusher task
#[derive(Debug)]
pub struct FlusherHandle {
    cancel: CancellationToken,
    task: JoinHandle<()>,
}

impl FlusherHandle {
    /// Stop the task and wait for its final flush
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(e) = self.task.await {
            warn!(error = %e, "flusher task ended abnormally");
        }
    }

    /// Whether the task has exited
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Token that stops the task when cancelled
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Spawn a task flushing `writer` every `period`
///
/// Must be called from within a Tokio runtime.
pub fn spawn_flusher(writer: Arc<PointWriter>, period: Duration) -> FlusherHandle {
    let cancel = CancellationToken::new();
    let task = tokio::spawn(run(writer, period.max(MIN_PERIOD), cancel.clone()));
    FlusherHandle { cancel, task }
}

async fn run(writer: Arc<PointWriter>, period: Duration, cancel: CancellationToken) {
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    // First tick completes immediately
    ticker.tick().await;

    info!(period = ?period, sink = writer.sink_name(), "periodic flusher started");

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {
                match writer.flush().await {
                    Ok(0) => {}
                    Ok(count) => debug!(points = count, "periodic flush"),
                    Err(e) => warn!(error = %e, "periodic flush failed"),
                }
            }
        }
    }

    if let Err(e) = writer.flush().await {
        warn!(error = %e, "final flush failed");
    }
    info!("periodic flusher stopped");
}
