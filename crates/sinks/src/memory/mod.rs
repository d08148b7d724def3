//! In-memory sink - records every batch
//!
//! Intended for tests of code that writes through a [`PointSink`]. It keeps
//! every accepted batch in order, can be told to fail, can hold each call
//! open for a delay, and counts calls that overlapped another in-flight
//! call so serialization guarantees can be asserted.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;
use pointlog_protocol::Point;

use crate::PointSink;
use crate::common::SinkError;

/// Sink that stores batches in memory
#[derive(Debug, Default)]
pub struct MemorySink {
    batches: Mutex<Vec<Vec<Point>>>,
    delay: Option<Duration>,
    failing: AtomicBool,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    overlapping: AtomicUsize,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Hold every write open for `delay` before completing it
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Make subsequent writes fail (`true`) or succeed (`false`)
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Accepted batches in write order
    pub fn batches(&self) -> Vec<Vec<Point>> {
        self.batches.lock().clone()
    }

    /// Accepted points flattened in write order
    pub fn points(&self) -> Vec<Point> {
        self.batches.lock().iter().flatten().cloned().collect()
    }

    /// Number of `write_batch` calls, failed ones included
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Number of calls that started while another call was in flight
    pub fn overlapping_calls(&self) -> usize {
        self.overlapping.load(Ordering::SeqCst)
    }
}

/// Marks one `write_batch` call in flight until dropped
///
/// Released on drop so a call cancelled mid-await (e.g. by a timeout) does
/// not stay counted.
struct InFlight<'a> {
    counter: &'a AtomicUsize,
}

impl<'a> InFlight<'a> {
    fn enter(sink: &'a MemorySink) -> Self {
        if sink.in_flight.fetch_add(1, Ordering::SeqCst) > 0 {
            sink.overlapping.fetch_add(1, Ordering::SeqCst);
        }
        Self {
            counter: &sink.in_flight,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.counter.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl PointSink for MemorySink {
    async fn write_batch(&self, points: &[Point]) -> Result<(), SinkError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _in_flight = InFlight::enter(self);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let result = if self.failing.load(Ordering::SeqCst) {
            Err(SinkError::connection("memory sink set to fail"))
        } else {
            self.batches.lock().push(points.to_vec());
            Ok(())
        };

        result
    }

    fn name(&self) -> &str {
        "memory"
    }
}
