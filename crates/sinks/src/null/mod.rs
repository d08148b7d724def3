//! Null sink - discards all points
//!
//! Accepts every batch, updates metrics and drops the data.
//!
//! # Use Cases
//!
//! - **Benchmarking**: Measure encoder and buffer overhead without I/O
//! - **Development**: Run an application with forwarding wired but no database
//!
//! # Example
//!
//! ```ignore
//! use pointlog_sinks::NullSink;
//!
//! let sink = Arc::new(NullSink::new());
//! let writer = PointWriter::new(sink.clone(), settings);
//! ```

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use pointlog_protocol::Point;

use crate::PointSink;
use crate::common::SinkError;

/// Null sink that discards all received batches
#[derive(Debug)]
pub struct NullSink {
    name: String,
    metrics: NullSinkMetrics,
}

/// Metrics for the null sink
#[derive(Debug, Default)]
pub struct NullSinkMetrics {
    /// Total batches received
    batches_received: AtomicU64,

    /// Total points received (sum of batch lengths)
    points_received: AtomicU64,
}

impl NullSinkMetrics {
    /// Create new metrics instance
    #[inline]
    pub const fn new() -> Self {
        Self {
            batches_received: AtomicU64::new(0),
            points_received: AtomicU64::new(0),
        }
    }

    /// Record a received batch
    #[inline]
    pub fn record_batch(&self, point_count: u64) {
        self.batches_received.fetch_add(1, Ordering::Relaxed);
        self.points_received.fetch_add(point_count, Ordering::Relaxed);
    }

    /// Get batches received count
    #[inline]
    pub fn batches_received(&self) -> u64 {
        self.batches_received.load(Ordering::Relaxed)
    }

    /// Get points received count
    #[inline]
    pub fn points_received(&self) -> u64 {
        self.points_received.load(Ordering::Relaxed)
    }

    /// Reset all metrics to zero
    pub fn reset(&self) {
        self.batches_received.store(0, Ordering::Relaxed);
        self.points_received.store(0, Ordering::Relaxed);
    }
}

impl NullSink {
    /// Create a new null sink
    pub fn new() -> Self {
        Self::with_name("null")
    }

    /// Create a new null sink with a custom name
    pub fn with_name(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            metrics: NullSinkMetrics::new(),
        }
    }

    /// Get reference to metrics
    #[inline]
    pub fn metrics(&self) -> &NullSinkMetrics {
        &self.metrics
    }
}

impl Default for NullSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PointSink for NullSink {
    async fn write_batch(&self, points: &[Point]) -> Result<(), SinkError> {
        self.metrics.record_batch(points.len() as u64);
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }
}
