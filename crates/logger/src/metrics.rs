//! Writer counters

use std::sync::atomic::{AtomicU64, Ordering};

/// Counters kept by a [`PointWriter`](crate::PointWriter)
#[derive(Debug, Default)]
pub struct WriterMetrics {
    /// Points handed to `write`
    points_received: AtomicU64,

    /// Points accepted by the sink
    points_written: AtomicU64,

    /// Sink calls that succeeded
    batches_written: AtomicU64,

    /// Sink calls that failed or timed out
    write_errors: AtomicU64,

    /// Points lost to failed writes
    points_dropped: AtomicU64,

    /// Buffer drains, forced and explicit
    flushes: AtomicU64,
}

impl WriterMetrics {
    pub const fn new() -> Self {
        Self {
            points_received: AtomicU64::new(0),
            points_written: AtomicU64::new(0),
            batches_written: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
            points_dropped: AtomicU64::new(0),
            flushes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub fn record_received(&self) {
        self.points_received.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_batch(&self, point_count: u64) {
        self.batches_written.fetch_add(1, Ordering::Relaxed);
        self.points_written.fetch_add(point_count, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_dropped(&self, point_count: u64) {
        self.points_dropped.fetch_add(point_count, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_flush(&self) {
        self.flushes.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> WriterMetricsSnapshot {
        WriterMetricsSnapshot {
            points_received: self.points_received.load(Ordering::Relaxed),
            points_written: self.points_written.load(Ordering::Relaxed),
            batches_written: self.batches_written.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
            points_dropped: self.points_dropped.load(Ordering::Relaxed),
            flushes: self.flushes.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of writer counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WriterMetricsSnapshot {
    pub points_received: u64,
    pub points_written: u64,
    pub batches_written: u64,
    pub write_errors: u64,
    pub points_dropped: u64,
    pub flushes: u64,
}
