//! Common types shared by all sinks

use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;

/// Metrics shared by all sink types
#[derive(Debug, Default)]
pub struct SinkMetrics {
    /// Batches successfully written
    pub batches_written: AtomicU64,

    /// Points successfully written (sum of batch lengths)
    pub points_written: AtomicU64,

    /// Payload bytes successfully written
    pub bytes_written: AtomicU64,

    /// Write errors encountered
    pub write_errors: AtomicU64,
}

impl SinkMetrics {
    /// Create new metrics instance
    pub const fn new() -> Self {
        Self {
            batches_written: AtomicU64::new(0),
            points_written: AtomicU64::new(0),
            bytes_written: AtomicU64::new(0),
            write_errors: AtomicU64::new(0),
        }
    }

    /// Record a successfully written batch
    #[inline]
    pub fn batch_written(&self, point_count: u64, bytes: u64) {
        self.batches_written.fetch_add(1, Ordering::Relaxed);
        self.points_written.fetch_add(point_count, Ordering::Relaxed);
        self.bytes_written.fetch_add(bytes, Ordering::Relaxed);
    }

    /// Record a write error
    #[inline]
    pub fn write_error(&self) {
        self.write_errors.fetch_add(1, Ordering::Relaxed);
    }

    /// Get snapshot of all metrics
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            batches_written: self.batches_written.load(Ordering::Relaxed),
            points_written: self.points_written.load(Ordering::Relaxed),
            bytes_written: self.bytes_written.load(Ordering::Relaxed),
            write_errors: self.write_errors.load(Ordering::Relaxed),
        }
    }
}

/// Point-in-time snapshot of sink metrics
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MetricsSnapshot {
    pub batches_written: u64,
    pub points_written: u64,
    pub bytes_written: u64,
    pub write_errors: u64,
}

/// Common sink errors
///
/// A failed batch write is all-or-nothing: there is no partial success.
#[derive(Debug, Error)]
pub enum SinkError {
    /// Connection string or sink setup is invalid
    #[error("configuration error: {0}")]
    Config(String),

    /// Could not reach the sink
    #[error("connection error: {0}")]
    Connection(String),

    /// Sink rejected the batch
    #[error("server error: HTTP {status}: {body}")]
    Server {
        /// HTTP status code
        status: u16,
        /// Response body (may be empty)
        body: String,
    },

    /// Any other write failure
    #[error("write failed: {0}")]
    Write(String),
}

impl SinkError {
    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a connection error
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::Connection(msg.into())
    }

    /// Create a write error
    pub fn write(msg: impl Into<String>) -> Self {
        Self::Write(msg.into())
    }

    /// Create a server error
    pub fn server(status: u16, body: impl Into<String>) -> Self {
        Self::Server {
            status,
            body: body.into(),
        }
    }

    /// Whether retrying the same batch later could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Server { status, .. } => *status == 429 || *status >= 500,
            Self::Config(_) | Self::Write(_) => false,
        }
    }
}

#[cfg(test)]
#[path = "common_test.rs"]
mod common_test;
