//! pointlog - Sinks
//!
//! Batch point writers. A sink accepts a non-empty ordered batch of points
//! and writes it durably; the whole batch either succeeds or fails.
//!
//! ```text
//! [PointWriter] --&[Point]--> [PointSink] --> [Destination]
//! ```
//!
//! # Available Sinks
//!
//! | Sink | Purpose |
//! |------|---------|
//! | `influx` | InfluxDB line protocol over HTTP |
//! | `null` | Benchmarking (discard all) |
//! | `memory` | Tests (records every batch) |
//!
//! # Example
//!
//! ```ignore
//! use pointlog_sinks::{InfluxSink, PointSink};
//!
//! let sink = InfluxSink::connect("http://localhost:8181?database=logs")?;
//! sink.write_batch(&points).await?;
//! ```

use async_trait::async_trait;
use pointlog_protocol::Point;

// =============================================================================
// Sink implementations (each in its own submodule)
// =============================================================================

/// InfluxDB sink - line protocol over HTTP
pub mod influx;

/// Null sink - discards all data (for benchmarking)
pub mod null;

/// Memory sink - records batches (for tests)
pub mod memory;

/// Common types shared by all sinks (errors, metrics)
mod common;

// =============================================================================
// Public re-exports
// =============================================================================

pub use common::{MetricsSnapshot, SinkError, SinkMetrics};

pub use influx::{InfluxConfig, InfluxSink, Precision};
pub use memory::MemorySink;
pub use null::{NullSink, NullSinkMetrics};

/// Batch point writer
///
/// Implementations must tolerate concurrent calls: unbuffered writes are
/// not serialized by the caller.
#[async_trait]
pub trait PointSink: Send + Sync {
    /// Write a batch of points
    ///
    /// # Errors
    ///
    /// Returns an error if any part of the batch could not be written.
    async fn write_batch(&self, points: &[Point]) -> Result<(), SinkError>;

    /// Short name used in diagnostics
    fn name(&self) -> &str;
}
