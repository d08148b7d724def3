//! Point writer - the flush controller
//!
//! Owns the encoder, the optional ring buffer and the sink. Every log call
//! becomes one point; what happens next depends on the mode:
//!
//! - **Unbuffered** (`flush_interval` or `buffer_size` is zero): the point is
//!   written to the sink as a batch of one. Concurrent writes are not
//!   serialized.
//! - **Buffered**: the point is appended to the ring buffer. When the buffer
//!   is full, its whole content is drained and written as one batch before
//!   the new point is appended.
//!
//! All buffer access, drains included, happens under one async mutex, so
//! buffered sink writes never overlap and points reach the sink in write
//! order. The guard is held across the sink call; a slow sink blocks
//! concurrent writers until it answers or `write_timeout` expires.
//!
//! # Failed drains
//!
//! Points drained for a batch that the sink rejects are dropped, and the
//! point whose write forced the drain is not buffered. The error is returned
//! to the caller and counted in [`WriterMetrics`].

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use pointlog_protocol::{Fields, Level, Point};
use pointlog_sinks::PointSink;
use tokio::sync::Mutex;
use tracing::{debug, trace, warn};

use crate::encoder::PointEncoder;
use crate::error::WriteError;
use crate::metrics::{WriterMetrics, WriterMetricsSnapshot};
use crate::ring::{RingBuffer, WhenFull};
use crate::settings::WriterSettings;

/// Flush controller between log calls and a sink
pub struct PointWriter {
    sink: Arc<dyn PointSink>,
    encoder: PointEncoder,
    buffer: Option<Mutex<RingBuffer<Point>>>,
    capacity: usize,
    flush_interval: Duration,
    write_timeout: Option<Duration>,
    metrics: WriterMetrics,
}

impl PointWriter {
    /// Create a writer for `sink`
    pub fn new(sink: Arc<dyn PointSink>, settings: &WriterSettings) -> Self {
        let encoder = PointEncoder::new(&settings.app_name, &settings.host, &settings.proc_id);

        let capacity = settings.buffer_capacity();
        if capacity < settings.buffer_size && settings.is_buffered() {
            warn!(
                requested = settings.buffer_size,
                capacity, "buffer size capped"
            );
        }
        let buffer = settings
            .is_buffered()
            .then(|| Mutex::new(RingBuffer::new(capacity, WhenFull::Error)));

        debug!(
            sink = sink.name(),
            app_name = %settings.app_name,
            host = %settings.host,
            buffered = buffer.is_some(),
            buffer_size = capacity,
            flush_interval = ?settings.flush_interval,
            "point writer created"
        );

        Self {
            sink,
            encoder,
            capacity,
            buffer,
            flush_interval: settings.flush_interval,
            write_timeout: settings.write_timeout,
            metrics: WriterMetrics::new(),
        }
    }

    /// Whether points are buffered before being written
    #[inline]
    pub fn is_buffered(&self) -> bool {
        self.buffer.is_some()
    }

    /// Configured flush interval (zero when unbuffered)
    #[inline]
    pub fn flush_interval(&self) -> Duration {
        self.flush_interval
    }

    /// Buffer capacity in points (zero when unbuffered)
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of points waiting in the buffer
    pub async fn pending(&self) -> usize {
        match &self.buffer {
            Some(buffer) => buffer.lock().await.len(),
            None => 0,
        }
    }

    #[inline]
    pub fn encoder(&self) -> &PointEncoder {
        &self.encoder
    }

    /// Name of the underlying sink
    #[inline]
    pub fn sink_name(&self) -> &str {
        self.sink.name()
    }

    /// Get snapshot of writer counters
    pub fn metrics(&self) -> WriterMetricsSnapshot {
        self.metrics.snapshot()
    }

    /// Encode a log call stamped with the current time
    pub fn encode(&self, level: Level, args: &[&(dyn fmt::Display + Sync)], fields: &Fields) -> Point {
        self.encoder.encode(level, args, fields, Utc::now())
    }

    /// Encode a log call and write it
    ///
    /// The point is encoded before this returns; the returned future only
    /// borrows the writer.
    ///
    /// # Errors
    ///
    /// See [`write_point`](Self::write_point).
    pub fn write<'a>(
        &'a self,
        level: Level,
        args: &[&(dyn fmt::Display + Sync)],
        fields: &Fields,
    ) -> impl Future<Output = Result<(), WriteError>> + Send + use<'a> {
        let point = self.encode(level, args, fields);
        self.write_point(point)
    }

    /// Write an encoded point
    ///
    /// # Errors
    ///
    /// Returns the sink error (or timeout) of the unbuffered write, or of the
    /// drain forced by a full buffer.
    pub async fn write_point(&self, point: Point) -> Result<(), WriteError> {
        self.metrics.record_received();
        match &self.buffer {
            Some(buffer) => self.write_buffered(buffer, point).await,
            None => self.write_unbuffered(point).await,
        }
    }

    /// Write every buffered point as one batch
    ///
    /// Returns the number of points flushed. A no-op when unbuffered or empty.
    ///
    /// # Errors
    ///
    /// Returns the sink error; the drained points are dropped.
    pub async fn flush(&self) -> Result<usize, WriteError> {
        let Some(buffer) = &self.buffer else {
            return Ok(0);
        };
        let mut ring = buffer.lock().await;
        self.drain(&mut ring).await
    }

    async fn write_unbuffered(&self, point: Point) -> Result<(), WriteError> {
        let batch = [point];
        if let Err(e) = self.send(&batch).await {
            self.metrics.record_dropped(1);
            debug!(error = %e, sink = self.sink.name(), "unbuffered write failed");
            return Err(e);
        }
        Ok(())
    }

    async fn write_buffered(
        &self,
        buffer: &Mutex<RingBuffer<Point>>,
        point: Point,
    ) -> Result<(), WriteError> {
        let mut ring = buffer.lock().await;

        if ring.is_full()
            && let Err(e) = self.drain(&mut ring).await
        {
            self.metrics.record_dropped(1);
            return Err(e);
        }

        ring.push(point)?;
        trace!(pending = ring.len(), "point buffered");
        Ok(())
    }

    /// Drain the locked buffer into one sink call
    async fn drain(&self, ring: &mut RingBuffer<Point>) -> Result<usize, WriteError> {
        let batch: Vec<Point> = ring.drain().collect();
        if batch.is_empty() {
            return Ok(0);
        }
        self.metrics.record_flush();

        let count = batch.len();
        match self.send(&batch).await {
            Ok(()) => {
                debug!(points = count, sink = self.sink.name(), "buffer flushed");
                Ok(count)
            }
            Err(e) => {
                self.metrics.record_dropped(count as u64);
                warn!(
                    error = %e,
                    dropped = count,
                    sink = self.sink.name(),
                    "flush failed, buffered points dropped"
                );
                Err(e)
            }
        }
    }

    async fn send(&self, batch: &[Point]) -> Result<(), WriteError> {
        let write = self.sink.write_batch(batch);
        let result = match self.write_timeout {
            Some(limit) => match tokio::time::timeout(limit, write).await {
                Ok(result) => result.map_err(WriteError::from),
                Err(_) => Err(WriteError::Timeout(limit)),
            },
            None => write.await.map_err(WriteError::from),
        };

        match &result {
            Ok(()) => self.metrics.record_batch(batch.len() as u64),
            Err(_) => self.metrics.record_error(),
        }
        result
    }
}

impl fmt::Debug for PointWriter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PointWriter")
            .field("sink", &self.sink.name())
            .field("buffered", &self.is_buffered())
            .field("flush_interval", &self.flush_interval)
            .field("write_timeout", &self.write_timeout)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "writer_test.rs"]
mod writer_test;
