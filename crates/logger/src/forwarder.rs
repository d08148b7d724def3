//! Forwarder - owns a writer and its optional flusher task
//!
//! Created once at startup. Hand out [`Logger`]s with
//! [`logger`](Forwarder::logger) and call [`shutdown`](Forwarder::shutdown)
//! before exiting so buffered points are not lost.

use std::sync::Arc;

use pointlog_config::ForwarderConfig;
use pointlog_sinks::{InfluxConfig, InfluxSink, PointSink};
use tracing::info;

use crate::error::{ForwarderError, WriteError};
use crate::flusher::{FlusherHandle, spawn_flusher};
use crate::logger::Logger;
use crate::settings::WriterSettings;
use crate::writer::PointWriter;

/// Lifecycle root of a logging pipeline
#[derive(Debug)]
pub struct Forwarder {
    writer: Arc<PointWriter>,
    flusher: Option<FlusherHandle>,
}

impl Forwarder {
    /// Forwarder writing to `sink`
    ///
    /// Does not start the periodic flusher; see
    /// [`start_periodic_flush`](Self::start_periodic_flush).
    pub fn new(sink: Arc<dyn PointSink>, settings: &WriterSettings) -> Self {
        Self {
            writer: Arc::new(PointWriter::new(sink, settings)),
            flusher: None,
        }
    }

    /// Forwarder writing to the InfluxDB instance named by `connection`
    ///
    /// When `settings.write_timeout` is set it also bounds each HTTP request.
    /// Starts the periodic flusher if the settings ask for it, which requires
    /// a Tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns `ForwarderError::Sink` if the connection string is invalid.
    pub fn connect(connection: &str, settings: &WriterSettings) -> Result<Self, ForwarderError> {
        let mut influx = InfluxConfig::from_connection_string(connection)?;
        if let Some(timeout) = settings.write_timeout {
            influx = influx.with_timeout(timeout);
        }
        let sink = InfluxSink::new(influx)?;

        let mut forwarder = Self::new(Arc::new(sink), settings);
        if settings.periodic_flush {
            forwarder.start_periodic_flush();
        }
        Ok(forwarder)
    }

    /// Forwarder built from the `[forwarder]` config section
    ///
    /// # Errors
    ///
    /// Returns `ForwarderError::Config` if the section fails validation and
    /// `ForwarderError::Sink` if the connection string is invalid.
    pub fn from_config(config: &ForwarderConfig) -> Result<Self, ForwarderError> {
        config.validate()?;
        Self::connect(&config.connection, &WriterSettings::from(config))
    }

    /// Start flushing the buffer on every flush interval tick
    ///
    /// No-op when unbuffered or already running. Requires a Tokio runtime.
    pub fn start_periodic_flush(&mut self) {
        if !self.writer.is_buffered() || self.flusher.is_some() {
            return;
        }
        let period = self.writer.flush_interval();
        self.flusher = Some(spawn_flusher(Arc::clone(&self.writer), period));
    }

    /// Whether the periodic flusher is running
    pub fn is_flushing_periodically(&self) -> bool {
        self.flusher.as_ref().is_some_and(|handle| !handle.is_finished())
    }

    /// Root logger with no structured fields
    pub fn logger(&self) -> Logger {
        Logger::new(Arc::clone(&self.writer))
    }

    /// Shared writer
    pub fn writer(&self) -> &Arc<PointWriter> {
        &self.writer
    }

    /// Stop the flusher and write whatever is still buffered
    ///
    /// Returns the number of points written by the final flush.
    ///
    /// # Errors
    ///
    /// Returns the sink error of the final flush.
    pub async fn shutdown(self) -> Result<usize, WriteError> {
        if let Some(flusher) = self.flusher {
            flusher.shutdown().await;
        }
        let flushed = self.writer.flush().await?;

        let metrics = self.writer.metrics();
        info!(
            points_written = metrics.points_written,
            points_dropped = metrics.points_dropped,
            write_errors = metrics.write_errors,
            "forwarder shut down"
        );
        Ok(flushed)
    }
}
