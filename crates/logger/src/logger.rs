//! Logger facade
//!
//! A [`Logger`] is an immutable snapshot of a structured field set bound to
//! a shared [`PointWriter`]. Deriving a logger never changes the one it was
//! derived from, so loggers can be handed to other tasks freely.
//!
//! Logging is fire-and-forget: write errors are counted by the writer and
//! never reach the caller. After the write attempt, `fatal` ends the process
//! and `panic` unwinds the caller, whether or not the write succeeded.

use std::fmt;
use std::sync::Arc;

use pointlog_protocol::{Fields, Level};
use tracing::debug;

use crate::error::WriteError;
use crate::termination::{Disposition, ProcessTermination, TerminationPolicy};
use crate::writer::PointWriter;

/// Leveled logger forwarding to a point writer
#[derive(Clone)]
pub struct Logger {
    writer: Arc<PointWriter>,
    fields: Arc<Fields>,
    termination: Arc<dyn TerminationPolicy>,
}

impl Logger {
    /// Logger with no structured fields
    pub fn new(writer: Arc<PointWriter>) -> Self {
        Self {
            writer,
            fields: Arc::new(Fields::new()),
            termination: Arc::new(ProcessTermination),
        }
    }

    /// Replace how `fatal` and `panic` calls end the caller
    #[must_use]
    pub fn with_termination(mut self, policy: Arc<dyn TerminationPolicy>) -> Self {
        self.termination = policy;
        self
    }

    /// Structured fields attached to every call
    #[inline]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Shared writer
    #[inline]
    pub fn writer(&self) -> &Arc<PointWriter> {
        &self.writer
    }

    /// Log `args` at `level`
    ///
    /// The point is encoded and timestamped before this returns; the returned
    /// future performs the write and then applies the level's disposition.
    pub fn log<'a>(
        &'a self,
        level: Level,
        args: &[&(dyn fmt::Display + Sync)],
    ) -> impl Future<Output = ()> + Send + use<'a> {
        let point = self.writer.encode(level, args, &self.fields);
        let disposition = Disposition::for_level(level, point.message());

        async move {
            if let Err(e) = self.writer.write_point(point).await {
                debug!(error = %e, level = %level, "log write failed");
            }
            disposition.apply(self.termination.as_ref());
        }
    }

    pub fn trace<'a>(
        &'a self,
        args: &[&(dyn fmt::Display + Sync)],
    ) -> impl Future<Output = ()> + Send + use<'a> {
        self.log(Level::Trace, args)
    }

    pub fn debug<'a>(
        &'a self,
        args: &[&(dyn fmt::Display + Sync)],
    ) -> impl Future<Output = ()> + Send + use<'a> {
        self.log(Level::Debug, args)
    }

    pub fn info<'a>(
        &'a self,
        args: &[&(dyn fmt::Display + Sync)],
    ) -> impl Future<Output = ()> + Send + use<'a> {
        self.log(Level::Info, args)
    }

    pub fn warn<'a>(
        &'a self,
        args: &[&(dyn fmt::Display + Sync)],
    ) -> impl Future<Output = ()> + Send + use<'a> {
        self.log(Level::Warn, args)
    }

    pub fn error<'a>(
        &'a self,
        args: &[&(dyn fmt::Display + Sync)],
    ) -> impl Future<Output = ()> + Send + use<'a> {
        self.log(Level::Error, args)
    }

    /// Log at `fatal`, then end the process
    pub fn fatal<'a>(
        &'a self,
        args: &[&(dyn fmt::Display + Sync)],
    ) -> impl Future<Output = ()> + Send + use<'a> {
        self.log(Level::Fatal, args)
    }

    /// Log at `panic`, then unwind the caller
    pub fn panic<'a>(
        &'a self,
        args: &[&(dyn fmt::Display + Sync)],
    ) -> impl Future<Output = ()> + Send + use<'a> {
        self.log(Level::Panic, args)
    }

    /// Logger with `fields` replacing the current field set
    #[must_use]
    pub fn with_fields(&self, fields: Fields) -> Logger {
        Logger {
            writer: Arc::clone(&self.writer),
            fields: Arc::new(fields),
            termination: Arc::clone(&self.termination),
        }
    }

    /// Logger with `fields` merged into the current field set
    ///
    /// On a key conflict the current value is kept.
    #[must_use]
    pub fn with_additional_fields(&self, fields: Fields) -> Logger {
        let mut merged = fields;
        merged.extend(
            self.fields
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );
        self.with_fields(merged)
    }

    /// Logger sharing the writer with no structured fields attached
    #[must_use]
    pub fn logger(&self) -> Logger {
        self.with_fields(Fields::new())
    }

    /// Write buffered points now
    ///
    /// # Errors
    ///
    /// Returns the sink error; the drained points are dropped.
    pub async fn flush(&self) -> Result<usize, WriteError> {
        self.writer.flush().await
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("writer", &self.writer)
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "logger_test.rs"]
mod logger_test;
