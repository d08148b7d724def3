//! Writer settings
//!
//! Runtime form of [`ForwarderConfig`] with host and process defaults
//! resolved.

use std::time::Duration;

use pointlog_config::{ForwarderConfig, MAX_BUFFER_SIZE};

/// Fallback host identifier when the hostname cannot be read
pub const FALLBACK_HOST: &str = "localhost";

/// Settings for a [`PointWriter`](crate::PointWriter)
///
/// `WriterSettings::new` is unbuffered: every write reaches the sink
/// immediately. Enable buffering with [`with_buffering`](Self::with_buffering).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriterSettings {
    pub app_name: String,
    pub host: String,
    pub proc_id: String,
    pub flush_interval: Duration,
    pub buffer_size: usize,
    pub write_timeout: Option<Duration>,
    pub periodic_flush: bool,
}

impl WriterSettings {
    /// Unbuffered settings for an application
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            app_name: app_name.into(),
            host: default_host(),
            proc_id: default_proc_id(),
            flush_interval: Duration::ZERO,
            buffer_size: 0,
            write_timeout: None,
            periodic_flush: false,
        }
    }

    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = host.into();
        self
    }

    #[must_use]
    pub fn with_proc_id(mut self, proc_id: impl Into<String>) -> Self {
        self.proc_id = proc_id.into();
        self
    }

    /// Buffer up to `buffer_size` points; zero for either value disables buffering
    #[must_use]
    pub fn with_buffering(mut self, flush_interval: Duration, buffer_size: usize) -> Self {
        self.flush_interval = flush_interval;
        self.buffer_size = buffer_size;
        self
    }

    #[must_use]
    pub fn with_write_timeout(mut self, timeout: Duration) -> Self {
        self.write_timeout = Some(timeout);
        self
    }

    /// Flush the buffer on every `flush_interval` tick from a background task
    #[must_use]
    pub fn with_periodic_flush(mut self, enabled: bool) -> Self {
        self.periodic_flush = enabled;
        self
    }

    /// Whether points are buffered before being written
    pub fn is_buffered(&self) -> bool {
        !self.flush_interval.is_zero() && self.buffer_size > 0
    }

    /// Ring buffer capacity, capped at [`MAX_BUFFER_SIZE`]; zero when unbuffered
    pub fn buffer_capacity(&self) -> usize {
        if self.is_buffered() {
            self.buffer_size.min(MAX_BUFFER_SIZE)
        } else {
            0
        }
    }
}

impl From<&ForwarderConfig> for WriterSettings {
    fn from(config: &ForwarderConfig) -> Self {
        Self {
            app_name: config.app_name.clone(),
            host: config.host.clone().unwrap_or_else(default_host),
            proc_id: config.proc_id.clone().unwrap_or_else(default_proc_id),
            flush_interval: config.flush_interval,
            buffer_size: config.buffer_size,
            write_timeout: config.write_timeout,
            periodic_flush: config.periodic_flush,
        }
    }
}

/// Machine hostname, or [`FALLBACK_HOST`] if it cannot be read
pub fn default_host() -> String {
    hostname::get()
        .ok()
        .and_then(|name| name.into_string().ok())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| FALLBACK_HOST.to_string())
}

/// Current process id
pub fn default_proc_id() -> String {
    std::process::id().to_string()
}
