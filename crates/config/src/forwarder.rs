//! Forwarder configuration
//!
//! Describes where log points are written and how they are buffered.

use std::time::Duration;

use serde::Deserialize;

/// Default flush interval (buffering enabled)
pub const DEFAULT_FLUSH_INTERVAL: Duration = Duration::from_secs(5);

/// Default number of points buffered before a forced flush
pub const DEFAULT_BUFFER_SIZE: usize = 1000;

/// Upper bound for `buffer_size`
pub const MAX_BUFFER_SIZE: usize = 1_000_000;

/// Forwarder configuration
///
/// Buffering is enabled only when both `flush_interval` and `buffer_size`
/// are non-zero; otherwise every log call is written synchronously.
///
/// # Example
///
/// ```toml
/// [forwarder]
/// connection = "https://influx.example.com:8181?token=secret&database=logs"
/// app_name = "api-gateway"
/// host = "web-01"           # default: machine hostname
/// proc_id = "worker-3"      # default: current process id
/// flush_interval = "5s"     # "0s" disables buffering
/// buffer_size = 1000        # 0 disables buffering
/// periodic_flush = true     # also flush on every interval tick
/// write_timeout = "10s"     # bound each sink write
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForwarderConfig {
    /// Sink connection string
    /// Required
    pub connection: String,

    /// Application name written as the `appname` tag
    /// Required
    pub app_name: String,

    /// Host identifier written as the `host` and `hostname` tags
    /// Default: machine hostname
    pub host: Option<String>,

    /// Process identifier written as the `procid` field
    /// Default: current process id
    pub proc_id: Option<String>,

    /// Flush interval; zero means no buffering
    /// Default: 5s
    #[serde(with = "humantime_serde")]
    pub flush_interval: Duration,

    /// Ring buffer capacity in points; zero means no buffering
    /// Default: 1000
    pub buffer_size: usize,

    /// Run a background task flushing the buffer every `flush_interval`
    /// Default: false
    pub periodic_flush: bool,

    /// Timeout applied to each sink write
    /// Default: none
    #[serde(with = "humantime_serde")]
    pub write_timeout: Option<Duration>,
}

impl ForwarderConfig {
    /// Whether log points are buffered before being written
    pub fn is_buffered(&self) -> bool {
        !self.flush_interval.is_zero() && self.buffer_size > 0
    }

    /// Check this section on its own
    ///
    /// # Errors
    ///
    /// Returns the first missing or invalid field.
    pub fn validate(&self) -> crate::Result<()> {
        crate::validation::validate_forwarder(self)
    }
}

impl Default for ForwarderConfig {
    fn default() -> Self {
        Self {
            connection: String::new(),
            app_name: String::new(),
            host: None,
            proc_id: None,
            flush_interval: DEFAULT_FLUSH_INTERVAL,
            buffer_size: DEFAULT_BUFFER_SIZE,
            periodic_flush: false,
            write_timeout: None,
        }
    }
}
