//! Diagnostics configuration
//!
//! Controls pointlog's own diagnostic output (emitted through `tracing`),
//! not the log points forwarded to the sink.

use serde::Deserialize;

/// Diagnostic verbosity
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticLevel {
    /// Every buffer push and flush
    Trace,
    /// Flush decisions and sink calls
    Debug,
    /// Startup and shutdown
    Info,
    /// Dropped batches and failed writes (default)
    #[default]
    Warn,
    /// Errors only
    Error,
}

impl DiagnosticLevel {
    /// Convert to a tracing filter directive
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Diagnostic output format
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagnosticFormat {
    /// Human-readable lines (default)
    #[default]
    Console,
    /// One JSON object per line
    Json,
}

/// Diagnostics configuration
///
/// # Example
///
/// ```toml
/// [log]
/// level = "debug"
/// format = "json"
/// filter = "pointlog=trace,reqwest=warn"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Verbosity when no `filter` is given
    /// Default: warn
    pub level: DiagnosticLevel,

    /// Output format
    /// Default: console
    pub format: DiagnosticFormat,

    /// Full `EnvFilter` directive, overrides `level`
    /// Default: none
    pub filter: Option<String>,
}

impl LogConfig {
    /// Filter directive to hand to the subscriber
    pub fn directive(&self) -> &str {
        self.filter.as_deref().unwrap_or(self.level.as_str())
    }
}
