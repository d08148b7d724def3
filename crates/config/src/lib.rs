//! pointlog configuration
//!
//! TOML-based configuration loading with sensible defaults.
//! Only the sink connection and application name are required.
//!
//! # Parsing
//!
//! Use the `FromStr` trait to parse configuration:
//!
//! ```
//! use pointlog_config::Config;
//! use std::str::FromStr;
//!
//! let config = Config::from_str(
//!     "[forwarder]\nconnection = \"http://localhost:8181?database=logs\"\napp_name = \"api\"",
//! )
//! .unwrap();
//! assert!(config.forwarder.is_buffered());
//! ```
//!
//! # Example Config
//!
//! ```toml
//! [log]
//! level = "info"
//!
//! [forwarder]
//! connection = "https://influx.example.com:8181?token=secret&database=logs"
//! app_name = "api-gateway"
//! flush_interval = "5s"
//! buffer_size = 1000
//! ```

mod error;
mod forwarder;
mod logging;
mod validation;

use std::fs;
use std::path::Path;
use std::str::FromStr;

pub use error::{ConfigError, Result};
pub use forwarder::{DEFAULT_BUFFER_SIZE, DEFAULT_FLUSH_INTERVAL, ForwarderConfig, MAX_BUFFER_SIZE};
pub use logging::{DiagnosticFormat, DiagnosticLevel, LogConfig};

use serde::Deserialize;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Diagnostics configuration
    pub log: LogConfig,

    /// Sink connection, identity and buffering
    pub forwarder: ForwarderConfig,
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be read, contains invalid TOML or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let config = Self::from_file_unvalidated(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a TOML file without validating it
    ///
    /// For callers that layer overrides on top of the file; call
    /// [`validate`](Self::validate) once the overrides are applied.
    pub fn from_file_unvalidated<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
            path: path.display().to_string(),
            source: e,
        })?;

        Self::parse_unvalidated(&contents)
    }

    /// Parse a TOML string without validating it
    pub fn parse_unvalidated(s: &str) -> Result<Self> {
        toml::from_str(s).map_err(ConfigError::ParseError)
    }

    /// Parse configuration from a TOML string
    ///
    /// Prefer using the `FromStr` trait implementation.
    fn parse(s: &str) -> Result<Self> {
        let config = Self::parse_unvalidated(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        validation::validate_config(self)
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
