//! Protocol error types

use thiserror::Error;

/// Errors that can occur when handling protocol values
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// Level name is not one of trace, debug, info, warn, error, fatal, panic
    #[error("unknown log level: '{0}'")]
    UnknownLevel(String),
}

impl ProtocolError {
    /// Create an unknown level error
    #[inline]
    pub fn unknown_level(name: impl Into<String>) -> Self {
        Self::UnknownLevel(name.into())
    }
}
