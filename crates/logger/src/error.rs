//! Error types for the forwarder

use std::time::Duration;

use pointlog_config::ConfigError;
use pointlog_sinks::SinkError;
use thiserror::Error;

use crate::ring::RingError;

/// Errors from writing or flushing points
#[derive(Debug, Error)]
pub enum WriteError {
    /// The sink rejected the batch
    #[error(transparent)]
    Sink(#[from] SinkError),

    /// The sink did not answer within the write timeout
    #[error("sink write timed out after {0:?}")]
    Timeout(Duration),

    /// The buffer refused the point
    #[error(transparent)]
    Buffer(#[from] RingError),
}

impl WriteError {
    /// Whether retrying the same write could succeed
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Sink(e) => e.is_transient(),
            Self::Timeout(_) => true,
            Self::Buffer(_) => false,
        }
    }
}

/// Errors from building a forwarder
#[derive(Debug, Error)]
pub enum ForwarderError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("sink setup failed: {0}")]
    Sink(#[from] SinkError),
}
