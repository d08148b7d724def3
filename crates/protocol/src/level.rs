//! Log levels and their syslog encodings
//!
//! Every level maps to two fixed representations written to the sink:
//! a severity keyword (the `severity` tag) and a syslog severity code
//! (the `severity_code` field, 0-7, lower is more severe).
//!
//! | Level | Keyword | Code |
//! |-------|---------|------|
//! | trace | debug   | 7    |
//! | debug | debug   | 7    |
//! | info  | info    | 6    |
//! | warn  | warn    | 4    |
//! | error | err     | 3    |
//! | fatal | alert   | 1    |
//! | panic | emerg   | 0    |

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ProtocolError;

/// Leveled-logging severity, least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[repr(u8)]
pub enum Level {
    /// Very verbose tracing output
    Trace = 0,
    /// Debugging information
    Debug = 1,
    /// Normal operation
    #[default]
    Info = 2,
    /// Something unexpected, still running
    Warn = 3,
    /// Operation failed
    Error = 4,
    /// Process terminates after logging
    Fatal = 5,
    /// Caller unwinds after logging
    Panic = 6,
}

impl Level {
    /// All levels in ordinal order
    pub const ALL: [Level; 7] = [
        Level::Trace,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
        Level::Panic,
    ];

    /// Number of levels
    pub const COUNT: usize = Self::ALL.len();

    /// Ordinal index, usable for per-level lookup tables
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Syslog severity keyword written as the `severity` tag
    #[inline]
    pub const fn severity_keyword(self) -> &'static str {
        match self {
            Self::Trace | Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "err",
            Self::Fatal => "alert",
            Self::Panic => "emerg",
        }
    }

    /// Syslog severity code written as the `severity_code` field
    #[inline]
    pub const fn severity_code(self) -> u8 {
        match self {
            Self::Trace | Self::Debug => 7,
            Self::Info => 6,
            Self::Warn => 4,
            Self::Error => 3,
            Self::Fatal => 1,
            Self::Panic => 0,
        }
    }

    /// Lowercase level name
    #[inline]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trace => "trace",
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
            Self::Fatal => "fatal",
            Self::Panic => "panic",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ProtocolError::unknown_level(s))
    }
}
