//! InfluxDB connection strings
//!
//! ```text
//! https://host[:port][/prefix]?database=<db>[&token=<t>][&authScheme=<s>][&precision=<p>]
//! ```
//!
//! `database` is required. `authScheme` defaults to `Token` (use `Bearer`
//! for dedicated clusters). `precision` is one of `ns` (default), `us`,
//! `ms`, `s`.

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use reqwest::Url;

use crate::common::SinkError;

/// Default HTTP request timeout
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default authorization scheme
pub const DEFAULT_AUTH_SCHEME: &str = "Token";

/// Timestamp precision of written points
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Precision {
    /// Nanoseconds
    #[default]
    Nanosecond,
    /// Microseconds
    Microsecond,
    /// Milliseconds
    Millisecond,
    /// Seconds
    Second,
}

impl Precision {
    /// Query-string form
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Nanosecond => "ns",
            Self::Microsecond => "us",
            Self::Millisecond => "ms",
            Self::Second => "s",
        }
    }
}

impl fmt::Display for Precision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Precision {
    type Err = SinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ns" | "nanosecond" => Ok(Self::Nanosecond),
            "us" | "microsecond" => Ok(Self::Microsecond),
            "ms" | "millisecond" => Ok(Self::Millisecond),
            "s" | "second" => Ok(Self::Second),
            other => Err(SinkError::config(format!("unsupported precision '{other}'"))),
        }
    }
}

/// Configuration for the InfluxDB sink
#[derive(Clone, PartialEq, Eq)]
pub struct InfluxConfig {
    /// Base URL without query string
    pub url: Url,

    /// Target database (bucket)
    pub database: String,

    /// API token
    pub token: Option<String>,

    /// Authorization header scheme
    pub auth_scheme: String,

    /// Timestamp precision
    pub precision: Precision,

    /// HTTP request timeout
    pub timeout: Duration,
}

impl InfluxConfig {
    /// Parse a connection string
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Config` if the URL is malformed, the scheme is
    /// not http(s), the database is missing or a parameter is invalid.
    pub fn from_connection_string(connection: &str) -> Result<Self, SinkError> {
        let mut url = Url::parse(connection.trim())
            .map_err(|e| SinkError::config(format!("invalid connection string: {e}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(SinkError::config(format!(
                "unsupported scheme '{}', expected http or https",
                url.scheme()
            )));
        }
        if url.cannot_be_a_base() || url.host_str().is_none_or(str::is_empty) {
            return Err(SinkError::config("connection string has no host"));
        }

        let mut database = None;
        let mut token = None;
        let mut auth_scheme = None;
        let mut precision = Precision::default();

        for (key, value) in url.query_pairs() {
            match key.as_ref() {
                "database" | "bucket" => database = Some(value.into_owned()),
                "token" => token = Some(value.into_owned()),
                "authScheme" => auth_scheme = Some(value.into_owned()),
                "precision" => precision = value.parse()?,
                // gzipThreshold and friends are accepted but unused
                _ => {}
            }
        }

        let database = database
            .filter(|db| !db.is_empty())
            .ok_or_else(|| SinkError::config("connection string is missing 'database'"))?;

        url.set_query(None);
        url.set_fragment(None);

        Ok(Self {
            url,
            database,
            token: token.filter(|t| !t.is_empty()),
            auth_scheme: auth_scheme
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| DEFAULT_AUTH_SCHEME.to_string()),
            precision,
            timeout: DEFAULT_TIMEOUT,
        })
    }

    /// Set request timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set timestamp precision
    #[must_use]
    pub fn with_precision(mut self, precision: Precision) -> Self {
        self.precision = precision;
        self
    }

    /// Full write endpoint URL
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Config` if the base URL cannot take path segments.
    pub fn write_url(&self) -> Result<Url, SinkError> {
        let mut url = self.url.clone();
        url.path_segments_mut()
            .map_err(|()| SinkError::config("connection URL cannot be a base"))?
            .pop_if_empty()
            .extend(["api", "v2", "write"]);
        url.query_pairs_mut()
            .append_pair("bucket", &self.database)
            .append_pair("precision", self.precision.as_str());
        Ok(url)
    }

    /// Authorization header value, if a token is configured
    pub fn authorization(&self) -> Option<String> {
        self.token
            .as_ref()
            .map(|token| format!("{} {}", self.auth_scheme, token))
    }
}

impl FromStr for InfluxConfig {
    type Err = SinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_connection_string(s)
    }
}

// Keep the token out of logs
impl fmt::Debug for InfluxConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InfluxConfig")
            .field("url", &self.url.as_str())
            .field("database", &self.database)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("auth_scheme", &self.auth_scheme)
            .field("precision", &self.precision)
            .field("timeout", &self.timeout)
            .finish()
    }
}
