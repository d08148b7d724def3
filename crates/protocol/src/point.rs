//! Points - one log event rendered for the time-series sink

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::field::{FieldValue, Fields};

/// Indexed string dimensions of a point
pub type Tags = BTreeMap<String, String>;

/// Measurement every log point is written to
pub const MEASUREMENT: &str = "syslog";

/// Tag and field names of the persisted wire shape
///
/// Dashboards and alerts are built against these names; they must not change.
pub mod keys {
    pub const TAG_APPNAME: &str = "appname";
    pub const TAG_HOST: &str = "host";
    pub const TAG_HOSTNAME: &str = "hostname";
    pub const TAG_FACILITY: &str = "facility";
    pub const TAG_SEVERITY: &str = "severity";

    pub const FIELD_FACILITY_CODE: &str = "facility_code";
    pub const FIELD_MESSAGE: &str = "message";
    pub const FIELD_PROCID: &str = "procid";
    pub const FIELD_SEVERITY_CODE: &str = "severity_code";
    pub const FIELD_TIMESTAMP: &str = "timestamp";
    pub const FIELD_VERSION: &str = "version";

    /// Prefix for caller-supplied structured fields
    pub const STRUCTURED_PREFIX: &str = "fields.";

    /// Syslog facility name for user-level messages
    pub const FACILITY_USER: &str = "user";
    /// Syslog facility code for user-level messages
    pub const FACILITY_USER_CODE: i64 = 1;
    /// Syslog message format version
    pub const SYSLOG_VERSION: i64 = 1;
}

/// A single data point
///
/// Immutable once constructed. Tags are shared because every point of the
/// same level carries the same tag set.
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    measurement: Arc<str>,
    tags: Arc<Tags>,
    fields: Fields,
    timestamp: DateTime<Utc>,
}

impl Point {
    /// Create a new point
    pub fn new(
        measurement: impl Into<Arc<str>>,
        tags: Arc<Tags>,
        fields: Fields,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            measurement: measurement.into(),
            tags,
            fields,
            timestamp,
        }
    }

    /// Measurement name
    #[inline]
    pub fn measurement(&self) -> &str {
        &self.measurement
    }

    /// Tag set
    #[inline]
    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    /// Field set
    #[inline]
    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    /// Event timestamp
    #[inline]
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// Look up a single tag
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    /// Look up a single field
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.fields.get(key)
    }

    /// Rendered log message, empty if the point carries none
    pub fn message(&self) -> &str {
        self.field(keys::FIELD_MESSAGE)
            .and_then(FieldValue::as_str)
            .unwrap_or_default()
    }
}
