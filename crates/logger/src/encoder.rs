//! Point encoder
//!
//! Turns a log call into a [`Point`] on the `syslog` measurement. Tags are
//! computed once per level at construction and shared by every point of
//! that level.
//!
//! # Field precedence
//!
//! Later steps overwrite earlier ones:
//!
//! 1. caller fields, each stored as `fields.<key>`
//! 2. static defaults (`facility_code`, `procid`, `version`, placeholders)
//! 3. `severity_code`, `timestamp` and `message` for this call

use std::fmt::{self, Write as _};
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};
use pointlog_protocol::{FieldValue, Fields, Level, MEASUREMENT, Point, Tags, keys};

/// Encodes log calls into points
#[derive(Debug, Clone)]
pub struct PointEncoder {
    measurement: Arc<str>,
    tags: [Arc<Tags>; Level::COUNT],
    defaults: Fields,
}

impl PointEncoder {
    /// Create an encoder for one application instance
    pub fn new(app_name: &str, host: &str, proc_id: &str) -> Self {
        let tags = Level::ALL.map(|level| Arc::new(level_tags(level, app_name, host)));

        let mut defaults = Fields::new();
        defaults.insert(keys::FIELD_FACILITY_CODE.into(), keys::FACILITY_USER_CODE.into());
        defaults.insert(keys::FIELD_MESSAGE.into(), "".into());
        defaults.insert(keys::FIELD_PROCID.into(), proc_id.into());
        defaults.insert(
            keys::FIELD_SEVERITY_CODE.into(),
            i64::from(Level::Debug.severity_code()).into(),
        );
        defaults.insert(keys::FIELD_TIMESTAMP.into(), 0i64.into());
        defaults.insert(keys::FIELD_VERSION.into(), keys::SYSLOG_VERSION.into());

        Self {
            measurement: Arc::from(MEASUREMENT),
            tags,
            defaults,
        }
    }

    /// Shared tag set for a level
    #[inline]
    pub fn tags(&self, level: Level) -> &Arc<Tags> {
        &self.tags[level.index()]
    }

    /// Encode a log call with rendered arguments
    pub fn encode(
        &self,
        level: Level,
        args: &[&(dyn fmt::Display + Sync)],
        fields: &Fields,
        timestamp: DateTime<Utc>,
    ) -> Point {
        self.encode_message(level, render_message(args), fields, timestamp)
    }

    /// Encode a log call with an already rendered message
    pub fn encode_message(
        &self,
        level: Level,
        message: String,
        fields: &Fields,
        timestamp: DateTime<Utc>,
    ) -> Point {
        let mut point_fields: Fields = fields
            .iter()
            .map(|(key, value)| (format!("{}{key}", keys::STRUCTURED_PREFIX), value.clone()))
            .collect();

        point_fields.extend(
            self.defaults
                .iter()
                .map(|(key, value)| (key.clone(), value.clone())),
        );

        point_fields.insert(
            keys::FIELD_SEVERITY_CODE.into(),
            i64::from(level.severity_code()).into(),
        );
        point_fields.insert(
            keys::FIELD_TIMESTAMP.into(),
            FieldValue::String(format_timestamp(timestamp)),
        );
        point_fields.insert(keys::FIELD_MESSAGE.into(), FieldValue::String(message));

        Point::new(
            Arc::clone(&self.measurement),
            Arc::clone(self.tags(level)),
            point_fields,
            timestamp,
        )
    }
}

/// Render message arguments
///
/// `Display` renderings are concatenated with no separators.
pub fn render_message(args: &[&(dyn fmt::Display + Sync)]) -> String {
    let mut message = String::new();
    for arg in args {
        // Writing into a String cannot fail
        let _ = write!(message, "{arg}");
    }
    message
}

/// RFC 3339 timestamp in UTC with second precision
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn level_tags(level: Level, app_name: &str, host: &str) -> Tags {
    let mut tags = Tags::new();
    tags.insert(keys::TAG_APPNAME.into(), app_name.into());
    tags.insert(keys::TAG_FACILITY.into(), keys::FACILITY_USER.into());
    tags.insert(keys::TAG_HOST.into(), host.into());
    tags.insert(keys::TAG_HOSTNAME.into(), host.into());
    tags.insert(keys::TAG_SEVERITY.into(), level.severity_keyword().into());
    tags
}

#[cfg(test)]
#[path = "encoder_test.rs"]
mod encoder_test;
