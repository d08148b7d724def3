//! Tests for the point encoder

use chrono::{TimeZone, Utc};
use pointlog_protocol::{FieldValue, Fields, Level, keys};

use super::*;

fn encoder() -> PointEncoder {
    PointEncoder::new("api", "web-01", "4242")
}

fn noon() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

// =============================================================================
// Tags
// =============================================================================

#[test]
fn test_tags_per_level() {
    let encoder = encoder();
    for level in Level::ALL {
        let tags = encoder.tags(level);
        assert_eq!(tags.len(), 5);
        assert_eq!(tags["appname"], "api");
        assert_eq!(tags["host"], "web-01");
        assert_eq!(tags["hostname"], "web-01");
        assert_eq!(tags["facility"], "user");
        assert_eq!(tags["severity"], level.severity_keyword());
    }
}

#[test]
fn test_tags_shared_between_points() {
    let encoder = encoder();
    let a = encoder.encode(Level::Info, &[&"a"], &Fields::new(), noon());
    let b = encoder.encode(Level::Info, &[&"b"], &Fields::new(), noon());
    assert!(std::ptr::eq(a.tags(), b.tags()));
}

// =============================================================================
// Fields
// =============================================================================

#[test]
fn test_encode_error_point() {
    let point = encoder().encode(Level::Error, &[&"disk ", &"full"], &Fields::new(), noon());

    assert_eq!(point.measurement(), "syslog");
    assert_eq!(point.tag("severity"), Some("err"));
    assert_eq!(point.timestamp(), noon());

    let fields = point.fields();
    assert_eq!(fields.len(), 6);
    assert_eq!(fields["facility_code"], FieldValue::Int(1));
    assert_eq!(fields["procid"], FieldValue::from("4242"));
    assert_eq!(fields["severity_code"], FieldValue::Int(3));
    assert_eq!(fields["timestamp"], FieldValue::from("2024-05-01T12:00:00Z"));
    assert_eq!(fields["message"], FieldValue::from("disk full"));
    assert_eq!(fields["version"], FieldValue::Int(1));
}

#[test]
fn test_severity_code_per_level() {
    let encoder = encoder();
    let expected = [7, 7, 6, 4, 3, 1, 0];
    for (level, code) in Level::ALL.into_iter().zip(expected) {
        let point = encoder.encode(level, &[], &Fields::new(), noon());
        assert_eq!(point.field("severity_code").and_then(FieldValue::as_i64), Some(code));
    }
}

#[test]
fn test_structured_fields_are_prefixed() {
    let mut fields = Fields::new();
    fields.insert("user".into(), 42i64.into());
    fields.insert("path".into(), "/x".into());

    let point = encoder().encode(Level::Info, &[&"ok"], &fields, noon());
    assert_eq!(point.field("fields.user"), Some(&FieldValue::Int(42)));
    assert_eq!(point.field("fields.path"), Some(&FieldValue::from("/x")));
    assert_eq!(point.field("user"), None);
    assert_eq!(point.fields().len(), 8);
}

#[test]
fn test_structured_fields_cannot_shadow_reserved() {
    let mut fields = Fields::new();
    fields.insert("message".into(), "spoofed".into());

    let point = encoder().encode(Level::Warn, &[&"real"], &fields, noon());
    assert_eq!(point.message(), "real");
    assert_eq!(point.field("fields.message"), Some(&FieldValue::from("spoofed")));
}

#[test]
fn test_empty_message() {
    let point = encoder().encode(Level::Debug, &[], &Fields::new(), noon());
    assert_eq!(point.message(), "");
    assert_eq!(point.field(keys::FIELD_MESSAGE), Some(&FieldValue::from("")));
}

#[test]
fn test_encode_message_keeps_text() {
    let point = encoder().encode_message(Level::Info, "pre-rendered".into(), &Fields::new(), noon());
    assert_eq!(point.message(), "pre-rendered");
}

// =============================================================================
// Rendering
// =============================================================================

#[test]
fn test_render_message_concatenates() {
    assert_eq!(render_message(&[&"user ", &42, &" logged in"]), "user 42 logged in");
    assert_eq!(render_message(&[&1, &2, &3.5]), "123.5");
    assert_eq!(render_message(&[]), "");
}

#[test]
fn test_format_timestamp_truncates_subseconds() {
    let ts = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap() + chrono::Duration::milliseconds(678);
    assert_eq!(format_timestamp(ts), "2024-01-02T03:04:05Z");
}
