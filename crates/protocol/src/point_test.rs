//! Tests for points

use std::sync::Arc;

use chrono::{TimeZone, Utc};

use crate::field::{FieldValue, Fields};
use crate::point::{MEASUREMENT, Point, Tags, keys};

fn sample_point() -> Point {
    let mut tags = Tags::new();
    tags.insert(keys::TAG_APPNAME.into(), "api".into());
    tags.insert(keys::TAG_SEVERITY.into(), "info".into());

    let mut fields = Fields::new();
    fields.insert(keys::FIELD_MESSAGE.into(), "hello".into());
    fields.insert(keys::FIELD_SEVERITY_CODE.into(), 6.into());

    let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
    Point::new(MEASUREMENT, Arc::new(tags), fields, ts)
}

#[test]
fn test_point_accessors() {
    let point = sample_point();
    assert_eq!(point.measurement(), "syslog");
    assert_eq!(point.tag("appname"), Some("api"));
    assert_eq!(point.tag("missing"), None);
    assert_eq!(point.field("severity_code"), Some(&FieldValue::Int(6)));
    assert_eq!(point.tags().len(), 2);
    assert_eq!(point.fields().len(), 2);
    assert_eq!(
        point.timestamp(),
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    );
}

#[test]
fn test_point_message() {
    assert_eq!(sample_point().message(), "hello");
}

#[test]
fn test_point_message_missing_is_empty() {
    let point = Point::new(MEASUREMENT, Arc::new(Tags::new()), Fields::new(), Utc::now());
    assert_eq!(point.message(), "");
}

#[test]
fn test_clone_shares_tags() {
    let point = sample_point();
    let copy = point.clone();
    assert_eq!(point, copy);
    assert!(std::ptr::eq(point.tags(), copy.tags()));
}
