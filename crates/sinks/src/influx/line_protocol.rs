//! Line protocol encoding
//!
//! ```text
//! measurement,tag1=v1,tag2=v2 field1="s",field2=3i,field3=1.5 1714564800000000000
//! ```
//!
//! Tags and fields are written in key order. Empty tag values are omitted
//! and non-finite floats are skipped since line protocol cannot carry them.

use std::fmt::Write as _;

use chrono::{DateTime, Utc};
use pointlog_protocol::{FieldValue, Point};

use super::connection::Precision;

/// Encode a batch, one line per point, newline separated
pub fn encode_batch(points: &[Point], precision: Precision) -> String {
    let mut out = String::with_capacity(points.len() * 256);
    for (i, point) in points.iter().enumerate() {
        if i > 0 {
            out.push('\n');
        }
        encode_point(point, precision, &mut out);
    }
    out
}

/// Append one point to `out` without a trailing newline
pub fn encode_point(point: &Point, precision: Precision, out: &mut String) {
    escape_into(out, point.measurement(), &[',', ' ']);

    for (key, value) in point.tags() {
        if value.is_empty() {
            continue;
        }
        out.push(',');
        escape_into(out, key, &[',', '=', ' ']);
        out.push('=');
        escape_into(out, value, &[',', '=', ' ']);
    }

    out.push(' ');
    let mut first = true;
    for (key, value) in point.fields() {
        if let FieldValue::Float(f) = value
            && !f.is_finite()
        {
            continue;
        }
        if !first {
            out.push(',');
        }
        first = false;
        escape_into(out, key, &[',', '=', ' ']);
        out.push('=');
        write_field_value(out, value);
    }

    out.push(' ');
    let _ = write!(out, "{}", timestamp_in(point.timestamp(), precision));
}

/// Timestamp as an integer in the given precision
pub fn timestamp_in(ts: DateTime<Utc>, precision: Precision) -> i64 {
    match precision {
        Precision::Nanosecond => ts
            .timestamp_nanos_opt()
            .unwrap_or_else(|| ts.timestamp_micros().saturating_mul(1000)),
        Precision::Microsecond => ts.timestamp_micros(),
        Precision::Millisecond => ts.timestamp_millis(),
        Precision::Second => ts.timestamp(),
    }
}

fn write_field_value(out: &mut String, value: &FieldValue) {
    match value {
        FieldValue::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
        FieldValue::Int(v) => {
            let _ = write!(out, "{v}i");
        }
        FieldValue::UInt(v) => {
            let _ = write!(out, "{v}u");
        }
        FieldValue::Float(v) => {
            let _ = write!(out, "{v}");
        }
        // Quoted strings only escape `"` and `\`; newlines pass through
        FieldValue::String(s) => {
            out.push('"');
            for c in s.chars() {
                match c {
                    '"' | '\\' => {
                        out.push('\\');
                        out.push(c);
                    }
                    _ => out.push(c),
                }
            }
            out.push('"');
        }
    }
}

fn escape_into(out: &mut String, s: &str, special: &[char]) {
    for c in s.chars() {
        if c == '\n' {
            out.push_str("\\n");
            continue;
        }
        if special.contains(&c) {
            out.push('\\');
        }
        out.push(c);
    }
}

#[cfg(test)]
#[path = "line_protocol_test.rs"]
mod line_protocol_test;
