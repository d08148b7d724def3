//! pointlog protocol - core types shared by every pointlog crate
//!
//! This crate provides the values that flow from a log call to the sink:
//! - `Level` - leveled-logging severity with its syslog keyword and code
//! - `FieldValue` / `Fields` - scalar structured fields
//! - `Point` - one encoded log event (measurement, tags, fields, timestamp)
//!
//! The tag and field names in [`keys`] are the persisted wire shape and
//! are reproduced exactly for compatibility with existing dashboards.

mod error;
mod field;
mod level;
mod point;

pub use error::ProtocolError;
pub use field::{FieldValue, Fields};
pub use level::Level;
pub use point::{MEASUREMENT, Point, Tags, keys};

// Test modules - only compiled during testing
#[cfg(test)]
mod level_test;
#[cfg(test)]
mod point_test;
