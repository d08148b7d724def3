//! pointlog - leveled logging forwarded as time-series points
//!
//! Each log call becomes one point on the `syslog` measurement, tagged with
//! application, host and severity, and is written to a [`PointSink`] either
//! immediately or in batches from a fixed-capacity buffer.
//!
//! # Architecture
//!
//! ```text
//! Logger ──► PointWriter ──► PointEncoder ──► Point
//!                 │
//!                 ├─ unbuffered ──► PointSink (batch of one)
//!                 └─ buffered ────► RingBuffer ──full/flush──► PointSink (batch)
//!                                       ▲
//!                                  periodic flusher (optional)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use pointlog::{Forwarder, Level, WriterSettings, fields, log};
//!
//! let settings = WriterSettings::new("api-gateway")
//!     .with_buffering(Duration::from_secs(5), 1000)
//!     .with_periodic_flush(true);
//! let forwarder = Forwarder::connect("http://localhost:8181?database=logs", &settings)?;
//!
//! let logger = forwarder.logger().with_fields(fields! { "region" => "eu-west-1" });
//! log!(logger, Level::Info, "listening on port ", 8080).await;
//!
//! forwarder.shutdown().await?;
//! ```

mod encoder;
mod error;
mod flusher;
mod forwarder;
mod logger;
mod macros;
mod metrics;
mod ring;
mod settings;
mod termination;
mod writer;

pub use encoder::{PointEncoder, format_timestamp, render_message};
pub use error::{ForwarderError, WriteError};
pub use flusher::{FlusherHandle, spawn_flusher};
pub use forwarder::Forwarder;
pub use logger::Logger;
pub use metrics::{WriterMetrics, WriterMetricsSnapshot};
pub use ring::{Drain, RingBuffer, RingError, WhenFull};
pub use settings::{FALLBACK_HOST, WriterSettings, default_host, default_proc_id};
pub use termination::{Disposition, FATAL_EXIT_CODE, ProcessTermination, TerminationPolicy};
pub use writer::PointWriter;

pub use pointlog_protocol::{FieldValue, Fields, Level, Point};
pub use pointlog_sinks::{InfluxSink, MemorySink, NullSink, PointSink, SinkError};
