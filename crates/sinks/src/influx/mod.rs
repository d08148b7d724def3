//! InfluxDB sink - line protocol over HTTP
//!
//! Writes each batch as a single `POST /api/v2/write` request. The whole
//! batch is accepted or the call fails; there is no partial success.
//!
//! # Example
//!
//! ```ignore
//! let sink = InfluxSink::connect("https://influx:8181?token=secret&database=logs")?;
//! sink.write_batch(&points).await?;
//! ```

mod connection;
mod line_protocol;

use std::sync::Arc;

use async_trait::async_trait;
use pointlog_protocol::Point;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use reqwest::{Client, Url};

use crate::PointSink;
use crate::common::{MetricsSnapshot, SinkError, SinkMetrics};

pub use connection::{DEFAULT_AUTH_SCHEME, DEFAULT_TIMEOUT, InfluxConfig, Precision};
pub use line_protocol::{encode_batch, encode_point, timestamp_in};

const CONTENT_TYPE_LINE_PROTOCOL: &str = "text/plain; charset=utf-8";

const USER_AGENT_VALUE: &str = concat!("pointlog/", env!("CARGO_PKG_VERSION"));

/// Sink writing points to InfluxDB
pub struct InfluxSink {
    config: InfluxConfig,
    write_url: Url,
    client: Client,
    metrics: Arc<SinkMetrics>,
}

impl InfluxSink {
    /// Create a sink from a connection string
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Config` if the connection string is invalid or
    /// the HTTP client cannot be built.
    pub fn connect(connection: &str) -> Result<Self, SinkError> {
        Self::new(InfluxConfig::from_connection_string(connection)?)
    }

    /// Create a sink from a parsed configuration
    ///
    /// # Errors
    ///
    /// Returns `SinkError::Config` if the HTTP client cannot be built.
    pub fn new(config: InfluxConfig) -> Result<Self, SinkError> {
        let write_url = config.write_url()?;
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SinkError::config(format!("failed to build HTTP client: {e}")))?;

        tracing::debug!(
            url = %write_url,
            database = %config.database,
            precision = %config.precision,
            "influx sink created"
        );

        Ok(Self {
            config,
            write_url,
            client,
            metrics: Arc::new(SinkMetrics::new()),
        })
    }

    /// Get reference to config
    pub fn config(&self) -> &InfluxConfig {
        &self.config
    }

    /// Snapshot of write metrics
    pub fn metrics(&self) -> MetricsSnapshot {
        self.metrics.snapshot()
    }

    async fn post(&self, body: String) -> Result<(), SinkError> {
        let mut request = self
            .client
            .post(self.write_url.clone())
            .header(CONTENT_TYPE, CONTENT_TYPE_LINE_PROTOCOL)
            .header(USER_AGENT, USER_AGENT_VALUE)
            .body(body);

        if let Some(auth) = self.config.authorization() {
            request = request.header(AUTHORIZATION, auth);
        }

        let response = request
            .send()
            .await
            .map_err(|e| SinkError::connection(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        let body = response.text().await.unwrap_or_default();
        Err(SinkError::server(status.as_u16(), body.trim()))
    }
}

#[async_trait]
impl PointSink for InfluxSink {
    async fn write_batch(&self, points: &[Point]) -> Result<(), SinkError> {
        if points.is_empty() {
            return Ok(());
        }

        let body = encode_batch(points, self.config.precision);
        let bytes = body.len() as u64;

        match self.post(body).await {
            Ok(()) => {
                self.metrics.batch_written(points.len() as u64, bytes);
                tracing::trace!(points = points.len(), bytes, "influx batch written");
                Ok(())
            }
            Err(e) => {
                self.metrics.write_error();
                Err(e)
            }
        }
    }

    fn name(&self) -> &str {
        "influx"
    }
}

#[cfg(test)]
#[path = "influx_test.rs"]
mod influx_test;
