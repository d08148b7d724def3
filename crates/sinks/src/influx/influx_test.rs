//! Tests for the InfluxDB sink

use std::sync::Arc;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use pointlog_protocol::{Fields, Point, Tags};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use super::*;

// =============================================================================
// Connection string tests
// =============================================================================

#[test]
fn test_parse_full_connection_string() {
    let config = InfluxConfig::from_connection_string(
        "https://influx.example.com:8181?token=secret&database=logs&authScheme=Bearer&precision=ms",
    )
    .unwrap();

    assert_eq!(config.url.as_str(), "https://influx.example.com:8181/");
    assert_eq!(config.database, "logs");
    assert_eq!(config.token.as_deref(), Some("secret"));
    assert_eq!(config.auth_scheme, "Bearer");
    assert_eq!(config.precision, Precision::Millisecond);
    assert_eq!(config.timeout, DEFAULT_TIMEOUT);
}

#[test]
fn test_parse_minimal_connection_string() {
    let config: InfluxConfig = "http://localhost:8181?database=logs".parse().unwrap();
    assert!(config.token.is_none());
    assert_eq!(config.auth_scheme, DEFAULT_AUTH_SCHEME);
    assert_eq!(config.precision, Precision::Nanosecond);
    assert!(config.authorization().is_none());
}

#[test]
fn test_parse_missing_database() {
    let err = InfluxConfig::from_connection_string("http://localhost:8181?token=x").unwrap_err();
    assert!(matches!(err, SinkError::Config(_)));
    assert!(err.to_string().contains("database"));
}

#[test]
fn test_parse_invalid_url() {
    let err = InfluxConfig::from_connection_string("not a url").unwrap_err();
    assert!(matches!(err, SinkError::Config(_)));
}

#[test]
fn test_parse_unsupported_scheme() {
    let err = InfluxConfig::from_connection_string("ftp://host?database=x").unwrap_err();
    assert!(err.to_string().contains("ftp"));
}

#[test]
fn test_parse_invalid_precision() {
    let err =
        InfluxConfig::from_connection_string("http://host?database=x&precision=minutes")
            .unwrap_err();
    assert!(err.to_string().contains("minutes"));
}

#[test]
fn test_write_url() {
    let config = InfluxConfig::from_connection_string("http://host:8181?database=app%20logs")
        .unwrap()
        .with_precision(Precision::Second);
    assert_eq!(
        config.write_url().unwrap().as_str(),
        "http://host:8181/api/v2/write?bucket=app+logs&precision=s"
    );
}

#[test]
fn test_write_url_keeps_path_prefix() {
    let config =
        InfluxConfig::from_connection_string("https://gw.example.com/influx/?database=logs")
            .unwrap();
    assert_eq!(
        config.write_url().unwrap().path(),
        "/influx/api/v2/write"
    );
}

#[test]
fn test_authorization_header() {
    let config =
        InfluxConfig::from_connection_string("http://host?database=x&token=abc").unwrap();
    assert_eq!(config.authorization().as_deref(), Some("Token abc"));
}

#[test]
fn test_debug_redacts_token() {
    let config =
        InfluxConfig::from_connection_string("http://host?database=x&token=topsecret").unwrap();
    let debug = format!("{config:?}");
    assert!(!debug.contains("topsecret"));
    assert!(debug.contains("redacted"));
}

// =============================================================================
// HTTP tests
// =============================================================================

/// Raw HTTP request captured by the stub server
struct CapturedRequest {
    head: String,
    body: String,
}

/// Accept a single request and answer it with `status_line`
async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<CapturedRequest>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];

        let header_end = loop {
            let n = stream.read(&mut chunk).await.unwrap();
            assert!(n > 0, "connection closed before headers");
            buf.extend_from_slice(&chunk[..n]);
            if let Some(pos) = buf.windows(4).position(|w| w == b"\r\n\r\n") {
                break pos + 4;
            }
        };

        let head = String::from_utf8_lossy(&buf[..header_end]).to_string();
        let content_length = head
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                name.eq_ignore_ascii_case("content-length")
                    .then(|| value.trim().parse::<usize>().ok())
                    .flatten()
            })
            .unwrap_or(0);

        while buf.len() < header_end + content_length {
            let n = stream.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
        }

        let body_text = String::from_utf8_lossy(&buf[header_end..]).to_string();
        let response = format!(
            "HTTP/1.1 {status_line}\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
            body.len()
        );
        stream.write_all(response.as_bytes()).await.unwrap();
        stream.shutdown().await.ok();

        let _ = tx.send(CapturedRequest {
            head,
            body: body_text,
        });
    });

    (format!("http://{addr}"), rx)
}

fn test_point(message: &str) -> Point {
    let mut tags = Tags::new();
    tags.insert("appname".into(), "api".into());
    let mut fields = Fields::new();
    fields.insert("message".into(), message.into());
    Point::new(
        "syslog",
        Arc::new(tags),
        fields,
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
    )
}

#[tokio::test]
async fn test_write_batch_posts_line_protocol() {
    let (base, rx) = serve_once("204 No Content", "").await;
    let sink = InfluxSink::connect(&format!("{base}?database=logs&token=abc&precision=s")).unwrap();

    sink.write_batch(&[test_point("one"), test_point("two")])
        .await
        .unwrap();

    let request = rx.await.unwrap();
    let head = request.head.to_ascii_lowercase();
    assert!(head.starts_with("post /api/v2/write?bucket=logs&precision=s http/1.1"));
    assert!(head.contains("authorization: token abc"));
    assert!(head.contains("content-type: text/plain; charset=utf-8"));
    assert_eq!(
        request.body,
        "syslog,appname=api message=\"one\" 1714564800\nsyslog,appname=api message=\"two\" 1714564800"
    );

    let metrics = sink.metrics();
    assert_eq!(metrics.batches_written, 1);
    assert_eq!(metrics.points_written, 2);
    assert_eq!(metrics.write_errors, 0);
}

#[tokio::test]
async fn test_write_batch_server_error() {
    let (base, _rx) = serve_once("400 Bad Request", "{\"error\":\"bad line\"}").await;
    let sink = InfluxSink::connect(&format!("{base}?database=logs")).unwrap();

    let err = sink.write_batch(&[test_point("x")]).await.unwrap_err();
    match err {
        SinkError::Server { status, body } => {
            assert_eq!(status, 400);
            assert!(body.contains("bad line"));
        }
        other => panic!("expected server error, got {other:?}"),
    }
    assert_eq!(sink.metrics().write_errors, 1);
}

#[tokio::test]
async fn test_write_batch_connection_refused() {
    // Bind then drop to get a port nothing listens on
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = InfluxConfig::from_connection_string(&format!("http://{addr}?database=logs"))
        .unwrap()
        .with_timeout(Duration::from_secs(2));
    let sink = InfluxSink::new(config).unwrap();

    let err = sink.write_batch(&[test_point("x")]).await.unwrap_err();
    assert!(matches!(err, SinkError::Connection(_)));
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_empty_batch_is_noop() {
    let sink = InfluxSink::connect("http://127.0.0.1:9?database=logs").unwrap();
    sink.write_batch(&[]).await.unwrap();
    assert_eq!(sink.metrics(), MetricsSnapshot::default());
    assert_eq!(sink.name(), "influx");
}
