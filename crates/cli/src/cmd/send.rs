//! Send command - write one log point and flush it
//!
//! Unlike a [`Logger`](pointlog::Logger), which swallows write errors, this
//! command reports them and exits non-zero. `fatal` and `panic` levels are
//! written like any other level; the CLI process is not terminated.

use anyhow::{Context, Result, bail};
use clap::Args;
use pointlog::{FieldValue, Fields, Forwarder, Level};
use pointlog_config::Config;

use super::ForwarderArgs;

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Level (trace, debug, info, warn, error, fatal, panic)
    #[arg(short = 'L', long, default_value = "info")]
    level: Level,

    /// Structured field as key=value (repeatable)
    #[arg(short, long = "field", value_name = "KEY=VALUE")]
    fields: Vec<String>,

    /// Message words, joined with single spaces
    #[arg(required = true)]
    message: Vec<String>,

    #[command(flatten)]
    pub forwarder: ForwarderArgs,
}

pub async fn run(args: SendArgs, config: &Config) -> Result<()> {
    let fields = parse_fields(&args.fields)?;
    let message = args.message.join(" ");

    let forwarder = Forwarder::from_config(&config.forwarder)
        .context("failed to create forwarder")?;

    forwarder
        .writer()
        .write(args.level, &[&message], &fields)
        .await
        .context("failed to write point")?;

    let flushed = forwarder.shutdown().await.context("failed to flush")?;
    tracing::debug!(flushed, "send complete");

    println!("sent {} point: {}", args.level, message);
    Ok(())
}

/// Parse `key=value` pairs into structured fields
fn parse_fields(pairs: &[String]) -> Result<Fields> {
    let mut fields = Fields::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            bail!("invalid field {pair:?}: expected key=value");
        };
        let key = key.trim();
        if key.is_empty() {
            bail!("invalid field {pair:?}: empty key");
        }
        fields.insert(key.to_string(), parse_value(value));
    }
    Ok(fields)
}

/// Infer the scalar type of a field value
fn parse_value(value: &str) -> FieldValue {
    if let Ok(v) = value.parse::<bool>() {
        FieldValue::Bool(v)
    } else if let Ok(v) = value.parse::<i64>() {
        FieldValue::Int(v)
    } else if let Ok(v) = value.parse::<f64>()
        && v.is_finite()
    {
        FieldValue::Float(v)
    } else {
        FieldValue::String(value.to_string())
    }
}
