//! Check command - validate configuration and sink connection
//!
//! Prints the resolved forwarder settings. With `--write`, also sends one
//! debug-level probe point and reports whether the sink accepted it.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Args;
use pointlog::{Fields, Forwarder, Level, WriterSettings};
use pointlog_config::Config;
use pointlog_sinks::InfluxConfig;

use super::ForwarderArgs;

/// Message of the probe point
const PROBE_MESSAGE: &str = "pointlog connectivity check";

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Write a probe point to the sink
    #[arg(short, long)]
    write: bool,

    #[command(flatten)]
    pub forwarder: ForwarderArgs,
}

pub async fn run(args: CheckArgs, config: &Config) -> Result<()> {
    let forwarder_config = &config.forwarder;
    let influx = InfluxConfig::from_connection_string(&forwarder_config.connection)
        .context("invalid connection string")?;
    let settings = WriterSettings::from(forwarder_config);

    println!("Configuration OK");
    println!("  sink:           {}", influx.url);
    println!("  database:       {}", influx.database);
    println!("  precision:      {}", influx.precision);
    println!("  token:          {}", if influx.token.is_some() { "set" } else { "none" });
    println!("  app_name:       {}", settings.app_name);
    println!("  host:           {}", settings.host);
    println!("  proc_id:        {}", settings.proc_id);
    if settings.is_buffered() {
        println!(
            "  buffering:      {} points, flush every {:?}{}",
            settings.buffer_size,
            settings.flush_interval,
            if settings.periodic_flush { " (periodic)" } else { "" }
        );
    } else {
        println!("  buffering:      off");
    }
    if let Some(timeout) = settings.write_timeout {
        println!("  write timeout:  {timeout:?}");
    }

    if !args.write {
        return Ok(());
    }

    // Probe unbuffered so the write reaches the sink now
    let probe = WriterSettings {
        flush_interval: std::time::Duration::ZERO,
        buffer_size: 0,
        periodic_flush: false,
        ..settings
    };
    let forwarder = Forwarder::connect(&forwarder_config.connection, &probe)
        .context("failed to create forwarder")?;

    let started = Instant::now();
    forwarder
        .writer()
        .write(Level::Debug, &[&PROBE_MESSAGE], &Fields::new())
        .await
        .context("probe write failed")?;

    println!("Probe point written in {:?}", started.elapsed());
    Ok(())
}
