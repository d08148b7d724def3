//! pointlog - send and check log point forwarding
//!
//! # Usage
//!
//! ```bash
//! # Send one point using a config file
//! pointlog --config pointlog.toml send --level warn disk almost full
//!
//! # Send without a config file
//! pointlog send --connection "http://localhost:8181?database=logs" --app-name api hello
//!
//! # Attach structured fields
//! pointlog send -c pointlog.toml --field user=42 --field path=/login login failed
//!
//! # Validate configuration and write a probe point
//! pointlog check -c pointlog.toml --write
//! ```

mod cmd;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pointlog_config::{DiagnosticFormat, LogConfig};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// pointlog - leveled logging forwarded as time-series points
#[derive(Parser, Debug)]
#[command(name = "pointlog")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Diagnostic log level or filter. Overrides config file.
    #[arg(short, long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Send one log point and flush it
    Send(cmd::send::SendArgs),

    /// Validate configuration and sink connection
    Check(cmd::check::CheckArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Send(args) => {
            let config = cmd::load_config(cli.config.as_deref(), &args.forwarder)?;
            init_logging(&config.log, cli.log_level.as_deref())?;
            cmd::send::run(args, &config).await
        }
        Command::Check(args) => {
            let config = cmd::load_config(cli.config.as_deref(), &args.forwarder)?;
            init_logging(&config.log, cli.log_level.as_deref())?;
            cmd::check::run(args, &config).await
        }
    }
}

/// Initialize the tracing subscriber for diagnostics
///
/// Precedence: `--log-level` > `[log] filter` > `[log] level`.
/// Diagnostics go to stderr so stdout stays clean for command output.
fn init_logging(log: &LogConfig, cli_level: Option<&str>) -> Result<()> {
    let directive = cli_level.unwrap_or_else(|| log.directive());
    let filter = EnvFilter::try_new(directive)
        .or_else(|_| EnvFilter::try_new("warn"))
        .map_err(|e| anyhow::anyhow!("invalid log level: {}", e))?;

    let console = (log.format == DiagnosticFormat::Console).then(|| {
        fmt::layer()
            .with_target(true)
            .with_writer(std::io::stderr)
    });
    let json = (log.format == DiagnosticFormat::Json).then(|| {
        fmt::layer()
            .json()
            .with_writer(std::io::stderr)
    });

    tracing_subscriber::registry()
        .with(console)
        .with(json)
        .with(filter)
        .init();

    Ok(())
}
