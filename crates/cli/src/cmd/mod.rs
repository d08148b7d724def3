//! Command implementations for the pointlog CLI

pub mod check;
pub mod send;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Args;
use pointlog_config::Config;

/// Forwarder settings that can be given on the command line
///
/// Flags override the config file; without a file they are the whole
/// forwarder configuration.
#[derive(Args, Debug, Default)]
pub struct ForwarderArgs {
    /// Sink connection string, e.g. "http://host:8181?database=logs&token=..."
    #[arg(long)]
    pub connection: Option<String>,

    /// Application name (appname tag)
    #[arg(long)]
    pub app_name: Option<String>,

    /// Host tag (default: machine hostname)
    #[arg(long)]
    pub host: Option<String>,

    /// Process id field (default: current process id)
    #[arg(long)]
    pub proc_id: Option<String>,
}

/// Load the config file (if any), apply flag overrides and validate
pub fn load_config(path: Option<&Path>, overrides: &ForwarderArgs) -> Result<Config> {
    let mut config = match path {
        Some(path) => Config::from_file_unvalidated(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => Config::default(),
    };

    apply_overrides(&mut config, overrides);

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn apply_overrides(config: &mut Config, overrides: &ForwarderArgs) {
    let forwarder = &mut config.forwarder;
    if let Some(connection) = &overrides.connection {
        forwarder.connection = connection.clone();
    }
    if let Some(app_name) = &overrides.app_name {
        forwarder.app_name = app_name.clone();
    }
    if overrides.host.is_some() {
        forwarder.host = overrides.host.clone();
    }
    if overrides.proc_id.is_some() {
        forwarder.proc_id = overrides.proc_id.clone();
    }
}
