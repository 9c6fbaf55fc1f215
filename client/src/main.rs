mod cli;
mod error;
mod handlers;
mod view;

use std::io;

use anyhow::Context;
use clap::Parser;
use plasma_common::ClientConfig;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use error::ClientResult;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> ClientResult<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::load(path)?,
        None => ClientConfig::load_default()?,
    };
    if let Some(network) = cli.network {
        config.network = network.into();
    }
    Ok(config)
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging();

    let config = load_config(&cli).context("Failed to load client config")?;
    debug!(network = %config.network, "Client configured");

    let mut handler = cli.command.into_handler(config).unwrap_or_else(|e| e.exit());
    let stdout = io::stdout();
    let mut out = stdout.lock();
    handler.handle(&mut out)?;
    Ok(())
}
