// SPDX-License-Identifier: Apache-2.0

//! Snitch - report application log events as GitHub/Gitea issues.
//!
//! A CLI companion to `snitch-core` for sending test reports and checking
//! configuration and credential wiring.

mod cli;
mod commands;
mod errors;
mod logging;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::debug;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let config = snitch_core::load_config().context("Failed to load configuration")?;
    debug!("Configuration loaded successfully");

    if let Err(e) = commands::run(cli.command, &config).await {
        eprintln!("Error: {}", errors::format_error(&e));
        std::process::exit(1);
    }
    Ok(())
}
