// SPDX-License-Identifier: Apache-2.0

//! Command dispatch for the Snitch CLI.

pub mod doctor;
pub mod report;

use anyhow::Result;
use snitch_core::AppConfig;

use crate::cli::Commands;

/// Runs the selected subcommand.
pub async fn run(command: Commands, config: &AppConfig) -> Result<()> {
    match command {
        Commands::Report(args) => report::run(&args, config).await,
        Commands::Doctor => doctor::run(config),
    }
}
