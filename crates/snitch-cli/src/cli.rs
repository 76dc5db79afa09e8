// SPDX-License-Identifier: Apache-2.0

//! Command-line interface definition for Snitch.
//!
//! Uses clap's derive API for declarative CLI parsing.

use clap::{Args, Parser, Subcommand};

/// Snitch - report application log events as GitHub/Gitea issues.
///
/// Loads configuration from `~/.config/snitch/config.toml` (overridable via
/// `SNITCH_*` environment variables) and reads access tokens from
/// `GITHUB_TOKEN` / `GITEA_TOKEN` / `OPENROUTER_API_KEY`.
#[derive(Parser)]
#[command(name = "snitch")]
#[command(version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Enable verbose output (debug-level logging)
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Send a test report to the configured backend
    Report(ReportArgs),
    /// Check configuration and credential wiring
    Doctor,
}

/// Arguments for the `report` command.
#[derive(Args)]
pub struct ReportArgs {
    /// Issue title (defaults to the message itself)
    #[arg(long)]
    pub title: Option<String>,

    /// Report message / issue body
    #[arg(long)]
    pub message: String,

    /// Issue label; repeatable. Names for GitHub, numeric ids for Gitea
    #[arg(long = "label")]
    pub labels: Vec<String>,

    /// Auxiliary data as key=value; repeatable. Values parse as JSON when
    /// possible, otherwise they stay strings
    #[arg(long = "data", value_name = "KEY=VALUE", value_parser = parse_key_val)]
    pub data: Vec<(String, String)>,

    /// Attach an AI triage comment even when disabled in the config
    #[arg(long)]
    pub with_ai: bool,
}

/// Parses a `key=value` pair.
fn parse_key_val(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got: {s}")),
    }
}
