// SPDX-License-Identifier: Apache-2.0

//! CLI-specific error formatting with user-friendly hints.
//!
//! Downcasts `anyhow::Error` to `SnitchError` and adds remediation hints for
//! the common failure classes, keeping structured error data in the library
//! and presentation here.

use anyhow::Error;
use snitch_core::SnitchError;

/// Formats an error for CLI display with helpful hints.
///
/// If the error is not a `SnitchError`, returns the original error message.
pub fn format_error(error: &Error) -> String {
    if let Some(snitch_err) = error.downcast_ref::<SnitchError>() {
        match snitch_err {
            SnitchError::MissingToken { platform, .. } => {
                format!(
                    "{snitch_err}\n\nTip: export the token, e.g. `export {}=...`",
                    token_env_hint(platform)
                )
            }
            SnitchError::Config { .. } => {
                format!(
                    "{snitch_err}\n\nTip: Check your config file at {}",
                    snitch_core::config_file_path().display()
                )
            }
            SnitchError::Network(_) => {
                format!("{snitch_err}\n\nTip: Check your internet connection and try again.")
            }
            SnitchError::Backend { .. } | SnitchError::Ai { .. } => snitch_err.to_string(),
        }
    } else {
        format!("{error:#}")
    }
}

fn token_env_hint(platform: &str) -> &'static str {
    match platform {
        "Gitea" => "GITEA_TOKEN",
        "OpenRouter" => "OPENROUTER_API_KEY",
        _ => "GITHUB_TOKEN",
    }
}
