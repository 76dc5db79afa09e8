// SPDX-License-Identifier: Apache-2.0

//! The `doctor` command: check configuration and credential wiring.
//!
//! Reports what Snitch would use without sending anything. Token values are
//! never printed, only whether they are set.

use anyhow::Result;
use snitch_core::ai::OPENROUTER_API_KEY_ENV;
use snitch_core::{AppConfig, Platform, config_file_path};

fn env_is_set(name: &str) -> bool {
    std::env::var(name).is_ok_and(|value| !value.is_empty())
}

/// Prints a configuration summary.
pub fn run(config: &AppConfig) -> Result<()> {
    let path = config_file_path();
    let path_status = if path.exists() {
        "found"
    } else {
        "not found, using defaults"
    };
    println!("Config file: {} ({path_status})", path.display());

    let platform_name = match config.backend.platform {
        Platform::Github => "GitHub",
        Platform::Gitea => "Gitea",
    };
    println!("Platform:    {platform_name}");

    let owner = if config.backend.owner.is_empty() {
        "<unset>"
    } else {
        config.backend.owner.as_str()
    };
    let repo = if config.backend.repo.is_empty() {
        "<unset>"
    } else {
        config.backend.repo.as_str()
    };
    println!("Repository:  {owner}/{repo}");

    if config.backend.platform == Platform::Gitea {
        println!(
            "Host:        {}",
            config.backend.host.as_deref().unwrap_or("<unset>")
        );
    }

    let token_env = config.backend.platform.token_env();
    let token_status = if env_is_set(token_env) {
        "set"
    } else {
        "missing"
    };
    println!("Token:       {token_env} ({token_status})");

    if config.ai.enabled {
        let key_status = if env_is_set(OPENROUTER_API_KEY_ENV) {
            "set"
        } else {
            "missing"
        };
        println!(
            "AI:          enabled, model {} ({OPENROUTER_API_KEY_ENV} {key_status})",
            config.ai.model
        );
    } else {
        println!("AI:          disabled");
    }

    Ok(())
}
