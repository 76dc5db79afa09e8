// SPDX-License-Identifier: Apache-2.0

//! Configuration management for Snitch.
//!
//! Provides layered configuration from files and environment variables.
//! Uses XDG-compliant paths with environment variable support.
//!
//! # Configuration Sources (in priority order)
//!
//! 1. Environment variables (prefix: `SNITCH_`)
//! 2. Config file: `~/.config/snitch/config.toml`
//! 3. Built-in defaults
//!
//! Access tokens never live in the config file; they are read from
//! `GITHUB_TOKEN`, `GITEA_TOKEN`, and `OPENROUTER_API_KEY`.
//!
//! # Examples
//!
//! ```bash
//! # Override the triage model via environment variable
//! SNITCH_AI__MODEL=mistralai/devstral-2512:free snitch report --message "boom"
//! ```

use std::path::PathBuf;

use config::{Config, Environment, File};
use secrecy::SecretString;
use serde::Deserialize;

use crate::ai::DEFAULT_MODEL;
use crate::backend::{BackendConfig, DEFAULT_TIMEOUT_SECONDS};
use crate::error::SnitchError;

/// Environment variable for the GitHub access token.
pub const GITHUB_TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Environment variable for the Gitea access token.
pub const GITEA_TOKEN_ENV: &str = "GITEA_TOKEN";

/// Target git-hosting platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// github.com (or GitHub Enterprise).
    Github,
    /// A self-hosted Gitea instance.
    Gitea,
}

impl Platform {
    /// Environment variable holding this platform's access token.
    #[must_use]
    pub fn token_env(self) -> &'static str {
        match self {
            Platform::Github => GITHUB_TOKEN_ENV,
            Platform::Gitea => GITEA_TOKEN_ENV,
        }
    }
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Backend (git-hosting) settings.
    pub backend: BackendSettings,
    /// AI collaborator settings.
    pub ai: AiConfig,
    /// Reporter behavior settings.
    pub report: ReportSettings,
}

/// Backend settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    /// Target platform: "github" or "gitea".
    pub platform: Platform,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Host for self-hosted platforms (Gitea only).
    pub host: Option<String>,
    /// HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            platform: Platform::Github,
            owner: String::new(),
            repo: String::new(),
            host: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

impl BackendSettings {
    /// Assembles a [`BackendConfig`] with the token read from this platform's
    /// environment variable (empty when unset; construction rejects it).
    #[must_use]
    pub fn backend_config(&self) -> BackendConfig {
        let token = std::env::var(self.platform.token_env()).unwrap_or_default();
        self.backend_config_with_token(SecretString::from(token))
    }

    /// Assembles a [`BackendConfig`] with a directly supplied token.
    #[must_use]
    pub fn backend_config_with_token(&self, token: SecretString) -> BackendConfig {
        let mut config = BackendConfig::new(token, self.owner.clone(), self.repo.clone())
            .with_timeout_seconds(self.timeout_seconds);
        if let Some(host) = &self.host {
            config = config.with_host(host.clone());
        }
        config
    }
}

/// AI collaborator settings.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    /// Attach AI triage comments to created issues.
    pub enabled: bool,
    /// Model identifier.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_seconds: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            model: DEFAULT_MODEL.to_string(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}

/// Reporter behavior settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ReportSettings {
    /// Production mode: report to the backend instead of the local console.
    pub production: bool,
    /// Keep `log`/`debug` output in production (suppressed by default).
    pub log_in_production: bool,
}

/// Returns the Snitch configuration directory.
///
/// Respects the `XDG_CONFIG_HOME` environment variable if set,
/// otherwise defaults to `~/.config/snitch`.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Ok(xdg_config) = std::env::var("XDG_CONFIG_HOME")
        && !xdg_config.is_empty()
    {
        return PathBuf::from(xdg_config).join("snitch");
    }
    dirs::home_dir()
        .expect("Could not determine home directory - is HOME set?")
        .join(".config")
        .join("snitch")
}

/// Returns the path to the configuration file.
#[must_use]
pub fn config_file_path() -> PathBuf {
    config_dir().join("config.toml")
}

/// Load application configuration.
///
/// Loads from config file (if exists) and environment variables.
/// Environment variables use the prefix `SNITCH_` and double underscore
/// for nested keys (e.g., `SNITCH_BACKEND__OWNER`).
///
/// # Errors
///
/// Returns `SnitchError::Config` if the config file exists but is invalid.
pub fn load_config() -> Result<AppConfig, SnitchError> {
    let config_path = config_file_path();

    let config = Config::builder()
        // Load from config file (optional - may not exist)
        .add_source(File::with_name(config_path.to_string_lossy().as_ref()).required(false))
        // Override with environment variables
        .add_source(
            Environment::with_prefix("SNITCH")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let app_config: AppConfig = config.try_deserialize()?;

    Ok(app_config)
}

#[cfg(test)]
mod tests {
    use secrecy::ExposeSecret;

    use super::*;

    #[test]
    fn defaults_target_github_with_reporting_off() {
        let config = AppConfig::default();
        assert_eq!(config.backend.platform, Platform::Github);
        assert_eq!(config.backend.timeout_seconds, 30);
        assert!(!config.ai.enabled);
        assert_eq!(config.ai.model, DEFAULT_MODEL);
        assert!(!config.report.production);
        assert!(!config.report.log_in_production);
    }

    #[test]
    fn toml_file_selects_gitea_with_host() {
        let config_str = r#"
[backend]
platform = "gitea"
owner = "octo"
repo = "widgets"
host = "gitea.example.org"

[report]
production = true
"#;

        let config = Config::builder()
            .add_source(config::File::from_str(config_str, config::FileFormat::Toml))
            .build()
            .expect("should build config");
        let app_config: AppConfig = config.try_deserialize().expect("should deserialize");

        assert_eq!(app_config.backend.platform, Platform::Gitea);
        assert_eq!(app_config.backend.owner, "octo");
        assert_eq!(app_config.backend.host.as_deref(), Some("gitea.example.org"));
        assert!(app_config.report.production);
        assert!(!app_config.report.log_in_production);
    }

    #[test]
    fn backend_config_carries_settings_through() {
        let settings = BackendSettings {
            platform: Platform::Gitea,
            owner: "octo".to_string(),
            repo: "widgets".to_string(),
            host: Some("gitea.example.org".to_string()),
            timeout_seconds: 5,
        };

        let config = settings.backend_config_with_token(SecretString::from("t".to_string()));
        assert_eq!(config.owner, "octo");
        assert_eq!(config.repo, "widgets");
        assert_eq!(config.host.as_deref(), Some("gitea.example.org"));
        assert_eq!(config.timeout_seconds, 5);
        assert_eq!(config.token.expose_secret(), "t");
    }

    #[test]
    fn token_env_names_are_platform_specific() {
        assert_eq!(Platform::Github.token_env(), "GITHUB_TOKEN");
        assert_eq!(Platform::Gitea.token_env(), "GITEA_TOKEN");
    }

    #[test]
    fn config_file_path_ends_with_toml() {
        assert!(config_file_path().ends_with("config.toml"));
    }
}
