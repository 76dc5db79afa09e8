// SPDX-License-Identifier: Apache-2.0

#![warn(missing_docs)]

//! # Snitch Core
//!
//! Core library for Snitch - application log events reported as issues on a
//! git-hosting platform (GitHub or self-hosted Gitea), optionally enriched
//! with an AI-generated triage comment.
//!
//! This crate provides reusable components for:
//! - Formatting log events into issue title/body pairs with Markdown tables
//! - Creating issues and comments on GitHub or Gitea
//! - AI triage comments via `OpenRouter`
//! - Configuration management
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use secrecy::SecretString;
//! use snitch_core::{BackendConfig, ErrorReport, GithubBackend, Reporter};
//!
//! # async fn example() -> snitch_core::Result<()> {
//! let token = SecretString::from(std::env::var("GITHUB_TOKEN").unwrap_or_default());
//! let backend = GithubBackend::new(BackendConfig::new(token, "octo", "widgets"))?;
//! let reporter = Reporter::builder(backend).production(true).build();
//!
//! // Awaited dispatch; delivery failures are logged locally, never raised.
//! reporter
//!     .error(ErrorReport::new("disk full").with_labels(vec!["bug".to_string()]))
//!     .await;
//! # Ok(())
//! # }
//! ```
//!
//! Label typing follows the backend: `Reporter<GithubBackend>` takes label
//! names (`String`), `Reporter<GiteaBackend>` takes numeric label ids
//! (`i64`). Mixing them up is a compile error, not a runtime surprise.
//!
//! ## Modules
//!
//! - [`ai`] - AI collaborator (`OpenRouter` chat completions)
//! - [`backend`] - GitHub/Gitea issue adapters
//! - [`config`] - Configuration loading and paths
//! - [`error`] - Error types
//! - [`format`] - Log event to issue formatting
//! - [`report`] - The reporter facade

// ============================================================================
// Error Handling
// ============================================================================

pub use error::SnitchError;

/// Convenience Result type for Snitch operations.
///
/// This is equivalent to `std::result::Result<T, SnitchError>`.
pub type Result<T> = std::result::Result<T, SnitchError>;

// ============================================================================
// Configuration
// ============================================================================

pub use config::{AiConfig, AppConfig, Platform, config_dir, config_file_path, load_config};

// ============================================================================
// Formatting
// ============================================================================

pub use format::{AuxData, IssueContent, LogValue, RouteEntry};

// ============================================================================
// Backends
// ============================================================================

pub use backend::{BackendConfig, GiteaBackend, GithubBackend, IssueBackend};

// ============================================================================
// AI Collaborator
// ============================================================================

pub use ai::OpenRouterClient;

// ============================================================================
// Reporter Facade
// ============================================================================

pub use report::{ErrorReport, Mode, Reporter, ReporterBuilder, WarnReport};

// ============================================================================
// Modules
// ============================================================================

pub mod ai;
pub mod backend;
pub mod config;
pub mod error;
pub mod format;
pub mod report;
