// SPDX-License-Identifier: Apache-2.0

//! Git-hosting backend adapters.
//!
//! Defines the [`IssueBackend`] capability and its two variants, GitHub and
//! Gitea. The variants differ only in endpoint layout, auth placement, and
//! label typing; everything above them is shared.

pub mod gitea;
pub mod github;

pub use gitea::GiteaBackend;
pub use github::GithubBackend;

use async_trait::async_trait;
use secrecy::SecretString;
use serde::Serialize;

use crate::Result;

/// Default HTTP timeout for backend requests, in seconds.
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

/// Construction-time settings for a backend, immutable for the adapter's
/// lifetime.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Personal access token. An empty token fails construction.
    pub token: SecretString,
    /// Repository owner.
    pub owner: String,
    /// Repository name.
    pub repo: String,
    /// Host for self-hosted platforms (Gitea). Ignored by GitHub.
    pub host: Option<String>,
    /// HTTP timeout in seconds.
    pub timeout_seconds: u64,
}

impl BackendConfig {
    /// Creates a config for the given repository with the default timeout.
    pub fn new(token: SecretString, owner: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            token,
            owner: owner.into(),
            repo: repo.into(),
            host: None,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Sets the host for self-hosted platforms.
    #[must_use]
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    /// Overrides the HTTP timeout.
    #[must_use]
    pub fn with_timeout_seconds(mut self, seconds: u64) -> Self {
        self.timeout_seconds = seconds;
        self
    }
}

/// The polymorphic issue-creation capability.
///
/// The associated [`Label`](IssueBackend::Label) type enforces each
/// platform's label scheme at the interface boundary: GitHub labels are
/// names, Gitea labels are numeric ids. Assigning one to the other does not
/// compile.
#[async_trait]
pub trait IssueBackend: Send + Sync {
    /// Platform-specific label type.
    type Label: Serialize + Send + Sync + 'static;

    /// Human-readable platform name (e.g., `GitHub`).
    fn platform(&self) -> &'static str;

    /// Creates an issue and returns its number.
    async fn create_issue(&self, title: &str, body: &str, labels: &[Self::Label]) -> Result<u64>;

    /// Adds a comment to an existing issue.
    async fn add_comment(&self, number: u64, body: &str) -> Result<()>;
}

/// Issue-creation response shared by both platforms.
#[derive(Debug, serde::Deserialize)]
pub(crate) struct IssueCreated {
    /// Issue number assigned by the platform.
    pub number: u64,
}
