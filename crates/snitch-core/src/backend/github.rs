// SPDX-License-Identifier: Apache-2.0

//! GitHub backend adapter.
//!
//! Creates issues and comments via the GitHub REST API using a personal
//! access token. Issues are auto-assigned to the repository owner.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use super::{BackendConfig, IssueBackend, IssueCreated};
use crate::error::SnitchError;
use crate::Result;

/// Public GitHub API base URL.
pub const GITHUB_API_URL: &str = "https://api.github.com";

/// URL where a repo-scoped personal access token can be created.
const TOKEN_HELP_URL: &str = "https://github.com/settings/tokens/new?scopes=repo";

#[derive(Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
    assignees: [&'a str; 1],
    labels: &'a [String],
}

#[derive(Serialize)]
struct CreateCommentRequest<'a> {
    body: &'a str,
}

/// GitHub issue backend.
///
/// Labels are names (`String`), matching GitHub's label scheme.
#[derive(Debug)]
pub struct GithubBackend {
    http: Client,
    token: SecretString,
    owner: String,
    repo: String,
    base: String,
}

impl GithubBackend {
    /// Creates a backend against the public GitHub API.
    ///
    /// # Errors
    ///
    /// Returns [`SnitchError::MissingToken`] when the token is empty, with a
    /// pointer to the token-creation page.
    pub fn new(config: BackendConfig) -> Result<Self> {
        Self::with_base_url(config, GITHUB_API_URL)
    }

    /// Creates a backend against an alternate API base URL.
    ///
    /// Useful for GitHub Enterprise installations and for tests.
    ///
    /// # Errors
    ///
    /// Returns [`SnitchError::MissingToken`] when the token is empty, or a
    /// network error if the HTTP client cannot be built.
    pub fn with_base_url(config: BackendConfig, base: impl Into<String>) -> Result<Self> {
        if config.token.expose_secret().is_empty() {
            return Err(SnitchError::MissingToken {
                platform: "GitHub",
                help_url: TOKEN_HELP_URL.to_string(),
            });
        }
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            token: config.token,
            owner: config.owner,
            repo: config.repo,
            base: base.into(),
        })
    }

    fn auth_header(&self) -> String {
        format!("token {}", self.token.expose_secret())
    }
}

#[async_trait]
impl IssueBackend for GithubBackend {
    type Label = String;

    fn platform(&self) -> &'static str {
        "GitHub"
    }

    async fn create_issue(&self, title: &str, body: &str, labels: &[String]) -> Result<u64> {
        let url = format!("{}/repos/{}/{}/issues", self.base, self.owner, self.repo);
        let payload = CreateIssueRequest {
            title,
            body,
            assignees: [self.owner.as_str()],
            labels,
        };

        let response = self
            .http
            .post(&url)
            .header("Accept", "application/json")
            .header("Authorization", self.auth_header())
            .json(&payload)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SnitchError::Backend {
                platform: self.platform(),
                status: Some(status.as_u16()),
                message,
            });
        }

        let created: IssueCreated = response.json().await?;
        debug!(number = created.number, "created GitHub issue");
        Ok(created.number)
    }

    async fn add_comment(&self, number: u64, body: &str) -> Result<()> {
        let url = format!(
            "{}/repos/{}/{}/issues/{number}/comments",
            self.base, self.owner, self.repo
        );

        let response = self
            .http
            .post(&url)
            .header("Accept", "application/json")
            .header("Authorization", self.auth_header())
            .json(&CreateCommentRequest { body })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SnitchError::Backend {
                platform: self.platform(),
                status: Some(status.as_u16()),
                message,
            });
        }

        debug!(number, "commented on GitHub issue");
        Ok(())
    }
}
