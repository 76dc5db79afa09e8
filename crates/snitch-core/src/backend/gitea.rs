// SPDX-License-Identifier: Apache-2.0

//! Gitea backend adapter.
//!
//! Creates issues and comments via a self-hosted Gitea instance's REST API.
//! Auth travels as an `access_token` query parameter, and labels are the
//! numeric label ids Gitea assigns per repository.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::debug;

use super::{BackendConfig, IssueBackend, IssueCreated};
use crate::error::SnitchError;
use crate::Result;

#[derive(Serialize)]
struct CreateIssueRequest<'a> {
    title: &'a str,
    body: &'a str,
    labels: &'a [i64],
}

#[derive(Serialize)]
struct CreateCommentRequest<'a> {
    body: &'a str,
}

/// Prepends `https://` to bare hosts; hosts carrying a scheme pass through.
fn api_base(host: &str) -> String {
    if host.contains("://") {
        host.trim_end_matches('/').to_string()
    } else {
        format!("https://{host}")
    }
}

/// Gitea issue backend.
///
/// Labels are numeric ids (`i64`), matching Gitea's label scheme.
#[derive(Debug)]
pub struct GiteaBackend {
    http: Client,
    token: SecretString,
    owner: String,
    repo: String,
    base: String,
}

impl GiteaBackend {
    /// Creates a backend against the configured Gitea host.
    ///
    /// # Errors
    ///
    /// Returns [`SnitchError::Config`] when no host is configured and
    /// [`SnitchError::MissingToken`] when the token is empty, with a pointer
    /// to that host's token-creation page.
    pub fn new(config: BackendConfig) -> Result<Self> {
        let Some(host) = config.host.as_deref() else {
            return Err(SnitchError::Config {
                message: "the Gitea backend requires a host".to_string(),
            });
        };
        let base = api_base(host);

        if config.token.expose_secret().is_empty() {
            return Err(SnitchError::MissingToken {
                platform: "Gitea",
                help_url: format!("{base}/user/settings/applications"),
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
            base,
        })
    }
}

#[async_trait]
impl IssueBackend for GiteaBackend {
    type Label = i64;

    fn platform(&self) -> &'static str {
        "Gitea"
    }

    async fn create_issue(&self, title: &str, body: &str, labels: &[i64]) -> Result<u64> {
        let url = format!(
            "{}/api/v1/repos/{}/{}/issues",
            self.base, self.owner, self.repo
        );

        let response = self
            .http
            .post(&url)
            .query(&[("access_token", self.token.expose_secret())])
            .header("Accept", "application/json")
            .json(&CreateIssueRequest {
                title,
                body,
                labels,
            })
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
        debug!(number = created.number, "created Gitea issue");
        Ok(created.number)
    }

    async fn add_comment(&self, number: u64, body: &str) -> Result<()> {
        let url = format!(
            "{}/api/v1/repos/{}/{}/issues/{number}/comments",
            self.base, self.owner, self.repo
        );

        let response = self
            .http
            .post(&url)
            .query(&[("access_token", self.token.expose_secret())])
            .header("Accept", "application/json")
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

        debug!(number, "commented on Gitea issue");
        Ok(())
    }
}
