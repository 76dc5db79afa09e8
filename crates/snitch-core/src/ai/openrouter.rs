// SPDX-License-Identifier: Apache-2.0

//! `OpenRouter` API client for triage comments.
//!
//! Holds an HTTP client, API key, and model configuration for reuse across
//! requests. The credential is always supplied externally, either from the
//! environment or directly by the caller.

use std::env;
use std::time::Duration;

use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use super::types::{ChatCompletionRequest, ChatCompletionResponse, ChatMessage};
use super::{OPENROUTER_API_KEY_ENV, OPENROUTER_API_URL, SYSTEM_PROMPT};
use crate::config::AiConfig;
use crate::error::SnitchError;
use crate::Result;

/// Chat completions client used to generate troubleshooting comments.
pub struct OpenRouterClient {
    http: Client,
    api_key: SecretString,
    model: String,
    api_url: String,
}

impl OpenRouterClient {
    /// Creates a client, fetching the API key from `OPENROUTER_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`SnitchError::MissingToken`] when the environment variable is
    /// unset or empty, with a pointer to the key-creation page.
    pub fn new(config: &AiConfig) -> Result<Self> {
        let api_key = env::var(OPENROUTER_API_KEY_ENV).unwrap_or_default();
        if api_key.is_empty() {
            return Err(SnitchError::MissingToken {
                platform: "OpenRouter",
                help_url: "https://openrouter.ai/keys".to_string(),
            });
        }
        Self::with_api_key(SecretString::from(api_key), config)
    }

    /// Creates a client with a directly supplied API key.
    ///
    /// # Errors
    ///
    /// Returns a network error if the HTTP client cannot be built.
    pub fn with_api_key(api_key: SecretString, config: &AiConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;
        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            api_url: OPENROUTER_API_URL.to_string(),
        })
    }

    /// Overrides the API URL, for OpenAI-compatible gateways and tests.
    #[must_use]
    pub fn with_api_url(mut self, url: impl Into<String>) -> Self {
        self.api_url = url.into();
        self
    }

    /// Asks the model for a troubleshooting suggestion.
    ///
    /// Sends the fixed troubleshooter persona plus one user message and
    /// returns the first choice's content, or `None` when the response
    /// carries no usable message.
    ///
    /// # Errors
    ///
    /// Returns [`SnitchError::Ai`] on a non-success HTTP status and a network
    /// error when the request itself fails.
    pub async fn troubleshoot(&self, content: &str) -> Result<Option<String>> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatMessage::system(SYSTEM_PROMPT), ChatMessage::user(content)],
        };

        debug!(model = %self.model, "requesting triage suggestion");

        let response = self
            .http
            .post(&self.api_url)
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(SnitchError::Ai {
                message,
                status: Some(status.as_u16()),
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;
        let answer = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .map(|message| message.content);

        debug!(
            answered = answer.is_some(),
            "triage suggestion round-trip complete"
        );
        Ok(answer)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;
    use serde_json::json;

    use super::*;

    fn client(server: &MockServer) -> OpenRouterClient {
        let config = AiConfig::default();
        OpenRouterClient::with_api_key(SecretString::from("test-key".to_string()), &config)
            .expect("client should construct")
            .with_api_url(format!("{}/api/v1/chat/completions", server.base_url()))
    }

    #[tokio::test]
    async fn troubleshoot_sends_persona_and_returns_first_choice() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/chat/completions")
                .header("authorization", "Bearer test-key")
                .json_body_includes(
                    json!({
                        "model": "meta-llama/llama-3.3-70b-instruct:free",
                        "messages": [{"role": "system"}, {"role": "user", "content": "Error disk full"}]
                    })
                    .to_string(),
                );
            then.status(200).json_body(json!({
                "choices": [{"message": {"role": "assistant", "content": "free some space"}}]
            }));
        });

        let answer = client(&server)
            .troubleshoot("Error disk full")
            .await
            .expect("request should succeed");

        mock.assert();
        assert_eq!(answer.as_deref(), Some("free some space"));
    }

    #[tokio::test]
    async fn troubleshoot_returns_none_when_choices_missing() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/chat/completions");
            then.status(200).json_body(json!({}));
        });

        let answer = client(&server)
            .troubleshoot("anything")
            .await
            .expect("request should succeed");
        assert_eq!(answer, None);
    }

    #[tokio::test]
    async fn troubleshoot_maps_http_failure_to_ai_error() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/chat/completions");
            then.status(401).body("invalid key");
        });

        let err = client(&server)
            .troubleshoot("anything")
            .await
            .expect_err("401 must map to an error");
        match err {
            SnitchError::Ai { status, .. } => assert_eq!(status, Some(401)),
            other => panic!("unexpected error: {other}"),
        }
    }
}
