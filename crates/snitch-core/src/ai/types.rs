// SPDX-License-Identifier: Apache-2.0

//! Request/response types for the chat completions API.

use serde::{Deserialize, Serialize};

/// A chat message.
///
/// Fields default to empty on deserialization; providers occasionally omit
/// them in streaming or error-shaped responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role: "system", "user", or "assistant".
    #[serde(default)]
    pub role: String,
    /// Message content.
    #[serde(default)]
    pub content: String,
}

impl ChatMessage {
    /// Creates a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request body for the chat completions API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    /// Model identifier (e.g., "meta-llama/llama-3.3-70b-instruct:free").
    pub model: String,
    /// Conversation messages.
    pub messages: Vec<ChatMessage>,
}

/// Response from the chat completions API.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    /// Choices returned by the model (usually just one).
    #[serde(default)]
    pub choices: Vec<Choice>,
}

/// A single choice in the chat completion response.
#[derive(Debug, Deserialize)]
pub struct Choice {
    /// The generated message, absent in malformed responses.
    #[serde(default)]
    pub message: Option<ChatMessage>,
}
