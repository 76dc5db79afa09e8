// SPDX-License-Identifier: Apache-2.0

//! AI collaborator integration.
//!
//! Sends a created issue's title and body to an `OpenRouter`-compatible chat
//! completions endpoint and returns a free-form troubleshooting suggestion,
//! posted back as an issue comment by the reporter.

pub mod openrouter;
pub mod types;

pub use openrouter::OpenRouterClient;

/// `OpenRouter` chat completions URL.
pub const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Environment variable for the `OpenRouter` API key.
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Default model for triage comments.
pub const DEFAULT_MODEL: &str = "meta-llama/llama-3.3-70b-instruct:free";

/// Fixed troubleshooter persona sent as the system message.
pub const SYSTEM_PROMPT: &str = "Act as an expert troubleshooter and problem-solving assistant. \
     Your role is to analyze issues reported by applications and provide clear, \
     actionable solutions";
