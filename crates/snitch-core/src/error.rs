// SPDX-License-Identifier: Apache-2.0

//! Error types for Snitch.
//!
//! Uses `thiserror` for deriving `std::error::Error` implementations.
//! Only construction paths surface these to callers; the reporting paths
//! catch them at the reporter boundary and reduce them to local diagnostics.

use thiserror::Error;

/// Errors that can occur during Snitch operations.
#[derive(Error, Debug)]
pub enum SnitchError {
    /// Access token missing at construction time.
    #[error("{platform} access token is missing - create one at {help_url}")]
    MissingToken {
        /// Platform the token is for (e.g., `GitHub`, `Gitea`).
        platform: &'static str,
        /// URL where a token can be created.
        help_url: String,
    },

    /// Git-hosting backend rejected a request.
    #[error("{platform} API error: {message}")]
    Backend {
        /// Platform that produced the error.
        platform: &'static str,
        /// HTTP status code, if the request reached the server.
        status: Option<u16>,
        /// Error message or response body.
        message: String,
    },

    /// AI collaborator error.
    #[error("AI provider error: {message}")]
    Ai {
        /// Error message from the AI provider.
        message: String,
        /// Optional HTTP status code from the provider.
        status: Option<u16>,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// Network/HTTP error from reqwest.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
}

impl From<config::ConfigError> for SnitchError {
    fn from(err: config::ConfigError) -> Self {
        SnitchError::Config {
            message: err.to_string(),
        }
    }
}
