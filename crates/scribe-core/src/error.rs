// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Scribe assistant.

use thiserror::Error;

/// The primary error type used across Scribe adapter traits and workflows.
#[derive(Debug, Error)]
pub enum ScribeError {
    /// Configuration errors (missing credentials, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// Chat platform errors (gateway failure, missing permissions, unknown message).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Language model provider errors (API failure, empty completion).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Reference card source errors (unreadable file, failed download).
    #[error("hints error: {message}")]
    Hints {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Draft workflow errors.
    #[error("draft error: {0}")]
    Draft(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ScribeError {
    /// Shorthand for a channel error without an underlying source.
    pub fn channel(message: impl Into<String>) -> Self {
        ScribeError::Channel {
            message: message.into(),
            source: None,
        }
    }

    /// Shorthand for a provider error without an underlying source.
    pub fn provider(message: impl Into<String>) -> Self {
        ScribeError::Provider {
            message: message.into(),
            source: None,
        }
    }
}
