// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Complai service.

use thiserror::Error;

use crate::types::ErrorKind;

/// The primary error type used across Complai adapter traits and startup.
///
/// Per-request failures are reported as [`crate::ComplaintResponse`] values;
/// this type covers adapter construction, rendering, and server lifecycle.
/// [`ComplaiError::kind`] classifies an error when it has to become a
/// response.
#[derive(Debug, Error)]
pub enum ComplaiError {
    /// Configuration errors (invalid header values, unusable settings).
    #[error("configuration error: {0}")]
    Config(String),

    /// The language-model provider client could not be set up.
    #[error("upstream error: {message}")]
    Upstream {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The document renderer failed.
    #[error("render error: {message}")]
    Render {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ComplaiError {
    /// Classifies this error for response mapping.
    pub fn kind(&self) -> ErrorKind {
        match self {
            ComplaiError::Upstream { .. } => ErrorKind::Upstream,
            ComplaiError::Config(_) | ComplaiError::Render { .. } | ComplaiError::Internal(_) => {
                ErrorKind::Internal
            }
        }
    }

    /// Shorthand for a render error without a source.
    pub fn render(message: impl Into<String>) -> Self {
        ComplaiError::Render {
            message: message.into(),
            source: None,
        }
    }
}
