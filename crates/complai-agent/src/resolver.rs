// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reconciles the caller's requested format with the model's declared one.
//!
//! An explicit client request decides whether a document is rendered; the
//! model's declaration only fills in when the caller asked for `auto`.

use complai_core::{ErrorKind, OutputFormat};

use crate::header::ParsedHeader;

/// Reason given when a document was demanded but the reply had no usable header.
pub const MISSING_STRUCTURED_BODY: &str = "cannot produce document without a structured body";

/// A format the orchestrator can actually produce. `Auto` has been resolved away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderFormat {
    Json,
    Pdf,
}

impl std::fmt::Display for RenderFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderFormat::Json => write!(f, "json"),
            RenderFormat::Pdf => write!(f, "pdf"),
        }
    }
}

/// What to do with an upstream reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolutionOutcome {
    /// Produce `format` from the cleaned body.
    Proceed { format: RenderFormat, body: String },
    /// Return the raw reply as plain text.
    Degrade { body: String },
    /// Fail the request.
    Reject { reason: String, kind: ErrorKind },
}

/// Decides the outcome for a reply.
///
/// `raw` is the unprocessed reply text; it is what a degraded response
/// carries, even when a header was found but gave no usable format.
pub fn resolve(requested: OutputFormat, parsed: &ParsedHeader, raw: &str) -> ResolutionOutcome {
    let mut effective = requested;
    if requested == OutputFormat::Auto
        && let Some(declared) = parsed.declared_format
        && declared != OutputFormat::Auto
    {
        effective = declared;
    }

    let usable_header = parsed.header_present
        && !matches!(parsed.declared_format, None | Some(OutputFormat::Auto));

    if !usable_header {
        return if effective == OutputFormat::Pdf {
            ResolutionOutcome::Reject {
                reason: MISSING_STRUCTURED_BODY.to_string(),
                kind: ErrorKind::Upstream,
            }
        } else {
            ResolutionOutcome::Degrade {
                body: raw.to_string(),
            }
        };
    }

    let format = match effective {
        OutputFormat::Pdf => RenderFormat::Pdf,
        OutputFormat::Json | OutputFormat::Auto => RenderFormat::Json,
    };
    ResolutionOutcome::Proceed {
        format,
        body: parsed.body.clone(),
    }
}
