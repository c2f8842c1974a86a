// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the orchestrator, adapters, and the gateway.

use serde::{Deserialize, Serialize, Serializer};
use strum::{Display, EnumString};

/// Identifier of a conversation whose history is kept between requests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ConversationId(pub String);

impl ConversationId {
    /// Builds an id from client input, treating blank strings as absent.
    pub fn from_client(raw: Option<&str>) -> Option<Self> {
        raw.map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| ConversationId(s.to_string()))
    }
}

/// Output format requested by a client or declared by the model.
///
/// `Auto` means "no preference": defer to the model's header, or to a safe
/// default when the model gives none.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum OutputFormat {
    Json,
    Pdf,
    Auto,
}

impl OutputFormat {
    /// Maps a free-form string onto a format.
    ///
    /// Returns `None` for anything unrecognized, including the empty string.
    /// `None` is distinct from `Auto`: it means "something we do not
    /// understand was supplied" and callers must decide what to do with it.
    pub fn from_str_opt(value: &str) -> Option<Self> {
        value.trim().parse().ok()
    }

    /// Whether a client-supplied format is acceptable at the request boundary.
    ///
    /// PDF is the only document type; JSON and AUTO are the other two values
    /// a client may send.
    pub fn is_client_supported(format: Option<OutputFormat>) -> bool {
        matches!(
            format,
            Some(OutputFormat::Json | OutputFormat::Pdf | OutputFormat::Auto)
        )
    }
}

/// Stable classification of a response. The only signal a transport layer may
/// branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display)]
#[strum(serialize_all = "lowercase")]
pub enum ErrorKind {
    #[default]
    None,
    Validation,
    Refusal,
    Upstream,
    Timeout,
    Internal,
}

impl ErrorKind {
    /// Numeric reason code. These values are part of the wire contract.
    pub fn code(self) -> u8 {
        match self {
            ErrorKind::None => 0,
            ErrorKind::Validation => 1,
            ErrorKind::Refusal => 2,
            ErrorKind::Upstream => 3,
            ErrorKind::Timeout => 4,
            ErrorKind::Internal => 5,
        }
    }
}

impl Serialize for ErrorKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.code())
    }
}

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single turn in the conversation sent upstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Raw outcome of one upstream call.
///
/// Failures are data, not `Err`: a non-2xx reply carries both the status and
/// an error string, and may still carry the raw body in `text`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpstreamReply {
    pub text: Option<String>,
    pub status_code: Option<u16>,
    pub error: Option<String>,
}

impl UpstreamReply {
    /// A successful reply carrying the model's text.
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            status_code: Some(200),
            error: None,
        }
    }

    /// A failed reply with an error string and optional status.
    pub fn failed(error: impl Into<String>, status_code: Option<u16>) -> Self {
        Self {
            text: None,
            status_code,
            error: Some(error.into()),
        }
    }

    /// The error string, if one is present and non-blank.
    pub fn error_message(&self) -> Option<&str> {
        self.error.as_deref().filter(|e| !e.trim().is_empty())
    }

    /// The reply text, if present and non-blank.
    pub fn non_blank_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.trim().is_empty())
    }
}

/// Final output of an `ask` or `redact` request.
///
/// Built only through the named constructors, which uphold the invariant that
/// a successful response carries exactly one of `message` or `document`, and a
/// failed response never carries a document and carries a message only for a
/// refusal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComplaintResponse {
    success: bool,
    message: Option<String>,
    document: Option<Vec<u8>>,
    error: Option<String>,
    error_kind: ErrorKind,
}

impl ComplaintResponse {
    /// Successful plain-text response.
    pub fn text(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            document: None,
            error: None,
            error_kind: ErrorKind::None,
        }
    }

    /// Successful rendered-document response.
    pub fn document(bytes: Vec<u8>) -> Self {
        Self {
            success: true,
            message: None,
            document: Some(bytes),
            error: None,
            error_kind: ErrorKind::None,
        }
    }

    /// Failed response. `kind` must not be [`ErrorKind::None`]; it is coerced
    /// to `Internal` if it is.
    pub fn failure(kind: ErrorKind, error: impl Into<String>) -> Self {
        let error_kind = if kind == ErrorKind::None {
            ErrorKind::Internal
        } else {
            kind
        };
        Self {
            success: false,
            message: None,
            document: None,
            error: Some(error.into()),
            error_kind,
        }
    }

    /// Scope refusal: the raw reply stays visible to the caller in `message`.
    /// This is the only failure that carries a message.
    pub fn refusal(error: impl Into<String>, raw_reply: impl Into<String>) -> Self {
        let mut resp = Self::failure(ErrorKind::Refusal, error);
        resp.message = Some(raw_reply.into());
        resp
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn document_bytes(&self) -> Option<&[u8]> {
        self.document.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn error_kind(&self) -> ErrorKind {
        self.error_kind
    }

    /// Consumes the response, yielding the document bytes if any.
    pub fn into_document(self) -> Option<Vec<u8>> {
        self.document
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter plugged into the orchestrator.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Upstream,
    Renderer,
    History,
}
