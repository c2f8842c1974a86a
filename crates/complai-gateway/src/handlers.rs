// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway REST API.
//!
//! Handles GET /, GET /health, POST /complai/ask, POST /complai/redact.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use complai_core::{ComplaintResponse, ConversationId, ErrorKind, OutputFormat};

use crate::server::GatewayState;

/// Request body for POST /complai/ask.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    /// Question text.
    #[serde(default)]
    pub text: String,
    /// Optional conversation to continue.
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// Request body for POST /complai/redact.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RedactRequest {
    /// Complaint description.
    #[serde(default)]
    pub text: String,
    /// Requested output format: `json`, `pdf` or `auto`. Absent means `auto`.
    #[serde(default)]
    pub format: Option<String>,
    /// Optional conversation to continue.
    #[serde(default)]
    pub conversation_id: Option<String>,
}

/// JSON body returned for every non-document response.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicResponse {
    pub success: bool,
    pub message: Option<String>,
    pub error: Option<String>,
    pub error_code: ErrorKind,
}

impl From<&ComplaintResponse> for PublicResponse {
    fn from(resp: &ComplaintResponse) -> Self {
        Self {
            success: resp.is_success(),
            message: resp.message().map(str::to_string),
            error: resp.error().map(str::to_string),
            error_code: resp.error_kind(),
        }
    }
}

/// Response body for GET /.
#[derive(Debug, Serialize)]
pub struct HomeResponse {
    pub message: String,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Health status string.
    pub status: String,
    /// Binary version.
    pub version: String,
    /// Seconds since the gateway started.
    pub uptime_secs: u64,
}

/// Maps a response classification onto an HTTP status.
pub fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::None => StatusCode::OK,
        ErrorKind::Validation => StatusCode::BAD_REQUEST,
        ErrorKind::Refusal => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Upstream => StatusCode::BAD_GATEWAY,
        ErrorKind::Timeout => StatusCode::GATEWAY_TIMEOUT,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// GET /
pub async fn get_home() -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "Welcome to the Complai Home Page!".to_string(),
    })
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: state.health.start_time.elapsed().as_secs(),
    })
}

/// POST /complai/ask
pub async fn post_ask(
    State(state): State<GatewayState>,
    body: Result<Json<AskRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_body("ask", rejection),
    };

    let conversation = ConversationId::from_client(body.conversation_id.as_deref());
    let resp = state
        .orchestrator
        .ask(&body.text, conversation.as_ref())
        .await;
    json_response("ask", &resp)
}

/// POST /complai/redact
///
/// Returns the document bytes directly, with the renderer's content type,
/// when a document was produced; every other outcome is the JSON envelope.
pub async fn post_redact(
    State(state): State<GatewayState>,
    body: Result<Json<RedactRequest>, JsonRejection>,
) -> Response {
    let Json(body) = match body {
        Ok(body) => body,
        Err(rejection) => return bad_body("redact", rejection),
    };

    let requested = match body.format.as_deref() {
        None => None,
        Some(raw) => {
            let parsed = OutputFormat::from_str_opt(raw);
            if !OutputFormat::is_client_supported(parsed) {
                tracing::debug!(format = raw, "redact: unsupported format");
                return validation_error(format!(
                    "Unsupported format '{raw}'. Use 'json', 'auto', or 'pdf' (PDF is the only document format)."
                ));
            }
            parsed
        }
    };

    let conversation = ConversationId::from_client(body.conversation_id.as_deref());
    let resp = state
        .orchestrator
        .redact(&body.text, requested, conversation.as_ref())
        .await;

    if let Some(document) = resp.document_bytes() {
        let document = document.to_vec();
        return (
            StatusCode::OK,
            [
                (
                    header::CONTENT_TYPE,
                    state.orchestrator.document_content_type().to_string(),
                ),
                (header::CONTENT_LENGTH, document.len().to_string()),
            ],
            document,
        )
            .into_response();
    }

    json_response("redact", &resp)
}

fn json_response(operation: &str, resp: &ComplaintResponse) -> Response {
    let status = status_for(resp.error_kind());
    match resp.error_kind() {
        ErrorKind::None => {}
        ErrorKind::Validation => {
            tracing::debug!(operation, error = ?resp.error(), "bad request");
        }
        ErrorKind::Refusal => tracing::info!(operation, "request out of scope"),
        ErrorKind::Timeout => tracing::warn!(operation, "upstream timed out"),
        ErrorKind::Upstream => {
            tracing::warn!(operation, error = ?resp.error(), "upstream error");
        }
        ErrorKind::Internal => {
            tracing::warn!(operation, error = ?resp.error(), "internal error");
        }
    }
    (status, Json(PublicResponse::from(resp))).into_response()
}

fn bad_body(operation: &str, rejection: JsonRejection) -> Response {
    tracing::debug!(operation, error = %rejection, "rejected request body");
    validation_error(format!("Invalid request body: {}", rejection.body_text()))
}

fn validation_error(error: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(PublicResponse {
            success: false,
            message: None,
            error: Some(error),
            error_code: ErrorKind::Validation,
        }),
    )
        .into_response()
}
