// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for the OpenRouter chat-completions API.
//!
//! Provides [`OpenRouterClient`] which handles request construction,
//! authentication, reply extraction, and optional transient error retry.
//! Failures are reported as [`UpstreamReply`] values, never as `Err`.

use std::time::Duration;

use complai_config::model::OpenRouterConfig;
use complai_core::{ChatMessage, ComplaiError, UpstreamReply};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, warn};

use crate::types::{ApiMessage, ChatRequest, ChatResponse};

/// Error string when no API key is configured.
pub const MISSING_API_KEY: &str = "Missing OPENROUTER_API_KEY";

const RETRY_DELAY: Duration = Duration::from_secs(1);

/// HTTP client for OpenRouter communication.
///
/// Attribution headers (`HTTP-Referer`, `X-Title`) are sent on every request.
/// The API key is held as a [`SecretString`] and marked sensitive on the wire.
#[derive(Debug, Clone)]
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    url: String,
    model: String,
    max_retries: u32,
}

impl OpenRouterClient {
    /// Creates a client from the `[openrouter]` config section.
    ///
    /// A missing key is not an error here; calls fail with
    /// [`MISSING_API_KEY`] instead so the service can still start.
    pub fn new(config: &OpenRouterConfig) -> Result<Self, ComplaiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "HTTP-Referer",
            HeaderValue::from_str(&config.referer).map_err(|e| {
                ComplaiError::Config(format!("invalid openrouter.referer header value: {e}"))
            })?,
        );
        headers.insert(
            "X-Title",
            HeaderValue::from_str(&config.title).map_err(|e| {
                ComplaiError::Config(format!("invalid openrouter.title header value: {e}"))
            })?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .build()
            .map_err(|e| ComplaiError::Upstream {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(|k| SecretString::from(k.to_string()));

        Ok(Self {
            client,
            api_key,
            url: config.url.clone(),
            model: config.model.clone(),
            max_retries: config.max_retries,
        })
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Sends the conversation and returns the model's reply.
    ///
    /// On transient errors (429, 500, 503), retries up to `max_retries` times
    /// after a 1-second delay.
    pub async fn chat(&self, messages: &[ChatMessage]) -> UpstreamReply {
        let Some(key) = &self.api_key else {
            warn!("OpenRouter call attempted without an API key");
            return UpstreamReply::failed(MISSING_API_KEY, None);
        };
        let auth = match bearer(key) {
            Ok(value) => value,
            Err(_) => {
                return UpstreamReply::failed("OPENROUTER_API_KEY is not a valid header value", None);
            }
        };

        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.iter().map(ApiMessage::from).collect(),
        };

        for attempt in 0..=self.max_retries {
            if attempt > 0 {
                warn!(attempt, "retrying OpenRouter request after transient error");
                tokio::time::sleep(RETRY_DELAY).await;
            }

            let response = match self
                .client
                .post(&self.url)
                .header(AUTHORIZATION, auth.clone())
                .json(&request)
                .send()
                .await
            {
                Ok(response) => response,
                Err(e) => {
                    warn!(error = %e, "OpenRouter request failed");
                    return UpstreamReply::failed(format!("OpenRouter request failed: {e}"), None);
                }
            };

            let status = response.status();
            debug!(status = %status, attempt, "OpenRouter response received");

            let body = match response.text().await {
                Ok(body) => body,
                Err(e) => {
                    return UpstreamReply::failed(
                        format!("failed to read OpenRouter response body: {e}"),
                        Some(status.as_u16()),
                    );
                }
            };

            if status.is_success() {
                let text = serde_json::from_str::<ChatResponse>(&body)
                    .ok()
                    .and_then(|r| r.first_text().map(String::from));
                if text.is_none() {
                    debug!("OpenRouter response carried no extractable text");
                }
                return UpstreamReply {
                    text,
                    status_code: Some(status.as_u16()),
                    error: None,
                };
            }

            if is_transient_error(status) && attempt < self.max_retries {
                warn!(status = %status, "transient error, will retry");
                continue;
            }

            return UpstreamReply {
                text: Some(body),
                status_code: Some(status.as_u16()),
                error: Some(format!("OpenRouter non-2xx response: {}", status.as_u16())),
            };
        }

        UpstreamReply::failed("OpenRouter request failed after retries", None)
    }
}

/// `Authorization` value for `key`, adding the `Bearer ` prefix when missing.
fn bearer(key: &SecretString) -> Result<HeaderValue, reqwest::header::InvalidHeaderValue> {
    let raw = key.expose_secret();
    let has_prefix = raw
        .get(..7)
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case("bearer "));
    let mut value = if has_prefix {
        HeaderValue::from_str(raw)?
    } else {
        HeaderValue::from_str(&format!("Bearer {raw}"))?
    };
    value.set_sensitive(true);
    Ok(value)
}

/// Returns true for HTTP status codes that indicate transient errors worth retrying.
fn is_transient_error(status: reqwest::StatusCode) -> bool {
    matches!(status.as_u16(), 429 | 500 | 503)
}
