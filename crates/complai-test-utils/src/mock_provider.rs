// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Mock collaborators for deterministic testing.
//!
//! `MockUpstream` implements `UpstreamAdapter` with pre-configured replies,
//! `FailingRenderer` implements `DocumentRenderer` by always failing, and
//! `PlainTextRenderer` echoes text under a non-PDF content type. Together
//! they allow fast, CI-runnable tests without external API calls.

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use complai_core::traits::adapter::PluginAdapter;
use complai_core::traits::renderer::DocumentRenderer;
use complai_core::traits::upstream::UpstreamAdapter;
use complai_core::types::{AdapterType, ChatMessage, HealthStatus, UpstreamReply};
use complai_core::ComplaiError;

/// A mock upstream that returns pre-configured replies.
///
/// Replies are popped from a FIFO queue. When the queue is empty, a default
/// "mock response" text is returned. Every conversation received is recorded
/// for later inspection.
pub struct MockUpstream {
    replies: Arc<Mutex<VecDeque<UpstreamReply>>>,
    calls: Arc<Mutex<Vec<Vec<ChatMessage>>>>,
    delay: Option<Duration>,
}

impl MockUpstream {
    /// Create a new mock upstream with an empty reply queue.
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Create a mock upstream pre-loaded with the given replies.
    pub fn with_replies(replies: Vec<UpstreamReply>) -> Self {
        Self {
            replies: Arc::new(Mutex::new(VecDeque::from(replies))),
            ..Self::new()
        }
    }

    /// Create a mock upstream pre-loaded with successful text replies.
    pub fn with_texts<S: Into<String>>(texts: impl IntoIterator<Item = S>) -> Self {
        Self::with_replies(texts.into_iter().map(UpstreamReply::ok).collect())
    }

    /// Sleep this long before every reply.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Conversations received so far, in call order.
    pub async fn calls(&self) -> Vec<Vec<ChatMessage>> {
        self.calls.lock().await.clone()
    }

    /// Number of upstream calls made.
    pub async fn call_count(&self) -> usize {
        self.calls.lock().await.len()
    }

    /// Pop the next reply, or return the default.
    async fn next_reply(&self) -> UpstreamReply {
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| UpstreamReply::ok("mock response"))
    }
}

impl Default for MockUpstream {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PluginAdapter for MockUpstream {
    fn name(&self) -> &str {
        "mock-upstream"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Upstream
    }

    async fn health_check(&self) -> Result<HealthStatus, ComplaiError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl UpstreamAdapter for MockUpstream {
    async fn call(&self, conversation: Vec<ChatMessage>) -> UpstreamReply {
        self.calls.lock().await.push(conversation);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.next_reply().await
    }
}

/// A renderer that always fails, for exercising the Internal error path.
#[derive(Debug, Default)]
pub struct FailingRenderer;

#[async_trait]
impl PluginAdapter for FailingRenderer {
    fn name(&self) -> &str {
        "failing-renderer"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Renderer
    }

    async fn health_check(&self) -> Result<HealthStatus, ComplaiError> {
        Ok(HealthStatus::Unhealthy("always fails".into()))
    }
}

impl DocumentRenderer for FailingRenderer {
    fn content_type(&self) -> &'static str {
        "application/pdf"
    }

    fn render(&self, _text: &str) -> Result<Vec<u8>, ComplaiError> {
        Err(ComplaiError::render("font table corrupted at glyph 42"))
    }
}

/// A renderer that returns the text's UTF-8 bytes under a plain-text MIME
/// type, for checking that callers honor the renderer's content type.
#[derive(Debug, Default)]
pub struct PlainTextRenderer;

/// Content type reported by [`PlainTextRenderer`].
pub const PLAIN_TEXT_CONTENT_TYPE: &str = "text/plain; charset=utf-8";

#[async_trait]
impl PluginAdapter for PlainTextRenderer {
    fn name(&self) -> &str {
        "plain-text-renderer"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Renderer
    }

    async fn health_check(&self) -> Result<HealthStatus, ComplaiError> {
        Ok(HealthStatus::Healthy)
    }
}

impl DocumentRenderer for PlainTextRenderer {
    fn content_type(&self) -> &'static str {
        PLAIN_TEXT_CONTENT_TYPE
    }

    fn render(&self, text: &str) -> Result<Vec<u8>, ComplaiError> {
        Ok(text.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replies_are_served_in_order_then_default() {
        let upstream = MockUpstream::with_texts(["first", "second"]);
        assert_eq!(upstream.call(vec![]).await.text.as_deref(), Some("first"));
        assert_eq!(upstream.call(vec![]).await.text.as_deref(), Some("second"));
        assert_eq!(
            upstream.call(vec![]).await.text.as_deref(),
            Some("mock response")
        );
        assert_eq!(upstream.call_count().await, 3);
    }

    #[tokio::test]
    async fn conversations_are_recorded() {
        let upstream = MockUpstream::new();
        upstream.call(vec![ChatMessage::user("hi")]).await;
        let calls = upstream.calls().await;
        assert_eq!(calls[0][0].content, "hi");
    }

    #[test]
    fn plain_text_renderer_echoes_text() {
        assert_eq!(PlainTextRenderer.render("hola").unwrap(), b"hola".to_vec());
        assert_eq!(PlainTextRenderer.content_type(), PLAIN_TEXT_CONTENT_TYPE);
    }

    #[test]
    fn failing_renderer_fails() {
        assert!(FailingRenderer.render("x").is_err());
    }
}
