// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` assembles a complete orchestrator with a mock upstream, the
//! real PDF renderer (or a substitute), and an in-memory history store.

use std::sync::Arc;
use std::time::Duration;

use complai_agent::ComplaintOrchestrator;
use complai_config::model::ComplaiConfig;
use complai_core::{
    ComplaintResponse, ConversationId, DocumentRenderer, OutputFormat, UpstreamReply,
};
use complai_memory::InMemoryConversationStore;
use complai_pdf::PdfRenderer;

use crate::mock_provider::{FailingRenderer, MockUpstream};

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    replies: Vec<UpstreamReply>,
    delay: Option<Duration>,
    upstream_timeout: Option<Duration>,
    renderer: Option<Arc<dyn DocumentRenderer>>,
    config: ComplaiConfig,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            replies: Vec::new(),
            delay: None,
            upstream_timeout: None,
            renderer: None,
            config: ComplaiConfig::default(),
        }
    }

    /// Queue successful upstream replies.
    pub fn with_mock_texts<S: Into<String>>(mut self, texts: impl IntoIterator<Item = S>) -> Self {
        self.replies
            .extend(texts.into_iter().map(UpstreamReply::ok));
        self
    }

    /// Queue arbitrary upstream replies, including failures.
    pub fn with_mock_replies(mut self, replies: Vec<UpstreamReply>) -> Self {
        self.replies.extend(replies);
        self
    }

    /// Delay every upstream reply.
    pub fn with_upstream_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Override the orchestrator's upstream timeout.
    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = Some(timeout);
        self
    }

    /// Use a renderer that always fails.
    pub fn with_failing_renderer(self) -> Self {
        self.with_renderer(Arc::new(FailingRenderer))
    }

    /// Use the given renderer instead of the PDF renderer.
    pub fn with_renderer(mut self, renderer: Arc<dyn DocumentRenderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    /// Start from a custom configuration.
    pub fn with_config(mut self, config: ComplaiConfig) -> Self {
        self.config = config;
        self
    }

    /// Build the test harness.
    pub fn build(self) -> TestHarness {
        let mut upstream = MockUpstream::with_replies(self.replies);
        if let Some(delay) = self.delay {
            upstream = upstream.with_delay(delay);
        }
        let upstream = Arc::new(upstream);

        let renderer = self
            .renderer
            .unwrap_or_else(|| Arc::new(PdfRenderer::new()));

        let history = Arc::new(InMemoryConversationStore::from_config(&self.config.history));

        let mut orchestrator =
            ComplaintOrchestrator::from_config(&self.config, upstream.clone(), renderer)
                .with_history(history.clone());
        if let Some(timeout) = self.upstream_timeout {
            orchestrator = orchestrator.with_upstream_timeout(timeout);
        }

        TestHarness {
            mock_upstream: upstream,
            history,
            orchestrator: Arc::new(orchestrator),
            config: self.config,
        }
    }
}

/// A complete test environment with a mock upstream and in-memory history.
pub struct TestHarness {
    /// The mock upstream model.
    pub mock_upstream: Arc<MockUpstream>,
    /// History store shared with the orchestrator.
    pub history: Arc<InMemoryConversationStore>,
    /// The orchestrator under test.
    pub orchestrator: Arc<ComplaintOrchestrator>,
    /// Configuration the harness was built from.
    pub config: ComplaiConfig,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Run `ask` through the orchestrator.
    pub async fn ask(&self, question: &str, conversation: Option<&str>) -> ComplaintResponse {
        let id = ConversationId::from_client(conversation);
        self.orchestrator.ask(question, id.as_ref()).await
    }

    /// Run `redact` through the orchestrator.
    pub async fn redact(
        &self,
        complaint: &str,
        format: Option<OutputFormat>,
        conversation: Option<&str>,
    ) -> ComplaintResponse {
        let id = ConversationId::from_client(conversation);
        self.orchestrator
            .redact(complaint, format, id.as_ref())
            .await
    }
}
