// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request state machine for the `ask` and `redact` operations.
//!
//! Each request walks Validating -> CallingUpstream -> ClassifyingRefusal ->
//! ParsingHeader -> ResolvingFormat -> Rendering -> Done, leaving early on the
//! first terminal outcome. Every path ends in a [`ComplaintResponse`]; nothing
//! escapes as an `Err`.

use std::sync::Arc;
use std::time::Duration;

use complai_config::model::ComplaiConfig;
use complai_core::{
    ChatMessage, ComplaintResponse, ConversationId, ConversationStore, DocumentRenderer,
    ErrorKind, OutputFormat, UpstreamAdapter,
};
use tracing::{debug, error, info, warn};

use crate::header::parse_header;
use crate::prompt::PromptBuilder;
use crate::refusal::RefusalTable;
use crate::resolver::{resolve, RenderFormat, ResolutionOutcome};

pub const EMPTY_QUESTION: &str = "Question must not be empty.";
pub const EMPTY_COMPLAINT: &str = "Complaint must not be empty.";
pub const UPSTREAM_TIMED_OUT: &str = "AI service timed out.";
pub const UPSTREAM_NO_MESSAGE: &str = "AI returned no message.";
pub const RENDER_FAILED: &str = "Failed to generate PDF document.";

const DEFAULT_UPSTREAM_TIMEOUT: Duration = Duration::from_secs(30);

/// States a request passes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Validating,
    CallingUpstream,
    ClassifyingRefusal,
    ParsingHeader,
    ResolvingFormat,
    Rendering,
    Done,
}

impl std::fmt::Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestState::Validating => write!(f, "validating"),
            RequestState::CallingUpstream => write!(f, "calling_upstream"),
            RequestState::ClassifyingRefusal => write!(f, "classifying_refusal"),
            RequestState::ParsingHeader => write!(f, "parsing_header"),
            RequestState::ResolvingFormat => write!(f, "resolving_format"),
            RequestState::Rendering => write!(f, "rendering"),
            RequestState::Done => write!(f, "done"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    Ask,
    Redact(OutputFormat),
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::Ask => "ask",
            Operation::Redact(_) => "redact",
        }
    }

    fn empty_input_error(self) -> &'static str {
        match self {
            Operation::Ask => EMPTY_QUESTION,
            Operation::Redact(_) => EMPTY_COMPLAINT,
        }
    }
}

/// Sequences one upstream call, refusal detection, header resolution, and
/// an optional render into a [`ComplaintResponse`].
pub struct ComplaintOrchestrator {
    upstream: Arc<dyn UpstreamAdapter>,
    renderer: Arc<dyn DocumentRenderer>,
    history: Option<Arc<dyn ConversationStore>>,
    refusal: RefusalTable,
    prompts: PromptBuilder,
    upstream_timeout: Duration,
}

impl ComplaintOrchestrator {
    /// Creates an orchestrator with default prompts, refusal table, and a
    /// 30 second upstream timeout, and no history store.
    pub fn new(upstream: Arc<dyn UpstreamAdapter>, renderer: Arc<dyn DocumentRenderer>) -> Self {
        Self {
            upstream,
            renderer,
            history: None,
            refusal: RefusalTable::default(),
            prompts: PromptBuilder::default(),
            upstream_timeout: DEFAULT_UPSTREAM_TIMEOUT,
        }
    }

    /// Creates an orchestrator configured from the `[agent]` and `[refusal]` sections.
    pub fn from_config(
        config: &ComplaiConfig,
        upstream: Arc<dyn UpstreamAdapter>,
        renderer: Arc<dyn DocumentRenderer>,
    ) -> Self {
        Self::new(upstream, renderer)
            .with_refusal_table(RefusalTable::from_config(&config.refusal))
            .with_prompt_builder(PromptBuilder::new(config.agent.municipality.clone()))
            .with_upstream_timeout(Duration::from_secs(config.agent.upstream_timeout_secs))
    }

    pub fn with_history(mut self, store: Arc<dyn ConversationStore>) -> Self {
        self.history = Some(store);
        self
    }

    pub fn with_refusal_table(mut self, table: RefusalTable) -> Self {
        self.refusal = table;
        self
    }

    pub fn with_prompt_builder(mut self, prompts: PromptBuilder) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_upstream_timeout(mut self, timeout: Duration) -> Self {
        self.upstream_timeout = timeout;
        self
    }

    /// MIME type of documents returned by `redact`.
    pub fn document_content_type(&self) -> &'static str {
        self.renderer.content_type()
    }

    /// Answers a free-form question about the municipality.
    pub async fn ask(
        &self,
        question: &str,
        conversation_id: Option<&ConversationId>,
    ) -> ComplaintResponse {
        self.handle(Operation::Ask, question, conversation_id).await
    }

    /// Drafts a complaint letter, rendered as a document when the effective
    /// format is PDF. `None` is treated as [`OutputFormat::Auto`].
    pub async fn redact(
        &self,
        complaint: &str,
        requested: Option<OutputFormat>,
        conversation_id: Option<&ConversationId>,
    ) -> ComplaintResponse {
        let requested = requested.unwrap_or(OutputFormat::Auto);
        self.handle(Operation::Redact(requested), complaint, conversation_id)
            .await
    }

    async fn handle(
        &self,
        op: Operation,
        text: &str,
        conversation_id: Option<&ConversationId>,
    ) -> ComplaintResponse {
        let request_id = uuid::Uuid::new_v4().to_string();
        let rid = request_id.as_str();
        info!(request_id = rid, operation = op.name(), "request received");

        let response = self.run(rid, op, text, conversation_id).await;

        enter(rid, RequestState::Done);
        info!(
            request_id = rid,
            operation = op.name(),
            success = response.is_success(),
            error_kind = %response.error_kind(),
            "request complete"
        );
        response
    }

    async fn run(
        &self,
        rid: &str,
        op: Operation,
        text: &str,
        conversation_id: Option<&ConversationId>,
    ) -> ComplaintResponse {
        enter(rid, RequestState::Validating);
        let input = text.trim();
        if input.is_empty() {
            return ComplaintResponse::failure(ErrorKind::Validation, op.empty_input_error());
        }

        let history = self.load_history(rid, conversation_id).await;
        let conversation = match op {
            Operation::Ask => self.prompts.ask(history, input),
            Operation::Redact(requested) => self.prompts.redact(history, input, requested),
        };

        enter(rid, RequestState::CallingUpstream);
        let reply =
            match tokio::time::timeout(self.upstream_timeout, self.upstream.call(conversation))
                .await
            {
                Ok(reply) => reply,
                Err(_) => {
                    warn!(
                        request_id = rid,
                        timeout_secs = self.upstream_timeout.as_secs(),
                        "upstream call timed out"
                    );
                    return ComplaintResponse::failure(ErrorKind::Timeout, UPSTREAM_TIMED_OUT);
                }
            };

        if let Some(err) = reply.error_message() {
            warn!(
                request_id = rid,
                status = ?reply.status_code,
                error = err,
                "upstream returned an error"
            );
            if let Some(body) = reply.non_blank_text() {
                debug!(request_id = rid, body, "upstream error body");
            }
            return ComplaintResponse::failure(ErrorKind::Upstream, err);
        }

        let Some(raw) = reply.non_blank_text() else {
            warn!(request_id = rid, "upstream returned no text");
            return ComplaintResponse::failure(ErrorKind::Upstream, UPSTREAM_NO_MESSAGE);
        };

        enter(rid, RequestState::ClassifyingRefusal);
        if self.refusal.is_refusal(Some(raw)) {
            info!(request_id = rid, "upstream reply classified as refusal");
            return ComplaintResponse::refusal(self.refusal.canonical_error(), raw);
        }

        let response = match op {
            Operation::Ask => ComplaintResponse::text(raw),
            Operation::Redact(requested) => self.shape(rid, requested, raw).await,
        };

        if response.is_success() {
            self.remember(rid, conversation_id, input, raw).await;
        }
        response
    }

    /// Turns a redact reply into text or a rendered document.
    async fn shape(&self, rid: &str, requested: OutputFormat, raw: &str) -> ComplaintResponse {
        enter(rid, RequestState::ParsingHeader);
        let parsed = parse_header(Some(raw));

        enter(rid, RequestState::ResolvingFormat);
        let outcome = resolve(requested, &parsed, raw);
        debug!(
            request_id = rid,
            requested = %requested,
            declared = ?parsed.declared_format,
            header_present = parsed.header_present,
            "format resolved"
        );

        match outcome {
            ResolutionOutcome::Reject { reason, kind } => {
                warn!(request_id = rid, reason = reason.as_str(), "reply rejected");
                ComplaintResponse::failure(kind, reason)
            }
            ResolutionOutcome::Degrade { body } => ComplaintResponse::text(body),
            ResolutionOutcome::Proceed {
                format: RenderFormat::Json,
                body,
            } => ComplaintResponse::text(body),
            ResolutionOutcome::Proceed {
                format: RenderFormat::Pdf,
                body,
            } => {
                enter(rid, RequestState::Rendering);
                self.render(rid, body).await
            }
        }
    }

    async fn render(&self, rid: &str, body: String) -> ComplaintResponse {
        let renderer = Arc::clone(&self.renderer);
        match tokio::task::spawn_blocking(move || renderer.render(&body)).await {
            Ok(Ok(bytes)) => {
                debug!(request_id = rid, bytes = bytes.len(), "document rendered");
                ComplaintResponse::document(bytes)
            }
            Ok(Err(e)) => {
                error!(request_id = rid, error = %e, "document rendering failed");
                ComplaintResponse::failure(e.kind(), RENDER_FAILED)
            }
            Err(e) => {
                error!(request_id = rid, error = %e, "render task failed");
                ComplaintResponse::failure(ErrorKind::Internal, RENDER_FAILED)
            }
        }
    }

    /// Prior turns for the conversation. Store failures are logged and the
    /// request proceeds without history.
    async fn load_history(
        &self,
        rid: &str,
        conversation_id: Option<&ConversationId>,
    ) -> Vec<ChatMessage> {
        let (Some(store), Some(id)) = (&self.history, conversation_id) else {
            return Vec::new();
        };
        match store.history(id).await {
            Ok(history) => {
                debug!(request_id = rid, turns = history.len(), "history loaded");
                history
            }
            Err(e) => {
                warn!(request_id = rid, error = %e, "failed to load history");
                Vec::new()
            }
        }
    }

    async fn remember(
        &self,
        rid: &str,
        conversation_id: Option<&ConversationId>,
        input: &str,
        reply: &str,
    ) {
        let (Some(store), Some(id)) = (&self.history, conversation_id) else {
            return;
        };
        let turns = vec![ChatMessage::user(input), ChatMessage::assistant(reply)];
        if let Err(e) = store.append(id, turns).await {
            warn!(request_id = rid, error = %e, "failed to append history");
        }
    }
}

fn enter(rid: &str, state: RequestState) {
    debug!(request_id = rid, state = %state, "request state");
}
