// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Upstream adapter trait for language-model providers (OpenRouter, etc.).

use async_trait::async_trait;

use crate::traits::adapter::PluginAdapter;
use crate::types::{ChatMessage, UpstreamReply};

/// Adapter for the language-model transport.
///
/// Implementations never return `Err`: transport failures, non-2xx statuses,
/// and missing credentials are reported through [`UpstreamReply::error`] so
/// the orchestrator has a single shape to classify. Timeouts are imposed by
/// the caller, not the adapter.
#[async_trait]
pub trait UpstreamAdapter: PluginAdapter {
    /// Sends the ordered conversation and returns the model's reply.
    async fn call(&self, conversation: Vec<ChatMessage>) -> UpstreamReply;
}
