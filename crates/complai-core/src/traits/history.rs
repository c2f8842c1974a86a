// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation history store trait.

use async_trait::async_trait;

use crate::error::ComplaiError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ChatMessage, ConversationId};

/// Key-value store of prior conversation turns.
///
/// Implementations own their eviction policy (bounded entries, time-to-live).
/// The orchestrator only reads history before calling upstream and appends
/// after a successful resolution.
#[async_trait]
pub trait ConversationStore: PluginAdapter {
    /// Returns the stored turns for `id`, oldest first. Unknown or expired ids
    /// yield an empty history.
    async fn history(&self, id: &ConversationId) -> Result<Vec<ChatMessage>, ComplaiError>;

    /// Appends turns to the conversation, creating it if needed.
    async fn append(
        &self,
        id: &ConversationId,
        messages: Vec<ChatMessage>,
    ) -> Result<(), ComplaiError>;
}
