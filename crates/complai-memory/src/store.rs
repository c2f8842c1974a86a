// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! DashMap-backed conversation store with bounded size and idle expiry.

use std::time::Duration;

use async_trait::async_trait;
use complai_config::model::HistoryConfig;
use complai_core::{
    AdapterType, ChatMessage, ComplaiError, ConversationId, ConversationStore, HealthStatus,
    PluginAdapter,
};
use dashmap::DashMap;
use tokio::time::Instant;
use tracing::debug;

#[derive(Debug)]
struct Conversation {
    messages: Vec<ChatMessage>,
    touched: Instant,
}

/// Conversation history kept in process memory.
///
/// - At most `max_entries` conversations are held; appending a new one past
///   the limit first drops expired conversations, then the least recently
///   touched.
/// - A conversation untouched for `ttl` is treated as gone. Reading and
///   appending both count as a touch.
/// - Each conversation keeps its newest `max_messages` turns.
pub struct InMemoryConversationStore {
    conversations: DashMap<ConversationId, Conversation>,
    max_entries: usize,
    ttl: Duration,
    max_messages: usize,
}

impl InMemoryConversationStore {
    pub fn new(max_entries: usize, ttl: Duration, max_messages: usize) -> Self {
        Self {
            conversations: DashMap::new(),
            max_entries: max_entries.max(1),
            ttl,
            max_messages: max_messages.max(1),
        }
    }

    pub fn from_config(config: &HistoryConfig) -> Self {
        Self::new(
            config.max_entries,
            Duration::from_secs(config.ttl_secs),
            config.max_messages,
        )
    }

    /// Number of conversations currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.conversations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.conversations.is_empty()
    }

    fn is_expired(&self, conversation: &Conversation, now: Instant) -> bool {
        now.duration_since(conversation.touched) >= self.ttl
    }

    /// Makes room for one new conversation.
    fn evict_for_insert(&self, now: Instant) {
        if self.conversations.len() < self.max_entries {
            return;
        }

        let before = self.conversations.len();
        self.conversations.retain(|_, c| !self.is_expired(c, now));
        let expired = before - self.conversations.len();

        let mut evicted = 0;
        while self.conversations.len() >= self.max_entries {
            let oldest = self
                .conversations
                .iter()
                .min_by_key(|entry| entry.value().touched)
                .map(|entry| entry.key().clone());
            match oldest {
                Some(id) => {
                    self.conversations.remove(&id);
                    evicted += 1;
                }
                None => break,
            }
        }

        debug!(expired, evicted, "history store evicted conversations");
    }
}

#[async_trait]
impl PluginAdapter for InMemoryConversationStore {
    fn name(&self) -> &str {
        "in-memory-history"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::History
    }

    async fn health_check(&self) -> Result<HealthStatus, ComplaiError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn history(&self, id: &ConversationId) -> Result<Vec<ChatMessage>, ComplaiError> {
        let now = Instant::now();
        if self
            .conversations
            .remove_if(id, |_, c| self.is_expired(c, now))
            .is_some()
        {
            debug!(conversation_id = id.0.as_str(), "conversation expired");
            return Ok(Vec::new());
        }

        Ok(self
            .conversations
            .get_mut(id)
            .map(|mut c| {
                c.touched = now;
                c.messages.clone()
            })
            .unwrap_or_default())
    }

    async fn append(
        &self,
        id: &ConversationId,
        messages: Vec<ChatMessage>,
    ) -> Result<(), ComplaiError> {
        let now = Instant::now();
        self.conversations
            .remove_if(id, |_, c| self.is_expired(c, now));

        if !self.conversations.contains_key(id) {
            self.evict_for_insert(now);
        }

        let mut conversation = self
            .conversations
            .entry(id.clone())
            .or_insert_with(|| Conversation {
                messages: Vec::new(),
                touched: now,
            });
        conversation.messages.extend(messages);
        let overflow = conversation.messages.len().saturating_sub(self.max_messages);
        if overflow > 0 {
            conversation.messages.drain(..overflow);
        }
        conversation.touched = now;
        Ok(())
    }
}
