// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation history for the Complai service.
//!
//! The orchestrator reads prior turns through the
//! [`ConversationStore`](complai_core::ConversationStore) trait and appends
//! only after a successful response. [`InMemoryConversationStore`] is the
//! implementation the binary wires in.

pub mod store;

pub use store::InMemoryConversationStore;
