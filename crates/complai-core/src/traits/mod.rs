// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Collaborator trait definitions.
//!
//! All adapters extend the [`PluginAdapter`] base trait. Async traits use
//! `#[async_trait]` for dynamic dispatch compatibility.

pub mod adapter;
pub mod history;
pub mod renderer;
pub mod upstream;

pub use adapter::PluginAdapter;
pub use history::ConversationStore;
pub use renderer::DocumentRenderer;
pub use upstream::UpstreamAdapter;
