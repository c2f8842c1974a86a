// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handling core for the Complai service.
//!
//! The [`ComplaintOrchestrator`] is the central coordinator that:
//! - Validates caller input
//! - Builds the prompt and calls the upstream model under a timeout
//! - Detects scope refusals in the reply
//! - Extracts the metadata header and resolves the output format
//! - Hands PDF bodies to the document renderer
//! - Appends successful exchanges to the conversation history
//!
//! [`header`], [`resolver`], and [`refusal`] are pure and hold no state.

pub mod header;
pub mod orchestrator;
pub mod prompt;
pub mod refusal;
pub mod resolver;

pub use header::{parse_header, ParsedHeader};
pub use orchestrator::{ComplaintOrchestrator, RequestState};
pub use prompt::PromptBuilder;
pub use refusal::RefusalTable;
pub use resolver::{resolve, RenderFormat, ResolutionOutcome};
