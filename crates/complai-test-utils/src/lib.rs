// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Complai integration tests.
//!
//! Provides mock collaborators and test harness infrastructure for fast,
//! deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`MockUpstream`] - Mock upstream model with queued replies
//! - [`FailingRenderer`] - Renderer that always errors
//! - [`TestHarness`] - Orchestrator wired to the mocks and a real history store

pub mod harness;
pub mod mock_provider;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_provider::{FailingRenderer, MockUpstream, PlainTextRenderer, PLAIN_TEXT_CONTENT_TYPE};
