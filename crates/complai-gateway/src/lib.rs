// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Complai service.
//!
//! Exposes the orchestrator's `ask` and `redact` operations over axum. The
//! gateway owns the only mapping from [`complai_core::ErrorKind`] to HTTP
//! status codes; handlers never inspect error strings.

pub mod handlers;
pub mod server;

pub use handlers::status_for;
pub use server::{router, start_server, GatewayState, HealthState, ServerConfig};
