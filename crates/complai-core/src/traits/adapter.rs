// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base adapter trait that every collaborator implements.

use async_trait::async_trait;

use crate::error::ComplaiError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for all Complai collaborators.
///
/// Upstream callers, document renderers, and history stores implement this
/// trait so the binary can report identity and health uniformly.
#[async_trait]
pub trait PluginAdapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the kind of collaborator this adapter provides.
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, ComplaiError>;
}
