// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenRouter upstream adapter for the Complai service.
//!
//! This crate implements [`UpstreamAdapter`] over the OpenRouter
//! chat-completions API. API key resolution happens in configuration:
//! `openrouter.api_key`, `COMPLAI_OPENROUTER_API_KEY`, or the conventional
//! `OPENROUTER_API_KEY`.

pub mod client;
pub mod types;

use async_trait::async_trait;
use complai_config::model::OpenRouterConfig;
use complai_core::{
    AdapterType, ChatMessage, ComplaiError, HealthStatus, PluginAdapter, UpstreamAdapter,
    UpstreamReply,
};
use tracing::{info, warn};

use crate::client::OpenRouterClient;

/// OpenRouter provider implementing [`UpstreamAdapter`].
pub struct OpenRouterProvider {
    client: OpenRouterClient,
}

impl OpenRouterProvider {
    /// Creates a provider from the `[openrouter]` config section.
    pub fn new(config: &OpenRouterConfig) -> Result<Self, ComplaiError> {
        let client = OpenRouterClient::new(config)?;
        if client.has_api_key() {
            info!(model = config.model.as_str(), "OpenRouter provider initialized");
        } else {
            warn!(
                model = config.model.as_str(),
                "OpenRouter provider initialized without an API key; upstream calls will fail"
            );
        }
        Ok(Self { client })
    }
}

#[async_trait]
impl PluginAdapter for OpenRouterProvider {
    fn name(&self) -> &str {
        "openrouter"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Upstream
    }

    async fn health_check(&self) -> Result<HealthStatus, ComplaiError> {
        if self.client.has_api_key() {
            Ok(HealthStatus::Healthy)
        } else {
            Ok(HealthStatus::Unhealthy(client::MISSING_API_KEY.to_string()))
        }
    }
}

#[async_trait]
impl UpstreamAdapter for OpenRouterProvider {
    async fn call(&self, conversation: Vec<ChatMessage>) -> UpstreamReply {
        self.client.chat(&conversation).await
    }
}
