// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `complai serve` command implementation.
//!
//! Wires the OpenRouter provider, the PDF renderer, and the in-memory
//! conversation store into a [`ComplaintOrchestrator`], then serves it through
//! the HTTP gateway until SIGINT or SIGTERM.

use std::sync::Arc;

use complai_agent::ComplaintOrchestrator;
use complai_config::model::ComplaiConfig;
use complai_core::{ComplaiError, HealthStatus, PluginAdapter};
use complai_gateway::{GatewayState, ServerConfig};
use complai_memory::InMemoryConversationStore;
use complai_openrouter::OpenRouterProvider;
use complai_pdf::PdfRenderer;
use tracing::{debug, info, warn};

/// Runs the `complai serve` command.
pub async fn run_serve(config: ComplaiConfig) -> Result<(), ComplaiError> {
    init_tracing(&config.agent.log_level);

    info!(
        name = config.agent.name.as_str(),
        municipality = config.agent.municipality.as_str(),
        "starting complai serve"
    );

    let orchestrator = build_orchestrator(&config).await?;

    let server_config = ServerConfig {
        host: config.gateway.host.clone(),
        port: config.gateway.port,
    };
    let state = GatewayState::new(Arc::new(orchestrator));

    complai_gateway::start_server(&server_config, state, shutdown_signal()).await?;

    info!("complai serve shutdown complete");
    Ok(())
}

/// Builds the orchestrator and its collaborators from configuration,
/// logging the startup health of each adapter.
async fn build_orchestrator(config: &ComplaiConfig) -> Result<ComplaintOrchestrator, ComplaiError> {
    let provider = Arc::new(OpenRouterProvider::new(&config.openrouter)?);
    let renderer = Arc::new(PdfRenderer::new());
    let history = Arc::new(InMemoryConversationStore::from_config(&config.history));

    let adapters: [&dyn PluginAdapter; 3] = [provider.as_ref(), renderer.as_ref(), history.as_ref()];
    for adapter in adapters {
        match adapter.health_check().await? {
            HealthStatus::Healthy => {
                debug!(adapter = adapter.name(), kind = %adapter.adapter_type(), "adapter healthy");
            }
            HealthStatus::Degraded(reason) | HealthStatus::Unhealthy(reason) => {
                warn!(adapter = adapter.name(), reason = reason.as_str(), "adapter not healthy");
            }
        }
    }

    info!(
        max_entries = config.history.max_entries,
        ttl_secs = config.history.ttl_secs,
        upstream_timeout_secs = config.agent.upstream_timeout_secs,
        "orchestrator ready"
    );

    Ok(ComplaintOrchestrator::from_config(config, provider, renderer).with_history(history))
}

/// Resolves when SIGINT (Ctrl+C) or, on Unix, SIGTERM is received.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received SIGINT (Ctrl+C), initiating shutdown"),
        _ = terminate => info!("received SIGTERM, initiating shutdown"),
    }
}

/// Initialize the tracing subscriber with the configured log level.
///
/// `RUST_LOG` overrides the configured level when set.
fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("complai={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
