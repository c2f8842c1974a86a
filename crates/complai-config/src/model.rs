// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Complai service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Complai configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ComplaiConfig {
    /// Service identity and request-handling settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// OpenRouter upstream settings.
    #[serde(default)]
    pub openrouter: OpenRouterConfig,

    /// HTTP gateway settings.
    #[serde(default)]
    pub gateway: GatewayConfig,

    /// Conversation history store settings.
    #[serde(default)]
    pub history: HistoryConfig,

    /// Refusal phrase table.
    #[serde(default)]
    pub refusal: RefusalConfig,
}

/// Service identity and request-handling configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the service.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Municipality the assistant is scoped to; used in prompts.
    #[serde(default = "default_municipality")]
    pub municipality: String,

    /// Upper bound on a single upstream call, in seconds.
    #[serde(default = "default_upstream_timeout_secs")]
    pub upstream_timeout_secs: u64,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            municipality: default_municipality(),
            upstream_timeout_secs: default_upstream_timeout_secs(),
        }
    }
}

fn default_agent_name() -> String {
    "complai".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_municipality() -> String {
    "El Prat de Llobregat".to_string()
}

fn default_upstream_timeout_secs() -> u64 {
    30
}

/// OpenRouter chat-completions configuration.
#[derive(Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OpenRouterConfig {
    /// API key. `None` falls back to the `OPENROUTER_API_KEY` environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Chat-completions endpoint.
    #[serde(default = "default_openrouter_url")]
    pub url: String,

    /// Model identifier sent with every request.
    #[serde(default = "default_openrouter_model")]
    pub model: String,

    /// Value of the `HTTP-Referer` attribution header.
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Value of the `X-Title` attribution header.
    #[serde(default = "default_title")]
    pub title: String,

    /// Per-request HTTP timeout, in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// TCP connect timeout, in seconds.
    #[serde(default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Retries on transient statuses (429, 500, 503). Zero disables retry.
    #[serde(default)]
    pub max_retries: u32,
}

impl Default for OpenRouterConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            url: default_openrouter_url(),
            model: default_openrouter_model(),
            referer: default_referer(),
            title: default_title(),
            request_timeout_secs: default_request_timeout_secs(),
            connect_timeout_secs: default_connect_timeout_secs(),
            max_retries: 0,
        }
    }
}

impl std::fmt::Debug for OpenRouterConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenRouterConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("url", &self.url)
            .field("model", &self.model)
            .field("referer", &self.referer)
            .field("title", &self.title)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("connect_timeout_secs", &self.connect_timeout_secs)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

fn default_openrouter_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_openrouter_model() -> String {
    "minimax/minimax-m2.5".to_string()
}

fn default_referer() -> String {
    "https://complai.cat".to_string()
}

fn default_title() -> String {
    "Complai".to_string()
}

fn default_request_timeout_secs() -> u64 {
    20
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// HTTP gateway configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GatewayConfig {
    /// Host address to bind.
    #[serde(default = "default_gateway_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_gateway_port")]
    pub port: u16,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            host: default_gateway_host(),
            port: default_gateway_port(),
        }
    }
}

fn default_gateway_host() -> String {
    "127.0.0.1".to_string()
}

fn default_gateway_port() -> u16 {
    8080
}

/// Conversation history store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HistoryConfig {
    /// Maximum number of conversations kept at once.
    #[serde(default = "default_history_max_entries")]
    pub max_entries: usize,

    /// Seconds of inactivity after which a conversation is forgotten.
    #[serde(default = "default_history_ttl_secs")]
    pub ttl_secs: u64,

    /// Maximum number of turns kept per conversation (oldest dropped first).
    #[serde(default = "default_history_max_messages")]
    pub max_messages: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            max_entries: default_history_max_entries(),
            ttl_secs: default_history_ttl_secs(),
            max_messages: default_history_max_messages(),
        }
    }
}

fn default_history_max_entries() -> usize {
    1000
}

fn default_history_ttl_secs() -> u64 {
    3600
}

fn default_history_max_messages() -> usize {
    20
}

/// Refusal phrase table.
///
/// Matching is done on lowercased, quote-normalized text. Entries are
/// normalized the same way, so any case or quote style works.
///
/// This table is where false positives are tuned. With the defaults, any
/// reply that mentions "el prat" next to a word such as "only" or "solo" is
/// flagged, which also catches ordinary letters ("the only bus stop in El
/// Prat"). Narrow `scope_terms` or `exclusivity_qualifiers` in `[refusal]`,
/// or set either to an empty list to turn the scope check off.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RefusalConfig {
    /// Substrings that mark a reply as a refusal on their own.
    #[serde(default = "default_refusal_phrases")]
    pub phrases: Vec<String>,

    /// Terms naming the service's geographic scope.
    #[serde(default = "default_scope_terms")]
    pub scope_terms: Vec<String>,

    /// Words that, next to a scope term, signal "I only handle X".
    /// Common words here trade recall for false positives.
    #[serde(default = "default_exclusivity_qualifiers")]
    pub exclusivity_qualifiers: Vec<String>,

    /// Error string returned to callers when a refusal is detected.
    #[serde(default = "default_canonical_error")]
    pub canonical_error: String,
}

impl Default for RefusalConfig {
    fn default() -> Self {
        Self {
            phrases: default_refusal_phrases(),
            scope_terms: default_scope_terms(),
            exclusivity_qualifiers: default_exclusivity_qualifiers(),
            canonical_error: default_canonical_error(),
        }
    }
}

fn default_refusal_phrases() -> Vec<String> {
    [
        // English
        "can't help",
        "cannot help",
        "can't assist",
        "cannot assist",
        "i'm sorry, i can't",
        "i am sorry, i cannot",
        "i am unable to",
        "i'm unable to",
        "cannot provide",
        "can't provide",
        // Spanish
        "no puedo ayudar",
        "lo siento, no puedo",
        // Catalan
        "no puc ajudar",
        "ho sento, no puc",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_scope_terms() -> Vec<String> {
    vec!["el prat".to_string()]
}

fn default_exclusivity_qualifiers() -> Vec<String> {
    ["only", "solament", "solo", "només"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_canonical_error() -> String {
    "Request is not about El Prat de Llobregat.".to_string()
}
