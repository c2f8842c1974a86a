// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as valid bind addresses, positive timeouts, and non-blank phrase tables.

use crate::diagnostic::ConfigError;
use crate::model::ComplaiConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ComplaiConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.agent.log_level.trim().to_lowercase().as_str()) {
        fail(format!(
            "agent.log_level `{}` must be one of {}",
            config.agent.log_level,
            LOG_LEVELS.join(", ")
        ));
    }

    if config.agent.municipality.trim().is_empty() {
        fail("agent.municipality must not be empty".to_string());
    }

    if config.agent.upstream_timeout_secs == 0 {
        fail("agent.upstream_timeout_secs must be greater than zero".to_string());
    }

    let url = config.openrouter.url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        fail(format!("openrouter.url `{url}` must be an http(s) URL"));
    }

    if config.openrouter.model.trim().is_empty() {
        fail("openrouter.model must not be empty".to_string());
    }

    if config.openrouter.request_timeout_secs == 0 {
        fail("openrouter.request_timeout_secs must be greater than zero".to_string());
    }

    let host = config.gateway.host.trim();
    if host.is_empty() {
        fail("gateway.host must not be empty".to_string());
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            fail(format!(
                "gateway.host `{host}` is not a valid IP address or hostname"
            ));
        }
    }

    if config.history.max_entries == 0 {
        fail("history.max_entries must be at least 1".to_string());
    }

    if config.history.ttl_secs == 0 {
        fail("history.ttl_secs must be greater than zero".to_string());
    }

    if config.history.max_messages < 2 {
        fail(format!(
            "history.max_messages must be at least 2 (one exchange), got {}",
            config.history.max_messages
        ));
    }

    if config.refusal.phrases.is_empty() {
        fail("refusal.phrases must contain at least one phrase".to_string());
    }

    for (i, phrase) in config.refusal.phrases.iter().enumerate() {
        if phrase.trim().is_empty() {
            fail(format!("refusal.phrases[{i}] must not be blank"));
        }
    }

    for (field, terms) in [
        ("scope_terms", &config.refusal.scope_terms),
        ("exclusivity_qualifiers", &config.refusal.exclusivity_qualifiers),
    ] {
        if terms.iter().any(|t| t.trim().is_empty()) {
            fail(format!("refusal.{field} must not contain blank entries"));
        }
    }

    if config.refusal.canonical_error.trim().is_empty() {
        fail("refusal.canonical_error must not be empty".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
