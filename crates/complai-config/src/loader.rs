// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./complai.toml` > `~/.config/complai/complai.toml` >
//! `/etc/complai/complai.toml` with environment variable overrides via the
//! `COMPLAI_` prefix. The conventional `OPENROUTER_API_KEY` variable is also
//! honored for the upstream key.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};

use crate::model::ComplaiConfig;

/// Top-level sections that `COMPLAI_<SECTION>_<KEY>` variables map into.
const ENV_SECTIONS: &[&str] = &["agent", "openrouter", "gateway", "history", "refusal"];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/complai/complai.toml` (system-wide)
/// 3. `~/.config/complai/complai.toml` (user XDG config)
/// 4. `./complai.toml` (local directory)
/// 5. `OPENROUTER_API_KEY`
/// 6. `COMPLAI_*` environment variables
pub fn load_config() -> Result<ComplaiConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ComplaiConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ComplaiConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ComplaiConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ComplaiConfig::default()))
        .merge(Toml::file(path))
        .merge(api_key_provider())
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
///
/// Returns the Figment before extraction so callers can inspect metadata.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ComplaiConfig::default()))
        .merge(Toml::file("/etc/complai/complai.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("complai/complai.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("complai.toml"))
        .merge(api_key_provider())
        .merge(env_provider())
}

/// Maps the bare `OPENROUTER_API_KEY` variable onto `openrouter.api_key`.
fn api_key_provider() -> Env {
    Env::raw()
        .only(&["OPENROUTER_API_KEY"])
        .map(|_| "openrouter.api_key".into())
}

/// Create the `COMPLAI_` environment provider with explicit section mapping.
///
/// Only the first underscore after a known section name becomes a dot, so
/// `COMPLAI_OPENROUTER_API_KEY` maps to `openrouter.api_key` and
/// `COMPLAI_HISTORY_MAX_ENTRIES` to `history.max_entries`.
fn env_provider() -> Env {
    Env::prefixed("COMPLAI_").map(|key| map_env_key(key.as_str()).into())
}

pub(crate) fn map_env_key(key: &str) -> String {
    // figment lowercases after mapping, so match case-insensitively here.
    let key = key.to_ascii_lowercase();
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_keys_split_on_first_section_underscore() {
        assert_eq!(map_env_key("openrouter_api_key"), "openrouter.api_key");
        assert_eq!(map_env_key("history_max_entries"), "history.max_entries");
        assert_eq!(
            map_env_key("agent_upstream_timeout_secs"),
            "agent.upstream_timeout_secs"
        );
        assert_eq!(map_env_key("refusal_canonical_error"), "refusal.canonical_error");
    }

    #[test]
    fn unknown_section_is_left_alone() {
        assert_eq!(map_env_key("nonsense_key"), "nonsense_key");
    }

    #[test]
    fn uppercase_keys_are_mapped() {
        assert_eq!(map_env_key("GATEWAY_PORT"), "gateway.port");
    }
}
