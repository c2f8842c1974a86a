// SPDX-FileCopyrightText: 2026 Complai Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Complai configuration system.

use std::path::Path;

use complai_config::diagnostic::ConfigError;
use complai_config::model::ComplaiConfig;
use complai_config::{
    load_and_validate_str, load_config_from_path, load_config_from_str, to_redacted_toml,
};
use figment::Jail;

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_complai_config() {
    let toml = r#"
[agent]
name = "complai-test"
log_level = "debug"
municipality = "Sant Boi de Llobregat"
upstream_timeout_secs = 12

[openrouter]
api_key = "sk-or-123"
model = "openai/gpt-4o-mini"
max_retries = 2

[gateway]
host = "0.0.0.0"
port = 9000

[history]
max_entries = 50
ttl_secs = 60
max_messages = 6

[refusal]
phrases = ["no way"]
scope_terms = ["sant boi"]
exclusivity_qualifiers = ["only"]
canonical_error = "Out of scope."
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "complai-test");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.agent.municipality, "Sant Boi de Llobregat");
    assert_eq!(config.agent.upstream_timeout_secs, 12);
    assert_eq!(config.openrouter.api_key.as_deref(), Some("sk-or-123"));
    assert_eq!(config.openrouter.model, "openai/gpt-4o-mini");
    assert_eq!(config.openrouter.max_retries, 2);
    assert_eq!(config.gateway.host, "0.0.0.0");
    assert_eq!(config.gateway.port, 9000);
    assert_eq!(config.history.max_entries, 50);
    assert_eq!(config.history.ttl_secs, 60);
    assert_eq!(config.history.max_messages, 6);
    assert_eq!(config.refusal.phrases, vec!["no way"]);
    assert_eq!(config.refusal.scope_terms, vec!["sant boi"]);
    assert_eq!(config.refusal.canonical_error, "Out of scope.");
}

/// Empty TOML yields the compiled defaults.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "complai");
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.agent.municipality, "El Prat de Llobregat");
    assert_eq!(config.agent.upstream_timeout_secs, 30);
    assert!(config.openrouter.api_key.is_none());
    assert_eq!(
        config.openrouter.url,
        "https://openrouter.ai/api/v1/chat/completions"
    );
    assert_eq!(config.openrouter.request_timeout_secs, 20);
    assert_eq!(config.openrouter.max_retries, 0);
    assert_eq!(config.gateway.host, "127.0.0.1");
    assert_eq!(config.gateway.port, 8080);
    assert_eq!(config.history.max_entries, 1000);
    assert_eq!(config.history.ttl_secs, 3600);
    assert!(config.refusal.phrases.iter().any(|p| p == "no puc ajudar"));
    assert_eq!(
        config.refusal.canonical_error,
        "Request is not about El Prat de Llobregat."
    );
}

/// Unknown field in a section is rejected.
#[test]
fn unknown_field_in_openrouter_produces_error() {
    let toml = r#"
[openrouter]
modle = "x"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("modle"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unknown keys become diagnostics with a suggestion.
#[test]
fn unknown_key_diagnostic_suggests_correction() {
    let toml = r#"
[history]
max_entires = 5
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion: Some(s), .. }
                if key == "max_entires" && s == "max_entries"
        )
    });
    assert!(found, "expected an UnknownKey suggestion, got: {errors:?}");
}

/// Wrong value type is reported as InvalidType.
#[test]
fn wrong_type_produces_invalid_type_error() {
    let toml = r#"
[gateway]
port = "eighty"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("port"))),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after deserialization.
#[test]
fn validation_errors_surface_from_load_and_validate() {
    let toml = r#"
[agent]
upstream_timeout_secs = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors
        .iter()
        .any(|e| matches!(e, ConfigError::Validation { message } if message.contains("upstream_timeout_secs"))));
}

/// `COMPLAI_*` variables override file values with section mapping.
#[test]
fn env_vars_override_file_values() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "complai.toml",
            r#"
[gateway]
port = 7000

[openrouter]
model = "from-file"
"#,
        )?;
        jail.set_env("COMPLAI_GATEWAY_PORT", "9100");
        jail.set_env("COMPLAI_OPENROUTER_MODEL", "from-env");
        jail.set_env("COMPLAI_HISTORY_MAX_ENTRIES", "7");

        let config = load_config_from_path(Path::new("complai.toml"))?;
        assert_eq!(config.gateway.port, 9100);
        assert_eq!(config.openrouter.model, "from-env");
        assert_eq!(config.history.max_entries, 7);
        Ok(())
    });
}

/// The conventional `OPENROUTER_API_KEY` fills in the key, and the
/// prefixed variable wins over it.
#[test]
fn openrouter_api_key_env_precedence() {
    Jail::expect_with(|jail| {
        jail.create_file("complai.toml", "")?;
        jail.set_env("OPENROUTER_API_KEY", "sk-bare");

        let config = load_config_from_path(Path::new("complai.toml"))?;
        assert_eq!(config.openrouter.api_key.as_deref(), Some("sk-bare"));

        jail.set_env("COMPLAI_OPENROUTER_API_KEY", "sk-prefixed");
        let config = load_config_from_path(Path::new("complai.toml"))?;
        assert_eq!(config.openrouter.api_key.as_deref(), Some("sk-prefixed"));
        Ok(())
    });
}

/// Missing config files are silently skipped.
#[test]
fn missing_config_file_is_skipped() {
    Jail::expect_with(|_jail| {
        let config = load_config_from_path(Path::new("/nonexistent/complai.toml"))?;
        assert_eq!(config.agent.name, "complai");
        Ok(())
    });
}

/// The printed config never contains the key.
#[test]
fn redacted_toml_masks_api_key() {
    let mut config = ComplaiConfig::default();
    config.openrouter.api_key = Some("sk-or-secret".to_string());

    let rendered = to_redacted_toml(&config).unwrap();
    assert!(!rendered.contains("sk-or-secret"));
    assert!(rendered.contains("[redacted]"));
    assert!(rendered.contains("[gateway]"));
}

/// Debug output of the upstream section never leaks the key.
#[test]
fn openrouter_debug_redacts_key() {
    let mut config = ComplaiConfig::default();
    config.openrouter.api_key = Some("sk-or-secret".to_string());
    let debug = format!("{:?}", config.openrouter);
    assert!(!debug.contains("sk-or-secret"));
}
