// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Scribe configuration system.

use figment::Jail;
use scribe_config::diagnostic::ConfigError;
use scribe_config::model::ScribeConfig;
use scribe_config::{load_and_validate_path, load_and_validate_str, load_config, load_config_from_str};

/// Valid TOML with all known sections deserializes successfully.
#[test]
fn valid_toml_deserializes_into_scribe_config() {
    let toml = r#"
[agent]
name = "helper"
log_level = "debug"
system_prompt = "Answer modding questions."

[window]
max_gap_secs = 120
max_duration_secs = 900
max_interposts = 1
include_interposts = false
prepend_before = 2
max_messages = 10
max_chars = 4000
page_size = 25

[chunking]
max_chunk_chars = 1500

[hints]
source = "cards.jsonl"
top_k = 3
privileged_kinds = ["method"]

[discord]
bot_token = "token-123"
allowed_users = [1, 2]
guild_id = 42

[anthropic]
api_key = "sk-ant-123"
model = "claude-haiku-4-5-20250901"
max_tokens = 512

[drafts]
capacity = 8
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "helper");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(
        config.agent.system_prompt.as_deref(),
        Some("Answer modding questions.")
    );
    assert_eq!(config.window.max_gap_secs, 120);
    assert_eq!(config.window.max_duration_secs, 900);
    assert_eq!(config.window.max_interposts, 1);
    assert!(!config.window.include_interposts);
    assert_eq!(config.window.prepend_before, 2);
    assert_eq!(config.window.max_messages, 10);
    assert_eq!(config.window.max_chars, 4000);
    assert_eq!(config.window.page_size, 25);
    assert_eq!(config.chunking.max_chunk_chars, 1500);
    assert_eq!(config.hints.source.as_deref(), Some("cards.jsonl"));
    assert_eq!(config.hints.top_k, 3);
    assert_eq!(config.hints.privileged_kinds, vec!["method"]);
    assert_eq!(config.discord.bot_token.as_deref(), Some("token-123"));
    assert_eq!(config.discord.allowed_users, vec![1, 2]);
    assert_eq!(config.discord.guild_id, Some(42));
    assert_eq!(config.anthropic.api_key.as_deref(), Some("sk-ant-123"));
    assert_eq!(config.anthropic.model, "claude-haiku-4-5-20250901");
    assert_eq!(config.anthropic.max_tokens, 512);
    assert_eq!(config.drafts.capacity, 8);
}

/// Missing optional sections use documented defaults.
#[test]
fn missing_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.agent.name, "scribe");
    assert_eq!(config.agent.log_level, "info");
    assert_eq!(config.window.max_gap_secs, 300);
    assert_eq!(config.window.max_duration_secs, 1800);
    assert_eq!(config.window.max_interposts, 3);
    assert!(config.window.include_interposts);
    assert_eq!(config.window.prepend_before, 5);
    assert_eq!(config.window.max_messages, 40);
    assert_eq!(config.window.max_chars, 12_000);
    assert_eq!(config.chunking.max_chunk_chars, 1900);
    assert!(config.hints.source.is_none());
    assert_eq!(config.hints.top_k, 5);
    assert_eq!(config.hints.privileged_kinds, vec!["method", "property"]);
    assert!(config.discord.bot_token.is_none());
    assert!(config.discord.allowed_users.is_empty());
    assert_eq!(config.anthropic.model, "claude-sonnet-4-20250514");
    assert_eq!(config.drafts.capacity, 256);
}

/// Unknown field in [window] produces an error naming the key.
#[test]
fn unknown_field_in_window_produces_error() {
    let toml = r#"
[window]
max_gap = 10
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("max_gap"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telegram]
bot_token = "x"
"#;

    assert!(load_config_from_str(toml).is_err());
}

/// Diagnostics carry the unknown key, a suggestion and the valid key list.
#[test]
fn unknown_key_diagnostic_suggests_correction() {
    let toml = r#"
[window]
max_gap_sec = 10
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let found = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "max_gap_sec"
                && suggestion.as_deref() == Some("max_gap_secs")
                && valid_keys.contains("max_duration_secs")
        })
    });
    assert!(found, "expected UnknownKey with suggestion, got: {errors:?}");
}

/// A string where a number is expected is rejected.
#[test]
fn invalid_type_is_rejected() {
    let toml = r#"
[chunking]
max_chunk_chars = "lots"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. } | ConfigError::Other(_))),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn validation_runs_after_parse() {
    let toml = r#"
[chunking]
max_chunk_chars = 0
"#;

    let errors = load_and_validate_str(toml).expect_err("zero chunk size should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("max_chunk_chars"))
    }));
}

/// ConfigError renders through miette with its help text.
#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "top_kk".to_string(),
        suggestion: Some("top_k".to_string()),
        valid_keys: "source, top_k, privileged_kinds".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some());
    let help = error.help().expect("should have help").to_string();
    assert!(help.contains("did you mean `top_k`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render");
    assert!(buf.contains("top_kk"));
}

/// Local scribe.toml and SCRIBE_* variables are layered, env winning.
#[test]
fn env_vars_override_local_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "scribe.toml",
            r#"
[window]
max_gap_secs = 100
max_interposts = 2
"#,
        )?;
        jail.set_env("SCRIBE_WINDOW_MAX_GAP_SECS", "42");
        jail.set_env("SCRIBE_DISCORD_BOT_TOKEN", "from-env");

        let config: ScribeConfig = load_config()?;
        assert_eq!(config.window.max_gap_secs, 42);
        assert_eq!(config.window.max_interposts, 2);
        assert_eq!(config.discord.bot_token.as_deref(), Some("from-env"));
        Ok(())
    });
}

/// An explicit config path is honoured and validated.
#[test]
fn explicit_path_is_loaded_and_validated() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("custom.toml");
    std::fs::write(&path, "[hints]\ntop_k = 0\n").unwrap();

    let errors = load_and_validate_path(&path).expect_err("top_k = 0 should fail");
    assert!(errors.iter().any(|e| {
        matches!(e, ConfigError::Validation { message } if message.contains("hints.top_k"))
    }));

    std::fs::write(&path, "[hints]\ntop_k = 2\n").unwrap();
    let config = load_and_validate_path(&path).expect("valid file");
    assert_eq!(config.hints.top_k, 2);
}
