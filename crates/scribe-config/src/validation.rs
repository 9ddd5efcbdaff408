// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! The window builder, splitter and hint index assume positive size bounds;
//! this is the boundary where those assumptions are enforced.

use crate::diagnostic::ConfigError;
use crate::model::ScribeConfig;

/// Discord rejects message content longer than this.
pub const DISCORD_MESSAGE_LIMIT: usize = 2000;

/// Discord caps history page requests at this many messages.
const DISCORD_PAGE_LIMIT: usize = 100;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &ScribeConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();
    let mut fail = |message: String| errors.push(ConfigError::Validation { message });

    if !LOG_LEVELS.contains(&config.agent.log_level.as_str()) {
        fail(format!(
            "agent.log_level must be one of {}, got `{}`",
            LOG_LEVELS.join(", "),
            config.agent.log_level
        ));
    }

    let chunk = config.chunking.max_chunk_chars;
    if chunk == 0 || chunk > DISCORD_MESSAGE_LIMIT {
        fail(format!(
            "chunking.max_chunk_chars must be between 1 and {DISCORD_MESSAGE_LIMIT}, got {chunk}"
        ));
    }

    if config.window.max_messages == 0 {
        fail("window.max_messages must be at least 1".to_string());
    }

    if config.window.max_chars == 0 {
        fail("window.max_chars must be at least 1".to_string());
    }

    let page = config.window.page_size;
    if page == 0 || page > DISCORD_PAGE_LIMIT {
        fail(format!(
            "window.page_size must be between 1 and {DISCORD_PAGE_LIMIT}, got {page}"
        ));
    }

    if config.hints.top_k == 0 {
        fail("hints.top_k must be at least 1".to_string());
    }

    if let Some(source) = &config.hints.source {
        if source.trim().is_empty() {
            fail("hints.source must not be blank when set".to_string());
        }
    }

    if config.drafts.capacity == 0 {
        fail("drafts.capacity must be at least 1".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn has_error(errors: &[ConfigError], needle: &str) -> bool {
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::Validation { message } if message.contains(needle)))
    }

    #[test]
    fn default_config_validates() {
        let config = ScribeConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn zero_chunk_size_fails_validation() {
        let mut config = ScribeConfig::default();
        config.chunking.max_chunk_chars = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "max_chunk_chars"));
    }

    #[test]
    fn chunk_size_above_discord_limit_fails_validation() {
        let mut config = ScribeConfig::default();
        config.chunking.max_chunk_chars = 2001;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "max_chunk_chars"));
    }

    #[test]
    fn zero_window_budgets_fail_validation() {
        let mut config = ScribeConfig::default();
        config.window.max_messages = 0;
        config.window.max_chars = 0;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "window.max_messages"));
        assert!(has_error(&errors, "window.max_chars"));
    }

    #[test]
    fn oversized_page_fails_validation() {
        let mut config = ScribeConfig::default();
        config.window.page_size = 250;
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "page_size"));
    }

    #[test]
    fn blank_hint_source_fails_validation() {
        let mut config = ScribeConfig::default();
        config.hints.source = Some("   ".to_string());
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "hints.source"));
    }

    #[test]
    fn unknown_log_level_fails_validation() {
        let mut config = ScribeConfig::default();
        config.agent.log_level = "verbose".to_string();
        let errors = validate_config(&config).unwrap_err();
        assert!(has_error(&errors, "agent.log_level"));
    }

    #[test]
    fn errors_are_collected_not_fail_fast() {
        let mut config = ScribeConfig::default();
        config.hints.top_k = 0;
        config.drafts.capacity = 0;
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn zero_prepend_and_interposts_are_allowed() {
        let mut config = ScribeConfig::default();
        config.window.prepend_before = 0;
        config.window.max_interposts = 0;
        config.window.include_interposts = false;
        assert!(validate_config(&config).is_ok());
    }
}
