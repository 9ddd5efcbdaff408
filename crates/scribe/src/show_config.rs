// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `scribe config` command implementation.

use scribe_config::ScribeConfig;
use scribe_core::ScribeError;

const REDACTED: &str = "<redacted>";

/// Prints the effective configuration as TOML with credentials masked.
pub fn run_config(config: &ScribeConfig) -> Result<(), ScribeError> {
    print!("{}", render_config(config)?);
    Ok(())
}

fn render_config(config: &ScribeConfig) -> Result<String, ScribeError> {
    let mut shown = config.clone();
    if shown.discord.bot_token.is_some() {
        shown.discord.bot_token = Some(REDACTED.into());
    }
    if shown.anthropic.api_key.is_some() {
        shown.anthropic.api_key = Some(REDACTED.into());
    }
    toml::to_string_pretty(&shown)
        .map_err(|e| ScribeError::Internal(format!("failed to serialize configuration: {e}")))
}
