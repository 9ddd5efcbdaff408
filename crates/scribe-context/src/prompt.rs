// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System prompt loading.

use scribe_config::model::AgentConfig;
use tracing::{info, warn};

/// Loads the system prompt following config priority: file > inline > default.
///
/// An unreadable or blank prompt file is logged and skipped.
pub async fn load_system_prompt(config: &AgentConfig) -> String {
    if let Some(file_path) = &config.system_prompt_file {
        match tokio::fs::read_to_string(file_path).await {
            Ok(content) => {
                let trimmed = content.trim();
                if !trimmed.is_empty() {
                    info!(path = file_path.as_str(), "loaded system prompt from file");
                    return trimmed.to_string();
                }
                warn!(path = file_path.as_str(), "system prompt file is empty, falling back");
            }
            Err(e) => {
                warn!(
                    path = file_path.as_str(),
                    error = %e,
                    "failed to read system prompt file, falling back"
                );
            }
        }
    }

    match &config.system_prompt {
        Some(prompt) if !prompt.trim().is_empty() => prompt.clone(),
        _ => default_system_prompt(&config.name),
    }
}

fn default_system_prompt(name: &str) -> String {
    format!(
        "You are {name}, an assistant that drafts replies in a developer community chat. \
         Answer the marked message using the surrounding conversation and any reference \
         cards provided. Be concise and accurate, use fenced code blocks for code, and say \
         so when you are unsure."
    )
}
