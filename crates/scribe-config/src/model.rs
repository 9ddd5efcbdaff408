// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Scribe assistant.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Scribe configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable overrides.
/// All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ScribeConfig {
    /// Assistant identity and logging.
    #[serde(default)]
    pub agent: AgentConfig,

    /// Conversation window constraints.
    #[serde(default)]
    pub window: WindowConfig,

    /// Reply chunking.
    #[serde(default)]
    pub chunking: ChunkingConfig,

    /// Reference card index.
    #[serde(default)]
    pub hints: HintsConfig,

    /// Discord bot integration.
    #[serde(default)]
    pub discord: DiscordConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Pending draft table.
    #[serde(default)]
    pub drafts: DraftsConfig,
}

/// Assistant identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the assistant.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Inline system prompt string. Overridden by `system_prompt_file` if both set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a markdown file containing the system prompt.
    /// Takes precedence over `system_prompt` if both are set.
    #[serde(default)]
    pub system_prompt_file: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            system_prompt: None,
            system_prompt_file: None,
        }
    }
}

fn default_agent_name() -> String {
    "scribe".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Constraints applied while growing a conversation window around an anchor.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WindowConfig {
    /// Largest allowed silence between two messages of the anchor's author.
    #[serde(default = "default_max_gap_secs")]
    pub max_gap_secs: u64,

    /// Largest allowed distance between the anchor and any later message.
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: u64,

    /// Consecutive messages from other authors tolerated inside a burst.
    #[serde(default = "default_max_interposts")]
    pub max_interposts: u32,

    /// Whether messages from other authors may be included at all.
    #[serde(default = "default_include_interposts")]
    pub include_interposts: bool,

    /// Messages immediately preceding the anchor to include.
    #[serde(default = "default_prepend_before")]
    pub prepend_before: usize,

    /// Maximum number of messages in a window.
    #[serde(default = "default_max_messages")]
    pub max_messages: usize,

    /// Maximum total characters of message text in a window.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Messages requested per history page during the forward scan.
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            max_gap_secs: default_max_gap_secs(),
            max_duration_secs: default_max_duration_secs(),
            max_interposts: default_max_interposts(),
            include_interposts: default_include_interposts(),
            prepend_before: default_prepend_before(),
            max_messages: default_max_messages(),
            max_chars: default_max_chars(),
            page_size: default_page_size(),
        }
    }
}

fn default_max_gap_secs() -> u64 {
    300
}

fn default_max_duration_secs() -> u64 {
    1800
}

fn default_max_interposts() -> u32 {
    3
}

fn default_include_interposts() -> bool {
    true
}

fn default_prepend_before() -> usize {
    5
}

fn default_max_messages() -> usize {
    40
}

fn default_max_chars() -> usize {
    12_000
}

fn default_page_size() -> usize {
    50
}

/// Reply chunking configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChunkingConfig {
    /// Maximum characters per posted chunk. Discord rejects messages above 2000.
    #[serde(default = "default_max_chunk_chars")]
    pub max_chunk_chars: usize,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            max_chunk_chars: default_max_chunk_chars(),
        }
    }
}

fn default_max_chunk_chars() -> usize {
    1900
}

/// Reference card index configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HintsConfig {
    /// Path or http(s) URL of a JSON-lines card file. `None` disables hints.
    #[serde(default)]
    pub source: Option<String>,

    /// Number of cards attached to each prompt.
    #[serde(default = "default_top_k")]
    pub top_k: usize,

    /// Card kinds that receive a ranking bonus.
    #[serde(default = "default_privileged_kinds")]
    pub privileged_kinds: Vec<String>,
}

impl Default for HintsConfig {
    fn default() -> Self {
        Self {
            source: None,
            top_k: default_top_k(),
            privileged_kinds: default_privileged_kinds(),
        }
    }
}

fn default_top_k() -> usize {
    5
}

fn default_privileged_kinds() -> Vec<String> {
    vec!["method".to_string(), "property".to_string()]
}

/// Discord bot integration configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DiscordConfig {
    /// Discord bot token. `None` prevents `serve` from starting.
    #[serde(default)]
    pub bot_token: Option<String>,

    /// User ids allowed to request drafts. Empty allows everyone.
    #[serde(default)]
    pub allowed_users: Vec<u64>,

    /// Register commands in this guild only (instant update) instead of globally.
    #[serde(default)]
    pub guild_id: Option<u64>,
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` falls back to `ANTHROPIC_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for drafting.
    #[serde(default = "default_model")]
    pub model: String,

    /// Maximum tokens to generate per draft.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    2048
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

/// Pending draft table configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DraftsConfig {
    /// Maximum number of drafts awaiting approval; the oldest is evicted beyond it.
    #[serde(default = "default_drafts_capacity")]
    pub capacity: usize,
}

impl Default for DraftsConfig {
    fn default() -> Self {
        Self {
            capacity: default_drafts_capacity(),
        }
    }
}

fn default_drafts_capacity() -> usize {
    256
}
