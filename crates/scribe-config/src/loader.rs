// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./scribe.toml` > `~/.config/scribe/scribe.toml` > `/etc/scribe/scribe.toml`
//! with environment variable overrides via `SCRIBE_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::ScribeConfig;

/// Sections that `SCRIBE_<SECTION>_<KEY>` variables are mapped into.
const ENV_SECTIONS: &[&str] = &[
    "agent",
    "window",
    "chunking",
    "hints",
    "discord",
    "anthropic",
    "drafts",
];

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/scribe/scribe.toml` (system-wide)
/// 3. `~/.config/scribe/scribe.toml` (user XDG config)
/// 4. `./scribe.toml` (local directory)
/// 5. `SCRIBE_*` environment variables
pub fn load_config() -> Result<ScribeConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit configuration.
pub fn load_config_from_str(toml_content: &str) -> Result<ScribeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ScribeConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<ScribeConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(ScribeConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Build the Figment used internally for config loading (exposed for diagnostic use).
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(ScribeConfig::default()))
        .merge(Toml::file("/etc/scribe/scribe.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("scribe/scribe.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("scribe.toml"))
        .merge(env_provider())
}

/// Create the environment variable provider.
///
/// Uses `Env::map()` rather than `Env::split("_")` because key names contain
/// underscores: `SCRIBE_WINDOW_MAX_GAP_SECS` must map to `window.max_gap_secs`.
pub(crate) fn env_provider() -> Env {
    Env::prefixed("SCRIBE_").map(|key| map_env_key(key.as_str()).into())
}

/// Maps a lowercased, prefix-stripped env var name to a dotted config path.
pub(crate) fn map_env_key(key: &str) -> String {
    for section in ENV_SECTIONS {
        if let Some(rest) = key
            .strip_prefix(section)
            .and_then(|rest| rest.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    key.to_string()
}
