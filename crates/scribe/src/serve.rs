// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `scribe serve` command implementation.
//!
//! Loads the reference cards, builds the Anthropic provider and the Discord
//! adapter, wires them into a [`DraftAgent`] and serves interactions until a
//! shutdown signal arrives.

use std::sync::Arc;

use scribe_agent::{DraftAgent, InMemoryDraftStore};
use scribe_anthropic::AnthropicProvider;
use scribe_config::ScribeConfig;
use scribe_context::ContextAssembler;
use scribe_core::traits::PluginAdapter;
use scribe_core::types::HealthStatus;
use scribe_core::ScribeError;
use scribe_discord::DiscordChannel;
use scribe_hints::load_index;
use tracing::{info, warn};

use crate::shutdown;

/// Runs the `scribe serve` command.
pub async fn run_serve(config: ScribeConfig) -> Result<(), ScribeError> {
    init_tracing(&config.agent.log_level);
    info!(name = %config.agent.name, "starting scribe serve");

    scribe_agent::recording::register_metrics();

    let index = load_index(
        config.hints.source.as_deref(),
        config.hints.privileged_kinds.clone(),
    )
    .await;
    if index.is_loaded() {
        info!(cards = index.len(), "reference cards loaded");
    } else {
        warn!("no reference cards loaded, drafts will carry no hints");
    }

    let assembler = Arc::new(ContextAssembler::new(&config, Arc::new(index)).await);
    let provider = Arc::new(AnthropicProvider::new(&config.anthropic)?);
    let discord = DiscordChannel::new(config.discord.clone())?;

    match discord.health_check().await? {
        HealthStatus::Healthy => info!("Discord API reachable"),
        HealthStatus::Degraded(reason) | HealthStatus::Unhealthy(reason) => {
            warn!(reason = %reason, "Discord health check failed, connecting anyway");
        }
    }

    let agent = Arc::new(DraftAgent::new(
        assembler,
        discord.history(),
        provider.clone(),
        discord.replies(),
        Arc::new(InMemoryDraftStore::new(config.drafts.capacity)),
        config.chunking.max_chunk_chars,
    ));

    let cancel = shutdown::install_signal_handler();
    let result = discord.run(agent, cancel).await;

    provider.shutdown().await?;
    discord.shutdown().await?;
    info!("scribe stopped");
    result
}

fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("scribe={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
