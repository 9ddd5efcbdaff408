// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Discord channel adapter for Scribe.
//!
//! Provides paged history and reply posting over the REST API, and a gateway
//! client that serves the "Draft reply" context-menu command, the `/hints`
//! slash command and the Approve / Cancel buttons of draft previews.

pub mod convert;
pub mod handler;
pub mod history;
pub mod interaction;
pub mod reply;

use std::sync::Arc;

use async_trait::async_trait;
use scribe_agent::DraftAgent;
use scribe_config::model::DiscordConfig;
use scribe_core::ScribeError;
use scribe_core::traits::PluginAdapter;
use scribe_core::types::{AdapterType, HealthStatus};
use serenity::Client;
use serenity::all::{GatewayIntents, Http};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

pub use handler::Handler;
pub use history::DiscordHistory;
pub use reply::DiscordReplySink;

/// Discord adapter holding the bot token and a shared REST client.
pub struct DiscordChannel {
    token: String,
    config: DiscordConfig,
    http: Arc<Http>,
}

impl DiscordChannel {
    /// Creates a new Discord adapter.
    ///
    /// Requires `config.bot_token` to be set.
    pub fn new(config: DiscordConfig) -> Result<Self, ScribeError> {
        let token = config
            .bot_token
            .as_deref()
            .map(str::trim)
            .ok_or_else(|| ScribeError::Config("discord.bot_token is required to serve".into()))?;

        if token.is_empty() {
            return Err(ScribeError::Config(
                "discord.bot_token cannot be empty".into(),
            ));
        }

        let token = token.to_string();
        let http = Arc::new(Http::new(&token));
        Ok(Self {
            token,
            config,
            http,
        })
    }

    /// History reader sharing this adapter's REST client.
    pub fn history(&self) -> Arc<DiscordHistory> {
        Arc::new(DiscordHistory::new(Arc::clone(&self.http)))
    }

    /// Reply sink sharing this adapter's REST client.
    pub fn replies(&self) -> Arc<DiscordReplySink> {
        Arc::new(DiscordReplySink::new(Arc::clone(&self.http)))
    }

    /// Connects to the gateway and serves interactions until `cancel` fires
    /// or the connection fails.
    pub async fn run(
        &self,
        agent: Arc<DraftAgent>,
        cancel: CancellationToken,
    ) -> Result<(), ScribeError> {
        // Message content is needed to read history bodies over REST.
        let intents = GatewayIntents::GUILDS
            | GatewayIntents::GUILD_MESSAGES
            | GatewayIntents::MESSAGE_CONTENT;

        let handler = Handler::new(
            agent,
            self.config.allowed_users.clone(),
            self.config.guild_id,
        );
        let mut client = Client::builder(&self.token, intents)
            .event_handler(handler)
            .await
            .map_err(|e| ScribeError::Channel {
                message: format!("failed to build Discord client: {e}"),
                source: Some(Box::new(e)),
            })?;

        let shard_manager = Arc::clone(&client.shard_manager);
        let watcher = tokio::spawn(async move {
            cancel.cancelled().await;
            info!("stopping Discord shards");
            shard_manager.shutdown_all().await;
        });

        info!(
            guild = ?self.config.guild_id,
            allowed_users = self.config.allowed_users.len(),
            "starting Discord gateway"
        );
        let result = client.start().await.map_err(|e| ScribeError::Channel {
            message: format!("Discord gateway failed: {e}"),
            source: Some(Box::new(e)),
        });
        watcher.abort();
        result
    }
}

#[async_trait]
impl PluginAdapter for DiscordChannel {
    fn name(&self) -> &str {
        "discord"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Channel
    }

    async fn health_check(&self) -> Result<HealthStatus, ScribeError> {
        match self.http.get_current_user().await {
            Ok(_) => Ok(HealthStatus::Healthy),
            Err(e) => Ok(HealthStatus::Unhealthy(format!(
                "Discord API unreachable: {e}"
            ))),
        }
    }

    async fn shutdown(&self) -> Result<(), ScribeError> {
        debug!("Discord channel shutting down");
        Ok(())
    }
}
