// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway event handling: command registration, commands and buttons.

use std::num::NonZeroU64;
use std::sync::Arc;

use async_trait::async_trait;
use scribe_agent::DraftAgent;
use scribe_core::types::{ApprovalToken, ChannelId, MessageId, UserId};
use serenity::all::{
    ButtonStyle, Command, CommandInteraction, CommandOptionType, CommandType,
    ComponentInteraction, Context, CreateActionRow, CreateButton, CreateCommand,
    CreateCommandOption, CreateInteractionResponse, CreateInteractionResponseMessage,
    EditInteractionResponse, EventHandler, GuildId, Interaction, Ready,
};
use tracing::{debug, error, info, warn};

use crate::interaction::{
    ButtonAction, DRAFT_COMMAND, HINTS_COMMAND, QUERY_OPTION, REFUSAL, approve_id, cancel_id,
    draft_preview, hints_reply, is_authorized, parse_custom_id,
};

/// Routes Discord interactions to the [`DraftAgent`].
pub struct Handler {
    agent: Arc<DraftAgent>,
    allowed_users: Vec<u64>,
    guild_id: Option<u64>,
}

impl Handler {
    pub fn new(agent: Arc<DraftAgent>, allowed_users: Vec<u64>, guild_id: Option<u64>) -> Self {
        Self {
            agent,
            allowed_users,
            guild_id,
        }
    }

    async fn on_command(&self, ctx: &Context, command: &CommandInteraction) {
        if !is_authorized(command.user.id.get(), &self.allowed_users) {
            debug!(user = %command.user.id, command = %command.data.name, "refusing unauthorized user");
            respond_ephemeral(ctx, command, REFUSAL).await;
            return;
        }

        match command.data.name.as_str() {
            DRAFT_COMMAND => self.draft_reply(ctx, command).await,
            HINTS_COMMAND => self.search_hints(ctx, command).await,
            other => debug!(command = other, "ignoring unknown command"),
        }
    }

    async fn draft_reply(&self, ctx: &Context, command: &CommandInteraction) {
        let Some(target) = command.data.target_id else {
            respond_ephemeral(ctx, command, "Pick a message to reply to.").await;
            return;
        };

        // Drafting outlives the interaction acknowledgement window.
        if let Err(e) = command.defer_ephemeral(&ctx.http).await {
            warn!(error = %e, "failed to acknowledge draft command");
            return;
        }

        let channel = ChannelId(command.channel_id.get());
        let anchor = MessageId(target.to_message_id().get());
        let requester = UserId(command.user.id.get());

        let edit = match self.agent.draft(channel, anchor, requester).await {
            Ok(draft) => {
                let chunks = self.agent.chunks(&draft.text).len();
                EditInteractionResponse::new()
                    .content(draft_preview(&draft.text, chunks))
                    .components(vec![draft_buttons(&draft.token)])
            }
            Err(e) => {
                error!(channel = %channel, anchor = %anchor, error = %e, "drafting failed");
                EditInteractionResponse::new().content(format!("Could not draft a reply: {e}"))
            }
        };

        if let Err(e) = command.edit_response(&ctx.http, edit).await {
            warn!(error = %e, "failed to show draft preview");
        }
    }

    async fn search_hints(&self, ctx: &Context, command: &CommandInteraction) {
        let query = command
            .data
            .options
            .iter()
            .find(|option| option.name == QUERY_OPTION)
            .and_then(|option| option.value.as_str())
            .unwrap_or_default();

        let cards = self.agent.hints(query);
        debug!(query, matches = cards.len(), "hint search");
        respond_ephemeral(ctx, command, &hints_reply(query, &cards)).await;
    }

    async fn on_component(&self, ctx: &Context, component: &ComponentInteraction) {
        let Some(action) = parse_custom_id(&component.data.custom_id) else {
            debug!(custom_id = %component.data.custom_id, "ignoring foreign component");
            return;
        };

        if let Err(e) = component.defer(&ctx.http).await {
            warn!(error = %e, "failed to acknowledge button");
            return;
        }

        let user = UserId(component.user.id.get());
        let outcome = match action {
            ButtonAction::Approve(token) => match self.agent.approve(&token, user).await {
                Ok(Some(1)) => "Posted.".to_string(),
                Ok(Some(n)) => format!("Posted as {n} messages."),
                Ok(None) => "This draft is no longer pending.".to_string(),
                Err(e) => format!("Posting failed: {e}"),
            },
            ButtonAction::Cancel(token) => {
                if self.agent.cancel(&token, user).await {
                    "Draft discarded.".to_string()
                } else {
                    "This draft is no longer pending.".to_string()
                }
            }
        };

        let edit = EditInteractionResponse::new()
            .content(outcome)
            .components(Vec::new());
        if let Err(e) = component.edit_response(&ctx.http, edit).await {
            warn!(error = %e, "failed to update draft preview");
        }
    }
}

#[async_trait]
impl EventHandler for Handler {
    async fn ready(&self, ctx: Context, ready: Ready) {
        info!(user = %ready.user.name, guilds = ready.guilds.len(), "connected to Discord");

        let result = match self.guild_id.and_then(NonZeroU64::new) {
            Some(guild) => GuildId::from(guild).set_commands(&ctx.http, commands()).await,
            None => Command::set_global_commands(&ctx.http, commands()).await,
        };
        match result {
            Ok(registered) => info!(
                count = registered.len(),
                guild = ?self.guild_id,
                "application commands registered"
            ),
            Err(e) => error!(error = %e, "failed to register application commands"),
        }
    }

    async fn interaction_create(&self, ctx: Context, interaction: Interaction) {
        match interaction {
            Interaction::Command(command) => self.on_command(&ctx, &command).await,
            Interaction::Component(component) => self.on_component(&ctx, &component).await,
            _ => {}
        }
    }
}

/// The context-menu and slash commands Scribe registers.
fn commands() -> Vec<CreateCommand> {
    vec![
        CreateCommand::new(DRAFT_COMMAND).kind(CommandType::Message),
        CreateCommand::new(HINTS_COMMAND)
            .description("Search the reference cards")
            .add_option(
                CreateCommandOption::new(CommandOptionType::String, QUERY_OPTION, "What to look up")
                    .required(true),
            ),
    ]
}

fn draft_buttons(token: &ApprovalToken) -> CreateActionRow {
    CreateActionRow::Buttons(vec![
        CreateButton::new(approve_id(token))
            .label("Approve")
            .style(ButtonStyle::Success),
        CreateButton::new(cancel_id(token))
            .label("Cancel")
            .style(ButtonStyle::Secondary),
    ])
}

async fn respond_ephemeral(ctx: &Context, command: &CommandInteraction, content: &str) {
    let message = CreateInteractionResponseMessage::new()
        .content(content)
        .ephemeral(true);
    if let Err(e) = command
        .create_response(&ctx.http, CreateInteractionResponse::Message(message))
        .await
    {
        warn!(error = %e, "failed to respond to interaction");
    }
}
