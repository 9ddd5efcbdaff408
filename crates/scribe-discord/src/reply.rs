// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Posting approved chunks as Discord replies.

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::ScribeError;
use scribe_core::traits::ReplySink;
use scribe_core::types::{ChannelId, MessageId};
use serenity::all::{CreateAllowedMentions, CreateMessage, Http};
use tracing::debug;

use crate::convert::{to_channel_id, to_message_id};

/// [`ReplySink`] that answers with a message reference to the anchor.
///
/// The replied-to author is not pinged.
pub struct DiscordReplySink {
    http: Arc<Http>,
}

impl DiscordReplySink {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

#[async_trait]
impl ReplySink for DiscordReplySink {
    async fn reply(
        &self,
        channel: ChannelId,
        anchor: MessageId,
        text: &str,
    ) -> Result<MessageId, ScribeError> {
        let channel_id = to_channel_id(channel)?;
        let builder = CreateMessage::new()
            .content(text)
            .reference_message((channel_id, to_message_id(anchor)?))
            .allowed_mentions(CreateAllowedMentions::new().replied_user(false));

        let sent = channel_id
            .send_message(&self.http, builder)
            .await
            .map_err(|e| ScribeError::Channel {
                message: format!("failed to post reply in channel {channel}: {e}"),
                source: Some(Box::new(e)),
            })?;

        debug!(channel = %channel, anchor = %anchor, id = %sent.id, "reply posted");
        Ok(MessageId(sent.id.get()))
    }
}
