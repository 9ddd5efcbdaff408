// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Paged channel history over the Discord REST API.

use std::sync::Arc;

use async_trait::async_trait;
use scribe_core::ScribeError;
use scribe_core::traits::MessageHistory;
use scribe_core::types::{ChannelId, Direction, Message, MessageId};
use serenity::all::{GetMessages, Http};
use tracing::debug;

use crate::convert::{oldest_first, to_channel_id, to_core_message, to_message_id};

/// Largest page the Discord API serves in one request.
pub const MAX_PAGE: usize = 100;

/// [`MessageHistory`] backed by `GET /channels/{id}/messages`.
pub struct DiscordHistory {
    http: Arc<Http>,
}

impl DiscordHistory {
    pub fn new(http: Arc<Http>) -> Self {
        Self { http }
    }
}

/// Clamps a requested page size into what one request can return.
pub fn page_limit(limit: usize) -> u8 {
    // MAX_PAGE fits in a u8.
    limit.clamp(1, MAX_PAGE) as u8
}

#[async_trait]
impl MessageHistory for DiscordHistory {
    async fn fetch(
        &self,
        channel: ChannelId,
        anchor: MessageId,
        direction: Direction,
        limit: usize,
    ) -> Result<Vec<Message>, ScribeError> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let channel_id = to_channel_id(channel)?;
        let anchor_id = to_message_id(anchor)?;
        let builder = match direction {
            Direction::Before => GetMessages::new().before(anchor_id),
            Direction::After => GetMessages::new().after(anchor_id),
        }
        .limit(page_limit(limit));

        let page = channel_id
            .messages(&self.http, builder)
            .await
            .map_err(|e| ScribeError::Channel {
                message: format!("failed to fetch history for channel {channel}: {e}"),
                source: Some(Box::new(e)),
            })?;

        debug!(
            channel = %channel,
            anchor = %anchor,
            direction = %direction,
            fetched = page.len(),
            "history page fetched"
        );
        Ok(oldest_first(page.iter().map(to_core_message).collect()))
    }

    async fn get(&self, channel: ChannelId, id: MessageId) -> Result<Message, ScribeError> {
        let message = to_channel_id(channel)?
            .message(&self.http, to_message_id(id)?)
            .await
            .map_err(|e| ScribeError::Channel {
                message: format!("failed to fetch message {id} in channel {channel}: {e}"),
                source: Some(Box::new(e)),
            })?;
        Ok(to_core_message(&message))
    }
}
