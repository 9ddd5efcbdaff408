// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Paged message retrieval from a chat platform.

use async_trait::async_trait;

use crate::error::ScribeError;
use crate::types::{ChannelId, Direction, Message, MessageId};

/// Read access to a channel's message history.
///
/// Batches are returned oldest-first. An empty batch signals the end of the
/// available history in that direction.
#[async_trait]
pub trait MessageHistory: Send + Sync {
    /// Fetches up to `limit` messages strictly before or after `anchor`.
    async fn fetch(
        &self,
        channel: ChannelId,
        anchor: MessageId,
        direction: Direction,
        limit: usize,
    ) -> Result<Vec<Message>, ScribeError>;

    /// Fetches a single message by id.
    async fn get(&self, channel: ChannelId, id: MessageId) -> Result<Message, ScribeError>;
}
