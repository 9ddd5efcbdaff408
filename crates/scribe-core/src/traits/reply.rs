// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Outbound reply delivery.

use async_trait::async_trait;

use crate::error::ScribeError;
use crate::types::{ChannelId, MessageId};

/// Posts text into a channel as a reply to an existing message.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// Posts `text` as a reply referencing `anchor` and returns the new message id.
    async fn reply(
        &self,
        channel: ChannelId,
        anchor: MessageId,
        text: &str,
    ) -> Result<MessageId, ScribeError>;
}
