// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversion between serenity models and the Scribe data model.

use std::num::NonZeroU64;

use chrono::{DateTime, Utc};
use scribe_core::ScribeError;
use scribe_core::types::{Attachment, Author, ChannelId, Message, MessageId, UserId};
use serenity::all as discord;

/// Maps a core channel id onto a serenity one. Discord ids are never zero.
pub fn to_channel_id(id: ChannelId) -> Result<discord::ChannelId, ScribeError> {
    NonZeroU64::new(id.0)
        .map(discord::ChannelId::from)
        .ok_or_else(|| ScribeError::channel("channel id 0 is not a Discord snowflake"))
}

/// Maps a core message id onto a serenity one.
pub fn to_message_id(id: MessageId) -> Result<discord::MessageId, ScribeError> {
    NonZeroU64::new(id.0)
        .map(discord::MessageId::from)
        .ok_or_else(|| ScribeError::channel("message id 0 is not a Discord snowflake"))
}

/// Converts a Unix timestamp in seconds, clamping out-of-range values to the epoch.
pub fn to_utc(unix_secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(unix_secs, 0).unwrap_or_default()
}

/// Converts a serenity message into a core [`Message`].
///
/// The author is named by their global display name when they have one.
pub fn to_core_message(msg: &discord::Message) -> Message {
    Message {
        id: MessageId(msg.id.get()),
        channel_id: ChannelId(msg.channel_id.get()),
        author: Author {
            id: UserId(msg.author.id.get()),
            name: msg
                .author
                .global_name
                .clone()
                .unwrap_or_else(|| msg.author.name.clone()),
            bot: msg.author.bot,
        },
        timestamp: to_utc(msg.timestamp.unix_timestamp()),
        content: msg.content.clone(),
        attachments: msg
            .attachments
            .iter()
            .map(|a| Attachment {
                filename: a.filename.clone(),
                content_type: a.content_type.clone(),
                size: u64::from(a.size),
                url: a.url.clone(),
            })
            .collect(),
    }
}

/// Orders a fetched batch oldest-first.
///
/// Discord returns pages newest-first; snowflakes sort by creation time.
pub fn oldest_first(mut batch: Vec<Message>) -> Vec<Message> {
    batch.sort_by_key(Message::order_key);
    batch
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: u64, secs: i64) -> Message {
        Message {
            id: MessageId(id),
            channel_id: ChannelId(1),
            author: Author {
                id: UserId(2),
                name: "ada".into(),
                bot: false,
            },
            timestamp: to_utc(1_700_000_000 + secs),
            content: format!("m{id}"),
            attachments: vec![],
        }
    }

    #[test]
    fn zero_ids_are_rejected() {
        assert!(to_channel_id(ChannelId(0)).is_err());
        assert!(to_message_id(MessageId(0)).is_err());
        assert_eq!(to_channel_id(ChannelId(42)).unwrap().get(), 42);
        assert_eq!(to_message_id(MessageId(7)).unwrap().get(), 7);
    }

    #[test]
    fn timestamps_convert_from_unix_seconds() {
        assert_eq!(to_utc(1_700_000_000).to_rfc3339(), "2023-11-14T22:13:20+00:00");
        assert_eq!(to_utc(i64::MAX), DateTime::<Utc>::default());
    }

    #[test]
    fn newest_first_page_is_reversed() {
        let page = vec![message(30, 20), message(20, 10), message(10, 0)];
        let ids: Vec<u64> = oldest_first(page).iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }
}
