// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! In-memory paged message history for deterministic testing.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use tokio::sync::Mutex;

use scribe_core::ScribeError;
use scribe_core::traits::MessageHistory;
use scribe_core::types::{Author, ChannelId, Direction, Message, MessageId, UserId};

/// Channel used by [`message_at`].
pub const TEST_CHANNEL: ChannelId = ChannelId(1);

/// Epoch second that `message_at` offsets are measured from.
const BASE_EPOCH: i64 = 1_700_000_000;

/// Builds a message in [`TEST_CHANNEL`] posted `secs` after a fixed base time.
pub fn message_at(id: u64, author: u64, secs: i64, content: &str) -> Message {
    Message {
        id: MessageId(id),
        channel_id: TEST_CHANNEL,
        author: Author {
            id: UserId(author),
            name: format!("user{author}"),
            bot: false,
        },
        timestamp: Utc
            .timestamp_opt(BASE_EPOCH + secs, 0)
            .single()
            .unwrap_or_else(Utc::now),
        content: content.to_string(),
        attachments: Vec::new(),
    }
}

/// A channel history held in memory.
///
/// Pages follow the platform contract: messages strictly before or after the
/// anchor id, oldest-first, at most `limit` of them. Fetches can be made to
/// fail after a number of successful calls.
pub struct MockHistory {
    messages: Arc<Mutex<Vec<Message>>>,
    fetch_calls: AtomicUsize,
    fail_after: AtomicUsize,
}

impl MockHistory {
    /// Create a history holding `messages` (any order).
    pub fn new(mut messages: Vec<Message>) -> Self {
        messages.sort_by_key(|m| m.id);
        Self {
            messages: Arc::new(Mutex::new(messages)),
            fetch_calls: AtomicUsize::new(0),
            fail_after: AtomicUsize::new(usize::MAX),
        }
    }

    /// Append a message to the history.
    pub async fn push(&self, message: Message) {
        let mut messages = self.messages.lock().await;
        messages.push(message);
        messages.sort_by_key(|m| m.id);
    }

    /// Make every `fetch` after the first `calls` successful ones fail.
    pub fn fail_after(&self, calls: usize) {
        self.fail_after.store(calls, Ordering::SeqCst);
    }

    /// Number of `fetch` calls made so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }
}

impl Default for MockHistory {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

#[async_trait]
impl MessageHistory for MockHistory {
    async fn fetch(
        &self,
        channel: ChannelId,
        anchor: MessageId,
        direction: Direction,
        limit: usize,
    ) -> Result<Vec<Message>, ScribeError> {
        let call = self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        if call >= self.fail_after.load(Ordering::SeqCst) {
            return Err(ScribeError::channel("mock history unavailable"));
        }

        let messages = self.messages.lock().await;
        let in_channel = messages.iter().filter(|m| m.channel_id == channel);
        let page = match direction {
            Direction::Before => {
                let before: Vec<Message> =
                    in_channel.filter(|m| m.id < anchor).cloned().collect();
                let skip = before.len().saturating_sub(limit);
                before.into_iter().skip(skip).collect()
            }
            Direction::After => in_channel
                .filter(|m| m.id > anchor)
                .take(limit)
                .cloned()
                .collect(),
        };
        Ok(page)
    }

    async fn get(&self, channel: ChannelId, id: MessageId) -> Result<Message, ScribeError> {
        self.messages
            .lock()
            .await
            .iter()
            .find(|m| m.channel_id == channel && m.id == id)
            .cloned()
            .ok_or_else(|| ScribeError::channel(format!("unknown message {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history() -> MockHistory {
        MockHistory::new((1..=6).map(|i| message_at(i, 7, i as i64, "m")).collect())
    }

    #[tokio::test]
    async fn before_returns_nearest_page_oldest_first() {
        let page = history()
            .fetch(TEST_CHANNEL, MessageId(5), Direction::Before, 2)
            .await
            .unwrap();
        let ids: Vec<u64> = page.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[tokio::test]
    async fn after_returns_next_page() {
        let page = history()
            .fetch(TEST_CHANNEL, MessageId(2), Direction::After, 3)
            .await
            .unwrap();
        let ids: Vec<u64> = page.iter().map(|m| m.id.0).collect();
        assert_eq!(ids, vec![3, 4, 5]);
    }

    #[tokio::test]
    async fn fails_after_configured_calls() {
        let history = history();
        history.fail_after(1);
        assert!(
            history
                .fetch(TEST_CHANNEL, MessageId(1), Direction::After, 1)
                .await
                .is_ok()
        );
        assert!(
            history
                .fetch(TEST_CHANNEL, MessageId(1), Direction::After, 1)
                .await
                .is_err()
        );
        assert_eq!(history.fetch_calls(), 2);
    }

    #[tokio::test]
    async fn get_finds_message_by_id() {
        let history = history();
        assert_eq!(history.get(TEST_CHANNEL, MessageId(4)).await.unwrap().id, MessageId(4));
        assert!(history.get(TEST_CHANNEL, MessageId(99)).await.is_err());
    }
}
