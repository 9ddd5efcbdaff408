// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reply sink that captures posted replies for assertion in tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use scribe_core::ScribeError;
use scribe_core::traits::ReplySink;
use scribe_core::types::{ChannelId, MessageId};

/// A reply captured by [`MockReplySink`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentReply {
    pub channel: ChannelId,
    pub anchor: MessageId,
    pub text: String,
}

/// Records every reply instead of posting it.
///
/// Returned message ids count up from 1_000_000.
pub struct MockReplySink {
    sent: Arc<Mutex<Vec<SentReply>>>,
    next_id: AtomicU64,
    fail: Arc<Mutex<bool>>,
}

impl MockReplySink {
    pub fn new() -> Self {
        Self {
            sent: Arc::new(Mutex::new(Vec::new())),
            next_id: AtomicU64::new(1_000_000),
            fail: Arc::new(Mutex::new(false)),
        }
    }

    /// Make subsequent replies fail.
    pub async fn set_failing(&self, fail: bool) {
        *self.fail.lock().await = fail;
    }

    /// All replies sent so far, in order.
    pub async fn sent(&self) -> Vec<SentReply> {
        self.sent.lock().await.clone()
    }

    /// Texts of all replies sent so far, in order.
    pub async fn sent_texts(&self) -> Vec<String> {
        self.sent.lock().await.iter().map(|r| r.text.clone()).collect()
    }
}

impl Default for MockReplySink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ReplySink for MockReplySink {
    async fn reply(
        &self,
        channel: ChannelId,
        anchor: MessageId,
        text: &str,
    ) -> Result<MessageId, ScribeError> {
        if *self.fail.lock().await {
            return Err(ScribeError::channel("mock reply sink rejected the message"));
        }
        self.sent.lock().await.push(SentReply {
            channel,
            anchor,
            text: text.to_string(),
        });
        Ok(MessageId(self.next_id.fetch_add(1, Ordering::SeqCst)))
    }
}
