// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation window builder.
//!
//! Grows a chronological slice of a channel around an anchor message. A few
//! messages before the anchor are prepended, then the history after it is
//! scanned page by page until one of the stop rules trips. Stop rules are
//! checked per candidate in a fixed order: duration, gap, interposts
//! disabled, interpost overflow, character budget, message cap.
//!
//! The builder never fails. Retrieval errors end the scan and the window
//! collected so far (at least the anchor) is returned.

use chrono::{DateTime, TimeDelta, Utc};
use scribe_config::model::WindowConfig;
use scribe_core::traits::MessageHistory;
use scribe_core::types::{Direction, Message, MessageId, UserId};
use strum::Display;
use tracing::{debug, warn};

/// Why the forward scan ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum StopReason {
    /// Candidate is further from the anchor than the duration cap.
    Duration,
    /// Same-author silence exceeded the gap cap.
    Gap,
    /// Another author posted and interposts are disabled.
    InterpostsDisabled,
    /// Too many consecutive messages from other authors.
    InterpostOverflow,
    /// Character budget reached, or the candidate would exceed it.
    CharBudget,
    /// Message cap reached.
    MessageCap,
    /// History ran out or could not be fetched.
    Exhausted,
}

/// Ordered messages around an anchor.
///
/// Non-empty, contains the anchor, never longer than the message cap. The
/// character total stays within budget except when the anchor alone is
/// larger than it.
#[derive(Debug, Clone)]
pub struct ConversationWindow {
    messages: Vec<Message>,
    anchor_id: MessageId,
    stop: StopReason,
}

impl ConversationWindow {
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn anchor_id(&self) -> MessageId {
        self.anchor_id
    }

    /// The anchor message. Always present.
    pub fn anchor(&self) -> Option<&Message> {
        self.messages.iter().find(|m| m.id == self.anchor_id)
    }

    pub fn stop_reason(&self) -> StopReason {
        self.stop
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Sum of the messages' character counts.
    pub fn total_chars(&self) -> usize {
        self.messages.iter().map(Message::char_len).sum()
    }

    pub fn into_messages(self) -> Vec<Message> {
        self.messages
    }
}

/// Greedy window builder over a paged [`MessageHistory`].
#[derive(Debug, Clone)]
pub struct WindowBuilder {
    config: WindowConfig,
}

/// Mutable state of one forward scan.
struct Scan {
    messages: Vec<Message>,
    chars: usize,
    burst_author: UserId,
    last_same_author: DateTime<Utc>,
    interposts: u32,
}

impl WindowBuilder {
    pub fn new(config: WindowConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &WindowConfig {
        &self.config
    }

    /// Builds the window around `anchor`.
    pub async fn build(&self, history: &dyn MessageHistory, anchor: &Message) -> ConversationWindow {
        let mut scan = Scan {
            messages: self.prepend(history, anchor).await,
            chars: 0,
            burst_author: anchor.author.id,
            last_same_author: anchor.timestamp,
            interposts: 0,
        };
        scan.messages.push(anchor.clone());
        scan.chars = scan.messages.iter().map(Message::char_len).sum();

        let stop = self.scan_forward(history, anchor, &mut scan).await;
        debug!(
            anchor = %anchor.id,
            messages = scan.messages.len(),
            chars = scan.chars,
            stop = %stop,
            "conversation window built"
        );

        ConversationWindow {
            messages: scan.messages,
            anchor_id: anchor.id,
            stop,
        }
    }

    /// Messages immediately preceding the anchor, chronological.
    ///
    /// Admitted nearest-first while the message and character budgets leave
    /// room beside the anchor, so the result is always contiguous with it.
    async fn prepend(&self, history: &dyn MessageHistory, anchor: &Message) -> Vec<Message> {
        let wanted = self.config.prepend_before;
        if wanted == 0 {
            return Vec::new();
        }

        let mut page = match history
            .fetch(anchor.channel_id, anchor.id, Direction::Before, wanted)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                warn!(anchor = %anchor.id, error = %e, "failed to fetch messages before anchor");
                return Vec::new();
            }
        };
        page.retain(|m| m.order_key() < anchor.order_key());
        page.sort_by_key(Message::order_key);

        let room = self.config.max_messages.saturating_sub(1).min(wanted);
        let mut budget = self.config.max_chars.saturating_sub(anchor.char_len());
        let mut admitted = Vec::with_capacity(room);
        for message in page.into_iter().rev() {
            if admitted.len() >= room || message.char_len() > budget {
                break;
            }
            budget -= message.char_len();
            admitted.push(message);
        }
        admitted.reverse();
        admitted
    }

    async fn scan_forward(
        &self,
        history: &dyn MessageHistory,
        anchor: &Message,
        scan: &mut Scan,
    ) -> StopReason {
        if scan.messages.len() >= self.config.max_messages {
            return StopReason::MessageCap;
        }
        if scan.chars >= self.config.max_chars {
            return StopReason::CharBudget;
        }

        let page_size = self.config.page_size.max(1);
        let mut cursor = anchor.clone();

        loop {
            let mut page = match history
                .fetch(anchor.channel_id, cursor.id, Direction::After, page_size)
                .await
            {
                Ok(page) => page,
                Err(e) => {
                    warn!(
                        anchor = %anchor.id,
                        cursor = %cursor.id,
                        error = %e,
                        "failed to fetch messages after anchor"
                    );
                    return StopReason::Exhausted;
                }
            };

            page.sort_by_key(Message::order_key);
            page.retain(|m| m.order_key() > cursor.order_key());
            let Some(last) = page.last().cloned() else {
                return StopReason::Exhausted;
            };

            for candidate in page {
                if let Some(stop) = self.admit(anchor, scan, candidate) {
                    return stop;
                }
            }
            cursor = last;
        }
    }

    /// Applies the stop rules to one candidate, including it when none trip.
    fn admit(&self, anchor: &Message, scan: &mut Scan, candidate: Message) -> Option<StopReason> {
        let cfg = &self.config;

        if candidate.timestamp - anchor.timestamp > seconds(cfg.max_duration_secs) {
            return Some(StopReason::Duration);
        }

        let same_author = candidate.author.id == scan.burst_author;
        if same_author {
            if candidate.timestamp - scan.last_same_author > seconds(cfg.max_gap_secs) {
                return Some(StopReason::Gap);
            }
        } else {
            if !cfg.include_interposts {
                return Some(StopReason::InterpostsDisabled);
            }
            if scan.interposts + 1 > cfg.max_interposts {
                return Some(StopReason::InterpostOverflow);
            }
        }

        let len = candidate.char_len();
        if scan.chars + len > cfg.max_chars {
            return Some(StopReason::CharBudget);
        }

        // Interposts do not refresh the same-author gap clock.
        if same_author {
            scan.interposts = 0;
            scan.last_same_author = candidate.timestamp;
        } else {
            scan.interposts += 1;
        }
        scan.chars += len;
        scan.messages.push(candidate);

        if scan.chars >= cfg.max_chars {
            return Some(StopReason::CharBudget);
        }
        if scan.messages.len() >= cfg.max_messages {
            return Some(StopReason::MessageCap);
        }
        None
    }
}

fn seconds(secs: u64) -> TimeDelta {
    i64::try_from(secs)
        .ok()
        .and_then(TimeDelta::try_seconds)
        .unwrap_or(TimeDelta::MAX)
}
