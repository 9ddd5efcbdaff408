// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Scribe assistant.
//!
//! This crate provides the data model, error type, and the capability traits
//! through which the drafting workflows talk to the chat platform and the
//! language model.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::ScribeError;
pub use types::{
    AdapterType, ApprovalToken, Attachment, Author, ChannelId, Direction, HealthStatus, Message,
    MessageId, PendingDraft, UserId,
};

pub use traits::{DraftStore, MessageHistory, PluginAdapter, ProviderAdapter, ReplySink};

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn message(content: &str) -> Message {
        Message {
            id: MessageId(1),
            channel_id: ChannelId(10),
            author: Author {
                id: UserId(7),
                name: "ada".into(),
                bot: false,
            },
            timestamp: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
            content: content.into(),
            attachments: vec![],
        }
    }

    #[test]
    fn scribe_error_variants_render() {
        let config = ScribeError::Config("missing token".into());
        assert_eq!(config.to_string(), "configuration error: missing token");

        let channel = ScribeError::channel("gateway closed");
        assert_eq!(channel.to_string(), "channel error: gateway closed");

        let provider = ScribeError::provider("empty completion");
        assert_eq!(provider.to_string(), "provider error: empty completion");

        let timeout = ScribeError::Timeout {
            duration: std::time::Duration::from_secs(30),
        };
        assert!(timeout.to_string().contains("30s"));
    }

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;

        for variant in [AdapterType::Channel, AdapterType::Provider] {
            let s = variant.to_string();
            let parsed = AdapterType::from_str(&s).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn char_len_counts_scalar_values_not_bytes() {
        assert_eq!(message("").char_len(), 0);
        assert_eq!(message("héllo").char_len(), 5);
        assert_eq!(message("日本語").char_len(), 3);
    }

    #[test]
    fn message_ids_order_by_arrival() {
        let mut ids = vec![MessageId(30), MessageId(10), MessageId(20)];
        ids.sort();
        assert_eq!(ids, vec![MessageId(10), MessageId(20), MessageId(30)]);
    }

    #[test]
    fn order_key_breaks_timestamp_ties_by_id() {
        let a = message("a");
        let mut b = message("b");
        b.id = MessageId(2);
        assert!(a.order_key() < b.order_key());
    }

    #[test]
    fn approval_tokens_are_unique() {
        let a = ApprovalToken::generate();
        let b = ApprovalToken::generate();
        assert_ne!(a, b);
        assert_eq!(a.as_str().len(), 32);
    }

    #[test]
    fn direction_displays_lowercase() {
        assert_eq!(Direction::Before.to_string(), "before");
        assert_eq!(Direction::After.to_string(), "after");
    }

    #[test]
    fn all_trait_modules_are_exported() {
        fn _assert_provider<T: ProviderAdapter>() {}
        fn _assert_history<T: MessageHistory>() {}
        fn _assert_reply<T: ReplySink>() {}
        fn _assert_store<T: DraftStore>() {}
    }
}
