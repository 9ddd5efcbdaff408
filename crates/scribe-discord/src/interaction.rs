// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Command names, button ids, authorization and display text.
//!
//! Everything here is free of network calls so the event handler stays thin.

use std::fmt::Write;

use scribe_config::validation::DISCORD_MESSAGE_LIMIT;
use scribe_core::types::ApprovalToken;
use scribe_hints::Card;

/// Name of the message context-menu command.
pub const DRAFT_COMMAND: &str = "Draft reply";
/// Name of the slash command that searches reference cards.
pub const HINTS_COMMAND: &str = "hints";
/// Option name carrying the `/hints` query text.
pub const QUERY_OPTION: &str = "query";

const APPROVE_PREFIX: &str = "scribe:approve:";
const CANCEL_PREFIX: &str = "scribe:cancel:";

/// Shown to users outside `discord.allowed_users`.
pub const REFUSAL: &str = "You are not allowed to use Scribe here.";

const ELLIPSIS: char = '…';

/// What a draft preview button asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ButtonAction {
    Approve(ApprovalToken),
    Cancel(ApprovalToken),
}

/// Custom id of the Approve button for `token`.
pub fn approve_id(token: &ApprovalToken) -> String {
    format!("{APPROVE_PREFIX}{token}")
}

/// Custom id of the Cancel button for `token`.
pub fn cancel_id(token: &ApprovalToken) -> String {
    format!("{CANCEL_PREFIX}{token}")
}

/// Parses a button custom id. Ids from other components return `None`.
pub fn parse_custom_id(custom_id: &str) -> Option<ButtonAction> {
    let token = |rest: &str| (!rest.is_empty()).then(|| ApprovalToken(rest.to_string()));

    if let Some(rest) = custom_id.strip_prefix(APPROVE_PREFIX) {
        return token(rest).map(ButtonAction::Approve);
    }
    if let Some(rest) = custom_id.strip_prefix(CANCEL_PREFIX) {
        return token(rest).map(ButtonAction::Cancel);
    }
    None
}

/// Whether `user` may use the bot. An empty allow-list admits everyone.
pub fn is_authorized(user: u64, allowed_users: &[u64]) -> bool {
    allowed_users.is_empty() || allowed_users.contains(&user)
}

/// Shortens `text` to at most `limit` characters, marking the cut with an ellipsis.
pub fn truncate_for_display(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let mut out: String = text.chars().take(limit.saturating_sub(1)).collect();
    out.push(ELLIPSIS);
    out
}

/// Body of the ephemeral draft preview.
///
/// Only the preview is shortened; approval posts the full draft.
pub fn draft_preview(text: &str, chunks: usize) -> String {
    let header = match chunks {
        1 => "Draft reply (posts as 1 message):\n\n".to_string(),
        n => format!("Draft reply (posts as {n} messages):\n\n"),
    };
    truncate_for_display(&format!("{header}{text}"), DISCORD_MESSAGE_LIMIT)
}

/// Ephemeral `/hints` answer.
pub fn hints_reply(query: &str, cards: &[Card]) -> String {
    if cards.is_empty() {
        return format!("No reference cards match `{query}`.");
    }

    let mut out = String::new();
    for card in cards {
        let _ = writeln!(out, "**{}** `{}`", card.kind, card.id);
        if let Some(signature) = &card.signature {
            let _ = writeln!(out, "```\n{signature}\n```");
        }
        if let Some(summary) = &card.summary {
            let _ = writeln!(out, "{summary}");
        }
        if let Some(url) = &card.doc_url {
            let _ = writeln!(out, "<{url}>");
        }
        out.push('\n');
    }
    truncate_for_display(out.trim_end(), DISCORD_MESSAGE_LIMIT)
}
