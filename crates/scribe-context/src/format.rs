// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Plain-text rendering of conversation windows and hint cards.

use std::fmt::Write;

use chrono::SecondsFormat;
use scribe_core::types::{Attachment, Message};
use scribe_hints::Card;

use crate::window::ConversationWindow;

/// Marker placed before the anchor line.
const ANCHOR_MARKER: &str = ">> ";

/// Renders a window one message per line:
/// `[<rfc3339>] <author>: <content>`, anchor prefixed with `>> `, attachments
/// on indented lines below their message.
pub fn render_window(window: &ConversationWindow) -> String {
    let mut out = String::new();
    for message in window.messages() {
        let marker = if message.id == window.anchor_id() {
            ANCHOR_MARKER
        } else {
            ""
        };
        render_message(&mut out, marker, message);
    }
    out
}

fn render_message(out: &mut String, marker: &str, message: &Message) {
    let content = if message.content.trim().is_empty() {
        "(no text)"
    } else {
        message.content.as_str()
    };
    let _ = writeln!(
        out,
        "{marker}[{}] {}: {content}",
        message.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true),
        message.author.name
    );
    for attachment in &message.attachments {
        let _ = writeln!(out, "  {}", render_attachment(attachment));
    }
}

fn render_attachment(attachment: &Attachment) -> String {
    let content_type = attachment.content_type.as_deref().unwrap_or("unknown type");
    format!(
        "[attachment: {} ({content_type}, {} bytes) {}]",
        attachment.filename, attachment.size, attachment.url
    )
}

/// Renders hint cards as a reference section. Returns `None` for no cards.
pub fn render_hints(cards: &[&Card]) -> Option<String> {
    if cards.is_empty() {
        return None;
    }

    let mut out = String::from("Reference cards:\n");
    for card in cards {
        let _ = writeln!(out, "\n### {} {}", card.kind, card.id);
        if let Some(signature) = &card.signature {
            let _ = writeln!(out, "`{signature}`");
        }
        if let Some(summary) = &card.summary {
            let _ = writeln!(out, "{summary}");
        }
        if let Some(url) = &card.doc_url {
            let _ = writeln!(out, "Docs: {url}");
        }
    }
    Some(out)
}
