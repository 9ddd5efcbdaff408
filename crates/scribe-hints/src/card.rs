// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference card model and JSON-lines parsing.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// A short code example attached to a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    #[serde(default)]
    pub title: Option<String>,
    pub code: String,
}

/// One reference document, e.g. an API member or a type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    /// Kind tag such as `method`, `type` or `property`.
    pub kind: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
    #[serde(default)]
    pub remarks: Option<String>,
    #[serde(default, alias = "docUrl")]
    pub doc_url: Option<String>,
    #[serde(default)]
    pub examples: Vec<Example>,
}

impl Card {
    /// Text used for lexical scoring: signature, summary, remarks and the
    /// code of the first example, newline separated. Missing fields are skipped.
    pub fn canonical_text(&self) -> String {
        let first_example = self.examples.first().map(|e| e.code.as_str());
        [
            self.signature.as_deref(),
            self.summary.as_deref(),
            self.remarks.as_deref(),
            first_example,
        ]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
    }
}

/// Parses a JSON-lines card file.
///
/// Blank lines are ignored. A line that fails to parse is logged and skipped;
/// the remaining cards are still returned.
pub fn parse_cards(text: &str) -> Vec<Card> {
    let mut cards = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        match serde_json::from_str::<Card>(line) {
            Ok(card) => cards.push(card),
            Err(e) => {
                skipped += 1;
                debug!(line = idx + 1, error = %e, "skipping malformed card record");
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, kept = cards.len(), "some card records could not be parsed");
    }

    cards
}
