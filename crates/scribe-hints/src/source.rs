// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Card sources: a local JSON-lines file or an http(s) URL.

use std::path::Path;

use scribe_core::ScribeError;
use tracing::{info, warn};

use crate::card::{Card, parse_cards};
use crate::index::LexicalHintIndex;

/// Reads the raw contents of a card source.
///
/// Sources starting with `http://` or `https://` are downloaded; anything else
/// is treated as a filesystem path.
pub async fn read_source(source: &str) -> Result<String, ScribeError> {
    if source.starts_with("http://") || source.starts_with("https://") {
        download(source).await
    } else {
        tokio::fs::read_to_string(Path::new(source))
            .await
            .map_err(|e| ScribeError::Hints {
                message: format!("failed to read card file {source}: {e}"),
                source: Some(Box::new(e)),
            })
    }
}

async fn download(url: &str) -> Result<String, ScribeError> {
    let response = reqwest::get(url).await.map_err(|e| ScribeError::Hints {
        message: format!("failed to download {url}: {e}"),
        source: Some(Box::new(e)),
    })?;

    if !response.status().is_success() {
        return Err(ScribeError::Hints {
            message: format!("download failed with status {}: {url}", response.status()),
            source: None,
        });
    }

    response.text().await.map_err(|e| ScribeError::Hints {
        message: format!("failed to read response body from {url}: {e}"),
        source: Some(Box::new(e)),
    })
}

/// Loads and parses cards from `source`.
///
/// An unreadable source is logged and yields no cards rather than an error.
pub async fn load_cards(source: &str) -> Vec<Card> {
    match read_source(source).await {
        Ok(text) => {
            let cards = parse_cards(&text);
            info!(source, cards = cards.len(), "loaded reference cards");
            cards
        }
        Err(e) => {
            warn!(source, error = %e, "card source unavailable, hints disabled");
            Vec::new()
        }
    }
}

/// Builds the hint index for an optional configured source.
pub async fn load_index(source: Option<&str>, privileged_kinds: Vec<String>) -> LexicalHintIndex {
    match source {
        Some(source) => LexicalHintIndex::new(load_cards(source).await, privileged_kinds),
        None => LexicalHintIndex::empty(),
    }
}
