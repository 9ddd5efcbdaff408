// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `scribe hints` command implementation.

use std::fmt::Write;

use scribe_config::ScribeConfig;
use scribe_core::ScribeError;
use scribe_hints::{LexicalHintIndex, ScoredCard, load_index};

/// Loads the configured card source and prints the best matches for `query`.
pub async fn run_hints(
    config: &ScribeConfig,
    query: &str,
    top_k: Option<usize>,
) -> Result<(), ScribeError> {
    let source = config.hints.source.as_deref().ok_or_else(|| {
        ScribeError::Config("hints.source is not set; nothing to search".into())
    })?;
    let index = load_index(Some(source), config.hints.privileged_kinds.clone()).await;
    if !index.is_loaded() {
        return Err(ScribeError::Hints {
            message: format!("no cards could be loaded from {source}"),
            source: None,
        });
    }

    print!("{}", render_ranking(&index, query, top_k.unwrap_or(config.hints.top_k)));
    Ok(())
}

/// One line per match: rank, score, kind, id and signature when present.
fn render_ranking(index: &LexicalHintIndex, query: &str, k: usize) -> String {
    let ranked = index.search_scored(query, k);
    if ranked.is_empty() {
        return format!("no cards match \"{query}\" ({} cards searched)\n", index.len());
    }

    let mut out = String::new();
    for (rank, ScoredCard { card, score }) in ranked.iter().enumerate() {
        let _ = write!(out, "{:>2}. [{score}] {} {}", rank + 1, card.kind, card.id);
        if let Some(signature) = &card.signature {
            let _ = write!(out, "  {signature}");
        }
        out.push('\n');
    }
    out
}
