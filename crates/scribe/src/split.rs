// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `scribe split` command implementation.

use std::fmt::Write;
use std::path::Path;

use scribe_agent::split;
use scribe_config::ScribeConfig;
use scribe_core::ScribeError;

/// Prints the chunks the contents of `file` would be posted as.
pub async fn run_split(
    config: &ScribeConfig,
    file: &Path,
    max: Option<usize>,
) -> Result<(), ScribeError> {
    let text = tokio::fs::read_to_string(file)
        .await
        .map_err(|e| ScribeError::Internal(format!("failed to read {}: {e}", file.display())))?;

    let max_chars = max.unwrap_or(config.chunking.max_chunk_chars);
    if max_chars == 0 {
        return Err(ScribeError::Config("--max must be at least 1".into()));
    }

    print!("{}", render_chunks(&split(&text, max_chars), max_chars));
    Ok(())
}

/// Each chunk under a header with its index and character count.
fn render_chunks(chunks: &[&str], max_chars: usize) -> String {
    let mut out = String::new();
    for (i, chunk) in chunks.iter().enumerate() {
        let _ = writeln!(
            out,
            "--- chunk {}/{} ({}/{max_chars} chars) ---",
            i + 1,
            chunks.len(),
            chunk.chars().count()
        );
        out.push_str(chunk);
        if !chunk.ends_with('\n') {
            out.push('\n');
        }
    }
    out
}
