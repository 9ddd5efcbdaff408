// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Splitting long replies into platform-sized chunks.
//!
//! Chunks prefer to end at a line break and avoid leaving a fenced code block
//! open. Sizes are counted in characters, not bytes. Concatenating the chunks
//! always reproduces the input exactly.

/// Fenced code block marker.
const FENCE: &str = "```";

/// Splits `text` into chunks of at most `max_chars` characters.
///
/// A single line longer than `max_chars` is hard-cut. Empty input yields no
/// chunks. `max_chars` must be positive; zero is treated as one.
pub fn split(text: &str, max_chars: usize) -> Vec<&str> {
    let max_chars = max_chars.max(1);
    let mut chunks = Vec::new();
    let mut rest = text;

    while !rest.is_empty() {
        let window_end = match rest.char_indices().nth(max_chars) {
            Some((byte, _)) => byte,
            // Residual fits: emit it whole.
            None => rest.len(),
        };
        let cut = if window_end == rest.len() {
            window_end
        } else {
            cut_index(&rest[..window_end])
        };

        let (chunk, tail) = rest.split_at(cut);
        chunks.push(chunk);
        rest = tail;
    }

    chunks
}

/// Where the cut search currently stands.
enum Step {
    /// Look for the last line break in the window.
    LineBreak,
    /// The candidate opens a fence it does not close; retreat before it.
    FenceSafe(usize),
    /// A definite cut.
    Done(usize),
    /// No usable retreat point; take the whole window.
    Fallback,
}

/// Returns the byte length of the chunk to take from the front of `window`.
///
/// Always in `1..=window.len()` for a non-empty window.
pub fn cut_index(window: &str) -> usize {
    let mut step = Step::LineBreak;
    loop {
        step = match step {
            Step::LineBreak => {
                let cut = window.rfind('\n').map_or(window.len(), |nl| nl + 1);
                if window[..cut].matches(FENCE).count() % 2 == 1 {
                    Step::FenceSafe(cut)
                } else {
                    Step::Done(cut)
                }
            }
            Step::FenceSafe(cut) => {
                let candidate = &window[..cut];
                let retreat = candidate
                    .rfind(FENCE)
                    .and_then(|fence| candidate[..fence].rfind('\n'))
                    .map(|nl| nl + 1);
                // Without a line break before the fence the mid-fence cut stands.
                Step::Done(retreat.unwrap_or(cut))
            }
            Step::Done(0) => Step::Fallback,
            Step::Done(cut) => return cut,
            Step::Fallback => return window.len(),
        };
    }
}
