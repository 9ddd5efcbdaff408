// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Reference cards and lexical hint retrieval for Scribe.
//!
//! Cards are loaded once at startup from a JSON-lines source and held in an
//! immutable [`LexicalHintIndex`]. A missing or unreadable source degrades to
//! an empty index; searches against it simply return no hints.

pub mod card;
pub mod index;
pub mod source;

pub use card::{Card, Example, parse_cards};
pub use index::{LexicalHintIndex, ScoredCard, tokenize};
pub use source::{load_cards, load_index, read_source};
