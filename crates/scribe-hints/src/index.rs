// SPDX-FileCopyrightText: 2026 Scribe Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lexical hint index.
//!
//! Cards are ranked by naive substring term counting over their lower-cased
//! canonical text. Matching is not word-boundary aware: the token `method`
//! hits inside `methodbase`.

use tracing::debug;

use crate::card::Card;

/// Punctuation that separates query tokens, in addition to ASCII whitespace.
const DELIMITERS: &[char] = &['.', ',', '(', ')', '[', ']', ':', ';', '#', '/', '\\'];

/// Points added for a card whose kind is privileged.
const KIND_BONUS: usize = 1;

/// A card together with its lexical score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoredCard<'a> {
    pub card: &'a Card,
    pub score: usize,
}

/// Immutable, in-memory index over a batch of cards.
#[derive(Debug, Default)]
pub struct LexicalHintIndex {
    cards: Vec<Card>,
    /// Lower-cased canonical text, parallel to `cards`.
    haystacks: Vec<String>,
    privileged_kinds: Vec<String>,
}

impl LexicalHintIndex {
    /// Builds an index, precomputing each card's lower-cased canonical text.
    pub fn new(cards: Vec<Card>, privileged_kinds: Vec<String>) -> Self {
        let haystacks = cards
            .iter()
            .map(|card| card.canonical_text().to_lowercase())
            .collect();
        Self {
            cards,
            haystacks,
            privileged_kinds,
        }
    }

    /// An index holding no cards. Every search returns nothing.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Whether any cards are present.
    pub fn is_loaded(&self) -> bool {
        !self.cards.is_empty()
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns at most `k` cards with a positive score, best first.
    pub fn search(&self, query: &str, k: usize) -> Vec<&Card> {
        self.search_scored(query, k)
            .into_iter()
            .map(|scored| scored.card)
            .collect()
    }

    /// Like [`search`](Self::search) but keeps the scores.
    ///
    /// A card of a privileged kind scores at least the kind bonus, even with
    /// no token hits. Ties keep insertion order.
    pub fn search_scored(&self, query: &str, k: usize) -> Vec<ScoredCard<'_>> {
        if k == 0 || self.cards.is_empty() {
            return Vec::new();
        }

        let tokens = tokenize(query);
        let mut scored: Vec<ScoredCard<'_>> = self
            .cards
            .iter()
            .zip(&self.haystacks)
            .filter_map(|(card, haystack)| {
                let score = self.score(card, haystack, &tokens);
                (score > 0).then_some(ScoredCard { card, score })
            })
            .collect();

        // `sort_by` is stable, so equal scores stay in insertion order.
        scored.sort_by(|a, b| b.score.cmp(&a.score));
        scored.truncate(k);

        debug!(
            tokens = tokens.len(),
            hits = scored.len(),
            k,
            "lexical hint search"
        );
        scored
    }

    fn score(&self, card: &Card, haystack: &str, tokens: &[String]) -> usize {
        let hits = tokens
            .iter()
            .filter(|token| haystack.contains(token.as_str()))
            .count();
        if self.privileged_kinds.iter().any(|kind| *kind == card.kind) {
            hits + KIND_BONUS
        } else {
            hits
        }
    }
}

/// Splits a query into lower-cased tokens on ASCII whitespace and [`DELIMITERS`].
/// Empty tokens are dropped; duplicates are kept and each scores separately.
pub fn tokenize(query: &str) -> Vec<String> {
    query
        .split(|c: char| c.is_ascii_whitespace() || DELIMITERS.contains(&c))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str, kind: &str, signature: &str, summary: &str) -> Card {
        Card {
            id: id.into(),
            kind: kind.into(),
            summary: Some(summary.into()),
            signature: Some(signature.into()),
            remarks: None,
            doc_url: None,
            examples: Vec::new(),
        }
    }

    fn privileged() -> Vec<String> {
        vec!["method".to_string(), "property".to_string()]
    }

    #[test]
    fn tokenize_splits_on_delimiters_and_lowercases() {
        assert_eq!(
            tokenize("Harmony.Patch(MethodBase)  prefix;postfix\t#x/y\\z"),
            vec!["harmony", "patch", "methodbase", "prefix", "postfix", "x", "y", "z"]
        );
    }

    #[test]
    fn tokenize_drops_empty_tokens() {
        assert!(tokenize("  ..,()[]:;  \r\n").is_empty());
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn ranks_method_card_and_excludes_zero_scores() {
        let index = LexicalHintIndex::new(
            vec![
                card("c1", "method", "Patch(MethodBase)", "Applies a patch"),
                card("c2", "type", "Harmony", "entry class"),
            ],
            privileged(),
        );

        let scored = index.search_scored("patch method", 5);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].card.id, "c1");
        // Two token hits plus the kind bonus.
        assert_eq!(scored[0].score, 3);

        let ids: Vec<&str> = index
            .search("patch method", 5)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["c1"]);
    }

    #[test]
    fn empty_index_returns_nothing() {
        let index = LexicalHintIndex::empty();
        assert!(!index.is_loaded());
        assert!(index.search("anything at all", 5).is_empty());
    }

    #[test]
    fn ties_preserve_insertion_order() {
        let index = LexicalHintIndex::new(
            vec![
                card("first", "type", "Traverse", "walks fields"),
                card("second", "type", "AccessTools", "walks members"),
                card("third", "type", "CodeMatcher", "walks instructions"),
            ],
            privileged(),
        );

        let ids: Vec<&str> = index
            .search("walks", 5)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["first", "second", "third"]);
    }

    #[test]
    fn results_are_capped_at_k() {
        let cards = (0..10)
            .map(|i| card(&format!("c{i}"), "type", "Shared", "shared summary"))
            .collect();
        let index = LexicalHintIndex::new(cards, privileged());
        assert_eq!(index.search("shared", 3).len(), 3);
        assert!(index.search("shared", 0).is_empty());
    }

    #[test]
    fn higher_scores_rank_first() {
        let index = LexicalHintIndex::new(
            vec![
                card("weak", "type", "Prefix", "runs before"),
                card("strong", "type", "Prefix", "runs before the original method"),
            ],
            privileged(),
        );

        let ids: Vec<&str> = index
            .search("prefix original", 5)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["strong", "weak"]);
    }

    #[test]
    fn privileged_kind_scores_without_token_hits() {
        let index = LexicalHintIndex::new(
            vec![
                card("m", "method", "Unrelated", "nothing here"),
                card("t", "type", "Transpiler", "rewrites IL"),
                card("x", "type", "Other", "nothing here"),
            ],
            privileged(),
        );

        // The bonus alone is worth one token hit; ties keep insertion order.
        let ranked: Vec<(&str, usize)> = index
            .search_scored("transpiler", 5)
            .iter()
            .map(|s| (s.card.id.as_str(), s.score))
            .collect();
        assert_eq!(ranked, vec![("m", 1), ("t", 1)]);

        let index = LexicalHintIndex::new(
            vec![
                card("m", "method", "Unrelated", "nothing here"),
                card("t", "type", "Transpiler", "transpiler rewrites IL"),
            ],
            privileged(),
        );
        let ids: Vec<&str> = index
            .search("transpiler il", 5)
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["t", "m"]);
    }

    #[test]
    fn tokenless_query_returns_only_privileged_kinds() {
        let index = LexicalHintIndex::new(
            vec![
                card("t", "type", "Harmony", "entry class"),
                card("p", "property", "Instance", "the singleton"),
            ],
            privileged(),
        );
        let scored = index.search_scored(" .,() ", 5);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].card.id, "p");
        assert_eq!(scored[0].score, 1);
    }

    #[test]
    fn tokenize_keeps_non_ascii_whitespace() {
        assert_eq!(tokenize("Harmony\u{a0}Patch"), vec!["harmony\u{a0}patch"]);
        assert_eq!(tokenize("a\u{2003}b c"), vec!["a\u{2003}b", "c"]);
    }

    #[test]
    fn matching_is_substring_based() {
        let index = LexicalHintIndex::new(
            vec![card("c", "type", "MethodBase", "reflection handle")],
            Vec::new(),
        );
        let scored = index.search_scored("method", 5);
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].score, 1);
    }

    #[test]
    fn duplicate_query_tokens_each_score() {
        let index = LexicalHintIndex::new(
            vec![card("c", "type", "Patch", "patch things")],
            Vec::new(),
        );
        assert_eq!(index.search_scored("patch patch", 5)[0].score, 2);
    }

    #[test]
    fn example_code_contributes_to_score() {
        let mut with_example = card("c", "type", "Harmony", "entry class");
        with_example.examples.push(crate::card::Example {
            title: None,
            code: "var h = new Harmony(\"id\"); h.PatchAll();".into(),
        });
        let index = LexicalHintIndex::new(vec![with_example], Vec::new());
        assert_eq!(index.search("patchall", 5).len(), 1);
    }
}
