//! Frequency counts over an emitted token stream.

use std::fmt;

use indexmap::IndexMap;

use crate::category::TokenCategory;
use crate::token::Token;

#[test]
fn counts_categories_and_words() {
    use crate::token::tokenizer::tokenize;

    let mut summary = Summary::new();
    for token in &tokenize("кот и cat и кот\n".as_bytes()) {
        summary.record(token);
    }
    assert_eq!(summary.tokens(), 10);
    assert_eq!(summary.category_count(TokenCategory::CyrillicWord), 4);
    assert_eq!(summary.category_count(TokenCategory::LatinWord), 1);
    assert_eq!(summary.category_count(TokenCategory::Whitespace), 4);
    assert_eq!(summary.category_count(TokenCategory::Newline), 1);
    assert_eq!(summary.category_count(TokenCategory::Punctuation), 0);
}

#[test]
fn top_words_orders_by_count_then_first_seen() {
    use crate::token::tokenizer::tokenize;

    let mut summary = Summary::new();
    for token in &tokenize(b"b a a c b c a") {
        summary.record(token);
    }
    assert_eq!(summary.top_words(1), [("a", 3)]);
    // b and c are tied; b was seen first
    assert_eq!(summary.top_words(3), [("a", 3), ("b", 2), ("c", 2)]);
}

/// Per-category and per-word counts over a token stream. Purely a consumer
/// of emitted tokens; holds no tokenizer state.
#[derive(Debug, Default)]
pub struct Summary {
    /// Token counts per category, in order of first appearance.
    categories: IndexMap<TokenCategory, usize>,
    /// Counts of word tokens, in order of first appearance.
    words: IndexMap<String, usize>,
    tokens: usize,
    bytes: usize,
}

impl Summary {
    /// Creates a new, empty `Summary`.
    pub fn new() -> Summary {
        Summary::default()
    }

    /// Records one emitted token.
    pub fn record(&mut self, token: &Token) {
        self.tokens += 1;
        self.bytes += token.byte_len();
        *self.categories.entry(token.category()).or_insert(0) += 1;
        if token.category().is_word() {
            *self.words.entry(token.text()).or_insert(0) += 1;
        }
    }

    /// Total number of tokens recorded.
    pub fn tokens(&self) -> usize {
        self.tokens
    }

    /// Total number of input bytes covered by the recorded tokens.
    pub fn bytes(&self) -> usize {
        self.bytes
    }

    /// Number of recorded tokens of the given category.
    pub fn category_count(&self, category: TokenCategory) -> usize {
        self.categories.get(&category).copied().unwrap_or(0)
    }

    /// The `n` most frequent word tokens, count-descending; ties keep
    /// first-seen order.
    pub fn top_words(&self, n: usize) -> Vec<(&str, usize)> {
        let mut words = self
            .words
            .iter()
            .map(|(word, &count)| (word.as_str(), count))
            .collect::<Vec<_>>();
        // the sort is stable, so equal counts stay in insertion order
        words.sort_by(|a, b| b.1.cmp(&a.1));
        words.truncate(n);
        words
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "{} tokens, {} bytes", self.tokens, self.bytes)?;
        for (category, count) in &self.categories {
            writeln!(f, "{category}: {count}")?;
        }
        let top = self.top_words(10);
        if !top.is_empty() {
            writeln!(f, "most frequent words:")?;
            for (word, count) in top {
                writeln!(f, "{count:>8}  {word}")?;
            }
        }
        Ok(())
    }
}
