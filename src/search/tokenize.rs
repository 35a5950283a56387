//! Text normalization shared by index building and querying.
//!
//! A token is a maximal run of alphanumeric characters, lowercased. Everything
//! else (whitespace, punctuation, symbols, emoji) is a boundary.

use std::ops::Range;

/// A token together with the byte range it occupies in the source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSpan {
    pub token: String,
    pub range: Range<usize>,
}

/// Split `text` into normalized tokens with their source byte ranges, in order.
pub fn token_spans(text: &str) -> Vec<TokenSpan> {
    let mut spans = Vec::new();
    let mut start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if c.is_alphanumeric() {
            start.get_or_insert(i);
        } else if let Some(s) = start.take() {
            spans.push(span(text, s..i));
        }
    }
    if let Some(s) = start {
        spans.push(span(text, s..text.len()));
    }

    spans
}

fn span(text: &str, range: Range<usize>) -> TokenSpan {
    TokenSpan {
        token: text[range.clone()].to_lowercase(),
        range,
    }
}

/// Normalized tokens of `text` in order of appearance, duplicates kept.
pub fn tokenize(text: &str) -> Vec<String> {
    token_spans(text).into_iter().map(|s| s.token).collect()
}

/// Normalized tokens of `text` with duplicates collapsed, first occurrence wins.
pub fn unique_tokens(text: &str) -> Vec<String> {
    let mut seen = ahash::AHashSet::new();
    tokenize(text)
        .into_iter()
        .filter(|token| seen.insert(token.clone()))
        .collect()
}
