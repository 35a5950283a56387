//! Incremental search over outline titles and body text.
//!
//! This module provides tokenization, the prefix-capable inverted index and
//! the ranking policies used to order results.

// Module declarations
pub(crate) mod index;
pub(crate) mod scoring;
pub(crate) mod tokenize;

// Public re-exports (used via lib.rs)
pub use index::SearchIndex;
pub use scoring::{DocumentOrder, Ranking, RankingPolicy, TitleFirst};
pub use tokenize::{TokenSpan, token_spans, tokenize, unique_tokens};
