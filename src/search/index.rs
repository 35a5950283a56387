//! Inverted index over outline titles and body text with prefix lookup.

use super::scoring::{RankingPolicy, TitleFirst};
use super::tokenize::{token_spans, unique_tokens};
use crate::config::SearchConfig;
use crate::outline::OutlineStore;
use crate::types::{IndexEntry, Location, MatchKind, SearchHit};
use ahash::{AHashMap, AHashSet};
use std::collections::BTreeMap;
use std::num::NonZeroUsize;
use std::ops::{Bound, Range};
use std::sync::Arc;

/// Document position in the outline (pre-order index).
type DocId = usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Posting {
    doc: DocId,
    kind: MatchKind,
}

#[derive(Debug, Clone)]
struct DocMeta {
    id: String,
    depth: usize,
}

/// Token index over an outline.
///
/// Terms are kept in a sorted map so every index token sharing a prefix is a
/// contiguous range. Postings within a term are ordered by document position.
/// The index is immutable once built; rebuild to pick up content changes.
#[derive(Debug, Clone)]
pub struct SearchIndex {
    terms: BTreeMap<String, Vec<Posting>>,
    /// Node metadata by document position
    docs: Vec<DocMeta>,
    ranking: Arc<dyn RankingPolicy>,
    /// Upper bound on index terms expanded per query token
    max_prefix_terms: Option<NonZeroUsize>,
}

impl SearchIndex {
    /// Build with default settings (title-first ranking, unbounded prefix expansion).
    pub fn build(outline: &OutlineStore) -> Self {
        Self::build_with(outline, Arc::new(TitleFirst), None)
    }

    /// Build using the ranking and prefix cap from configuration.
    pub fn build_configured(outline: &OutlineStore, config: &SearchConfig) -> Self {
        Self::build_with(outline, config.ranking.policy(), config.max_prefix_terms)
    }

    pub fn build_with(
        outline: &OutlineStore,
        ranking: Arc<dyn RankingPolicy>,
        max_prefix_terms: Option<NonZeroUsize>,
    ) -> Self {
        let start = std::time::Instant::now();
        let mut terms: BTreeMap<String, Vec<Posting>> = BTreeMap::new();
        let mut pairs = 0usize;

        let docs = outline
            .iter()
            .map(|node| DocMeta {
                id: node.id.clone(),
                depth: node.depth,
            })
            .collect();

        // The synthetic root is not a section and is never a result.
        for node in outline.iter().filter(|n| !n.is_root()) {
            let fields = [
                (Some(node.title.as_str()), MatchKind::Title),
                (node.text.as_deref(), MatchKind::Body),
            ];
            for (text, kind) in fields {
                let Some(text) = text else { continue };
                for token in unique_tokens(text) {
                    terms.entry(token).or_default().push(Posting {
                        doc: node.order,
                        kind,
                    });
                    pairs += 1;
                }
            }
        }

        let index = Self {
            terms,
            docs,
            ranking,
            max_prefix_terms,
        };

        tracing::info!(
            "Built search index: {} unique terms, {} documents, {} term-document pairs in {:?}",
            index.term_count(),
            index.document_count(),
            pairs,
            start.elapsed()
        );

        index
    }

    /// Ranked node ids matching every token of `text`.
    pub fn query(&self, text: &str) -> Vec<String> {
        self.query_hits(text)
            .into_iter()
            .map(|hit| hit.node_id)
            .collect()
    }

    /// Ranked hits matching every token of `text`.
    ///
    /// Each query token matches any index token it is a prefix of (including
    /// itself). A node must match all query tokens; an empty query matches
    /// nothing.
    pub fn query_hits(&self, text: &str) -> Vec<SearchHit> {
        let tokens = unique_tokens(text);
        if tokens.is_empty() {
            return vec![];
        }

        // doc -> whether every query token so far matched in its title
        let mut candidates: Option<AHashMap<DocId, bool>> = None;

        for token in &tokens {
            let matched = self.prefix_matches(token);
            let narrowed: AHashMap<DocId, bool> = match candidates {
                None => matched,
                Some(previous) => previous
                    .into_iter()
                    .filter_map(|(doc, in_title)| {
                        matched.get(&doc).map(|&t| (doc, in_title && t))
                    })
                    .collect(),
            };
            if narrowed.is_empty() {
                tracing::debug!("Query '{}' has no matches for token '{}'", text, token);
                return vec![];
            }
            candidates = Some(narrowed);
        }

        let mut hits: Vec<SearchHit> = candidates
            .unwrap_or_default()
            .into_iter()
            .map(|(doc, in_title)| SearchHit {
                node_id: self.docs[doc].id.clone(),
                kind: if in_title {
                    MatchKind::Title
                } else {
                    MatchKind::Body
                },
                depth: self.docs[doc].depth,
                order: doc,
            })
            .collect();
        hits.sort_by(|a, b| self.ranking.compare(a, b));

        tracing::debug!("Query '{}' matched {} nodes", text, hits.len());
        hits
    }

    /// Documents containing an index token that starts with `prefix`, with
    /// whether any such token occurs in the title.
    fn prefix_matches(&self, prefix: &str) -> AHashMap<DocId, bool> {
        let mut matched: AHashMap<DocId, bool> = AHashMap::new();
        // The exact token, if indexed, is the first entry of the range, so a
        // cap of at least one never drops it.
        let limit = self.max_prefix_terms.map_or(usize::MAX, NonZeroUsize::get);
        let range = self
            .terms
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(|(term, _)| term.starts_with(prefix))
            .take(limit);

        for (_, postings) in range {
            for posting in postings {
                let in_title = matched.entry(posting.doc).or_insert(false);
                *in_title |= posting.kind == MatchKind::Title;
            }
        }
        matched
    }

    /// Byte ranges of `text` matched by the tokens of `query`.
    ///
    /// Each text token that starts with a query token contributes the range of
    /// its matched prefix (the longest one when several query tokens apply).
    pub fn highlight(text: &str, query: &str) -> Vec<Range<usize>> {
        let query_tokens: AHashSet<String> = unique_tokens(query).into_iter().collect();
        if query_tokens.is_empty() {
            return vec![];
        }

        token_spans(text)
            .into_iter()
            .filter_map(|span| {
                let best = query_tokens
                    .iter()
                    .filter(|q| span.token.starts_with(q.as_str()))
                    .map(String::len)
                    .max()?;
                let source = &text[span.range.clone()];
                let end = span.range.start + source_prefix_len(source, best);
                Some(span.range.start..end)
            })
            .collect()
    }

    /// All locations recorded for an exact normalized token.
    pub fn entry(&self, token: &str) -> Option<IndexEntry> {
        let postings = self.terms.get(token)?;
        Some(IndexEntry {
            token: token.to_string(),
            locations: postings
                .iter()
                .map(|p| Location {
                    node_id: self.docs[p.doc].id.clone(),
                    kind: p.kind,
                })
                .collect(),
        })
    }

    /// Every indexed token in sorted order.
    pub fn tokens(&self) -> impl Iterator<Item = &str> {
        self.terms.keys().map(String::as_str)
    }

    /// Get the number of unique terms in the index
    pub fn term_count(&self) -> usize {
        self.terms.len()
    }

    /// Get the number of documents in the index
    pub fn document_count(&self) -> usize {
        self.docs.len()
    }
}

/// Byte length of the shortest prefix of `source` whose lowercase form spans
/// `lowered_len` bytes.
fn source_prefix_len(source: &str, lowered_len: usize) -> usize {
    let mut lowered = 0;
    for (i, c) in source.char_indices() {
        if lowered >= lowered_len {
            return i;
        }
        lowered += c.to_lowercase().map(char::len_utf8).sum::<usize>();
    }
    source.len()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outline::{RawOutline, RawSection};
    use crate::search::scoring::DocumentOrder;
    use assert2::check;
    use rstest::{fixture, rstest};

    #[fixture]
    fn outline() -> OutlineStore {
        OutlineStore::build(&RawOutline::new(vec![
            RawSection::new("cfg", "Configuration")
                .with_text("Settings live in a TOML file")
                .with_children(vec![
                    RawSection::new("cfg-env", "Environment overrides")
                        .with_text("Configure values through environment variables"),
                ]),
            RawSection::new("ops", "Operations").with_children(vec![
                RawSection::new("ops-deploy", "Deploy").with_children(vec![
                    RawSection::new("ops-deploy-conf", "Deploy configuration"),
                ]),
                RawSection::new("ops-logs", "Logs").with_text("Deploy logs are rotated"),
            ]),
        ]))
        .unwrap()
    }

    #[rstest]
    fn exact_and_prefix_matches(outline: OutlineStore) {
        let index = SearchIndex::build(&outline);
        check!(index.query("configuration") == ["cfg", "ops-deploy-conf"]);
        // "conf" also reaches "configure" in body text.
        check!(index.query("conf") == ["cfg", "ops-deploy-conf", "cfg-env"]);
    }

    #[rstest]
    fn title_matches_rank_before_body_matches(outline: OutlineStore) {
        let index = SearchIndex::build(&outline);
        let hits = index.query_hits("deploy");
        let ids: Vec<_> = hits.iter().map(|h| h.node_id.as_str()).collect();
        check!(ids == ["ops-deploy", "ops-deploy-conf", "ops-logs"]);
        check!(hits[0].kind == MatchKind::Title);
        check!(hits[2].kind == MatchKind::Body);
    }

    #[rstest]
    fn conjunctive_query_requires_every_token(outline: OutlineStore) {
        let index = SearchIndex::build(&outline);
        check!(index.query("deploy conf") == ["ops-deploy-conf"]);
        check!(index.query("deploy nonexistent").is_empty());
    }

    #[rstest]
    fn mixed_title_and_body_matches_rank_as_body(outline: OutlineStore) {
        let index = SearchIndex::build(&outline);
        // "environment" is in the title, "variables" only in the body.
        let hits = index.query_hits("environment variables");
        check!(hits.len() == 1);
        check!(hits[0].kind == MatchKind::Body);
    }

    #[rstest]
    #[case("")]
    #[case("   ")]
    #[case("!?")]
    fn empty_queries_match_nothing(outline: OutlineStore, #[case] query: &str) {
        let index = SearchIndex::build(&outline);
        check!(index.query(query).is_empty());
    }

    #[rstest]
    fn root_is_never_a_result(outline: OutlineStore) {
        let index = SearchIndex::build(&outline);
        check!(index.query("documentation").is_empty());
    }

    #[rstest]
    fn document_order_policy(outline: OutlineStore) {
        let index = SearchIndex::build_with(&outline, Arc::new(DocumentOrder), None);
        check!(index.query("deploy") == ["ops-deploy", "ops-deploy-conf", "ops-logs"]);
        check!(index.query("conf") == ["cfg", "cfg-env", "ops-deploy-conf"]);
    }

    #[rstest]
    fn prefix_cap_keeps_exact_term(outline: OutlineStore) {
        let index = SearchIndex::build_with(&outline, Arc::new(TitleFirst), NonZeroUsize::new(1));
        // Only "configuration" (first in range) is expanded, not "configure".
        check!(index.query("configuration") == ["cfg", "ops-deploy-conf"]);
        check!(index.query("conf") == ["cfg", "ops-deploy-conf"]);
        check!(index.query("deploy") == ["ops-deploy", "ops-deploy-conf", "ops-logs"]);
    }

    #[rstest]
    fn configured_cap_of_one_still_finds_exact_tokens(outline: OutlineStore) {
        let config = SearchConfig {
            max_prefix_terms: NonZeroUsize::new(1),
            ..SearchConfig::default()
        };
        let index = SearchIndex::build_configured(&outline, &config);
        check!(index.query("logs") == ["ops-logs"]);
        check!(index.query("operations") == ["ops"]);
    }

    #[rstest]
    fn entries_record_match_kind(outline: OutlineStore) {
        let index = SearchIndex::build(&outline);
        let entry = index.entry("deploy").unwrap();
        let locations: Vec<_> = entry
            .locations
            .iter()
            .map(|l| (l.node_id.as_str(), l.kind))
            .collect();
        check!(
            locations
                == [
                    ("ops-deploy", MatchKind::Title),
                    ("ops-deploy-conf", MatchKind::Title),
                    ("ops-logs", MatchKind::Body),
                ]
        );
        check!(index.entry("depl").is_none());
    }

    #[test]
    fn duplicate_tokens_in_a_node_collapse() {
        let outline = OutlineStore::build(&RawOutline::new(vec![
            RawSection::new("x", "Deploy deploy DEPLOY"),
        ]))
        .unwrap();
        let index = SearchIndex::build(&outline);
        check!(index.entry("deploy").unwrap().locations.len() == 1);
        check!(index.term_count() == 1);
    }

    #[test]
    fn highlight_marks_matched_prefixes() {
        let text = "Deploy configuration";
        let ranges = SearchIndex::highlight(text, "conf dep");
        check!(ranges == [0..3, 7..11]);
        check!(&text[ranges[1].clone()] == "conf");
    }

    #[test]
    fn highlight_prefers_longest_query_token() {
        let ranges = SearchIndex::highlight("Rollback", "roll r");
        check!(ranges == [0..4]);
    }

    #[test]
    fn highlight_handles_multibyte_text() {
        let text = "ESPECIFICAÇÃO";
        let ranges = SearchIndex::highlight(text, "especificaç");
        check!(&text[ranges[0].clone()] == "ESPECIFICAÇ");
        check!(SearchIndex::highlight(text, "").is_empty());
    }
}
