mod common;

use assert2::check;
use common::{QUERIES, handbook_outline, scenario_outline};
use docnav::search::{DocumentOrder, RankingPolicy, TitleFirst};
use docnav::{MatchKind, OutlineStore, RawOutline, SearchIndex};
use rstest::rstest;
use std::collections::BTreeSet;
use std::sync::Arc;

fn index_for(raw: &RawOutline) -> SearchIndex {
    SearchIndex::build(&OutlineStore::build(raw).unwrap())
}

fn as_set(ids: &[String]) -> BTreeSet<String> {
    ids.iter().cloned().collect()
}

// --- Scenario ---

#[rstest]
#[case("deploy", &["b1"])]
#[case("roll", &["c1"])]
#[case("Build", &["a1"])]
#[case("ROLLBACK", &["c1"])]
#[case("zzz", &[])]
fn scenario_queries(scenario_outline: RawOutline, #[case] query: &str, #[case] expected: &[&str]) {
    let index = index_for(&scenario_outline);
    check!(index.query(query) == expected);
}

// --- Properties ---

#[rstest]
fn empty_query_returns_nothing(handbook_outline: RawOutline) {
    let index = index_for(&handbook_outline);
    check!(index.query("").is_empty());
    check!(index.query("  \t ").is_empty());
}

#[rstest]
fn rebuilding_yields_identical_results(handbook_outline: RawOutline) {
    let store = OutlineStore::build(&handbook_outline).unwrap();
    let first = SearchIndex::build(&store);
    let second = SearchIndex::build(&store);

    check!(first.tokens().collect::<Vec<_>>() == second.tokens().collect::<Vec<_>>());
    for query in QUERIES {
        check!(first.query_hits(query) == second.query_hits(query), "query {:?}", query);
    }
}

#[rstest]
#[case("config", "file")]
#[case("roll", "back")]
#[case("deploy", "release")]
#[case("configuration", "log")]
#[case("install", "conf")]
#[case("start", "zzz")]
fn conjunction_is_intersection(
    handbook_outline: RawOutline,
    #[case] left: &str,
    #[case] right: &str,
) {
    let index = index_for(&handbook_outline);
    let combined = index.query(&format!("{} {}", left, right));
    let expected: BTreeSet<_> = as_set(&index.query(left))
        .intersection(&as_set(&index.query(right)))
        .cloned()
        .collect();
    check!(as_set(&combined) == expected);

    // Still in rank order: title matches before body matches, then depth, then position.
    let hits = index.query_hits(&format!("{} {}", left, right));
    for pair in hits.windows(2) {
        check!(TitleFirst.compare(&pair[0], &pair[1]).is_lt());
    }
}

#[rstest]
fn prefix_query_covers_full_token(handbook_outline: RawOutline) {
    let index = index_for(&handbook_outline);
    let tokens: Vec<String> = index.tokens().map(str::to_string).collect();
    for token in &tokens {
        let full = as_set(&index.query(token));
        for cut in 1..token.chars().count() {
            let prefix: String = token.chars().take(cut).collect();
            let partial = as_set(&index.query(&prefix));
            check!(partial.is_superset(&full), "{:?} vs {:?}", prefix, token);
        }
    }
}

#[rstest]
fn conf_finds_everything_configuration_finds(handbook_outline: RawOutline) {
    let index = index_for(&handbook_outline);
    let full = as_set(&index.query("configuration"));
    check!(!full.is_empty());
    check!(as_set(&index.query("conf")).is_superset(&full));
}

#[rstest]
fn query_order_is_independent_of_token_order(handbook_outline: RawOutline) {
    let index = index_for(&handbook_outline);
    check!(index.query("roll back") == index.query("back roll"));
    check!(index.query("config config") == index.query("config"));
}

// --- Ranking ---

#[rstest]
fn titles_rank_above_body_text(handbook_outline: RawOutline) {
    let index = index_for(&handbook_outline);
    let hits = index.query_hits("configuration");
    let kinds: Vec<_> = hits.iter().map(|h| h.kind).collect();
    let first_body = kinds.iter().position(|k| *k == MatchKind::Body);
    if let Some(first_body) = first_body {
        check!(kinds[first_body..].iter().all(|k| *k == MatchKind::Body));
    }
    check!(hits[0].node_id == "config");
    check!(hits[1].node_id == "config-file");
}

#[rstest]
fn title_match_outranks_body_mention(handbook_outline: RawOutline) {
    let index = index_for(&handbook_outline);
    // "Deploying a release" (depth 2) is a title match; "Rolling back" only
    // mentions "deploy" in its text.
    check!(index.query("deploy") == ["ops-deploy", "ops-rollback"]);
}

#[rstest]
fn ranking_policy_is_swappable(handbook_outline: RawOutline) {
    let store = OutlineStore::build(&handbook_outline).unwrap();
    let policy: Arc<dyn RankingPolicy> = Arc::new(DocumentOrder);
    let index = SearchIndex::build_with(&store, policy, None);

    let hits = index.query_hits("configuration");
    for pair in hits.windows(2) {
        check!(pair[0].order < pair[1].order);
    }
    // Same set as the default ranking.
    let default_ranked = index_for(&handbook_outline).query("configuration");
    check!(as_set(&index.query("configuration")) == as_set(&default_ranked));
}

// --- Concurrency ---

#[rstest]
fn index_is_shared_across_threads(handbook_outline: RawOutline) {
    let index = Arc::new(index_for(&handbook_outline));
    let expected = index.query("conf");

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = index.clone();
            std::thread::spawn(move || index.query("conf"))
        })
        .collect();
    for handle in handles {
        check!(handle.join().unwrap() == expected);
    }
}
