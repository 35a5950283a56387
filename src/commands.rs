//! Command handlers for the CLI. Each returns the text to print.

use crate::cli::{Cli, Commands};
use crate::config::Config;
use crate::library::{Library, Snapshot};
use crate::outline::{OutlineStore, navtree};
use crate::search::SearchIndex;
use crate::sync::{EventKind, SyncController};
use crate::types::MatchKind;
use anyhow::{Context, Result};
use std::fmt::Write as _;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Execute a parsed command line.
pub fn run(cli: &Cli) -> Result<String> {
    let config = Config::discover(cli.config.as_deref())?;
    let library = Arc::new(Library::new(config.search.clone()));

    match &cli.command {
        Commands::Tree { outline } => {
            let snapshot = open(&library, outline)?;
            Ok(format_tree(&snapshot.outline))
        }
        Commands::Path { outline, id } => {
            let snapshot = open(&library, outline)?;
            format_path(&snapshot.outline, id)
        }
        Commands::Search {
            outline,
            query,
            limit,
            json,
        } => {
            let snapshot = open(&library, outline)?;
            if *json {
                search_json(&snapshot, query, *limit)
            } else {
                Ok(format_search(&snapshot, query, *limit))
            }
        }
        Commands::Select { outline, id } => {
            open(&library, outline)?;
            select_json(&library, id, config.session.sync_panels)
        }
    }
}

/// Load an outline file and install it into the library.
pub fn open(library: &Library, path: &Path) -> Result<Arc<Snapshot>> {
    let raw = navtree::load(path)?;
    library
        .install(&raw)
        .with_context(|| format!("Outline {} failed validation", path.display()))
}

/// Indented tree, one node per line.
pub fn format_tree(outline: &OutlineStore) -> String {
    let mut out = String::new();
    for node in outline.iter() {
        let _ = writeln!(
            out,
            "{}{} [{}]",
            "  ".repeat(node.depth),
            node.title,
            node.id
        );
    }
    out
}

/// Root-to-node path, one ancestor per line.
pub fn format_path(outline: &OutlineStore, id: &str) -> Result<String> {
    let mut out = String::new();
    for (depth, ancestor) in outline.path_to(id)?.iter().enumerate() {
        let node = outline.get(ancestor)?;
        let _ = writeln!(out, "{}{} [{}]", "  ".repeat(depth), node.title, node.id);
    }
    Ok(out)
}

/// Ranked results with matched prefixes wrapped in `*`.
pub fn format_search(snapshot: &Snapshot, query: &str, limit: usize) -> String {
    let hits = snapshot.index.query_hits(query);
    if hits.is_empty() {
        let mut msg = format!("No results found for '{}'.\n\n", query);
        msg.push_str("Search tips:\n");
        msg.push_str("• Every word must match; try fewer words\n");
        msg.push_str("• Words match by prefix: 'conf' finds 'configuration'\n");
        return msg;
    }

    let mut out = format!(
        "Found {} result{} for '{}':\n\n",
        hits.len(),
        if hits.len() == 1 { "" } else { "s" },
        query
    );
    for (rank, hit) in hits.iter().take(limit).enumerate() {
        let Ok(node) = snapshot.outline.get(&hit.node_id) else {
            continue;
        };
        let marker = match hit.kind {
            MatchKind::Title => "title",
            MatchKind::Body => "text",
        };
        let _ = writeln!(
            out,
            "{}. {} [{}] ({}) {}",
            rank + 1,
            mark(&node.title, &SearchIndex::highlight(&node.title, query)),
            node.id,
            marker,
            node.url
        );
    }
    if hits.len() > limit {
        let _ = writeln!(out, "\n... and {} more", hits.len() - limit);
    }
    out
}

fn mark(text: &str, ranges: &[std::ops::Range<usize>]) -> String {
    let mut out = String::with_capacity(text.len() + ranges.len() * 2);
    let mut cursor = 0;
    for range in ranges {
        out.push_str(&text[cursor..range.start]);
        out.push('*');
        out.push_str(&text[range.clone()]);
        out.push('*');
        cursor = range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

fn search_json(snapshot: &Snapshot, query: &str, limit: usize) -> Result<String> {
    let hits: Vec<_> = snapshot
        .index
        .query_hits(query)
        .into_iter()
        .take(limit)
        .collect();
    serde_json::to_string_pretty(&hits).context("Failed to serialize search results")
}

/// Select `id` in a fresh session and report the state plus the url the
/// content panel was sent to (if panels are synchronized).
pub fn select_json(library: &Arc<Library>, id: &str, sync_panels: bool) -> Result<String> {
    let mut controller = SyncController::new(library.clone()).with_sync(sync_panels);
    let navigated = Arc::new(Mutex::new(None));
    let sink = navigated.clone();
    controller.subscribe(move |event| {
        if let EventKind::Selected { url, .. } = &event.kind
            && let Ok(mut slot) = sink.lock()
        {
            *slot = Some(url.clone());
        }
    });

    controller.select(id)?;

    let navigated_to = navigated.lock().ok().and_then(|slot| slot.clone());
    let report = serde_json::json!({
        "state": controller.state(),
        "navigated_to": navigated_to,
    });
    serde_json::to_string_pretty(&report).context("Failed to serialize session state")
}
