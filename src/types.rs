use serde::{Deserialize, Serialize};

/// Where in a node a token was found.
///
/// Ordered so that `Title < Body`, i.e. title matches sort first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Title,
    Body,
}

/// A ranked search result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchHit {
    pub node_id: String,
    /// `Title` when every query token matched the node's title
    pub kind: MatchKind,
    pub depth: usize,
    /// Document-order position of the node
    pub order: usize,
}

/// One (node, match kind) pair of an index entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Location {
    pub node_id: String,
    pub kind: MatchKind,
}

/// All locations of a single normalized token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub token: String,
    pub locations: Vec<Location>,
}
