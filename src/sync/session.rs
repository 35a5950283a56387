use serde::Serialize;
use std::collections::BTreeSet;

/// Navigation state of one viewer.
///
/// Owned exclusively by its [`SyncController`](super::SyncController); never
/// shared and never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SessionState {
    pub selected_node_id: Option<String>,
    /// Nodes whose children are visible in the tree panel
    pub expanded_node_ids: BTreeSet<String>,
    pub last_query: Option<String>,
    /// Ranked result ids of `last_query`
    pub last_results: Vec<String>,
}

impl SessionState {
    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded_node_ids.contains(id)
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected_node_id.as_deref() == Some(id)
    }

    /// Position of the selected node within the last search results.
    pub fn selected_result_position(&self) -> Option<usize> {
        let selected = self.selected_node_id.as_deref()?;
        self.last_results.iter().position(|id| id == selected)
    }
}
