//! Coordinates selection, expansion and search state for one viewer.

use super::events::{EventKind, SessionEvent, Subscriber, SubscriptionId};
use super::session::SessionState;
use crate::error::Result;
use crate::library::Library;
use std::sync::Arc;

/// Reconciles tree navigation with search results for a single session.
///
/// Every mutation goes through `select`, `search` or `toggle_expanded`. Each
/// call validates against the library's current snapshot first, so a failed
/// call leaves the state untouched.
pub struct SyncController {
    library: Arc<Library>,
    state: SessionState,
    /// "Lock panels together": when off, selection is not broadcast
    sync_enabled: bool,
    subscribers: Vec<(SubscriptionId, Subscriber)>,
    next_subscription: u64,
}

impl std::fmt::Debug for SyncController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncController")
            .field("state", &self.state)
            .field("sync_enabled", &self.sync_enabled)
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

impl SyncController {
    /// Open a session with panel synchronization enabled.
    pub fn new(library: Arc<Library>) -> Self {
        Self {
            library,
            state: SessionState::default(),
            sync_enabled: true,
            subscribers: Vec::new(),
            next_subscription: 0,
        }
    }

    #[must_use]
    pub fn with_sync(mut self, enabled: bool) -> Self {
        self.sync_enabled = enabled;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn sync_enabled(&self) -> bool {
        self.sync_enabled
    }

    /// Toggle selection propagation. State updates happen either way.
    pub fn set_sync_enabled(&mut self, enabled: bool) {
        tracing::debug!("Panel synchronization {}", if enabled { "on" } else { "off" });
        self.sync_enabled = enabled;
    }

    pub fn subscribe(
        &mut self,
        subscriber: impl FnMut(&SessionEvent) + Send + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.subscribers.push((id, Box::new(subscriber)));
        id
    }

    /// Returns false if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub, _)| *sub != id);
        self.subscribers.len() != before
    }

    /// Select a node and expand every ancestor so it is visible.
    pub fn select(&mut self, node_id: &str) -> Result<()> {
        let snapshot = self.library.snapshot()?;
        let node = snapshot.outline.get(node_id)?;
        let path = snapshot.outline.path_to(node_id)?;

        self.state.expanded_node_ids.extend(path);
        self.state.selected_node_id = Some(node.id.clone());
        tracing::debug!("Selected '{}' ({})", node.id, node.url);

        if self.sync_enabled {
            self.notify(EventKind::Selected {
                node_id: node.id.clone(),
                url: node.url.clone(),
            });
        } else {
            tracing::debug!("Panel sync off; not broadcasting selection of '{}'", node.id);
        }
        Ok(())
    }

    /// Run a query and remember its ranked results. Selection is unchanged.
    pub fn search(&mut self, text: &str) -> Result<&[String]> {
        let snapshot = self.library.snapshot()?;
        let results = snapshot.index.query(text);

        self.state.last_query = Some(text.to_string());
        self.state.last_results = results;

        self.notify(EventKind::Searched {
            query: text.to_string(),
            result_count: self.state.last_results.len(),
        });
        Ok(self.state.last_results.as_slice())
    }

    /// Flip a node's expansion. Returns whether it is now expanded.
    pub fn toggle_expanded(&mut self, node_id: &str) -> Result<bool> {
        let snapshot = self.library.snapshot()?;
        let node = snapshot.outline.get(node_id)?;

        let expanded = if self.state.expanded_node_ids.remove(&node.id) {
            false
        } else {
            self.state.expanded_node_ids.insert(node.id.clone());
            true
        };

        self.notify(EventKind::ExpansionToggled {
            node_id: node.id.clone(),
            expanded,
        });
        Ok(expanded)
    }

    /// Drop references to nodes missing from the current snapshot, e.g. after
    /// the library was rebuilt. Returns how many ids were dropped.
    pub fn reconcile(&mut self) -> Result<usize> {
        let snapshot = self.library.snapshot()?;
        let outline = &snapshot.outline;
        let mut dropped = 0;

        if let Some(selected) = &self.state.selected_node_id
            && !outline.contains(selected)
        {
            self.state.selected_node_id = None;
            dropped += 1;
        }

        let expanded_before = self.state.expanded_node_ids.len();
        self.state.expanded_node_ids.retain(|id| outline.contains(id));
        dropped += expanded_before - self.state.expanded_node_ids.len();

        let results_before = self.state.last_results.len();
        self.state.last_results.retain(|id| outline.contains(id));
        dropped += results_before - self.state.last_results.len();

        if dropped > 0 {
            tracing::debug!("Dropped {} stale node references", dropped);
        }
        Ok(dropped)
    }

    fn notify(&mut self, kind: EventKind) {
        if self.subscribers.is_empty() {
            return;
        }
        let event = SessionEvent {
            kind,
            state: self.state.clone(),
        };
        for (_, subscriber) in &mut self.subscribers {
            subscriber(&event);
        }
    }
}
