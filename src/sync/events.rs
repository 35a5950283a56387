//! Notifications sent to the presentation layer.

use super::session::SessionState;
use serde::Serialize;

/// What changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum EventKind {
    /// A node was selected; the content panel should navigate to `url`.
    Selected { node_id: String, url: String },
    /// Search results were replaced.
    Searched { query: String, result_count: usize },
    /// A node's expansion flipped.
    ExpansionToggled { node_id: String, expanded: bool },
}

/// Event payload: the change plus the session state after it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionEvent {
    pub kind: EventKind,
    pub state: SessionState,
}

/// Handle returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(pub(crate) u64);

pub(crate) type Subscriber = Box<dyn FnMut(&SessionEvent) + Send>;
