//! Per-viewer navigation state kept consistent between the tree panel and the
//! content/search panel.

pub(crate) mod controller;
pub(crate) mod events;
pub(crate) mod session;

pub use controller::SyncController;
pub use events::{EventKind, SessionEvent, SubscriptionId};
pub use session::SessionState;
