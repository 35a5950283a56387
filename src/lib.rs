pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod library;
pub mod outline;
pub mod search;
pub mod sync;
pub mod tracing;
pub mod types;

pub use config::Config;
pub use error::{Error, Result};
pub use library::{Library, Snapshot};
pub use outline::{OutlineNode, OutlineStore, RawOutline, RawSection};
pub use search::SearchIndex;
pub use sync::{SessionEvent, SessionState, SyncController};
pub use types::{IndexEntry, Location, MatchKind, SearchHit};
