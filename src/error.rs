//! Error handling types and utilities.

/// A specialized Result type for outline, index and session operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported by the outline store, search index and sync controller.
///
/// `MalformedOutline` is raised only while building and is fatal to startup.
/// The other kinds are recoverable at the call site.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The outline violates the tree invariant (duplicate id, dangling parent, cycle).
    #[error("malformed outline: {reason}")]
    MalformedOutline { reason: String },
    /// A lookup or selection named an id the outline does not contain.
    #[error("node '{id}' not found in outline")]
    NodeNotFound { id: String },
    /// The outline and search index have not been built yet.
    #[error("documentation index is not ready; build has not completed")]
    NotReady,
}

impl Error {
    pub(crate) fn malformed(reason: impl Into<String>) -> Self {
        Self::MalformedOutline {
            reason: reason.into(),
        }
    }

    pub(crate) fn not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }
}
