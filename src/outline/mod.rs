//! Hierarchical documentation outline.
//!
//! The outline is the navigation tree produced by the documentation build step:
//! sections, subsections and their anchors. It is validated once at build time
//! and read-only afterwards.

pub mod navtree;
pub(crate) mod raw;
pub(crate) mod store;

pub use raw::{FlatNode, RawOutline, RawSection};
pub use store::{OutlineNode, OutlineStore, ROOT_ID};
