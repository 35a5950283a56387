//! Process-wide documentation state shared by every viewing session.
//!
//! The outline and its search index are built together into an immutable
//! [`Snapshot`]. Sessions hold the [`Library`] and take the current snapshot per
//! call; a rebuild constructs a complete new snapshot and then swaps it in, so a
//! reader sees either the old or the new one, never a half-built index.

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::outline::{OutlineStore, RawOutline, RawSection};
use crate::search::SearchIndex;
use std::sync::{Arc, PoisonError, RwLock};
use xxhash_rust::xxh3::Xxh3;

/// A built outline with the index derived from it.
#[derive(Debug)]
pub struct Snapshot {
    pub outline: OutlineStore,
    pub index: SearchIndex,
    /// Content hash of the raw outline this snapshot was built from
    pub fingerprint: u64,
}

impl Snapshot {
    pub fn build(raw: &RawOutline, config: &SearchConfig) -> Result<Self> {
        let outline = OutlineStore::build(raw)?;
        let index = SearchIndex::build_configured(&outline, config);
        Ok(Self {
            outline,
            index,
            fingerprint: fingerprint(raw),
        })
    }
}

/// Shared holder of the current [`Snapshot`].
#[derive(Debug, Default)]
pub struct Library {
    current: RwLock<Option<Arc<Snapshot>>>,
    config: SearchConfig,
}

impl Library {
    /// An empty library; every lookup reports `NotReady` until [`Library::install`].
    pub fn new(config: SearchConfig) -> Self {
        Self {
            current: RwLock::new(None),
            config,
        }
    }

    /// Build a snapshot from `raw` and make it current.
    ///
    /// On `MalformedOutline` the previously installed snapshot (if any) stays
    /// in place.
    pub fn install(&self, raw: &RawOutline) -> Result<Arc<Snapshot>> {
        let snapshot = match Snapshot::build(raw, &self.config) {
            Ok(snapshot) => Arc::new(snapshot),
            Err(e) => {
                tracing::warn!("Rejected outline: {}", e);
                return Err(e);
            }
        };
        self.swap(snapshot.clone());
        Ok(snapshot)
    }

    /// Rebuild only if `raw` differs from the installed content.
    ///
    /// Returns whether a new snapshot was installed.
    pub fn reload(&self, raw: &RawOutline) -> Result<bool> {
        if let Ok(current) = self.snapshot()
            && current.fingerprint == fingerprint(raw)
        {
            tracing::debug!("Outline unchanged ({:016x}), skipping rebuild", current.fingerprint);
            return Ok(false);
        }
        self.install(raw)?;
        Ok(true)
    }

    /// The current snapshot, or `NotReady` before the first successful build.
    pub fn snapshot(&self) -> Result<Arc<Snapshot>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or(Error::NotReady)
    }

    pub fn is_ready(&self) -> bool {
        self.snapshot().is_ok()
    }

    fn swap(&self, snapshot: Arc<Snapshot>) {
        tracing::info!(
            "Installed documentation snapshot {:016x} ({} nodes, {} terms)",
            snapshot.fingerprint,
            snapshot.outline.len(),
            snapshot.index.term_count()
        );
        *self.current.write().unwrap_or_else(PoisonError::into_inner) = Some(snapshot);
    }
}

/// Content hash over every field of the outline, in document order.
pub fn fingerprint(raw: &RawOutline) -> u64 {
    fn feed(hasher: &mut Xxh3, field: &str) {
        hasher.update(&(field.len() as u64).to_le_bytes());
        hasher.update(field.as_bytes());
    }

    fn feed_section(hasher: &mut Xxh3, section: &RawSection) {
        feed(hasher, &section.id);
        feed(hasher, &section.title);
        feed(hasher, section.text.as_deref().unwrap_or("\0none"));
        feed(hasher, section.url.as_deref().unwrap_or("\0none"));
        hasher.update(&(section.children.len() as u64).to_le_bytes());
        for child in &section.children {
            feed_section(hasher, child);
        }
    }

    let mut hasher = Xxh3::new();
    feed(&mut hasher, &raw.title);
    feed(&mut hasher, &raw.url);
    hasher.update(&(raw.sections.len() as u64).to_le_bytes());
    for section in &raw.sections {
        feed_section(&mut hasher, section);
    }
    hasher.digest()
}
