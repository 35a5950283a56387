//! Runtime configuration loaded from TOML.
//!
//! ```toml
//! [search]
//! max_prefix_terms = 256
//! ranking = "title-first"   # or "document-order"
//!
//! [session]
//! sync_panels = true
//! ```

use crate::search::Ranking;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub search: SearchConfig,
    pub session: SessionConfig,
}

/// Search index settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfig {
    /// Cap on index terms expanded per query token; unbounded when unset.
    ///
    /// Trades recall for latency: a short prefix stops after the first `n`
    /// matching terms in sort order, so `conf` may miss nodes that
    /// `configuration` finds. Zero is rejected.
    pub max_prefix_terms: Option<NonZeroUsize>,
    pub ranking: Ranking,
}

/// Per-session defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SessionConfig {
    /// Whether selection changes propagate to the panels
    pub sync_panels: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { sync_panels: true }
    }
}

impl Config {
    pub fn from_toml(source: &str) -> Result<Self> {
        toml::from_str(source).context("Invalid configuration")
    }

    /// Load from an explicit path.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml(&source).with_context(|| format!("In config file {}", path.display()))
    }

    /// Load from `path` if given, else from the default location if it
    /// exists, else fall back to defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("Using config file {}", path.display());
                Self::load(&path)
            }
            _ => Ok(Self::default()),
        }
    }
}

/// `<config dir>/docnav/config.toml`
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("docnav").join("config.toml"))
}
