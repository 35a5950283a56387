//! Result ordering policies.
//!
//! Ranking is a policy, not part of matching: the index produces the matching
//! set and a [`RankingPolicy`] orders it. Every policy must end in document
//! order so results are fully deterministic.

use crate::types::SearchHit;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt::Debug;
use std::sync::Arc;

/// Orders search hits.
pub trait RankingPolicy: Debug + Send + Sync {
    fn compare(&self, a: &SearchHit, b: &SearchHit) -> Ordering;
}

/// Title matches first, then shallower nodes, then document order.
#[derive(Debug, Clone, Copy, Default)]
pub struct TitleFirst;

impl RankingPolicy for TitleFirst {
    fn compare(&self, a: &SearchHit, b: &SearchHit) -> Ordering {
        a.kind
            .cmp(&b.kind)
            .then(a.depth.cmp(&b.depth))
            .then(a.order.cmp(&b.order))
    }
}

/// Plain reading order, ignoring match kind and depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentOrder;

impl RankingPolicy for DocumentOrder {
    fn compare(&self, a: &SearchHit, b: &SearchHit) -> Ordering {
        a.order.cmp(&b.order)
    }
}

/// Configurable choice of built-in policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Ranking {
    #[default]
    TitleFirst,
    DocumentOrder,
}

impl Ranking {
    pub fn policy(self) -> Arc<dyn RankingPolicy> {
        match self {
            Self::TitleFirst => Arc::new(TitleFirst),
            Self::DocumentOrder => Arc::new(DocumentOrder),
        }
    }
}
