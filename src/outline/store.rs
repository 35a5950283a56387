//! Validated outline tree with id lookup and ancestry traversal.

use super::raw::{FlatNode, RawOutline};
use crate::error::{Error, Result};
use ahash::AHashMap;

/// Id of the synthetic root node every outline hangs from.
pub const ROOT_ID: &str = "root";

/// One entry of the navigation tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutlineNode {
    /// Unique, stable anchor
    pub id: String,
    pub title: String,
    /// Parent anchor; `None` only for the root
    pub parent_id: Option<String>,
    /// Child anchors in reading order
    pub children: Vec<String>,
    pub url: String,
    /// Body-text excerpt, if the build step provided one
    pub text: Option<String>,
    /// Distance from the root (root = 0)
    pub depth: usize,
    /// Pre-order position in the document (root = 0)
    pub order: usize,
}

impl OutlineNode {
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Immutable outline tree.
///
/// Nodes are stored in document order, so `nodes[n.order] == n`. Parent links
/// are plain ids; ancestry is derived by walking them.
#[derive(Debug, Clone)]
pub struct OutlineStore {
    nodes: Vec<OutlineNode>,
    positions: AHashMap<String, usize>,
}

impl OutlineStore {
    /// Build from a nested section description.
    pub fn build(raw: &RawOutline) -> Result<Self> {
        Self::assemble(&raw.title, &raw.url, raw.flatten())
    }

    /// Build from flat parent-linked records under a default root.
    pub fn from_nodes(nodes: Vec<FlatNode>) -> Result<Self> {
        let root = RawOutline::default();
        Self::assemble(&root.title, &root.url, nodes)
    }

    fn assemble(root_title: &str, root_url: &str, flat: Vec<FlatNode>) -> Result<Self> {
        let start = std::time::Instant::now();

        // Slot 0 is the root; flat[i] lives in slot i + 1 until reordering.
        let mut slots: AHashMap<&str, usize> = AHashMap::with_capacity(flat.len() + 1);
        slots.insert(ROOT_ID, 0);
        for (i, node) in flat.iter().enumerate() {
            if node.id.trim().is_empty() {
                return Err(Error::malformed(format!(
                    "section '{}' has an empty id",
                    node.title
                )));
            }
            if slots.insert(node.id.as_str(), i + 1).is_some() {
                return Err(Error::malformed(format!("duplicate id '{}'", node.id)));
            }
        }

        let mut children: Vec<Vec<usize>> = vec![Vec::new(); flat.len() + 1];
        let mut parents: Vec<Option<usize>> = vec![None; flat.len() + 1];
        for (i, node) in flat.iter().enumerate() {
            let slot = i + 1;
            let parent = match node.parent_id.as_deref() {
                None => 0,
                Some(parent_id) => *slots.get(parent_id).ok_or_else(|| {
                    Error::malformed(format!(
                        "node '{}' references missing parent '{}'",
                        node.id, parent_id
                    ))
                })?,
            };
            if parent == slot {
                return Err(Error::malformed(format!(
                    "node '{}' is its own parent",
                    node.id
                )));
            }
            parents[slot] = Some(parent);
            children[parent].push(slot);
        }

        // Pre-order walk from the root assigns order and depth. Anything left
        // unvisited sits on a parent cycle detached from the root.
        let mut preorder: Vec<(usize, usize)> = Vec::with_capacity(flat.len() + 1);
        let mut stack = vec![(0usize, 0usize)];
        while let Some((slot, depth)) = stack.pop() {
            preorder.push((slot, depth));
            for &child in children[slot].iter().rev() {
                stack.push((child, depth + 1));
            }
        }
        if preorder.len() != flat.len() + 1 {
            let mut seen = vec![false; flat.len() + 1];
            for &(slot, _) in &preorder {
                seen[slot] = true;
            }
            let stranded = seen
                .iter()
                .position(|visited| !visited)
                .map_or_else(String::new, |slot| flat[slot - 1].id.clone());
            return Err(Error::malformed(format!(
                "cycle in parent references involving '{}'",
                stranded
            )));
        }

        let slot_id = |slot: usize| -> String {
            if slot == 0 {
                ROOT_ID.to_string()
            } else {
                flat[slot - 1].id.clone()
            }
        };

        let mut nodes = Vec::with_capacity(preorder.len());
        let mut positions = AHashMap::with_capacity(preorder.len());
        for (order, &(slot, depth)) in preorder.iter().enumerate() {
            let id = slot_id(slot);
            let child_ids = children[slot].iter().map(|&c| slot_id(c)).collect();
            let parent_id = parents[slot].map(slot_id);
            let node = if slot == 0 {
                OutlineNode {
                    id,
                    title: root_title.to_string(),
                    parent_id,
                    children: child_ids,
                    url: root_url.to_string(),
                    text: None,
                    depth,
                    order,
                }
            } else {
                let source = &flat[slot - 1];
                OutlineNode {
                    url: source
                        .url
                        .clone()
                        .unwrap_or_else(|| format!("#{}", source.id)),
                    id,
                    title: source.title.clone(),
                    parent_id,
                    children: child_ids,
                    text: source.text.clone(),
                    depth,
                    order,
                }
            };
            positions.insert(node.id.clone(), order);
            nodes.push(node);
        }

        tracing::info!(
            "Built outline: {} sections, max depth {} in {:?}",
            nodes.len() - 1,
            nodes.iter().map(|n| n.depth).max().unwrap_or(0),
            start.elapsed()
        );

        Ok(Self { nodes, positions })
    }

    /// Look up a node by anchor id.
    pub fn get(&self, id: &str) -> Result<&OutlineNode> {
        self.positions
            .get(id)
            .map(|&pos| &self.nodes[pos])
            .ok_or_else(|| Error::not_found(id))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.positions.contains_key(id)
    }

    /// Ancestor ids from the root down to `id`, inclusive of both ends.
    pub fn path_to(&self, id: &str) -> Result<Vec<String>> {
        let mut node = self.get(id)?;
        let mut path = vec![node.id.clone()];
        while let Some(parent_id) = node.parent_id.as_deref() {
            node = self.get(parent_id)?;
            path.push(node.id.clone());
        }
        path.reverse();
        Ok(path)
    }

    /// Ordered child ids; empty for leaves.
    pub fn children(&self, id: &str) -> Result<&[String]> {
        self.get(id).map(|node| node.children.as_slice())
    }

    pub fn root(&self) -> &OutlineNode {
        &self.nodes[0]
    }

    /// All nodes, root first, in document order.
    pub fn iter(&self) -> impl Iterator<Item = &OutlineNode> {
        self.nodes.iter()
    }

    /// Number of nodes including the synthetic root.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True when the outline has no sections besides the root.
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }
}
