//! Input shapes accepted by the outline store.

use serde::{Deserialize, Serialize};

/// Nested section description as emitted by the documentation build step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawSection {
    /// Stable anchor identifying the section
    pub id: String,
    pub title: String,
    /// Optional body-text excerpt indexed alongside the title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Page location; defaults to `#<id>` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Child sections in reading order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<RawSection>,
}

impl RawSection {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: None,
            url: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: Vec<Self>) -> Self {
        self.children = children;
        self
    }
}

/// A complete outline: the synthetic root's title/url plus its top-level sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawOutline {
    #[serde(default = "default_root_title")]
    pub title: String,
    #[serde(default = "default_root_url")]
    pub url: String,
    #[serde(default)]
    pub sections: Vec<RawSection>,
}

fn default_root_title() -> String {
    "Documentation".to_string()
}

fn default_root_url() -> String {
    "index.html".to_string()
}

impl Default for RawOutline {
    fn default() -> Self {
        Self {
            title: default_root_title(),
            url: default_root_url(),
            sections: Vec::new(),
        }
    }
}

impl RawOutline {
    pub fn new(sections: Vec<RawSection>) -> Self {
        Self {
            sections,
            ..Self::default()
        }
    }

    /// Parse the JSON form of an outline.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Flatten into parent-linked records in pre-order (document order).
    pub fn flatten(&self) -> Vec<FlatNode> {
        let mut out = Vec::new();
        for section in &self.sections {
            flatten_into(section, None, &mut out);
        }
        out
    }
}

fn flatten_into(section: &RawSection, parent: Option<&str>, out: &mut Vec<FlatNode>) {
    out.push(FlatNode {
        id: section.id.clone(),
        title: section.title.clone(),
        parent_id: parent.map(str::to_string),
        text: section.text.clone(),
        url: section.url.clone(),
    });
    for child in &section.children {
        flatten_into(child, Some(&section.id), out);
    }
}

/// A single outline record with an explicit parent reference.
///
/// `parent_id == None` attaches the node to the synthetic root. Records are
/// given in document order; sibling order follows input order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatNode {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub parent_id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl FlatNode {
    pub fn new(id: impl Into<String>, title: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            parent_id: parent_id.map(str::to_string),
            text: None,
            url: None,
        }
    }
}
