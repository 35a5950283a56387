//! Loading outlines from documentation build output.
//!
//! Two formats are understood:
//! - The JSON form of [`RawOutline`] (nested `sections`).
//! - Doxygen's `navtreedata.js`, whose `NAVTREE` variable holds nested
//!   `[title, url, children | null]` arrays.

use super::raw::{RawOutline, RawSection};
use anyhow::{Context, Result, anyhow, bail};
use regex::Regex;
use serde_json::Value;
use std::path::Path;
use std::sync::LazyLock;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

static NUMERIC_ENTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"&#(?:[xX]([0-9a-fA-F]{1,6})|([0-9]{1,7}));").expect("entity pattern is valid")
});

/// Load an outline file, picking the parser from its content.
pub fn load(path: &Path) -> Result<RawOutline> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read outline file {}", path.display()))?;

    let parsed = if source.contains("var NAVTREE") {
        parse_navtree(&source)
    } else {
        RawOutline::from_json(&source).map_err(anyhow::Error::from)
    };
    let outline =
        parsed.with_context(|| format!("Failed to parse outline file {}", path.display()))?;

    tracing::debug!(
        "Loaded outline from {} ({} top-level sections)",
        path.display(),
        outline.sections.len()
    );
    Ok(outline)
}

/// Parse the `NAVTREE` array out of a Doxygen `navtreedata.js` script.
///
/// The single top-level entry becomes the root's title and url; its children
/// become the outline's sections.
pub fn parse_navtree(source: &str) -> Result<RawOutline> {
    let decl = source
        .find("var NAVTREE")
        .ok_or_else(|| anyhow!("no NAVTREE declaration found"))?;
    let array_start = source[decl..]
        .find('[')
        .map(|offset| decl + offset)
        .ok_or_else(|| anyhow!("NAVTREE declaration has no array"))?;

    // The array literal is valid JSON; the stream deserializer stops at its end.
    let tree: Value = serde_json::Deserializer::from_str(&source[array_start..])
        .into_iter::<Value>()
        .next()
        .ok_or_else(|| anyhow!("NAVTREE array is empty"))?
        .context("NAVTREE array is not valid JSON")?;

    let entries = tree
        .as_array()
        .ok_or_else(|| anyhow!("NAVTREE is not an array"))?;
    let [root] = entries.as_slice() else {
        bail!(
            "NAVTREE should hold exactly one root entry, found {}",
            entries.len()
        );
    };

    let (title, url, children) = split_entry(root)?;
    Ok(RawOutline {
        title: clean_title(title),
        url: url.unwrap_or("index.html").to_string(),
        sections: children
            .iter()
            .map(convert_entry)
            .collect::<Result<Vec<_>>>()?,
    })
}

fn convert_entry(entry: &Value) -> Result<RawSection> {
    let (title, url, children) = split_entry(entry)?;
    let url = url.ok_or_else(|| anyhow!("section '{}' has no url", title))?;
    Ok(RawSection {
        id: anchor_from_url(url),
        title: clean_title(title),
        text: None,
        url: Some(url.trim_start_matches("../").to_string()),
        children: children
            .iter()
            .map(convert_entry)
            .collect::<Result<Vec<_>>>()?,
    })
}

fn split_entry(entry: &Value) -> Result<(&str, Option<&str>, &[Value])> {
    let fields = entry
        .as_array()
        .ok_or_else(|| anyhow!("NAVTREE entry is not an array: {}", entry))?;
    let title = fields
        .first()
        .and_then(Value::as_str)
        .ok_or_else(|| anyhow!("NAVTREE entry has no title: {}", entry))?;
    let url = fields.get(1).and_then(Value::as_str);
    let children = match fields.get(2) {
        Some(Value::Array(children)) => children.as_slice(),
        Some(Value::Null) | None => &[],
        Some(other) => bail!("unexpected children for '{}': {}", title, other),
    };
    Ok((title, url, children))
}

/// Anchor id for a page url: the fragment, or the page name without extension.
pub fn anchor_from_url(url: &str) -> String {
    let url = url.trim_start_matches("../");
    if let Some((_, fragment)) = url.split_once('#')
        && !fragment.is_empty()
    {
        return fragment.to_string();
    }
    let page = url.split('#').next().unwrap_or(url);
    page.strip_suffix(".html").unwrap_or(page).to_string()
}

/// Strip inline HTML tags and decode the entities Doxygen emits in titles.
pub fn clean_title(title: &str) -> String {
    let stripped = HTML_TAG.replace_all(title, "");
    decode_entities(&stripped).trim().to_string()
}

fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }
    let named = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&nbsp;", " ");
    let numeric = NUMERIC_ENTITY.replace_all(&named, |caps: &regex::Captures<'_>| {
        let code = match (caps.get(1), caps.get(2)) {
            (Some(hex), _) => u32::from_str_radix(hex.as_str(), 16).ok(),
            (_, Some(dec)) => dec.as_str().parse().ok(),
            _ => None,
        };
        match code.and_then(char::from_u32) {
            Some('\u{a0}') => " ".to_string(),
            Some(c) => c.to_string(),
            // Not a valid scalar value; keep the reference as written.
            None => caps[0].to_string(),
        }
    });
    // Last, so "&amp;lt;" decodes to "&lt;" rather than "<".
    numeric.replace("&amp;", "&")
}
