//! The typed OPML tree.
//!
//! A [`Document`] holds the head metadata and an ordered list of top-level
//! [`Outline`] nodes. Each outline exclusively owns its children. Nothing here
//! knows about the markup syntax; see [`de`](crate::de) and [`ser`](crate::ser).
//!
//! Fields that may be missing on the wire are `Option`s, so a missing field and
//! an empty one stay distinct. Two exceptions follow the wire format:
//!
//! - [`Outline::categories`] is a plain `Vec`; an empty list means "no
//!   `category` attribute".
//! - [`Outline::outlines`] and [`Document::outlines`] are plain `Vec`s; an
//!   empty list means "no child elements".
//!
//! Equality is structural over the whole tree. Timestamps compare by instant.
//!
//! ## Examples
//!
//! ```rust
//! use opml::{Document, Outline};
//!
//! let mut doc = Document::new("2.0");
//! doc.title = Some("Feeds".to_string());
//! doc.outlines.push(
//!     Outline::new("Tech")
//!         .with_outline(Outline::new("Scripting News").with_type("rss")),
//! );
//!
//! assert_eq!(doc.outline_count(), 2);
//! ```

use crate::{Link, Timestamp};
use serde::{Deserialize, Serialize};

/// A whole OPML document: the root `opml` element with its head and body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    /// `version` attribute of the root element.
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_modified: Option<Timestamp>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub docs: Option<Link>,
    /// Indices of outlines shown expanded, in order.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansion_state: Option<Vec<i32>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vert_scroll_state: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_top: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_left: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_bottom: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_right: Option<i32>,
    /// Top-level outlines in document order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outlines: Vec<Outline>,
}

impl Document {
    /// Creates an empty document with the given format version.
    #[must_use]
    pub fn new(version: impl Into<String>) -> Self {
        Document {
            version: version.into(),
            title: None,
            date_created: None,
            date_modified: None,
            owner_name: None,
            owner_email: None,
            owner_id: None,
            docs: None,
            expansion_state: None,
            vert_scroll_state: None,
            window_top: None,
            window_left: None,
            window_bottom: None,
            window_right: None,
            outlines: Vec::new(),
        }
    }

    /// Number of outlines in the whole tree, at any depth.
    #[must_use]
    pub fn outline_count(&self) -> usize {
        self.outlines.iter().map(Outline::node_count).sum()
    }
}

impl Default for Document {
    fn default() -> Self {
        Document::new("2.0")
    }
}

/// One node of the outline tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outline {
    /// Display text, the only mandatory field.
    pub text: String,
    /// Free-form node type such as `rss`, `link` or `include`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(default)]
    pub is_comment: bool,
    #[serde(default)]
    pub is_breakpoint: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<Timestamp>,
    /// Slash-delimited category paths, in attribute order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub categories: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xml_url: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub html_url: Option<Link>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    /// Target of `link` and `include` nodes.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<Link>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub outlines: Vec<Outline>,
}

impl Outline {
    /// Creates a leaf outline with only its display text set.
    #[must_use]
    pub fn new(text: impl Into<String>) -> Self {
        Outline {
            text: text.into(),
            kind: None,
            is_comment: false,
            is_breakpoint: false,
            created: None,
            categories: Vec::new(),
            xml_url: None,
            description: None,
            html_url: None,
            language: None,
            title: None,
            version: None,
            url: None,
            outlines: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_type(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub fn with_created(mut self, created: Timestamp) -> Self {
        self.created = Some(created);
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.categories.push(category.into());
        self
    }

    #[must_use]
    pub fn with_xml_url(mut self, url: impl Into<Link>) -> Self {
        self.xml_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_html_url(mut self, url: impl Into<Link>) -> Self {
        self.html_url = Some(url.into());
        self
    }

    #[must_use]
    pub fn with_url(mut self, url: impl Into<Link>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Appends a child, keeping insertion order.
    #[must_use]
    pub fn with_outline(mut self, child: Outline) -> Self {
        self.outlines.push(child);
        self
    }

    #[must_use]
    pub fn is_leaf(&self) -> bool {
        self.outlines.is_empty()
    }

    /// This node plus all of its descendants.
    #[must_use]
    pub fn node_count(&self) -> usize {
        1 + self.outlines.iter().map(Outline::node_count).sum::<usize>()
    }

    /// Depth of the subtree rooted here; a leaf has depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        1 + self.outlines.iter().map(Outline::depth).max().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn tree() -> Outline {
        Outline::new("United States").with_outline(
            Outline::new("Far West")
                .with_outline(Outline::new("Alaska"))
                .with_outline(Outline::new("Nevada").with_outline(Outline::new("Reno"))),
        )
    }

    #[test]
    fn test_counts_and_depth() {
        let root = tree();
        assert_eq!(root.node_count(), 5);
        assert_eq!(root.depth(), 4);
        assert!(!root.is_leaf());
        assert!(Outline::new("x").is_leaf());

        let mut doc = Document::default();
        doc.outlines.push(root);
        doc.outlines.push(Outline::new("Canada"));
        assert_eq!(doc.outline_count(), 6);
        assert_eq!(doc.version, "2.0");
    }

    #[test]
    fn test_structural_equality_is_order_sensitive() {
        let ab = Outline::new("p")
            .with_outline(Outline::new("a"))
            .with_outline(Outline::new("b"));
        let ba = Outline::new("p")
            .with_outline(Outline::new("b"))
            .with_outline(Outline::new("a"));
        assert_ne!(ab, ba);
        assert_eq!(ab, ab.clone());
    }

    #[test]
    fn test_serde_json_skips_absent_fields() {
        let outline = Outline::new("Scripting News")
            .with_type("rss")
            .with_xml_url(Url::parse("http://www.scripting.com/rss.xml").unwrap());
        let json = serde_json::to_value(&outline).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "text": "Scripting News",
                "type": "rss",
                "isComment": false,
                "isBreakpoint": false,
                "xmlUrl": "http://www.scripting.com/rss.xml",
            })
        );
        let back: Outline = serde_json::from_value(json).unwrap();
        assert_eq!(back, outline);
    }
}
