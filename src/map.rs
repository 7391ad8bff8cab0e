//! Ordered attribute map for one markup element.
//!
//! The decoder collects an element's attributes into an [`AttrMap`] and then
//! *takes* the fields it knows, converting each with its typed rule. Whatever
//! is left afterwards is an attribute this crate does not model.
//!
//! [`IndexMap`] keeps attributes in document order, so leftovers are reported
//! in the order they were written.
//!
//! ## Examples
//!
//! ```rust
//! use opml::AttrMap;
//!
//! let mut attrs = AttrMap::new("outline");
//! attrs.insert("text".to_string(), "Scripting News".to_string());
//! attrs.insert("isComment".to_string(), "true".to_string());
//! attrs.insert("color".to_string(), "red".to_string());
//!
//! assert_eq!(attrs.take_required("text").unwrap(), "Scripting News");
//! assert!(attrs.take_bool("isComment").unwrap());
//! assert_eq!(attrs.keys().collect::<Vec<_>>(), vec!["color"]);
//! ```

use crate::de::{parse_bool, parse_link, parse_timestamp, typed};
use crate::error::{Error, Result};
use crate::list::parse_categories;
use crate::{Link, Timestamp};
use indexmap::IndexMap;

/// Attributes of a single element, keyed by name in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct AttrMap {
    element: String,
    entries: IndexMap<String, String>,
}

impl AttrMap {
    /// Creates an empty map for the named element. The name only shows up in errors.
    #[must_use]
    pub fn new(element: impl Into<String>) -> Self {
        AttrMap {
            element: element.into(),
            entries: IndexMap::new(),
        }
    }

    /// Inserts an attribute, returning the previous value for the same name.
    pub fn insert(&mut self, name: String, value: String) -> Option<String> {
        self.entries.insert(name, value)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names of the attributes not yet taken, in document order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, String, String> {
        self.entries.keys()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, String> {
        self.entries.iter()
    }

    /// Error path for an attribute of this element, e.g. `outline/@created`.
    #[must_use]
    pub fn field(&self, name: &str) -> String {
        format!("{}/@{}", self.element, name)
    }

    /// Removes and returns a raw string attribute.
    pub fn take(&mut self, name: &str) -> Option<String> {
        self.entries.shift_remove(name)
    }

    /// Removes a mandatory attribute.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingField`] if the attribute is absent.
    pub fn take_required(&mut self, name: &str) -> Result<String> {
        let field = self.field(name);
        self.take(name).ok_or_else(|| Error::missing_field(&field))
    }

    /// Removes a boolean attribute; absent means `false`.
    pub fn take_bool(&mut self, name: &str) -> Result<bool> {
        let field = self.field(name);
        match self.take(name) {
            Some(value) => parse_bool(&value, &field),
            None => Ok(false),
        }
    }

    /// Removes a timestamp attribute; absent or blank means `None`.
    pub fn take_timestamp(&mut self, name: &str) -> Result<Option<Timestamp>> {
        let field = self.field(name);
        match self.take(name) {
            Some(value) => typed(&value, &field, parse_timestamp),
            None => Ok(None),
        }
    }

    /// Removes a link attribute, absolute or relative; absent or blank means `None`.
    pub fn take_url(&mut self, name: &str) -> Result<Option<Link>> {
        let field = self.field(name);
        match self.take(name) {
            Some(value) => typed(&value, &field, parse_link),
            None => Ok(None),
        }
    }

    /// Removes a comma-list attribute; absent means an empty list.
    pub fn take_categories(&mut self, name: &str) -> Vec<String> {
        self.take(name)
            .map(|value| parse_categories(&value))
            .unwrap_or_default()
    }
}

impl IntoIterator for AttrMap {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ErrorKind, Rule};

    fn attrs(pairs: &[(&str, &str)]) -> AttrMap {
        let mut map = AttrMap::new("outline");
        for (k, v) in pairs {
            map.insert(k.to_string(), v.to_string());
        }
        map
    }

    #[test]
    fn test_take_removes_entries() {
        let mut map = attrs(&[("text", "a"), ("type", "rss"), ("x", "1")]);
        assert_eq!(map.len(), 3);
        assert_eq!(map.take("type").as_deref(), Some("rss"));
        assert_eq!(map.take("type"), None);
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["text", "x"]);
    }

    #[test]
    fn test_missing_required() {
        let err = attrs(&[]).take_required("text").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::FieldValidation);
        assert!(err.to_string().contains("outline/@text"));
    }

    #[test]
    fn test_typed_takes() {
        let mut map = attrs(&[
            ("isBreakpoint", " 1 "),
            ("created", "Mon, 31 Oct 2005 18:21:33 GMT"),
            ("url", "http://hosting.opml.org/dave/florida.opml"),
            ("category", "/a, ,/b"),
            ("htmlUrl", " /blog/ "),
        ]);
        assert!(map.take_bool("isBreakpoint").unwrap());
        assert!(!map.take_bool("isComment").unwrap());
        assert!(map.take_timestamp("created").unwrap().is_some());
        assert_eq!(
            map.take_url("url").unwrap().unwrap().as_str(),
            "http://hosting.opml.org/dave/florida.opml"
        );
        assert_eq!(map.take_categories("category"), vec!["/a", "/b"]);
        assert_eq!(
            map.take_url("htmlUrl").unwrap(),
            Some(Link::Relative("/blog/".to_string()))
        );
        assert!(map.take_categories("category").is_empty());
        assert!(map.is_empty());
    }

    #[test]
    fn test_typed_take_errors_name_the_rule() {
        let err = attrs(&[("isComment", "yes")]).take_bool("isComment").unwrap_err();
        assert_eq!(err.rule(), Some(Rule::Boolean));

        let err = attrs(&[("xmlUrl", "not a url")]).take_url("xmlUrl").unwrap_err();
        assert_eq!(err.rule(), Some(Rule::Url));

        let err = attrs(&[("htmlUrl", "/bad%zz")]).take_url("htmlUrl").unwrap_err();
        assert_eq!(err.rule(), Some(Rule::Url));
    }
}
