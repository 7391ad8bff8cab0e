//! Configuration options for OPML encoding.
//!
//! Decoding has no knobs. Encoding can be tuned with [`EncodeOptions`]:
//!
//! - `pretty`: put nested elements on their own indented lines
//! - `indent`: spaces per nesting level when pretty-printing
//! - `declaration`: emit the `<?xml ...?>` prolog
//!
//! Options only change layout whitespace and the prolog; the decoded
//! [`Document`](crate::Document) is the same either way.
//!
//! ## Examples
//!
//! ```rust
//! use opml::{to_string_with_options, Document, EncodeOptions};
//!
//! let doc = Document::new("2.0");
//! let options = EncodeOptions::new().without_declaration();
//! let xml = to_string_with_options(&doc, options).unwrap();
//! assert_eq!(xml, r#"<opml version="2.0"><head/><body/></opml>"#);
//! ```

/// Configuration options for OPML encoding.
///
/// # Examples
///
/// ```rust
/// use opml::EncodeOptions;
///
/// // Compact, with prolog
/// let options = EncodeOptions::new();
///
/// // Indented with 2 spaces
/// let options = EncodeOptions::pretty();
///
/// // Indented with 4 spaces, no prolog
/// let options = EncodeOptions::pretty().with_indent(4).without_declaration();
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EncodeOptions {
    pub indent: usize,
    pub pretty: bool,
    pub declaration: bool,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        EncodeOptions {
            indent: 2,
            pretty: false,
            declaration: true,
        }
    }
}

impl EncodeOptions {
    /// Creates default options (compact output, XML prolog, 2-space indent when pretty).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opml::EncodeOptions;
    ///
    /// let options = EncodeOptions::new();
    /// assert_eq!(options.indent, 2);
    /// assert!(!options.pretty);
    /// assert!(options.declaration);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates options for indented output.
    #[must_use]
    pub fn pretty() -> Self {
        EncodeOptions {
            pretty: true,
            ..Default::default()
        }
    }

    /// Sets the number of spaces per nesting level. Only affects pretty output.
    #[must_use]
    pub fn with_indent(mut self, indent: usize) -> Self {
        self.indent = indent;
        self
    }

    /// Omits the `<?xml version="1.0" encoding="UTF-8"?>` prolog.
    #[must_use]
    pub fn without_declaration(mut self) -> Self {
        self.declaration = false;
        self
    }
}
