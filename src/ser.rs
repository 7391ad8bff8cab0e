//! OPML encoding.
//!
//! This module provides the [`Encoder`], which writes a [`Document`] as OPML
//! markup through a [`quick_xml::Writer`].
//!
//! ## Overview
//!
//! The encoder is the field-by-field inverse of the [`Decoder`](crate::Decoder):
//!
//! - **Absent fields are omitted**: `None`, `false`, empty category lists and
//!   empty or missing expansion states produce no markup at all.
//! - **One timestamp layout**: every timestamp is written in the RFC 1123 form
//!   in GMT, whatever layout it was read from.
//! - **Leaves are self-closing**: an outline without children is written as
//!   `<outline .../>`.
//!
//! The mapping itself cannot fail; the only errors come from the sink.
//!
//! ## Usage
//!
//! ```rust
//! use opml::{to_string_with_options, Document, EncodeOptions, Outline};
//!
//! let mut doc = Document::new("2.0");
//! doc.outlines.push(
//!     Outline::new("The Mets are the best team in baseball.")
//!         .with_category("/Philosophy/Baseball/Mets")
//!         .with_category("/Tourism/New York"),
//! );
//!
//! let xml = to_string_with_options(&doc, EncodeOptions::new().without_declaration()).unwrap();
//! assert_eq!(
//!     xml,
//!     concat!(
//!         r#"<opml version="2.0"><head/><body>"#,
//!         r#"<outline text="The Mets are the best team in baseball." "#,
//!         r#"category="/Philosophy/Baseball/Mets,/Tourism/New York"/>"#,
//!         r#"</body></opml>"#,
//!     )
//! );
//! ```

use crate::error::{Error, Result};
use crate::list::{format_categories, format_expansion_state};
use crate::{Document, EncodeOptions, Outline};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::io::Write;

/// The OPML encoder.
///
/// Wraps an output sink. Created via [`Encoder::new`] with customizable options.
pub struct Encoder<W: Write> {
    writer: Writer<W>,
    options: EncodeOptions,
}

impl<W: Write> Encoder<W> {
    pub fn new(sink: W, options: EncodeOptions) -> Self {
        let writer = if options.pretty {
            Writer::new_with_indent(sink, b' ', options.indent)
        } else {
            Writer::new(sink)
        };
        Encoder { writer, options }
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    /// Writes the whole document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the sink fails.
    pub fn encode(&mut self, doc: &Document) -> Result<()> {
        if self.options.declaration {
            self.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
        }

        let mut root = BytesStart::new("opml");
        root.push_attribute(("version", doc.version.as_str()));
        self.write(Event::Start(root))?;
        self.head(doc)?;
        self.body(doc)?;
        self.write(Event::End(BytesEnd::new("opml")))?;

        tracing::debug!(
            version = %doc.version,
            outlines = doc.outline_count(),
            "encoded OPML document"
        );
        Ok(())
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::io(&e.to_string()))
    }

    fn head(&mut self, doc: &Document) -> Result<()> {
        let fields = head_fields(doc);
        if fields.is_empty() {
            return self.write(Event::Empty(BytesStart::new("head")));
        }

        self.write(Event::Start(BytesStart::new("head")))?;
        for (name, value) in &fields {
            self.text_element(name, value)?;
        }
        self.write(Event::End(BytesEnd::new("head")))
    }

    fn text_element(&mut self, name: &str, value: &str) -> Result<()> {
        // An empty value still marks the field as present.
        if value.is_empty() {
            return self.write(Event::Empty(BytesStart::new(name)));
        }
        self.write(Event::Start(BytesStart::new(name)))?;
        self.write(Event::Text(BytesText::new(value)))?;
        self.write(Event::End(BytesEnd::new(name)))
    }

    fn body(&mut self, doc: &Document) -> Result<()> {
        if doc.outlines.is_empty() {
            return self.write(Event::Empty(BytesStart::new("body")));
        }

        self.write(Event::Start(BytesStart::new("body")))?;
        for outline in &doc.outlines {
            self.outline(outline)?;
        }
        self.write(Event::End(BytesEnd::new("body")))
    }

    fn outline(&mut self, outline: &Outline) -> Result<()> {
        let element = outline_element(outline);
        if outline.outlines.is_empty() {
            return self.write(Event::Empty(element));
        }

        self.write(Event::Start(element))?;
        for child in &outline.outlines {
            self.outline(child)?;
        }
        self.write(Event::End(BytesEnd::new("outline")))
    }
}

/// Head sub-elements in output order, absent ones left out.
fn head_fields(doc: &Document) -> Vec<(&'static str, String)> {
    let mut fields = Vec::with_capacity(13);
    let mut push = |name: &'static str, value: Option<String>| {
        if let Some(value) = value {
            fields.push((name, value));
        }
    };

    push("title", doc.title.clone());
    push("dateCreated", doc.date_created.map(|ts| ts.to_string()));
    push("dateModified", doc.date_modified.map(|ts| ts.to_string()));
    push("ownerName", doc.owner_name.clone());
    push("ownerEmail", doc.owner_email.clone());
    push("ownerId", doc.owner_id.as_ref().map(|u| u.to_string()));
    push("docs", doc.docs.as_ref().map(|u| u.to_string()));
    push(
        "expansionState",
        doc.expansion_state
            .as_deref()
            .filter(|state| !state.is_empty())
            .map(format_expansion_state),
    );
    push("vertScrollState", doc.vert_scroll_state.map(|n| n.to_string()));
    push("windowTop", doc.window_top.map(|n| n.to_string()));
    push("windowLeft", doc.window_left.map(|n| n.to_string()));
    push("windowBottom", doc.window_bottom.map(|n| n.to_string()));
    push("windowRight", doc.window_right.map(|n| n.to_string()));
    fields
}

fn outline_element(outline: &Outline) -> BytesStart<'static> {
    let mut element = BytesStart::new("outline");
    element.push_attribute(("text", outline.text.as_str()));
    if let Some(kind) = &outline.kind {
        element.push_attribute(("type", kind.as_str()));
    }
    if outline.is_comment {
        element.push_attribute(("isComment", "true"));
    }
    if outline.is_breakpoint {
        element.push_attribute(("isBreakpoint", "true"));
    }
    if let Some(created) = outline.created {
        element.push_attribute(("created", created.to_string().as_str()));
    }
    if !outline.categories.is_empty() {
        element.push_attribute(("category", format_categories(&outline.categories).as_str()));
    }
    if let Some(url) = &outline.xml_url {
        element.push_attribute(("xmlUrl", url.as_str()));
    }
    if let Some(description) = &outline.description {
        element.push_attribute(("description", description.as_str()));
    }
    if let Some(url) = &outline.html_url {
        element.push_attribute(("htmlUrl", url.as_str()));
    }
    if let Some(language) = &outline.language {
        element.push_attribute(("language", language.as_str()));
    }
    if let Some(title) = &outline.title {
        element.push_attribute(("title", title.as_str()));
    }
    if let Some(version) = &outline.version {
        element.push_attribute(("version", version.as_str()));
    }
    if let Some(url) = &outline.url {
        element.push_attribute(("url", url.as_str()));
    }
    element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Link, Timestamp};
    use url::Url;

    fn encode(doc: &Document) -> String {
        let mut encoder = Encoder::new(Vec::new(), EncodeOptions::new().without_declaration());
        encoder.encode(doc).unwrap();
        String::from_utf8(encoder.into_inner()).unwrap()
    }

    #[test]
    fn test_empty_document() {
        assert_eq!(
            encode(&Document::new("2.0")),
            r#"<opml version="2.0"><head/><body/></opml>"#
        );
    }

    #[test]
    fn test_declaration() {
        let mut encoder = Encoder::new(Vec::new(), EncodeOptions::new());
        encoder.encode(&Document::new("1.0")).unwrap();
        let xml = String::from_utf8(encoder.into_inner()).unwrap();
        assert!(xml.starts_with(r#"<?xml version="1.0" encoding="UTF-8"?>"#));
    }

    #[test]
    fn test_head_order_and_formats() {
        let mut doc = Document::new("2.0");
        doc.window_right = Some(479);
        doc.title = Some("states.opml".to_string());
        doc.date_created = Some("2005-03-15T08:35:45-08:00".parse::<Timestamp>().unwrap());
        doc.owner_id = Some(Url::parse("http://www.opml.org/profiles/sendMail?usernum=1").unwrap().into());
        doc.expansion_state = Some(vec![1, 6, 13]);
        doc.vert_scroll_state = Some(0);

        assert_eq!(
            encode(&doc),
            concat!(
                r#"<opml version="2.0"><head>"#,
                "<title>states.opml</title>",
                "<dateCreated>Tue, 15 Mar 2005 16:35:45 GMT</dateCreated>",
                "<ownerId>http://www.opml.org/profiles/sendMail?usernum=1</ownerId>",
                "<expansionState>1,6,13</expansionState>",
                "<vertScrollState>0</vertScrollState>",
                "<windowRight>479</windowRight>",
                "</head><body/></opml>",
            )
        );
    }

    #[test]
    fn test_empty_expansion_state_is_omitted() {
        let mut doc = Document::new("2.0");
        doc.expansion_state = Some(vec![]);
        assert_eq!(encode(&doc), encode(&Document::new("2.0")));
    }

    #[test]
    fn test_empty_string_field_is_kept() {
        let mut doc = Document::new("2.0");
        doc.owner_email = Some(String::new());
        assert_eq!(
            encode(&doc),
            r#"<opml version="2.0"><head><ownerEmail/></head><body/></opml>"#
        );
    }

    #[test]
    fn test_outline_attribute_order_and_escaping() {
        let mut doc = Document::new("2.0");
        doc.outlines.push(
            Outline::new(r#"Tom & "Jerry" <3"#)
                .with_type("link")
                .with_url(Url::parse("http://hosting.opml.org/dave/mySites.opml").unwrap()),
        );
        let mut flagged = Outline::new("Changes");
        flagged.is_comment = true;
        flagged.is_breakpoint = true;
        doc.outlines.push(flagged);

        assert_eq!(
            encode(&doc),
            concat!(
                r#"<opml version="2.0"><head/><body>"#,
                r#"<outline text="Tom &amp; &quot;Jerry&quot; &lt;3" type="link" "#,
                r#"url="http://hosting.opml.org/dave/mySites.opml"/>"#,
                r#"<outline text="Changes" isComment="true" isBreakpoint="true"/>"#,
                "</body></opml>",
            )
        );
    }

    #[test]
    fn test_relative_links_written_verbatim() {
        let mut doc = Document::new("2.0");
        doc.docs = Some(Link::Relative("spec2.html".to_string()));
        doc.outlines
            .push(Outline::new("Blog").with_html_url("/blog/".parse::<Link>().unwrap()));
        assert_eq!(
            encode(&doc),
            concat!(
                r#"<opml version="2.0"><head><docs>spec2.html</docs></head><body>"#,
                r#"<outline text="Blog" htmlUrl="/blog/"/>"#,
                "</body></opml>",
            )
        );
    }

    #[test]
    fn test_children_in_order() {
        let mut doc = Document::new("2.0");
        doc.outlines.push(
            Outline::new("Nevada")
                .with_outline(Outline::new("Reno"))
                .with_outline(Outline::new("Las Vegas")),
        );
        assert_eq!(
            encode(&doc),
            concat!(
                r#"<opml version="2.0"><head/><body>"#,
                r#"<outline text="Nevada"><outline text="Reno"/><outline text="Las Vegas"/></outline>"#,
                "</body></opml>",
            )
        );
    }

    #[test]
    fn test_pretty_output_indents_children() {
        let mut doc = Document::new("2.0");
        doc.title = Some("t".to_string());
        doc.outlines
            .push(Outline::new("a").with_outline(Outline::new("b")));
        let mut encoder = Encoder::new(Vec::new(), EncodeOptions::pretty().without_declaration());
        encoder.encode(&doc).unwrap();
        let xml = String::from_utf8(encoder.into_inner()).unwrap();
        assert!(xml.contains("\n  <head>"));
        assert!(xml.contains("<title>t</title>"));
        assert!(xml.contains("\n      <outline text=\"b\"/>"));
    }

    struct FailingSink;

    impl Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_is_io_error() {
        let mut encoder = Encoder::new(FailingSink, EncodeOptions::new());
        let err = encoder.encode(&Document::new("2.0")).unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Io);
    }
}
