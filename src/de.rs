//! OPML decoding.
//!
//! This module provides the [`Decoder`], which maps markup events from
//! [`quick_xml`] onto the typed [`Document`] tree.
//!
//! ## Overview
//!
//! - **Generic parsing first**: tokenizing, entity unescaping and character
//!   encoding (including encodings declared in the XML prolog) are left to
//!   `quick_xml`. Any failure there is a structural [`Error::Syntax`].
//! - **Semantic mapping second**: head elements and outline attributes are
//!   matched by name and converted with their typed rule. A failed rule is an
//!   [`Error::InvalidField`].
//! - **Recursive descent**: every `outline` element becomes an [`Outline`] whose
//!   children are the nested `outline` elements, in document order.
//!
//! Unknown elements and attributes are skipped. Decoding is all-or-nothing.
//!
//! ## Usage
//!
//! Most users should use the functions in the crate root:
//!
//! ```rust
//! use opml::from_str;
//!
//! let doc = from_str(r#"<opml version="2.0">
//!   <head><title>states.opml</title><expansionState>1, 6, 13</expansionState></head>
//!   <body><outline text="United States"><outline text="Far West"/></outline></body>
//! </opml>"#).unwrap();
//!
//! assert_eq!(doc.title.as_deref(), Some("states.opml"));
//! assert_eq!(doc.expansion_state, Some(vec![1, 6, 13]));
//! assert_eq!(doc.outlines[0].outlines[0].text, "Far West");
//! ```

use crate::error::{Error, Result, Rule};
use crate::list::parse_expansion_state;
use crate::{AttrMap, Document, Link, Outline, Timestamp};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// The OPML decoder.
///
/// Holds the whole input in memory. Created via [`Decoder::from_slice`] or
/// [`Decoder::from_str`] and consumed by [`Decoder::decode`].
pub struct Decoder<'a> {
    reader: Reader<&'a [u8]>,
    input: &'a [u8],
}

impl<'a> Decoder<'a> {
    /// Decodes raw bytes. The character encoding is taken from a byte order
    /// mark or the XML prolog, defaulting to UTF-8.
    pub fn from_slice(input: &'a [u8]) -> Self {
        Decoder {
            reader: Reader::from_reader(input),
            input,
        }
    }

    /// Decodes text that is already UTF-8; an `encoding` declared in the
    /// prolog is ignored.
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(input: &'a str) -> Self {
        Decoder {
            reader: Reader::from_str(input),
            input: input.as_bytes(),
        }
    }

    /// Reads the root `opml` element and everything below it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Syntax`] for malformed markup or a foreign root element,
    /// [`Error::InvalidField`] or [`Error::MissingField`] when a field fails validation.
    pub fn decode(mut self) -> Result<Document> {
        loop {
            match self.next()? {
                Event::Start(e) => {
                    self.expect_root(&e)?;
                    let doc = self.document(&e, false)?;
                    return Ok(finish(doc));
                }
                Event::Empty(e) => {
                    self.expect_root(&e)?;
                    let doc = self.document(&e, true)?;
                    return Ok(finish(doc));
                }
                Event::Text(t) if t.iter().all(u8::is_ascii_whitespace) => {}
                Event::Text(_) | Event::CData(_) => {
                    return Err(self.syntax("text outside of the root element"))
                }
                Event::End(_) => return Err(self.syntax("closing tag without an opening tag")),
                Event::Eof => return Err(self.syntax("document has no root element")),
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) | Event::Comment(_) => {}
            }
        }
    }

    fn next(&mut self) -> Result<Event<'a>> {
        match self.reader.read_event() {
            Ok(event) => Ok(event),
            Err(err) => Err(self.syntax(&err.to_string())),
        }
    }

    /// Builds a structural error positioned at the reader's current offset.
    fn syntax(&self, msg: &str) -> Error {
        let pos = self.reader.buffer_position().min(self.input.len());
        let consumed = &self.input[..pos];
        let line = consumed.iter().filter(|&&b| b == b'\n').count() + 1;
        let line_start = consumed
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        Error::syntax(line, pos - line_start + 1, msg)
    }

    fn eof(&self, inside: &str) -> Error {
        self.syntax(&format!("unexpected end of document inside <{}>", inside))
    }

    fn expect_root(&self, start: &BytesStart<'_>) -> Result<()> {
        if start.local_name().as_ref() == b"opml" {
            Ok(())
        } else {
            let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
            Err(self.syntax(&format!("expected root element <opml>, found <{}>", name)))
        }
    }

    fn attributes(&self, start: &BytesStart<'_>, element: &str) -> Result<AttrMap> {
        let mut attrs = AttrMap::new(element);
        for attr in start.attributes() {
            let attr = attr.map_err(|e| self.syntax(&e.to_string()))?;
            let key = self
                .reader
                .decoder()
                .decode(attr.key.local_name().as_ref())
                .map_err(|e| self.syntax(&e.to_string()))?
                .into_owned();
            let value = attr
                .decode_and_unescape_value(&self.reader)
                .map_err(|e| self.syntax(&e.to_string()))?
                .into_owned();
            attrs.insert(key, value);
        }
        Ok(attrs)
    }

    fn skip(&mut self, start: &BytesStart<'_>) -> Result<()> {
        match self.reader.read_to_end(start.name()) {
            Ok(_) => Ok(()),
            Err(err) => Err(self.syntax(&err.to_string())),
        }
    }

    fn document(&mut self, root: &BytesStart<'_>, empty: bool) -> Result<Document> {
        let mut attrs = self.attributes(root, "opml")?;
        let mut doc = Document::new(attrs.take_required("version")?);
        if empty {
            return Ok(doc);
        }

        loop {
            match self.next()? {
                Event::Start(e) => match e.local_name().as_ref() {
                    b"head" => self.head(&mut doc)?,
                    b"body" => {
                        let outlines = self.outlines("body")?;
                        doc.outlines.extend(outlines);
                    }
                    _ => self.skip(&e)?,
                },
                Event::End(_) => return Ok(doc),
                Event::Eof => return Err(self.eof("opml")),
                _ => {}
            }
        }
    }

    fn head(&mut self, doc: &mut Document) -> Result<()> {
        loop {
            match self.next()? {
                Event::Start(e) => {
                    let value = self.text_content(&e)?;
                    head_field(doc, e.local_name().as_ref(), value)?;
                }
                Event::Empty(e) => head_field(doc, e.local_name().as_ref(), String::new())?,
                Event::End(_) => return Ok(()),
                Event::Eof => return Err(self.eof("head")),
                _ => {}
            }
        }
    }

    /// Collects the character data of a leaf element, skipping any nested markup.
    fn text_content(&mut self, start: &BytesStart<'_>) -> Result<String> {
        let mut content = String::new();
        loop {
            match self.next()? {
                Event::Text(t) => {
                    let text = t.unescape().map_err(|e| self.syntax(&e.to_string()))?;
                    content.push_str(&text);
                }
                Event::CData(c) => {
                    let text = self
                        .reader
                        .decoder()
                        .decode(&c)
                        .map_err(|e| self.syntax(&e.to_string()))?;
                    content.push_str(&text);
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => return Ok(content),
                Event::Eof => {
                    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
                    return Err(self.eof(&name));
                }
                _ => {}
            }
        }
    }

    /// Reads sibling `outline` elements until the enclosing element closes.
    fn outlines(&mut self, parent: &str) -> Result<Vec<Outline>> {
        let mut outlines = Vec::new();
        loop {
            match self.next()? {
                Event::Start(e) if e.local_name().as_ref() == b"outline" => {
                    outlines.push(self.outline(&e, false)?);
                }
                Event::Empty(e) if e.local_name().as_ref() == b"outline" => {
                    outlines.push(self.outline(&e, true)?);
                }
                Event::Start(e) => self.skip(&e)?,
                Event::End(_) => return Ok(outlines),
                Event::Eof => return Err(self.eof(parent)),
                _ => {}
            }
        }
    }

    fn outline(&mut self, start: &BytesStart<'_>, empty: bool) -> Result<Outline> {
        let mut attrs = self.attributes(start, "outline")?;

        let mut outline = Outline::new(attrs.take_required("text")?);
        outline.kind = attrs.take("type");
        outline.is_comment = attrs.take_bool("isComment")?;
        outline.is_breakpoint = attrs.take_bool("isBreakpoint")?;
        outline.created = attrs.take_timestamp("created")?;
        outline.categories = attrs.take_categories("category");
        outline.xml_url = attrs.take_url("xmlUrl")?;
        outline.description = attrs.take("description");
        outline.html_url = attrs.take_url("htmlUrl")?;
        outline.language = attrs.take("language");
        outline.title = attrs.take("title");
        outline.version = attrs.take("version");
        outline.url = attrs.take_url("url")?;

        if !attrs.is_empty() {
            tracing::trace!(
                text = %outline.text,
                ignored = ?attrs.keys().collect::<Vec<_>>(),
                "skipping unmodelled outline attributes"
            );
        }

        if !empty {
            outline.outlines = self.outlines("outline")?;
        }
        Ok(outline)
    }
}

fn finish(doc: Document) -> Document {
    tracing::debug!(
        version = %doc.version,
        outlines = doc.outline_count(),
        "decoded OPML document"
    );
    doc
}

fn head_field(doc: &mut Document, name: &[u8], value: String) -> Result<()> {
    match name {
        b"title" => doc.title = Some(value),
        b"dateCreated" => doc.date_created = typed(&value, "head/dateCreated", parse_timestamp)?,
        b"dateModified" => {
            doc.date_modified = typed(&value, "head/dateModified", parse_timestamp)?
        }
        b"ownerName" => doc.owner_name = Some(value),
        b"ownerEmail" => doc.owner_email = Some(value),
        b"ownerId" => doc.owner_id = typed(&value, "head/ownerId", parse_link)?,
        b"docs" => doc.docs = typed(&value, "head/docs", parse_link)?,
        b"expansionState" => {
            doc.expansion_state = Some(parse_expansion_state(&value, "head/expansionState")?)
        }
        b"vertScrollState" => {
            doc.vert_scroll_state = typed(&value, "head/vertScrollState", parse_int)?
        }
        b"windowTop" => doc.window_top = typed(&value, "head/windowTop", parse_int)?,
        b"windowLeft" => doc.window_left = typed(&value, "head/windowLeft", parse_int)?,
        b"windowBottom" => doc.window_bottom = typed(&value, "head/windowBottom", parse_int)?,
        b"windowRight" => doc.window_right = typed(&value, "head/windowRight", parse_int)?,
        other => tracing::trace!(
            element = %String::from_utf8_lossy(other),
            "skipping unmodelled head element"
        ),
    }
    Ok(())
}

/// Applies a typed rule to a value; blank content counts as absent.
pub(crate) fn typed<T>(
    value: &str,
    field: &str,
    rule: fn(&str, &str) -> Result<T>,
) -> Result<Option<T>> {
    if value.trim().is_empty() {
        Ok(None)
    } else {
        rule(value, field).map(Some)
    }
}

pub(crate) fn parse_int(value: &str, field: &str) -> Result<i32> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::invalid_field(field, value, Rule::Integer))
}

/// Markup boolean convention.
pub(crate) fn parse_bool(value: &str, field: &str) -> Result<bool> {
    match value.trim() {
        "1" | "t" | "T" | "true" | "TRUE" | "True" => Ok(true),
        "0" | "f" | "F" | "false" | "FALSE" | "False" => Ok(false),
        _ => Err(Error::invalid_field(field, value, Rule::Boolean)),
    }
}

pub(crate) fn parse_timestamp(value: &str, field: &str) -> Result<Timestamp> {
    value
        .parse()
        .map_err(|_| Error::invalid_field(field, value, Rule::Timestamp))
}

pub(crate) fn parse_link(value: &str, field: &str) -> Result<Link> {
    Link::parse(value.trim()).map_err(|_| Error::invalid_field(field, value, Rule::Url))
}
