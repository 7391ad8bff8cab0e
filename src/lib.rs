//! # opml
//!
//! Bidirectional conversion between OPML (Outline Processor Markup Language)
//! documents and a typed outline tree.
//!
//! ## What is OPML?
//!
//! OPML is an XML format for outlines. Its most common use is exchanging feed
//! subscription lists between readers, but it also carries directories, scripts,
//! presentations and any other hierarchy of text nodes. A document has a `head`
//! with metadata and a `body` holding a tree of `outline` elements.
//!
//! ## Key Features
//!
//! - **Typed Tree**: timestamps, URLs, integers and booleans are validated on
//!   the way in, not left as strings
//! - **Lenient Timestamps**: fifteen common date layouts are accepted; output is
//!   always RFC 1123 in GMT
//! - **Round Trips**: `decode(encode(doc)) == doc` for every valid tree
//! - **Serde Compatible**: the tree derives `Serialize`/`Deserialize`, so it can
//!   be re-exported as JSON or any other serde format
//! - **No Unsafe Code**: written entirely in safe Rust
//!
//! ## Quick Start
//!
//! Add this to your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! opml = "0.1"
//! ```
//!
//! ### Decoding and Encoding
//!
//! ```rust
//! use opml::{from_str, to_string};
//!
//! let xml = r#"<?xml version="1.0" encoding="UTF-8"?>
//! <opml version="2.0">
//!   <head>
//!     <title>mySubscriptions.opml</title>
//!     <dateCreated>Sat, 18 Jun 2005 12:11:52 GMT</dateCreated>
//!   </head>
//!   <body>
//!     <outline text="CNET News.com" type="rss"
//!              xmlUrl="http://news.com.com/2547-1_3-0-5.xml"/>
//!   </body>
//! </opml>"#;
//!
//! let doc = from_str(xml).unwrap();
//! assert_eq!(doc.title.as_deref(), Some("mySubscriptions.opml"));
//! assert_eq!(doc.outlines[0].kind.as_deref(), Some("rss"));
//!
//! let encoded = to_string(&doc).unwrap();
//! assert_eq!(from_str(&encoded).unwrap(), doc);
//! ```
//!
//! ### Building a Document
//!
//! ```rust
//! use opml::{to_string_pretty, Document, Outline, Url};
//!
//! let mut doc = Document::new("2.0");
//! doc.title = Some("Feeds".to_string());
//! doc.outlines.push(
//!     Outline::new("Scripting News")
//!         .with_type("rss")
//!         .with_xml_url(Url::parse("http://www.scripting.com/rss.xml").unwrap()),
//! );
//!
//! let xml = to_string_pretty(&doc).unwrap();
//! assert!(xml.contains(r#"xmlUrl="http://www.scripting.com/rss.xml""#));
//! ```
//!
//! ## Error Handling
//!
//! Every failure is an [`Error`]. [`Error::kind`] sorts it into one of three
//! groups: malformed markup ([`ErrorKind::Structural`]), a field that failed its
//! type rule or is missing ([`ErrorKind::FieldValidation`]), or a failing
//! reader or writer ([`ErrorKind::Io`]).
//!
//! ## Logging
//!
//! The crate emits [`tracing`](https://docs.rs/tracing) events: `debug` when a
//! document has been decoded or encoded, `trace` for skipped elements and
//! attributes and for the layout a timestamp matched. Nothing is printed unless
//! the application installs a subscriber.
//!
//! ## Wire Format
//!
//! See the [`format`] module for the element and attribute reference.
//!
//! ## Examples
//!
//! See `demos/subscriptions.rs` for a subscription-list walkthrough.
//! Run it with: `cargo run --example subscriptions`

pub mod de;
pub mod error;
pub mod format;
pub mod link;
pub mod list;
pub mod map;
pub mod model;
pub mod options;
pub mod ser;
pub mod timestamp;

pub use de::Decoder;
pub use error::{Error, ErrorKind, Result, Rule};
pub use link::{Link, ParseLinkError};
pub use map::AttrMap;
pub use model::{Document, Outline};
pub use options::EncodeOptions;
pub use ser::Encoder;
pub use timestamp::{Layout, ParseTimestampError, Timestamp, LAYOUTS};
pub use url::Url;

use std::io;

/// Encode a document as a compact OPML string with an XML prolog.
///
/// # Examples
///
/// ```rust
/// use opml::{to_string, Document};
///
/// let xml = to_string(&Document::new("2.0")).unwrap();
/// assert_eq!(
///     xml,
///     r#"<?xml version="1.0" encoding="UTF-8"?><opml version="2.0"><head/><body/></opml>"#
/// );
/// ```
///
/// # Errors
///
/// Encoding into memory does not fail in practice; the `Result` mirrors
/// [`to_writer`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string(doc: &Document) -> Result<String> {
    to_string_with_options(doc, EncodeOptions::default())
}

/// Encode a document as an indented OPML string.
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_pretty(doc: &Document) -> Result<String> {
    to_string_with_options(doc, EncodeOptions::pretty())
}

/// Encode a document as an OPML string with custom options.
///
/// # Examples
///
/// ```rust
/// use opml::{to_string_with_options, Document, EncodeOptions};
///
/// let options = EncodeOptions::pretty().with_indent(4).without_declaration();
/// let xml = to_string_with_options(&Document::new("1.0"), options).unwrap();
/// assert!(xml.starts_with(r#"<opml version="1.0">"#));
/// ```
///
/// # Errors
///
/// See [`to_string`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_string_with_options(doc: &Document, options: EncodeOptions) -> Result<String> {
    let mut buffer = Vec::with_capacity(256);
    to_writer_with_options(&mut buffer, doc, options)?;
    String::from_utf8(buffer).map_err(|e| Error::io(&e.to_string()))
}

/// Encode a document to a writer.
///
/// # Examples
///
/// ```rust
/// use opml::{to_writer, Document};
///
/// let mut buffer = Vec::new();
/// to_writer(&mut buffer, &Document::new("2.0")).unwrap();
/// assert!(buffer.ends_with(b"</opml>"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer<W>(writer: W, doc: &Document) -> Result<()>
where
    W: io::Write,
{
    to_writer_with_options(writer, doc, EncodeOptions::default())
}

/// Encode a document to a writer with custom options.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing to the writer fails.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn to_writer_with_options<W>(writer: W, doc: &Document, options: EncodeOptions) -> Result<()>
where
    W: io::Write,
{
    let mut encoder = Encoder::new(writer, options);
    encoder.encode(doc)?;
    encoder.into_inner().flush()?;
    Ok(())
}

/// Decode a document from OPML text.
///
/// # Examples
///
/// ```rust
/// use opml::from_str;
///
/// let doc = from_str(r#"<opml version="1.0"><head/><body/></opml>"#).unwrap();
/// assert_eq!(doc.version, "1.0");
/// assert!(doc.outlines.is_empty());
/// ```
///
/// # Errors
///
/// Returns a structural error if the markup is malformed or the root element
/// is not `opml`, and a field-validation error if a typed field fails its rule
/// or a required field is missing. Error messages include line and column
/// information where the markup itself is at fault.
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_str(s: &str) -> Result<Document> {
    Decoder::from_str(s).decode()
}

/// Decode a document from raw bytes.
///
/// The character encoding is detected from a byte order mark or the
/// `encoding` attribute of the XML prolog.
///
/// # Examples
///
/// ```rust
/// use opml::from_slice;
///
/// let doc = from_slice(b"<opml version=\"2.0\"><body><outline text=\"a\"/></body></opml>").unwrap();
/// assert_eq!(doc.outlines[0].text, "a");
/// ```
///
/// # Errors
///
/// See [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_slice(v: &[u8]) -> Result<Document> {
    Decoder::from_slice(v).decode()
}

/// Decode a document from an I/O stream.
///
/// The whole stream is read into memory before decoding starts.
///
/// # Examples
///
/// ```rust
/// use opml::from_reader;
/// use std::io::Cursor;
///
/// let cursor = Cursor::new(b"<opml version=\"2.0\"><head><title>t</title></head></opml>");
/// let doc = from_reader(cursor).unwrap();
/// assert_eq!(doc.title.as_deref(), Some("t"));
/// ```
///
/// # Errors
///
/// Returns [`Error::Io`] if reading fails, otherwise see [`from_str`].
#[must_use = "this returns the result of the operation, errors must be handled"]
pub fn from_reader<R>(mut reader: R) -> Result<Document>
where
    R: io::Read,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    from_slice(&bytes)
}
