//! OPML Wire Format Reference
//!
//! This module documents the subset of OPML read and written by this library.
//! It contains no code.
//!
//! # Overview
//!
//! An OPML document is an XML document whose root element is `opml`. The root
//! carries a `version` attribute and contains a `head` with metadata and a
//! `body` with a tree of `outline` elements.
//!
//! ```text
//! <?xml version="1.0" encoding="UTF-8"?>
//! <opml version="2.0">
//!   <head>
//!     <title>states.opml</title>
//!     <dateCreated>Tue, 15 Mar 2005 16:35:45 GMT</dateCreated>
//!     <expansionState>1,6,13,16,18,20</expansionState>
//!   </head>
//!   <body>
//!     <outline text="United States">
//!       <outline text="Far West"/>
//!     </outline>
//!   </body>
//! </opml>
//! ```
//!
//! # Root Element
//!
//! | Attribute | Type | Required |
//! |-----------|------|----------|
//! | `version` | string | yes |
//!
//! The root may be self-closing, which yields a document with no metadata and
//! no outlines. Anything other than whitespace, comments and processing
//! instructions outside the root is an error; content after the root is ignored.
//!
//! # Head
//!
//! Every head field is a child element holding character data. Order does not
//! matter on input. A field that appears twice keeps the last value.
//!
//! | Element | Type | Notes |
//! |---------|------|-------|
//! | `title` | string | |
//! | `dateCreated` | timestamp | |
//! | `dateModified` | timestamp | |
//! | `ownerName` | string | |
//! | `ownerEmail` | string | |
//! | `ownerId` | URL | |
//! | `docs` | URL | |
//! | `expansionState` | integer list | comma separated |
//! | `vertScrollState` | integer | |
//! | `windowTop` | integer | |
//! | `windowLeft` | integer | |
//! | `windowBottom` | integer | |
//! | `windowRight` | integer | |
//!
//! The encoder writes head fields in the order of this table.
//!
//! # Outline
//!
//! Outline fields are attributes. Nested `outline` elements are children, kept
//! in document order.
//!
//! | Attribute | Type | Required |
//! |-----------|------|----------|
//! | `text` | string | yes |
//! | `type` | string | no |
//! | `isComment` | boolean | no, default `false` |
//! | `isBreakpoint` | boolean | no, default `false` |
//! | `created` | timestamp | no |
//! | `category` | string list | no, comma separated |
//! | `xmlUrl` | URL | no |
//! | `description` | string | no |
//! | `htmlUrl` | URL | no |
//! | `language` | string | no |
//! | `title` | string | no |
//! | `version` | string | no |
//! | `url` | URL | no |
//!
//! The encoder writes attributes in the order of this table, and writes an
//! outline without children as a self-closing element.
//!
//! # Scalar Rules
//!
//! - **string**: taken verbatim after entity unescaping. An empty element or
//!   attribute is a present empty string.
//! - **integer**: optional sign and decimal digits, surrounding whitespace
//!   ignored, must fit in 32 bits.
//! - **boolean**: one of `1 t T true TRUE True` or `0 f F false FALSE False`.
//!   Written as `true`; `false` is written by omission.
//! - **URL**: an RFC 3986 URI-reference. Absolute URLs and relative
//!   references such as `/blog/` are both accepted; `::` or a `%` not followed
//!   by two hex digits is not.
//! - **integer list**: comma separated integers. Whitespace around tokens and
//!   empty tokens are ignored. `1, 6,,13` is `[1, 6, 13]`.
//! - **string list**: comma separated, each token trimmed, empty tokens
//!   dropped. Category paths themselves are slash delimited, e.g.
//!   `/Philosophy/Baseball/Mets`.
//!
//! A typed field whose value is blank is treated as absent.
//!
//! # Timestamps
//!
//! On input the following layouts are tried in order; the first that matches
//! wins.
//!
//! | Layout | Example |
//! |--------|---------|
//! | ANSIC | `Mon Jan  2 15:04:05 2006` |
//! | UnixDate | `Mon Jan  2 15:04:05 MST 2006` |
//! | RubyDate | `Mon Jan 02 15:04:05 -0700 2006` |
//! | RFC822 | `02 Jan 06 15:04 MST` |
//! | RFC822Z | `02 Jan 06 15:04 -0700` |
//! | RFC850 | `Monday, 02-Jan-06 15:04:05 MST` |
//! | RFC1123 | `Mon, 02 Jan 2006 15:04:05 MST` |
//! | RFC1123Z | `Mon, 02 Jan 2006 15:04:05 -0700` |
//! | RFC3339 | `2006-01-02T15:04:05Z07:00` |
//! | RFC3339Nano | `2006-01-02T15:04:05.999999999Z07:00` |
//! | Kitchen | `3:04PM` |
//! | Stamp | `Jan  2 15:04:05` |
//! | StampMilli | `Jan  2 15:04:05.000` |
//! | StampMicro | `Jan  2 15:04:05.000000` |
//! | StampNano | `Jan  2 15:04:05.000000000` |
//!
//! Named zones `GMT`, `UT`, `UTC` and `Z` are offset zero, and the North
//! American zones `EST EDT CST CDT MST MDT PST PDT` carry their RFC 822
//! offsets. Any other all-caps abbreviation is read as offset zero. Two-digit
//! years from `69` on are in the 1900s, earlier ones in the 2000s. Layouts
//! without a year fall in year 0; `Kitchen` falls on 0000-01-01.
//!
//! On output every timestamp is written as RFC 1123 in GMT with whole seconds:
//!
//! ```text
//! Tue, 15 Mar 2005 16:35:45 GMT
//! ```
//!
//! # Unknown Content
//!
//! Elements and attributes not listed here are skipped on input, including
//! their subtrees, and are never written.
//!
//! # Character Encoding
//!
//! Input encoding is detected from a byte order mark or the prolog's
//! `encoding` attribute. Output is always UTF-8.
