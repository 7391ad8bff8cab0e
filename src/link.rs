//! Link values: `ownerId`, `docs` and the outline `xmlUrl`, `htmlUrl` and
//! `url` attributes.
//!
//! OPML files in the wild carry absolute URLs as well as references relative
//! to the file itself, such as `htmlUrl="/blog/"`. A [`Link`] holds either.
//! Absolute links are parsed into a [`Url`]; relative ones are checked against
//! the URI-reference grammar and kept verbatim.
//!
//! ## Examples
//!
//! ```rust
//! use opml::{Link, Url};
//!
//! let feed: Link = "http://www.scripting.com/rss.xml".parse().unwrap();
//! let blog: Link = "/blog/".parse().unwrap();
//!
//! assert!(feed.is_absolute());
//! assert_eq!(blog.as_str(), "/blog/");
//!
//! let base = Url::parse("http://www.scripting.com/").unwrap();
//! assert_eq!(blog.resolve(&base).unwrap().as_str(), "http://www.scripting.com/blog/");
//! assert!("::".parse::<Link>().is_err());
//! ```

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use url::Url;

/// An absolute URL or a relative reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Link {
    Absolute(Url),
    Relative(String),
}

impl Link {
    /// Parses an absolute URL, falling back to a relative reference.
    ///
    /// # Errors
    ///
    /// Returns [`ParseLinkError`] when `input` is empty or is neither a valid
    /// URL nor a valid relative reference.
    pub fn parse(input: &str) -> Result<Self, ParseLinkError> {
        match Url::parse(input) {
            Ok(url) => Ok(Link::Absolute(url)),
            Err(url::ParseError::RelativeUrlWithoutBase) if is_relative_reference(input) => {
                Ok(Link::Relative(input.to_string()))
            }
            Err(_) => Err(ParseLinkError(input.to_string())),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Link::Absolute(url) => url.as_str(),
            Link::Relative(reference) => reference,
        }
    }

    #[must_use]
    pub fn as_url(&self) -> Option<&Url> {
        match self {
            Link::Absolute(url) => Some(url),
            Link::Relative(_) => None,
        }
    }

    #[must_use]
    pub fn is_absolute(&self) -> bool {
        matches!(self, Link::Absolute(_))
    }

    /// Resolves a relative link against `base`. Absolute links are returned as is.
    ///
    /// # Errors
    ///
    /// Returns the [`url::ParseError`] from joining onto `base`.
    pub fn resolve(&self, base: &Url) -> Result<Url, url::ParseError> {
        match self {
            Link::Absolute(url) => Ok(url.clone()),
            Link::Relative(reference) => base.join(reference),
        }
    }
}

/// RFC 3986 `relative-ref`: no scheme, a first segment without `:`, no
/// characters outside the URI set and well-formed percent escapes.
/// Non-ASCII characters are let through as in IRIs.
fn is_relative_reference(input: &str) -> bool {
    if input.is_empty() {
        return false;
    }
    let first_segment = input
        .split(|c| matches!(c, '/' | '?' | '#'))
        .next()
        .unwrap_or("");
    if first_segment.contains(':') {
        return false;
    }

    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        match c {
            '%' => {
                let escape = chars.next().zip(chars.next());
                let valid = matches!(escape, Some((hi, lo)) if hi.is_ascii_hexdigit() && lo.is_ascii_hexdigit());
                if !valid {
                    return false;
                }
            }
            '"' | '<' | '>' | '\\' | '^' | '`' | '{' | '|' | '}' => return false,
            c if c.is_whitespace() || c.is_control() => return false,
            _ => {}
        }
    }
    true
}

impl From<Url> for Link {
    fn from(url: Url) -> Self {
        Link::Absolute(url)
    }
}

/// Returned when a string is neither a URL nor a relative reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseLinkError(String);

impl fmt::Display for ParseLinkError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid URI reference {:?}", self.0)
    }
}

impl std::error::Error for ParseLinkError {}

impl FromStr for Link {
    type Err = ParseLinkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Link::parse(s)
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for Link {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for Link {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
