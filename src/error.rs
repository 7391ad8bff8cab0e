//! Error types for OPML decoding and encoding.
//!
//! Every failure falls into one of three kinds, see [`ErrorKind`]:
//!
//! - **Structural**: the input is not well-formed markup at all (unbalanced
//!   tags, bad encoding, a root element other than `opml`). These carry the
//!   line and column where the markup parser gave up.
//! - **Field validation**: the markup is fine but a field fails its
//!   type-specific rule (a non-integer expansion-state token, a timestamp no
//!   known layout accepts, a malformed link) or a required attribute is missing.
//! - **I/O**: reading the source or writing the sink failed.
//!
//! Decoding is all-or-nothing: any error means no [`Document`](crate::Document)
//! is returned.
//!
//! ## Examples
//!
//! ```rust
//! use opml::{from_str, ErrorKind, Rule};
//!
//! let err = from_str(r#"<opml version="2.0"><body><outline text="a" created="soon"/></body></opml>"#)
//!     .unwrap_err();
//! assert_eq!(err.kind(), ErrorKind::FieldValidation);
//! assert_eq!(err.rule(), Some(Rule::Timestamp));
//! ```

use std::fmt;
use thiserror::Error;

/// Broad classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Structural,
    FieldValidation,
    Io,
}

/// The type-specific parse rule a field value failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Base-10 integer, alone or as an item of a comma list.
    Integer,
    /// Markup boolean (`true`, `false`, `1`, `0`, ...).
    Boolean,
    /// None of the known timestamp layouts matched.
    Timestamp,
    /// Neither an absolute URL nor a valid relative reference.
    Url,
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Rule::Integer => "expected a base-10 integer",
            Rule::Boolean => "expected a boolean",
            Rule::Timestamp => "no known timestamp layout matches",
            Rule::Url => "expected a URL or relative reference",
        })
    }
}

/// Represents all possible errors that can occur while decoding or encoding OPML.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Malformed markup
    #[error("Syntax error at line {line}, column {col}: {msg}")]
    Syntax { line: usize, col: usize, msg: String },

    /// A present field whose value fails its parse rule
    #[error("Invalid value {value:?} for `{field}`: {rule}")]
    InvalidField {
        field: String,
        value: String,
        rule: Rule,
    },

    /// A required attribute is absent
    #[error("Missing required `{field}`")]
    MissingField { field: String },
}

impl Error {
    /// Creates a structural error at the given line and column.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opml::Error;
    ///
    /// let err = Error::syntax(3, 7, "unexpected end of document");
    /// assert!(err.to_string().contains("line 3"));
    /// ```
    pub fn syntax(line: usize, col: usize, msg: &str) -> Self {
        Error::Syntax {
            line,
            col,
            msg: msg.to_string(),
        }
    }

    /// Creates a field validation error naming the field, the offending value and the rule.
    pub fn invalid_field(field: &str, value: &str, rule: Rule) -> Self {
        Error::InvalidField {
            field: field.to_string(),
            value: value.to_string(),
            rule,
        }
    }

    pub fn missing_field(field: &str) -> Self {
        Error::MissingField {
            field: field.to_string(),
        }
    }

    /// Creates an I/O error for source or sink failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }

    /// Classifies this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Io(_) => ErrorKind::Io,
            Error::Syntax { .. } => ErrorKind::Structural,
            Error::InvalidField { .. } | Error::MissingField { .. } => ErrorKind::FieldValidation,
        }
    }

    /// The failed parse rule, for [`Error::InvalidField`] only.
    #[must_use]
    pub fn rule(&self) -> Option<Rule> {
        match self {
            Error::InvalidField { rule, .. } => Some(*rule),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::io(&err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
