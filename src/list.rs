//! Comma-separated list fields.
//!
//! Two OPML fields pack a sequence into one string:
//!
//! - `expansionState` in the head: base-10 integers, e.g. `1,6,13`
//! - `category` on an outline: slash-delimited paths, e.g. `/Tourism/New York`
//!
//! Parsing splits on `,`, trims each token and drops empty ones. Formatting
//! joins with a bare `,`. A category list that ends up empty is
//! indistinguishable from a missing attribute; this matches what other OPML
//! tools read and write.

use crate::error::{Error, Result, Rule};

fn tokens(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|t| !t.is_empty())
}

/// Parses an expansion-state list.
///
/// `field` names the wire field for error reporting.
///
/// # Errors
///
/// Returns [`Error::InvalidField`] with [`Rule::Integer`] if any non-empty
/// token is not a base-10 integer.
///
/// # Examples
///
/// ```rust
/// use opml::list::parse_expansion_state;
///
/// assert_eq!(parse_expansion_state(" 1, 6,,13 ", "expansionState").unwrap(), vec![1, 6, 13]);
/// assert!(parse_expansion_state("1,two", "expansionState").is_err());
/// ```
pub fn parse_expansion_state(value: &str, field: &str) -> Result<Vec<i32>> {
    tokens(value)
        .map(|token| {
            token
                .parse::<i32>()
                .map_err(|_| Error::invalid_field(field, token, Rule::Integer))
        })
        .collect()
}

#[must_use]
pub fn format_expansion_state(state: &[i32]) -> String {
    state
        .iter()
        .map(i32::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// Parses a category list. Order and duplicates are kept.
///
/// # Examples
///
/// ```rust
/// use opml::list::parse_categories;
///
/// assert_eq!(
///     parse_categories("/Philosophy/Baseball/Mets, /Tourism/New York"),
///     vec!["/Philosophy/Baseball/Mets", "/Tourism/New York"],
/// );
/// assert!(parse_categories(" , ").is_empty());
/// ```
#[must_use]
pub fn parse_categories(value: &str) -> Vec<String> {
    tokens(value).map(str::to_string).collect()
}

#[must_use]
pub fn format_categories(categories: &[String]) -> String {
    categories.join(",")
}
