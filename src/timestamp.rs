//! Timestamps as they appear in OPML documents.
//!
//! OPML tooling has written dates in many shapes over the years. Decoding is
//! tolerant: [`Timestamp::from_str`](std::str::FromStr) tries every entry of
//! [`LAYOUTS`] in order and keeps the first that parses. Encoding is not:
//! [`Timestamp`]'s `Display` always produces the RFC 1123 form in GMT,
//! e.g. `Tue, 12 Jul 2005 23:56:35 GMT`.
//!
//! ## Examples
//!
//! ```rust
//! use opml::Timestamp;
//!
//! let canonical: Timestamp = "Tue, 12 Jul 2005 23:56:35 GMT".parse().unwrap();
//! let rfc3339: Timestamp = "2005-07-12T23:56:35Z".parse().unwrap();
//! let unix: Timestamp = "Tue Jul 12 23:56:35 UTC 2005".parse().unwrap();
//!
//! assert_eq!(canonical, rfc3339);
//! assert_eq!(canonical, unix);
//! assert_eq!(rfc3339.to_string(), "Tue, 12 Jul 2005 23:56:35 GMT");
//! ```
//!
//! Timestamps carry whole seconds. The canonical layout has no fractional
//! part, so sub-second precision is dropped when a value is created.

use chrono::format::{parse, Parsed, StrftimeItems};
use chrono::{DateTime, FixedOffset, SubsecRound, TimeZone, Utc, Weekday};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const CANONICAL: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// A point in time, stored at second precision with its original UTC offset.
///
/// Equality, ordering and hashing compare instants, so two timestamps written
/// in different zones are equal when they denote the same moment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(DateTime<FixedOffset>);

impl Timestamp {
    /// Wraps a `chrono` date-time, truncating any sub-second part.
    #[must_use]
    pub fn new(datetime: DateTime<FixedOffset>) -> Self {
        Timestamp(datetime.trunc_subsecs(0))
    }

    /// Parses `input` with exactly one layout.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opml::{Layout, Timestamp};
    ///
    /// assert!(Timestamp::parse_layout(Layout::Rfc822, "12 Jul 05 23:56 GMT").is_some());
    /// assert!(Timestamp::parse_layout(Layout::Rfc3339, "12 Jul 05 23:56 GMT").is_none());
    /// ```
    #[must_use]
    pub fn parse_layout(layout: Layout, input: &str) -> Option<Self> {
        layout.parse(input).map(Timestamp::new)
    }

    #[must_use]
    pub fn as_datetime(&self) -> &DateTime<FixedOffset> {
        &self.0
    }

    #[must_use]
    pub fn to_utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }
}

impl From<DateTime<FixedOffset>> for Timestamp {
    fn from(datetime: DateTime<FixedOffset>) -> Self {
        Timestamp::new(datetime)
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(datetime: DateTime<Utc>) -> Self {
        Timestamp::new(datetime.into())
    }
}

impl From<Timestamp> for DateTime<FixedOffset> {
    fn from(ts: Timestamp) -> Self {
        ts.0
    }
}

/// Returned when no layout accepts a timestamp string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseTimestampError(String);

impl fmt::Display for ParseTimestampError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unrecognized timestamp {:?}", self.0)
    }
}

impl std::error::Error for ParseTimestampError {}

impl FromStr for Timestamp {
    type Err = ParseTimestampError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        for layout in LAYOUTS {
            if let Some(datetime) = layout.parse(input) {
                tracing::trace!(layout = layout.name(), input, "timestamp layout matched");
                return Ok(Timestamp::new(datetime));
            }
        }
        Err(ParseTimestampError(s.to_string()))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_utc().format(CANONICAL))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Textual date/time layouts accepted on decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// `Mon Jan _2 15:04:05 2006`
    Ansic,
    /// `Mon Jan _2 15:04:05 MST 2006`
    UnixDate,
    /// `Mon Jan 02 15:04:05 -0700 2006`
    RubyDate,
    /// `02 Jan 06 15:04 MST`
    Rfc822,
    /// `02 Jan 06 15:04 -0700`
    Rfc822Z,
    /// `Monday, 02-Jan-06 15:04:05 MST`
    Rfc850,
    /// `Mon, 02 Jan 2006 15:04:05 MST`
    Rfc1123,
    /// `Mon, 02 Jan 2006 15:04:05 -0700`
    Rfc1123Z,
    /// `2006-01-02T15:04:05Z07:00`
    Rfc3339,
    /// `2006-01-02T15:04:05.999999999Z07:00`
    Rfc3339Nano,
    /// `3:04PM`
    Kitchen,
    /// `Jan _2 15:04:05`
    Stamp,
    /// `Jan _2 15:04:05.000`
    StampMilli,
    /// `Jan _2 15:04:05.000000`
    StampMicro,
    /// `Jan _2 15:04:05.000000000`
    StampNano,
}

/// Decode priority order.
pub const LAYOUTS: [Layout; 15] = [
    Layout::Ansic,
    Layout::UnixDate,
    Layout::RubyDate,
    Layout::Rfc822,
    Layout::Rfc822Z,
    Layout::Rfc850,
    Layout::Rfc1123,
    Layout::Rfc1123Z,
    Layout::Rfc3339,
    Layout::Rfc3339Nano,
    Layout::Kitchen,
    Layout::Stamp,
    Layout::StampMilli,
    Layout::StampMicro,
    Layout::StampNano,
];

#[derive(Clone, Copy)]
enum Zone {
    /// No zone in the text; UTC is assumed.
    Absent,
    /// Alphabetic abbreviation at this token index (after the weekday is removed).
    Named(usize),
    /// `%z` inside the format items.
    Numeric,
}

#[derive(Clone, Copy)]
enum Calendar {
    Full,
    NoYear,
    TimeOnly,
}

/// Where a two-digit year sits once the weekday and named zone are removed.
#[derive(Clone, Copy)]
enum ShortYear {
    Token(usize),
    /// The last `-` separated part of this token.
    DashedToken(usize),
}

impl ShortYear {
    fn index(self) -> usize {
        match self {
            ShortYear::Token(index) | ShortYear::DashedToken(index) => index,
        }
    }
}

struct Shape {
    weekday: bool,
    zone: Zone,
    items: &'static str,
    calendar: Calendar,
}

impl Layout {
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Layout::Ansic => "ANSIC",
            Layout::UnixDate => "UnixDate",
            Layout::RubyDate => "RubyDate",
            Layout::Rfc822 => "RFC822",
            Layout::Rfc822Z => "RFC822Z",
            Layout::Rfc850 => "RFC850",
            Layout::Rfc1123 => "RFC1123",
            Layout::Rfc1123Z => "RFC1123Z",
            Layout::Rfc3339 => "RFC3339",
            Layout::Rfc3339Nano => "RFC3339Nano",
            Layout::Kitchen => "Kitchen",
            Layout::Stamp => "Stamp",
            Layout::StampMilli => "StampMilli",
            Layout::StampMicro => "StampMicro",
            Layout::StampNano => "StampNano",
        }
    }

    fn shape(self) -> Option<Shape> {
        let shape = |weekday, zone, items, calendar| Shape {
            weekday,
            zone,
            items,
            calendar,
        };
        Some(match self {
            Layout::Ansic => shape(true, Zone::Absent, "%b %e %H:%M:%S %Y", Calendar::Full),
            Layout::UnixDate => shape(true, Zone::Named(3), "%b %e %H:%M:%S %Y", Calendar::Full),
            Layout::RubyDate => shape(true, Zone::Numeric, "%b %d %H:%M:%S %z %Y", Calendar::Full),
            Layout::Rfc822 => shape(false, Zone::Named(4), "%d %b %Y %H:%M", Calendar::Full),
            Layout::Rfc822Z => shape(false, Zone::Numeric, "%d %b %Y %H:%M %z", Calendar::Full),
            Layout::Rfc850 => shape(true, Zone::Named(2), "%d-%b-%Y %H:%M:%S", Calendar::Full),
            Layout::Rfc1123 => shape(true, Zone::Named(4), "%d %b %Y %H:%M:%S", Calendar::Full),
            Layout::Rfc1123Z => {
                shape(true, Zone::Numeric, "%d %b %Y %H:%M:%S %z", Calendar::Full)
            }
            Layout::Rfc3339 | Layout::Rfc3339Nano => return None,
            Layout::Kitchen => shape(false, Zone::Absent, "%I:%M%p", Calendar::TimeOnly),
            Layout::Stamp => shape(false, Zone::Absent, "%b %e %H:%M:%S%.f", Calendar::NoYear),
            Layout::StampMilli => {
                shape(false, Zone::Absent, "%b %e %H:%M:%S%.3f", Calendar::NoYear)
            }
            Layout::StampMicro => {
                shape(false, Zone::Absent, "%b %e %H:%M:%S%.6f", Calendar::NoYear)
            }
            Layout::StampNano => {
                shape(false, Zone::Absent, "%b %e %H:%M:%S%.9f", Calendar::NoYear)
            }
        })
    }

    fn short_year(self) -> Option<ShortYear> {
        match self {
            Layout::Rfc822 | Layout::Rfc822Z => Some(ShortYear::Token(2)),
            Layout::Rfc850 => Some(ShortYear::DashedToken(0)),
            _ => None,
        }
    }

    /// Parses `input` with this layout only.
    #[must_use]
    pub fn parse(self, input: &str) -> Option<DateTime<FixedOffset>> {
        let Some(shape) = self.shape() else {
            return DateTime::parse_from_rfc3339(input.trim()).ok();
        };

        let expanded: String;
        let mut tokens: Vec<&str> = input.split_whitespace().collect();
        if shape.weekday {
            if tokens.is_empty() {
                return None;
            }
            let day = tokens.remove(0);
            day.trim_end_matches(',').parse::<Weekday>().ok()?;
        }

        let named_offset = match shape.zone {
            Zone::Named(index) if index < tokens.len() => Some(zone_offset(tokens.remove(index))?),
            Zone::Named(_) => return None,
            Zone::Absent | Zone::Numeric => None,
        };

        // chrono's `%y` pivots at 70, so two-digit years are widened first.
        if let Some(short) = self.short_year() {
            let index = short.index();
            let token = tokens.get(index)?;
            expanded = match short {
                ShortYear::Token(_) => format!("{:04}", expand_year(token)?),
                ShortYear::DashedToken(_) => {
                    let (head, yy) = token.rsplit_once('-')?;
                    format!("{}-{:04}", head, expand_year(yy)?)
                }
            };
            tokens[index] = &expanded;
        }

        let rest = tokens.join(" ");
        let mut parsed = Parsed::new();
        parse(&mut parsed, &rest, StrftimeItems::new(shape.items)).ok()?;
        match shape.calendar {
            Calendar::Full => {}
            Calendar::NoYear => parsed.set_year(0).ok()?,
            Calendar::TimeOnly => {
                parsed.set_year(0).ok()?;
                parsed.set_month(1).ok()?;
                parsed.set_day(1).ok()?;
            }
        }

        if let Zone::Numeric = shape.zone {
            return parsed.to_datetime().ok();
        }

        let naive = parsed
            .to_naive_date()
            .ok()?
            .and_time(parsed.to_naive_time().ok()?);
        let offset = match named_offset {
            Some(offset) => offset,
            None => FixedOffset::east_opt(0)?,
        };
        offset.from_local_datetime(&naive).single()
    }
}

/// Two-digit years from 69 on are in the 1900s, the rest in the 2000s.
fn expand_year(yy: &str) -> Option<i32> {
    if yy.len() != 2 || !yy.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let yy: i32 = yy.parse().ok()?;
    Some(if yy >= 69 { 1900 + yy } else { 2000 + yy })
}

/// Resolves a zone abbreviation. Unknown all-caps abbreviations are taken as UTC.
fn zone_offset(abbr: &str) -> Option<FixedOffset> {
    let hours = match abbr {
        "GMT" | "UT" | "UTC" | "Z" => 0,
        "EST" => -5,
        "EDT" => -4,
        "CST" => -6,
        "CDT" => -5,
        "MST" => -7,
        "MDT" => -6,
        "PST" => -8,
        "PDT" => -7,
        other
            if (3..=5).contains(&other.len()) && other.chars().all(|c| c.is_ascii_uppercase()) =>
        {
            0
        }
        _ => return None,
    };
    FixedOffset::east_opt(hours * 3600)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> Timestamp {
        Timestamp::from(DateTime::parse_from_rfc3339(s).unwrap())
    }

    fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> Timestamp {
        Timestamp::from(Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap())
    }

    #[test]
    fn test_canonical_roundtrip() {
        let ts: Timestamp = "Tue, 12 Jul 2005 23:56:35 GMT".parse().unwrap();
        assert_eq!(ts, utc("2005-07-12T23:56:35Z"));
        assert_eq!(ts.to_string(), "Tue, 12 Jul 2005 23:56:35 GMT");
    }

    #[test]
    fn test_every_full_layout_denotes_same_instant() {
        let expected = utc("2005-07-12T23:56:35Z");
        let inputs = [
            "Tue Jul 12 23:56:35 2005",
            "Tue Jul 12 23:56:35 UTC 2005",
            "Tue Jul 12 23:56:35 +0000 2005",
            "Tue, 12 Jul 2005 23:56:35 GMT",
            "Tue, 12 Jul 2005 23:56:35 +0000",
            "Tuesday, 12-Jul-05 23:56:35 GMT",
            "2005-07-12T23:56:35Z",
            "2005-07-12T23:56:35.000000000Z",
        ];
        for input in inputs {
            let ts: Timestamp = input.parse().unwrap();
            assert_eq!(ts, expected, "{input}");
        }
    }

    #[test]
    fn test_minute_layouts() {
        let expected = utc("2005-07-12T23:56:00Z");
        assert_eq!("12 Jul 05 23:56 GMT".parse::<Timestamp>().unwrap(), expected);
        assert_eq!("12 Jul 05 23:56 +0000".parse::<Timestamp>().unwrap(), expected);
    }

    #[test]
    fn test_each_layout_parses_to_its_instant() {
        let cases = [
            (Layout::Ansic, "Tue Jul 12 23:56:35 2005", at(2005, 7, 12, 23, 56, 35)),
            (Layout::UnixDate, "Tue Jul 12 23:56:35 UTC 2005", at(2005, 7, 12, 23, 56, 35)),
            (Layout::RubyDate, "Tue Jul 12 23:56:35 +0000 2005", at(2005, 7, 12, 23, 56, 35)),
            (Layout::Rfc822, "12 Jul 05 23:56 GMT", at(2005, 7, 12, 23, 56, 0)),
            (Layout::Rfc822Z, "12 Jul 05 23:56 +0000", at(2005, 7, 12, 23, 56, 0)),
            (Layout::Rfc850, "Tuesday, 12-Jul-05 23:56:35 GMT", at(2005, 7, 12, 23, 56, 35)),
            (Layout::Rfc1123, "Tue, 12 Jul 2005 23:56:35 GMT", at(2005, 7, 12, 23, 56, 35)),
            (Layout::Rfc1123Z, "Tue, 12 Jul 2005 23:56:35 +0000", at(2005, 7, 12, 23, 56, 35)),
            (Layout::Rfc3339, "2005-07-12T23:56:35Z", at(2005, 7, 12, 23, 56, 35)),
            (Layout::Rfc3339Nano, "2005-07-12T23:56:35.123456789Z", at(2005, 7, 12, 23, 56, 35)),
            (Layout::Kitchen, "11:56PM", at(0, 1, 1, 23, 56, 0)),
            (Layout::Stamp, "Jul 12 23:56:35", at(0, 7, 12, 23, 56, 35)),
            (Layout::StampMilli, "Jul 12 23:56:35.000", at(0, 7, 12, 23, 56, 35)),
            (Layout::StampMicro, "Jul 12 23:56:35.000000", at(0, 7, 12, 23, 56, 35)),
            (Layout::StampNano, "Jul 12 23:56:35.000000000", at(0, 7, 12, 23, 56, 35)),
        ];
        for layout in LAYOUTS {
            assert!(cases.iter().any(|(l, _, _)| *l == layout), "{} not covered", layout.name());
        }

        for (layout, input, expected) in cases {
            let ts = Timestamp::parse_layout(layout, input);
            assert_eq!(ts, Some(expected), "{} {input:?}", layout.name());
            assert_eq!(input.parse::<Timestamp>().unwrap(), expected, "{input:?}");

            let canonical: Timestamp = expected.to_string().parse().unwrap();
            assert_eq!(canonical, expected, "{}", layout.name());
        }
    }

    #[test]
    fn test_two_digit_years_pivot_at_69() {
        let cases = [
            ("12 Jul 69 23:56 GMT", at(1969, 7, 12, 23, 56, 0)),
            ("12 Jul 68 23:56 GMT", at(2068, 7, 12, 23, 56, 0)),
            ("12 Jul 99 23:56 +0000", at(1999, 7, 12, 23, 56, 0)),
            ("12 Jul 00 23:56 +0000", at(2000, 7, 12, 23, 56, 0)),
            ("Saturday, 12-Jul-69 23:56:00 GMT", at(1969, 7, 12, 23, 56, 0)),
            ("Wednesday, 12-Jul-00 23:56:00 GMT", at(2000, 7, 12, 23, 56, 0)),
        ];
        for (input, expected) in cases {
            assert_eq!(input.parse::<Timestamp>().unwrap(), expected, "{input:?}");
        }
        assert_eq!(
            "12 Jul 69 23:56 GMT".parse::<Timestamp>().unwrap().to_string(),
            "Sat, 12 Jul 1969 23:56:00 GMT"
        );
        assert!(Timestamp::parse_layout(Layout::Rfc822, "12 Jul 2005 23:56 GMT").is_none());
        assert!(Timestamp::parse_layout(Layout::Rfc850, "Tuesday, 12-Jul-5 23:56:35 GMT").is_none());
    }

    #[test]
    fn test_offsets_are_respected() {
        let ts: Timestamp = "Tue, 12 Jul 2005 16:56:35 -0700".parse().unwrap();
        assert_eq!(ts, utc("2005-07-12T23:56:35Z"));
        assert_eq!(ts.to_string(), "Tue, 12 Jul 2005 23:56:35 GMT");

        let named: Timestamp = "Tue, 12 Jul 2005 16:56:35 PDT".parse().unwrap();
        assert_eq!(named, utc("2005-07-12T23:56:35Z"));
    }

    #[test]
    fn test_padded_day() {
        let ts: Timestamp = "Sat Jan  2 15:04:05 2021".parse().unwrap();
        assert_eq!(ts, utc("2021-01-02T15:04:05Z"));
    }

    #[test]
    fn test_yearless_layouts() {
        let stamp: Timestamp = "Jul 12 23:56:35".parse().unwrap();
        assert_eq!(stamp.to_utc().format("%m-%d %H:%M:%S").to_string(), "07-12 23:56:35");

        let kitchen: Timestamp = "3:04PM".parse().unwrap();
        assert_eq!(kitchen.to_utc().format("%H:%M").to_string(), "15:04");
    }

    #[test]
    fn test_canonical_reparse_of_yearless_value() {
        let stamp: Timestamp = "Jul 12 23:56:35".parse().unwrap();
        let again: Timestamp = stamp.to_string().parse().unwrap();
        assert_eq!(stamp, again);
    }

    #[test]
    fn test_subseconds_are_truncated() {
        let ts: Timestamp = "2005-07-12T23:56:35.750Z".parse().unwrap();
        assert_eq!(ts, utc("2005-07-12T23:56:35Z"));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!("soon".parse::<Timestamp>().is_err());
        assert!("".parse::<Timestamp>().is_err());
        assert!("Tue, 32 Jul 2005 23:56:35 GMT".parse::<Timestamp>().is_err());
        assert!("Tue, 12 Jul 2005 23:56:35 gmt+1".parse::<Timestamp>().is_err());
    }

    #[test]
    fn test_parse_layout_is_exclusive() {
        let input = "Tue, 12 Jul 2005 23:56:35 GMT";
        assert!(Timestamp::parse_layout(Layout::Rfc1123, input).is_some());
        assert!(Timestamp::parse_layout(Layout::Rfc1123Z, input).is_none());
        assert!(Timestamp::parse_layout(Layout::Ansic, input).is_none());
    }

    #[test]
    fn test_serde_uses_canonical_string() {
        let ts = utc("2005-10-31T19:23:00Z");
        let json = serde_json::to_string(&ts).unwrap();
        assert_eq!(json, "\"Mon, 31 Oct 2005 19:23:00 GMT\"");
        let back: Timestamp = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ts);
    }
}
