//! Canonical date key for entry grouping
//!
//! Entries are persisted with their date in the fixed `day/month/year` form
//! with no zero-padding (e.g., "1/6/2024"). Grouping and lookups compare the
//! parsed calendar date, never the raw string, so a formatting mismatch can
//! never silently drop an entry from a bucket.

use chrono::{Datelike, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// A calendar day carrying its canonical store key
///
/// Ordering is chronological (derived from the underlying date), so sorting a
/// collection of keys is always by actual date. Sorting the rendered key
/// strings would order "10/6/2024" before "2/6/2024" and must not be used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Wrap a calendar date
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Build a key from year/month/day components
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    /// The key for the current local date
    pub fn today() -> Self {
        Self(chrono::Local::now().date_naive())
    }

    /// The underlying calendar date
    pub fn date(&self) -> NaiveDate {
        self.0
    }

    /// Human-readable long form, e.g. "Sat, 01 Jun 2024"
    pub fn display_label(&self) -> String {
        self.0.format("%a, %d %b %Y").to_string()
    }

    /// The date's weekday
    pub fn weekday(&self) -> chrono::Weekday {
        self.0.weekday()
    }
}

impl From<NaiveDate> for DateKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DateKey {
    /// Renders the canonical key: `day/month/year`, no zero-padding
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}/{}", self.0.day(), self.0.month(), self.0.year())
    }
}

impl FromStr for DateKey {
    type Err = DateKeyParseError;

    /// Parse a canonical `day/month/year` key, or an ISO `YYYY-MM-DD` date
    ///
    /// The ISO form is accepted so holiday lists may be configured in either
    /// representation; both normalize to the same key.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(DateKeyParseError::Empty);
        }

        if s.contains('-') {
            let date = NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .map_err(|_| DateKeyParseError::InvalidFormat(s.to_string()))?;
            return Ok(Self(date));
        }

        let parts: Vec<&str> = s.split('/').collect();
        if parts.len() != 3 {
            return Err(DateKeyParseError::InvalidFormat(s.to_string()));
        }

        let day: u32 = parts[0]
            .parse()
            .map_err(|_| DateKeyParseError::InvalidFormat(s.to_string()))?;
        let month: u32 = parts[1]
            .parse()
            .map_err(|_| DateKeyParseError::InvalidFormat(s.to_string()))?;
        let year: i32 = parts[2]
            .parse()
            .map_err(|_| DateKeyParseError::InvalidFormat(s.to_string()))?;

        NaiveDate::from_ymd_opt(year, month, day)
            .map(Self)
            .ok_or(DateKeyParseError::OutOfRange { year, month, day })
    }
}

// Serialized through the canonical key string so the JSON store holds exactly
// the same representation the original records were written with.

impl Serialize for DateKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Error type for date key parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyParseError {
    Empty,
    InvalidFormat(String),
    OutOfRange { year: i32, month: u32, day: u32 },
}

impl fmt::Display for DateKeyParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateKeyParseError::Empty => write!(f, "Date key is empty"),
            DateKeyParseError::InvalidFormat(s) => write!(f, "Invalid date key: {}", s),
            DateKeyParseError::OutOfRange { year, month, day } => {
                write!(f, "No such calendar date: {}/{}/{}", day, month, year)
            }
        }
    }
}

impl std::error::Error for DateKeyParseError {}
