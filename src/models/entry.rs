//! Entry model
//!
//! One recorded transaction: a count of units processed at a unit price, under
//! one of the three categories, on one calendar day. The subtotal is computed
//! once at creation and stored immutably; reports only ever sum the stored
//! value, never recompute it.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::category::Category;
use super::datekey::DateKey;
use super::ids::EntryId;
use super::money::Money;

/// A validated transaction record
///
/// The core operates only on validated entries; raw stored records pass
/// through [`StoredEntry::validate`] at the store boundary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Entry {
    /// Unique identifier, assigned on creation
    pub id: EntryId,

    /// The category this entry was recorded under
    pub category: Category,

    /// Calendar day, serialized as the canonical day/month/year key
    pub date: DateKey,

    /// Wall-clock time of entry creation (display-only, not used for grouping)
    pub time: String,

    /// Number of units processed
    pub count: u32,

    /// Unit price
    pub price: Money,

    /// `count * price`, fixed at creation time
    pub subtotal: Money,
}

impl Entry {
    /// Create a new entry, computing the subtotal from count and price
    pub fn new(category: Category, date: DateKey, time: String, count: u32, price: Money) -> Self {
        Self {
            id: EntryId::new(),
            category,
            date,
            time,
            count,
            price,
            subtotal: price * count,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} x{} = {}",
            self.date, self.category, self.count, self.subtotal
        )
    }
}

/// The raw persisted shape of an entry, before validation
///
/// Count and price are read as plain integers so records edited by hand (or
/// written by the system this store format came from) can be checked for
/// negative values instead of failing wholesale deserialization.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredEntry {
    #[serde(default)]
    pub id: EntryId,
    pub category: Category,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    pub count: i64,
    pub price: i64,
    pub subtotal: i64,
}

impl StoredEntry {
    /// Validate a raw record into an [`Entry`]
    ///
    /// The stored subtotal is carried over as-is; it was fixed at creation
    /// time and aggregation must sum exactly what was persisted.
    pub fn validate(self) -> Result<Entry, EntryValidationError> {
        let date: DateKey = self
            .date
            .parse()
            .map_err(|_| EntryValidationError::BadDate(self.date.clone()))?;

        if self.count < 0 {
            return Err(EntryValidationError::NegativeCount(self.count));
        }
        let count = u32::try_from(self.count)
            .map_err(|_| EntryValidationError::NegativeCount(self.count))?;

        if self.price < 0 {
            return Err(EntryValidationError::NegativePrice(self.price));
        }

        Ok(Entry {
            id: self.id,
            category: self.category,
            date,
            time: self.time,
            count,
            price: Money::from_paise(self.price),
            subtotal: Money::from_paise(self.subtotal),
        })
    }
}

impl From<&Entry> for StoredEntry {
    fn from(entry: &Entry) -> Self {
        Self {
            id: entry.id,
            category: entry.category,
            date: entry.date.to_string(),
            time: entry.time.clone(),
            count: entry.count as i64,
            price: entry.price.paise(),
            subtotal: entry.subtotal.paise(),
        }
    }
}

/// Validation errors for stored entry records
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryValidationError {
    BadDate(String),
    NegativeCount(i64),
    NegativePrice(i64),
}

impl fmt::Display for EntryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadDate(s) if s.is_empty() => write!(f, "Entry has no date"),
            Self::BadDate(s) => write!(f, "Entry has unparseable date '{}'", s),
            Self::NegativeCount(n) => write!(f, "Entry has negative count {}", n),
            Self::NegativePrice(p) => write!(f, "Entry has negative price {}", p),
        }
    }
}

impl std::error::Error for EntryValidationError {}
