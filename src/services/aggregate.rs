//! Aggregation core
//!
//! Transforms an unordered collection of entries plus a date range into
//! grouped, totaled structures. Grouping compares parsed calendar dates, so
//! store iteration order and key formatting never affect which bucket an
//! entry lands in. Totals sum the stored subtotals exactly; the aggregator
//! never recomputes a subtotal from count and price.

use std::collections::{BTreeMap, HashMap};

use chrono::NaiveDate;

use crate::error::DeskResult;
use crate::models::{Category, DateKey, Entry, HolidayCalendar, HolidayKind, Money};
use crate::storage::Storage;

/// Summed counts and subtotals over a set of entries, days, or categories
///
/// Always derived, never stored; recomputed on every report request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RangeTotal {
    /// Total units processed
    pub count: u64,
    /// Total of stored subtotals
    pub subtotal: Money,
}

impl RangeTotal {
    /// The zero total
    pub fn zero() -> Self {
        Self::default()
    }

    /// Fold one entry into the total
    pub fn add_entry(&mut self, entry: &Entry) {
        self.count += entry.count as u64;
        self.subtotal += entry.subtotal;
    }

    /// Fold another total into this one
    pub fn merge(&mut self, other: RangeTotal) {
        self.count += other.count;
        self.subtotal += other.subtotal;
    }

    /// Total over an iterator of entries
    pub fn over<'a>(entries: impl IntoIterator<Item = &'a Entry>) -> Self {
        let mut total = Self::zero();
        for entry in entries {
            total.add_entry(entry);
        }
        total
    }
}

/// Aggregation unit for one calendar day
///
/// Created transiently per report request and discarded after the report
/// consumes it; never persisted.
#[derive(Debug, Clone)]
pub struct DayBucket {
    /// Canonical key for the day
    pub date: DateKey,
    /// Human-readable rendering of the same day
    pub display_label: String,
    /// Why the day is non-working, if it is
    pub holiday: Option<HolidayKind>,
    entries: HashMap<Category, Vec<Entry>>,
}

impl DayBucket {
    fn new(date: DateKey, holiday: Option<HolidayKind>) -> Self {
        Self {
            date,
            display_label: date.display_label(),
            holiday,
            entries: HashMap::new(),
        }
    }

    fn push(&mut self, entry: Entry) {
        self.entries.entry(entry.category).or_default().push(entry);
    }

    /// The day's entries for a category; a category with no entries reads
    /// as empty
    pub fn entries(&self, category: Category) -> &[Entry] {
        self.entries
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// Whether the day is non-working for any reason
    pub fn is_holiday(&self) -> bool {
        self.holiday.is_some()
    }

    /// Whether any category recorded entries this day
    pub fn is_empty(&self) -> bool {
        self.entries.values().all(|v| v.is_empty())
    }

    /// Total for one category
    pub fn category_total(&self, category: Category) -> RangeTotal {
        RangeTotal::over(self.entries(category))
    }

    /// Combined total across all categories
    pub fn grand_total(&self) -> RangeTotal {
        let mut total = RangeTotal::zero();
        for category in Category::ALL {
            total.merge(self.category_total(category));
        }
        total
    }
}

/// Read the three category snapshots from the store, joining before any
/// aggregation begins
///
/// A failure in any one of the reads fails the whole request; no partial
/// snapshot is ever aggregated.
pub fn read_snapshot(storage: &Storage) -> DeskResult<Vec<Entry>> {
    let aadhar = storage.entries.get_by_category(Category::Aadhar)?;
    let child = storage.entries.get_by_category(Category::Child)?;
    let phone = storage.entries.get_by_category(Category::Phone)?;

    let mut entries = Vec::with_capacity(aadhar.len() + child.len() + phone.len());
    entries.extend(aadhar);
    entries.extend(child);
    entries.extend(phone);
    Ok(entries)
}

/// Group entries by calendar day
///
/// Every entry lands in exactly one group for its own date. The BTreeMap
/// keys iterate in chronological ascending order; within a day, insertion
/// order is preserved.
pub fn group_by_date(entries: Vec<Entry>) -> BTreeMap<NaiveDate, Vec<Entry>> {
    let mut grouped: BTreeMap<NaiveDate, Vec<Entry>> = BTreeMap::new();
    for entry in entries {
        grouped.entry(entry.date.date()).or_default().push(entry);
    }
    grouped
}

/// Build one bucket per calendar day in `[start, end]` inclusive
///
/// Days with zero entries still appear as empty buckets. Entries outside the
/// range are ignored. Ordering is strictly chronological ascending regardless
/// of the input order.
pub fn build_range(
    start: NaiveDate,
    end: NaiveDate,
    entries: Vec<Entry>,
    calendar: &HolidayCalendar,
) -> Vec<DayBucket> {
    let mut grouped = group_by_date(entries);

    let mut buckets = Vec::new();
    let mut day = start;
    while day <= end {
        let mut bucket = DayBucket::new(DateKey::new(day), calendar.classify(day));
        if let Some(day_entries) = grouped.remove(&day) {
            for entry in day_entries {
                bucket.push(entry);
            }
        }
        buckets.push(bucket);

        day = match day.succ_opt() {
            Some(next) => next,
            None => break,
        };
    }
    buckets
}

/// Build one bucket per distinct day present in the entry set
///
/// No fixed range: only days that actually recorded entries appear, sorted
/// ascending by actual date, never by input order.
pub fn build_distinct(entries: Vec<Entry>, calendar: &HolidayCalendar) -> Vec<DayBucket> {
    group_by_date(entries)
        .into_iter()
        .map(|(day, day_entries)| {
            let mut bucket = DayBucket::new(DateKey::new(day), calendar.classify(day));
            for entry in day_entries {
                bucket.push(entry);
            }
            bucket
        })
        .collect()
}

/// Total over a set of buckets, for one category or all of them
pub fn range_total(buckets: &[DayBucket], scope: Option<Category>) -> RangeTotal {
    let mut total = RangeTotal::zero();
    for bucket in buckets {
        match scope {
            Some(category) => total.merge(bucket.category_total(category)),
            None => total.merge(bucket.grand_total()),
        }
    }
    total
}
