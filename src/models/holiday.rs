//! Holiday classification for report annotation
//!
//! A day is non-working if it is the recurring weekly rest day or appears in
//! the configured list of designated holidays. When both apply, the
//! designated holiday wins the display label; the day counts as a holiday
//! either way.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Why a day is non-working
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HolidayKind {
    /// The recurring weekly rest day
    WeeklyOff,
    /// A specific configured holiday date
    Designated,
}

impl HolidayKind {
    /// Label shown on day cards and report headings
    pub fn label(&self) -> &'static str {
        match self {
            HolidayKind::WeeklyOff => "Office Holiday",
            HolidayKind::Designated => "Government Holiday",
        }
    }
}

impl fmt::Display for HolidayKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Calendar of non-working days, built from settings once per request
#[derive(Debug, Clone)]
pub struct HolidayCalendar {
    weekly_off: Weekday,
    designated: BTreeSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Create a calendar from the rest day and designated holiday dates
    pub fn new(weekly_off: Weekday, designated: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            weekly_off,
            designated: designated.into_iter().collect(),
        }
    }

    /// The configured weekly rest day
    pub fn weekly_off(&self) -> Weekday {
        self.weekly_off
    }

    /// Classify a date; `None` means an ordinary working day
    ///
    /// A designated holiday takes precedence over the weekly rest day so the
    /// label names the specific occasion.
    pub fn classify(&self, date: NaiveDate) -> Option<HolidayKind> {
        if self.designated.contains(&date) {
            Some(HolidayKind::Designated)
        } else if date.weekday() == self.weekly_off {
            Some(HolidayKind::WeeklyOff)
        } else {
            None
        }
    }

    /// Check whether a date is non-working for any reason
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.classify(date).is_some()
    }
}

impl Default for HolidayCalendar {
    fn default() -> Self {
        Self::new(Weekday::Sun, [])
    }
}
