//! Weekly Report
//!
//! The trailing seven days ending today, oldest first, each day annotated
//! with holiday information. Display and totals share one truncation rule:
//! when the range produces more than six days, only the first six
//! chronological days feed the day cards and the totals footer, so the two
//! can never disagree.

use std::io::Write;

use chrono::Duration;

use crate::error::{DeskError, DeskResult};
use crate::models::{Category, DateKey, HolidayCalendar};
use crate::services::aggregate::{self, range_total, DayBucket, RangeTotal};
use crate::storage::Storage;

/// Weekly report over the trailing seven days
#[derive(Debug, Clone)]
pub struct WeeklyReport {
    /// One bucket per day of the range, chronologically ascending
    pub days: Vec<DayBucket>,
    /// Malformed records the store excluded at load time
    pub skipped_entries: usize,
}

impl WeeklyReport {
    /// Generate the report for the week ending on the current local date
    pub fn generate(storage: &Storage, calendar: &HolidayCalendar) -> DeskResult<Self> {
        Self::generate_for(storage, calendar, DateKey::today())
    }

    /// Generate the report for the week ending on a specific day
    pub fn generate_for(
        storage: &Storage,
        calendar: &HolidayCalendar,
        today: DateKey,
    ) -> DeskResult<Self> {
        let entries = aggregate::read_snapshot(storage)?;
        let skipped_entries = storage.entries.skipped_count()?;

        let end = today.date();
        let start = end - Duration::days(6);
        let days = aggregate::build_range(start, end, entries, calendar);

        Ok(Self {
            days,
            skipped_entries,
        })
    }

    /// The days the view displays and totals
    ///
    /// Fixed truncation policy: more than six days upstream means only the
    /// first six chronological days are used.
    pub fn display_days(&self) -> &[DayBucket] {
        if self.days.len() > 6 {
            &self.days[..6]
        } else {
            &self.days
        }
    }

    /// Weekly total for one category, over the displayed days
    pub fn category_total(&self, category: Category) -> RangeTotal {
        range_total(self.display_days(), Some(category))
    }

    /// Combined weekly total, over the displayed days
    pub fn grand_total(&self) -> RangeTotal {
        range_total(self.display_days(), None)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Weekly Report\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');

        for day in self.display_days() {
            match day.holiday {
                Some(kind) => {
                    output.push_str(&format!("\n{} - {}\n", day.display_label, kind.label()))
                }
                None => output.push_str(&format!("\n{}\n", day.display_label)),
            }

            let day_total = day.grand_total();
            if day_total.count == 0 {
                output.push_str("  No records available\n");
                continue;
            }

            for category in Category::ALL {
                let total = day.category_total(category);
                output.push_str(&format!(
                    "  {:<16} {:>6} {:>12}\n",
                    category.label(),
                    total.count,
                    total.subtotal.to_string()
                ));
            }
            output.push_str(&format!(
                "  Day total: {} entries, {}\n",
                day_total.count, day_total.subtotal
            ));
        }

        output.push('\n');
        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str("Grand Totals for the Week\n");
        for category in Category::ALL {
            let total = self.category_total(category);
            output.push_str(&format!(
                "  {:<16} {:>6} {:>12}\n",
                category.label(),
                total.count,
                total.subtotal.to_string()
            ));
        }
        let grand = self.grand_total();
        output.push_str(&format!(
            "  Overall: {} entries, {}\n",
            grand.count, grand.subtotal
        ));

        if self.skipped_entries > 0 {
            output.push_str(&format!(
                "Warning: {} malformed record(s) skipped\n",
                self.skipped_entries
            ));
        }

        output
    }

    /// Export the report to CSV format
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> DeskResult<()> {
        writeln!(writer, "Date,Day,Holiday,Category,Count,Subtotal")
            .map_err(|e| DeskError::Export(e.to_string()))?;

        for day in self.display_days() {
            let holiday = day.holiday.map(|k| k.label()).unwrap_or("");
            for category in Category::ALL {
                let total = day.category_total(category);
                writeln!(
                    writer,
                    "{},\"{}\",{},{},{},{:.2}",
                    day.date,
                    day.display_label,
                    holiday,
                    category,
                    total.count,
                    total.subtotal.paise() as f64 / 100.0
                )
                .map_err(|e| DeskError::Export(e.to_string()))?;
            }
        }

        let grand = self.grand_total();
        writeln!(
            writer,
            ",,,TOTAL,{},{:.2}",
            grand.count,
            grand.subtotal.paise() as f64 / 100.0
        )
        .map_err(|e| DeskError::Export(e.to_string()))?;

        Ok(())
    }
}
