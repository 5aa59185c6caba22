//! Monthly Report
//!
//! Groups every distinct date present in the entry set (no fixed calendar
//! range), sorted ascending. The grand total's "last 30 days" label is
//! advisory only; callers pre-filter the store if a strict window is
//! required.

use std::io::Write;

use crate::error::{DeskError, DeskResult};
use crate::models::{Category, HolidayCalendar};
use crate::services::aggregate::{self, range_total, DayBucket, RangeTotal};
use crate::storage::Storage;

/// Monthly report over all recorded days
#[derive(Debug, Clone)]
pub struct MonthlyReport {
    /// One bucket per distinct recorded day, chronologically ascending
    pub days: Vec<DayBucket>,
    /// Malformed records the store excluded at load time
    pub skipped_entries: usize,
}

impl MonthlyReport {
    /// Generate the report from the current store state
    pub fn generate(storage: &Storage, calendar: &HolidayCalendar) -> DeskResult<Self> {
        let entries = aggregate::read_snapshot(storage)?;
        let skipped_entries = storage.entries.skipped_count()?;

        let days = aggregate::build_distinct(entries, calendar);

        Ok(Self {
            days,
            skipped_entries,
        })
    }

    /// Total for one category across all recorded days
    pub fn category_total(&self, category: Category) -> RangeTotal {
        range_total(&self.days, Some(category))
    }

    /// Combined total across all recorded days
    pub fn grand_total(&self) -> RangeTotal {
        range_total(&self.days, None)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Monthly Report\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.days.is_empty() {
            output.push_str("No records available\n");
        }

        for day in &self.days {
            output.push_str(&format!("\n{}\n", day.display_label));
            for category in Category::ALL {
                let total = day.category_total(category);
                if total.count == 0 {
                    continue;
                }
                output.push_str(&format!(
                    "  {:<16} {:>6} {:>12}\n",
                    category.label(),
                    total.count,
                    total.subtotal.to_string()
                ));
            }
            let day_total = day.grand_total();
            output.push_str(&format!(
                "  Day total: {} entries, {}\n",
                day_total.count, day_total.subtotal
            ));
        }

        let grand = self.grand_total();
        output.push('\n');
        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "Grand Total (Last 30 Days): {} entries, {}\n",
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
        writeln!(writer, "Date,Category,Count,Subtotal")
            .map_err(|e| DeskError::Export(e.to_string()))?;

        for day in &self.days {
            for category in Category::ALL {
                let total = day.category_total(category);
                writeln!(
                    writer,
                    "{},{},{},{:.2}",
                    day.date,
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
            ",TOTAL,{},{:.2}",
            grand.count,
            grand.subtotal.paise() as f64 / 100.0
        )
        .map_err(|e| DeskError::Export(e.to_string()))?;

        Ok(())
    }
}
