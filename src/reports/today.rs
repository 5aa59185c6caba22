//! Today's Report
//!
//! A single-day view of all three categories with per-category totals and a
//! combined grand total.

use std::io::Write;

use crate::error::{DeskError, DeskResult};
use crate::models::{Category, DateKey, HolidayCalendar};
use crate::services::aggregate::{self, DayBucket, RangeTotal};
use crate::storage::Storage;

/// Today's report: one bucket, all categories
#[derive(Debug, Clone)]
pub struct TodayReport {
    /// The day's bucket
    pub bucket: DayBucket,
    /// Malformed records the store excluded at load time
    pub skipped_entries: usize,
}

impl TodayReport {
    /// Generate the report for the current local date
    pub fn generate(storage: &Storage, calendar: &HolidayCalendar) -> DeskResult<Self> {
        Self::generate_for(storage, calendar, DateKey::today())
    }

    /// Generate the report for a specific day
    pub fn generate_for(
        storage: &Storage,
        calendar: &HolidayCalendar,
        today: DateKey,
    ) -> DeskResult<Self> {
        let entries = aggregate::read_snapshot(storage)?;
        let skipped_entries = storage.entries.skipped_count()?;

        let day = today.date();
        let mut buckets = aggregate::build_range(day, day, entries, calendar);
        let bucket = buckets
            .pop()
            .ok_or_else(|| DeskError::Report("Single-day range produced no bucket".into()))?;

        Ok(Self {
            bucket,
            skipped_entries,
        })
    }

    /// Total for one category
    pub fn category_total(&self, category: Category) -> RangeTotal {
        self.bucket.category_total(category)
    }

    /// Combined total across all categories
    pub fn grand_total(&self) -> RangeTotal {
        self.bucket.grand_total()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("Today's Report: {}\n", self.bucket.display_label));
        if let Some(kind) = self.bucket.holiday {
            output.push_str(&format!("{}\n", kind.label()));
        }
        output.push_str(&"=".repeat(60));
        output.push('\n');

        for category in Category::ALL {
            output.push_str(&format!("\n{}\n", category.label()));

            let entries = self.bucket.entries(category);
            if entries.is_empty() {
                output.push_str("  No records available\n");
            } else {
                for entry in entries {
                    output.push_str(&format!(
                        "  {:<8} {:>6} {:>12} {:>12}\n",
                        entry.time, entry.count, entry.price.to_string(), entry.subtotal.to_string()
                    ));
                }
            }

            let total = self.category_total(category);
            output.push_str(&format!(
                "  Total: {} entries, {}\n",
                total.count, total.subtotal
            ));
        }

        let grand = self.grand_total();
        output.push_str(&"-".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Grand Total: {} entries, {}\n",
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
        writeln!(writer, "Date,Category,Time,Count,Price,Subtotal")
            .map_err(|e| DeskError::Export(e.to_string()))?;

        for category in Category::ALL {
            for entry in self.bucket.entries(category) {
                writeln!(
                    writer,
                    "{},{},{},{},{:.2},{:.2}",
                    entry.date,
                    category,
                    entry.time,
                    entry.count,
                    entry.price.paise() as f64 / 100.0,
                    entry.subtotal.paise() as f64 / 100.0
                )
                .map_err(|e| DeskError::Export(e.to_string()))?;
            }
        }

        let grand = self.grand_total();
        writeln!(
            writer,
            "{},TOTAL,,{},,{:.2}",
            self.bucket.date,
            grand.count,
            grand.subtotal.paise() as f64 / 100.0
        )
        .map_err(|e| DeskError::Export(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::DeskPaths;
    use crate::models::Money;
    use crate::services::{CreateEntryInput, EntryService};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn add(storage: &Storage, category: Category, count: u32, price: i64, date: &str) {
        EntryService::new(storage, "test")
            .create(CreateEntryInput {
                category,
                count,
                price: Money::from_rupees(price),
                date: Some(date.parse().unwrap()),
            })
            .unwrap();
    }

    #[test]
    fn test_today_report_totals() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, Category::Aadhar, 5, 100, "1/6/2024");
        add(&storage, Category::Child, 2, 50, "1/6/2024");
        add(&storage, Category::Aadhar, 9, 100, "2/6/2024"); // different day

        let report = TodayReport::generate_for(
            &storage,
            &HolidayCalendar::default(),
            "1/6/2024".parse().unwrap(),
        )
        .unwrap();

        assert_eq!(report.category_total(Category::Aadhar).count, 5);
        assert_eq!(report.category_total(Category::Child).count, 2);
        assert_eq!(report.category_total(Category::Phone).count, 0);

        let grand = report.grand_total();
        assert_eq!(grand.count, 7);
        assert_eq!(grand.subtotal, Money::from_rupees(600));
    }

    #[test]
    fn test_empty_day_is_not_an_error() {
        let (_temp_dir, storage) = create_test_storage();

        let report = TodayReport::generate_for(
            &storage,
            &HolidayCalendar::default(),
            "1/6/2024".parse().unwrap(),
        )
        .unwrap();

        assert!(report.bucket.is_empty());
        assert_eq!(report.grand_total(), RangeTotal::zero());
    }

    #[test]
    fn test_format_terminal_shows_holiday() {
        let (_temp_dir, storage) = create_test_storage();
        // 2/6/2024 is a Sunday
        let report = TodayReport::generate_for(
            &storage,
            &HolidayCalendar::default(),
            "2/6/2024".parse().unwrap(),
        )
        .unwrap();

        let text = report.format_terminal();
        assert!(text.contains("Office Holiday"));
        assert!(text.contains("No records available"));
    }

    #[test]
    fn test_export_csv_has_total_row() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, Category::Aadhar, 5, 100, "1/6/2024");

        let report = TodayReport::generate_for(
            &storage,
            &HolidayCalendar::default(),
            "1/6/2024".parse().unwrap(),
        )
        .unwrap();

        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();

        assert!(csv.starts_with("Date,Category,Time,Count,Price,Subtotal"));
        assert!(csv.contains("1/6/2024,aadhar"));
        assert!(csv.contains("TOTAL,,5,,500.00"));
    }
}
