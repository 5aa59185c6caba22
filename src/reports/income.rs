//! Income Report
//!
//! A chronological series of per-day income across all categories merged,
//! plus an all-time total and a "today" extraction matched by canonical key
//! equality.

use std::io::Write;

use crate::error::{DeskError, DeskResult};
use crate::models::{DateKey, Money};
use crate::services::aggregate::{self, RangeTotal};
use crate::storage::Storage;

/// One day's merged income across all categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyIncome {
    /// Canonical key for the day
    pub date: DateKey,
    /// Units processed that day
    pub count: u64,
    /// Income that day (sum of stored subtotals)
    pub amount: Money,
}

/// Income report: daily series plus all-time totals
#[derive(Debug, Clone)]
pub struct IncomeReport {
    /// The day "today" extraction matches against
    today_key: DateKey,
    /// Per-day income, chronologically ascending
    pub daily: Vec<DailyIncome>,
    /// All-time enrolment count and income
    pub total: RangeTotal,
    /// Malformed records the store excluded at load time
    pub skipped_entries: usize,
}

impl IncomeReport {
    /// Generate the report relative to the current local date
    pub fn generate(storage: &Storage) -> DeskResult<Self> {
        Self::generate_for(storage, DateKey::today())
    }

    /// Generate the report relative to a specific day
    pub fn generate_for(storage: &Storage, today: DateKey) -> DeskResult<Self> {
        let entries = aggregate::read_snapshot(storage)?;
        let skipped_entries = storage.entries.skipped_count()?;

        let total = RangeTotal::over(entries.iter());

        let daily = aggregate::group_by_date(entries)
            .into_iter()
            .map(|(day, day_entries)| {
                let day_total = RangeTotal::over(day_entries.iter());
                DailyIncome {
                    date: DateKey::new(day),
                    count: day_total.count,
                    amount: day_total.subtotal,
                }
            })
            .collect();

        Ok(Self {
            today_key: today,
            daily,
            total,
            skipped_entries,
        })
    }

    /// Today's income, if any entries were recorded today
    pub fn today(&self) -> Option<&DailyIncome> {
        self.daily.iter().find(|d| d.date == self.today_key)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Income Report\n");
        output.push_str(&"=".repeat(48));
        output.push('\n');
        output.push_str(&format!(
            "{:<14} {:>8} {:>14}\n",
            "Date", "Count", "Income"
        ));
        output.push_str(&"-".repeat(48));
        output.push('\n');

        for day in &self.daily {
            output.push_str(&format!(
                "{:<14} {:>8} {:>14}\n",
                day.date.to_string(),
                day.count,
                day.amount.to_string()
            ));
        }

        output.push_str(&"-".repeat(48));
        output.push('\n');
        match self.today() {
            Some(today) => output.push_str(&format!(
                "Today ({}): {} entries, {}\n",
                today.date, today.count, today.amount
            )),
            None => output.push_str("Today: no entries recorded\n"),
        }
        output.push_str(&format!(
            "All-time: {} enrolments, {}\n",
            self.total.count, self.total.subtotal
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
        writeln!(writer, "Date,Count,Income").map_err(|e| DeskError::Export(e.to_string()))?;

        for day in &self.daily {
            writeln!(
                writer,
                "{},{},{:.2}",
                day.date,
                day.count,
                day.amount.paise() as f64 / 100.0
            )
            .map_err(|e| DeskError::Export(e.to_string()))?;
        }

        writeln!(
            writer,
            "TOTAL,{},{:.2}",
            self.total.count,
            self.total.subtotal.paise() as f64 / 100.0
        )
        .map_err(|e| DeskError::Export(e.to_string()))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::DeskPaths;
    use crate::models::Category;
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
    fn test_daily_series_merges_categories() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, Category::Aadhar, 5, 100, "1/6/2024");
        add(&storage, Category::Child, 2, 50, "1/6/2024");
        add(&storage, Category::Phone, 1, 20, "2/6/2024");

        let report = IncomeReport::generate_for(&storage, "2/6/2024".parse().unwrap()).unwrap();

        assert_eq!(report.daily.len(), 2);
        assert_eq!(report.daily[0].date.to_string(), "1/6/2024");
        assert_eq!(report.daily[0].count, 7);
        assert_eq!(report.daily[0].amount, Money::from_rupees(600));
        assert_eq!(report.daily[1].amount, Money::from_rupees(20));
    }

    #[test]
    fn test_all_time_total() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, Category::Aadhar, 5, 100, "1/6/2024");
        add(&storage, Category::Phone, 1, 20, "2/6/2024");

        let report = IncomeReport::generate_for(&storage, "2/6/2024".parse().unwrap()).unwrap();

        assert_eq!(report.total.count, 6);
        assert_eq!(report.total.subtotal, Money::from_rupees(520));
    }

    #[test]
    fn test_today_extraction_by_key_equality() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, Category::Aadhar, 5, 100, "1/6/2024");
        add(&storage, Category::Child, 2, 50, "2/6/2024");

        let report = IncomeReport::generate_for(&storage, "2/6/2024".parse().unwrap()).unwrap();

        let today = report.today().unwrap();
        assert_eq!(today.date.to_string(), "2/6/2024");
        assert_eq!(today.count, 2);

        let report = IncomeReport::generate_for(&storage, "3/6/2024".parse().unwrap()).unwrap();
        assert!(report.today().is_none());
    }

    #[test]
    fn test_series_is_chronological() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, Category::Aadhar, 1, 100, "15/6/2024");
        add(&storage, Category::Aadhar, 1, 100, "2/6/2024");
        add(&storage, Category::Aadhar, 1, 100, "10/6/2024");

        let report = IncomeReport::generate_for(&storage, "15/6/2024".parse().unwrap()).unwrap();

        let dates: Vec<String> = report.daily.iter().map(|d| d.date.to_string()).collect();
        assert_eq!(dates, ["2/6/2024", "10/6/2024", "15/6/2024"]);
    }

    #[test]
    fn test_export_csv_shape() {
        let (_temp_dir, storage) = create_test_storage();
        add(&storage, Category::Aadhar, 5, 100, "1/6/2024");

        let report = IncomeReport::generate_for(&storage, "1/6/2024".parse().unwrap()).unwrap();

        let mut buf = Vec::new();
        report.export_csv(&mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();

        assert!(csv.starts_with("Date,Count,Income"));
        assert!(csv.contains("1/6/2024,5,500.00"));
        assert!(csv.lines().last().unwrap().starts_with("TOTAL,5,"));
    }
}
