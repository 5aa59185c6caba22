//! CSV export functionality
//!
//! Exports the raw entry register to CSV format.

use std::io::Write;

use crate::error::DeskResult;
use crate::models::Category;
use crate::storage::Storage;

/// Export all entries to CSV, one row per entry
pub fn export_entries_csv<W: Write>(storage: &Storage, writer: &mut W) -> DeskResult<()> {
    writeln!(writer, "ID,Date,Time,Category,Count,Price,Subtotal")
        .map_err(|e| crate::error::DeskError::Export(e.to_string()))?;

    for category in Category::ALL {
        for entry in storage.entries.get_by_category(category)? {
            writeln!(
                writer,
                "{},{},{},{},{},{:.2},{:.2}",
                entry.id,
                entry.date,
                escape_csv(&entry.time),
                category,
                entry.count,
                entry.price.paise() as f64 / 100.0,
                entry.subtotal.paise() as f64 / 100.0
            )
            .map_err(|e| crate::error::DeskError::Export(e.to_string()))?;
        }
    }

    Ok(())
}

/// Escape a CSV field if it contains special characters
fn escape_csv(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
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

    #[test]
    fn test_export_entries() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage, "test");
        service
            .create(CreateEntryInput {
                category: Category::Aadhar,
                count: 5,
                price: Money::from_rupees(100),
                date: Some("1/6/2024".parse().unwrap()),
            })
            .unwrap();

        let mut buf = Vec::new();
        export_entries_csv(&storage, &mut buf).unwrap();
        let csv = String::from_utf8(buf).unwrap();

        assert!(csv.starts_with("ID,Date,Time,Category,Count,Price,Subtotal"));
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("1/6/2024"));
        assert!(csv.contains("aadhar,5,100.00,500.00"));
    }

    #[test]
    fn test_escape_csv() {
        assert_eq!(escape_csv("plain"), "plain");
        assert_eq!(escape_csv("a,b"), "\"a,b\"");
        assert_eq!(escape_csv("say \"hi\""), "\"say \"\"hi\"\"\"");
    }
}
