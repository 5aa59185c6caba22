//! Entry service
//!
//! Provides business logic for recording and removing entries. A service is
//! constructed per request with the operator identity it acts as; the
//! identity travels with the request and is recorded on every mutation.

use crate::error::{DeskError, DeskResult};
use crate::models::{Category, DateKey, Entry, EntryId, Money};
use crate::storage::Storage;

/// Input for recording a new entry
#[derive(Debug, Clone)]
pub struct CreateEntryInput {
    pub category: Category,
    pub count: u32,
    pub price: Money,
    /// Defaults to the current local date when absent
    pub date: Option<DateKey>,
}

/// Service for entry management
pub struct EntryService<'a> {
    storage: &'a Storage,
    operator: String,
}

impl<'a> EntryService<'a> {
    /// Create a new entry service acting as the given operator
    pub fn new(storage: &'a Storage, operator: impl Into<String>) -> Self {
        Self {
            storage,
            operator: operator.into(),
        }
    }

    /// Record a new entry
    ///
    /// The subtotal is computed here, once, and never again; validation
    /// requires a positive count and a non-negative price.
    pub fn create(&self, input: CreateEntryInput) -> DeskResult<Entry> {
        if input.count == 0 {
            return Err(DeskError::Validation(
                "Entry count must be at least 1".into(),
            ));
        }
        if input.price.is_negative() {
            return Err(DeskError::Validation(
                "Entry price cannot be negative".into(),
            ));
        }

        let date = input.date.unwrap_or_else(DateKey::today);
        let time = chrono::Local::now().format("%H:%M").to_string();

        let entry = Entry::new(input.category, date, time, input.count, input.price);

        self.storage.entries.upsert(entry.clone())?;
        self.storage.entries.save()?;
        self.storage.log_create(&self.operator, &entry)?;

        Ok(entry)
    }

    /// List entries, optionally narrowed to a category and/or a single day
    pub fn list(
        &self,
        category: Option<Category>,
        on: Option<DateKey>,
    ) -> DeskResult<Vec<Entry>> {
        match (category, on) {
            (Some(cat), Some(key)) => self.storage.entries.get_by_category_on(cat, key.date()),
            (Some(cat), None) => self.storage.entries.get_by_category(cat),
            (None, Some(key)) => {
                let all = self.storage.entries.get_all()?;
                Ok(all.into_iter().filter(|e| e.date == key).collect())
            }
            (None, None) => self.storage.entries.get_all(),
        }
    }

    /// Delete an entry by ID
    pub fn delete(&self, id: EntryId) -> DeskResult<Entry> {
        let removed = self
            .storage
            .entries
            .delete(id)?
            .ok_or_else(|| DeskError::entry_not_found(id.to_string()))?;

        self.storage.entries.save()?;
        self.storage.log_delete(&self.operator, &removed)?;

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::DeskPaths;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = DeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn input(category: Category, count: u32, price: i64, date: &str) -> CreateEntryInput {
        CreateEntryInput {
            category,
            count,
            price: Money::from_rupees(price),
            date: Some(date.parse().unwrap()),
        }
    }

    #[test]
    fn test_create_computes_subtotal_once() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage, "kavya");

        let entry = service
            .create(input(Category::Aadhar, 5, 100, "1/6/2024"))
            .unwrap();

        assert_eq!(entry.subtotal, Money::from_rupees(500));
        assert!(!entry.time.is_empty());

        let stored = storage.entries.get(entry.id).unwrap().unwrap();
        assert_eq!(stored.subtotal, Money::from_rupees(500));
    }

    #[test]
    fn test_create_rejects_zero_count() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage, "kavya");

        let err = service
            .create(input(Category::Child, 0, 100, "1/6/2024"))
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_rejects_negative_price() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage, "kavya");

        let err = service
            .create(CreateEntryInput {
                category: Category::Phone,
                count: 1,
                price: Money::from_rupees(-10),
                date: Some("1/6/2024".parse().unwrap()),
            })
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_create_is_audited_with_operator() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage, "kavya");

        service
            .create(input(Category::Aadhar, 1, 100, "1/6/2024"))
            .unwrap();

        let records = storage.audit().read_all().unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].operator, "kavya");
    }

    #[test]
    fn test_list_filters() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage, "kavya");

        service.create(input(Category::Aadhar, 1, 100, "1/6/2024")).unwrap();
        service.create(input(Category::Aadhar, 2, 100, "2/6/2024")).unwrap();
        service.create(input(Category::Child, 3, 50, "1/6/2024")).unwrap();

        assert_eq!(service.list(None, None).unwrap().len(), 3);
        assert_eq!(service.list(Some(Category::Aadhar), None).unwrap().len(), 2);
        assert_eq!(
            service
                .list(None, Some("1/6/2024".parse().unwrap()))
                .unwrap()
                .len(),
            2
        );
        assert_eq!(
            service
                .list(Some(Category::Aadhar), Some("1/6/2024".parse().unwrap()))
                .unwrap()
                .len(),
            1
        );
    }

    #[test]
    fn test_delete_missing_entry_is_not_found() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage, "ravi");

        let err = service.delete(EntryId::new()).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_delete_removes_and_audits() {
        let (_temp_dir, storage) = create_test_storage();
        let service = EntryService::new(&storage, "ravi");

        let entry = service
            .create(input(Category::Phone, 2, 50, "1/6/2024"))
            .unwrap();
        service.delete(entry.id).unwrap();

        assert_eq!(storage.entries.count().unwrap(), 0);

        let records = storage.audit().read_all().unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].operation.to_string(), "DELETE");
    }
}
