//! Entry repository for JSON storage
//!
//! Manages loading and saving entries to entries.json. Raw stored records are
//! validated at this boundary: a record with an unparseable date or negative
//! count/price is excluded from the loaded set and counted, never merged into
//! a wrong bucket downstream.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::DeskError;
use crate::models::{Category, Entry, EntryId, StoredEntry};

use super::file_io::{read_json, write_json_atomic};

/// Serializable entry data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct EntryData {
    entries: Vec<StoredEntry>,
}

/// Repository for entry persistence with indexing
pub struct EntryRepository {
    path: PathBuf,
    data: RwLock<HashMap<EntryId, Entry>>,
    /// Index: category -> entry_ids (insertion order)
    by_category: RwLock<HashMap<Category, Vec<EntryId>>>,
    /// Index: calendar date -> entry_ids
    by_date: RwLock<HashMap<NaiveDate, Vec<EntryId>>>,
    /// Malformed records excluded at the last load
    skipped: RwLock<usize>,
}

impl EntryRepository {
    /// Create a new entry repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_category: RwLock::new(HashMap::new()),
            by_date: RwLock::new(HashMap::new()),
            skipped: RwLock::new(0),
        }
    }

    /// Load entries from disk, validate them, and build indexes
    pub fn load(&self) -> Result<(), DeskError> {
        let file_data: EntryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_date = self
            .by_date
            .write()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut skipped = self
            .skipped
            .write()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_category.clear();
        by_date.clear();
        *skipped = 0;

        for stored in file_data.entries {
            let entry = match stored.validate() {
                Ok(entry) => entry,
                Err(_) => {
                    *skipped += 1;
                    continue;
                }
            };

            let id = entry.id;
            by_category.entry(entry.category).or_default().push(id);
            by_date.entry(entry.date.date()).or_default().push(id);
            data.insert(id, entry);
        }

        Ok(())
    }

    /// Save entries to disk
    pub fn save(&self) -> Result<(), DeskError> {
        let data = self
            .data
            .read()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut entries: Vec<&Entry> = data.values().collect();
        entries.sort_by(|a, b| {
            a.date
                .cmp(&b.date)
                .then_with(|| a.time.cmp(&b.time))
                .then_with(|| a.id.as_uuid().cmp(b.id.as_uuid()))
        });

        let file_data = EntryData {
            entries: entries.into_iter().map(StoredEntry::from).collect(),
        };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get an entry by ID
    pub fn get(&self, id: EntryId) -> Result<Option<Entry>, DeskError> {
        let data = self
            .data
            .read()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(&id).cloned())
    }

    /// Get all entries, most recent day first
    pub fn get_all(&self) -> Result<Vec<Entry>, DeskError> {
        let data = self
            .data
            .read()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut entries: Vec<_> = data.values().cloned().collect();
        entries.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(entries)
    }

    /// Get all entries for a category, in insertion order
    pub fn get_by_category(&self, category: Category) -> Result<Vec<Entry>, DeskError> {
        let data = self
            .data
            .read()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_category = self
            .by_category
            .read()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_category
            .get(&category)
            .map(|v| v.as_slice())
            .unwrap_or(&[]);
        Ok(ids.iter().filter_map(|id| data.get(id).cloned()).collect())
    }

    /// Get a category's entries for one calendar day, in insertion order
    pub fn get_by_category_on(
        &self,
        category: Category,
        date: NaiveDate,
    ) -> Result<Vec<Entry>, DeskError> {
        let data = self
            .data
            .read()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_date = self
            .by_date
            .read()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_date.get(&date).map(|v| v.as_slice()).unwrap_or(&[]);
        Ok(ids
            .iter()
            .filter_map(|id| data.get(id).cloned())
            .filter(|e| e.category == category)
            .collect())
    }

    /// Insert or update an entry
    pub fn upsert(&self, entry: Entry) -> Result<(), DeskError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_date = self
            .by_date
            .write()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Remove from old indexes if updating
        if let Some(old) = data.get(&entry.id) {
            if let Some(ids) = by_category.get_mut(&old.category) {
                ids.retain(|&id| id != entry.id);
            }
            if let Some(ids) = by_date.get_mut(&old.date.date()) {
                ids.retain(|&id| id != entry.id);
            }
        }

        by_category.entry(entry.category).or_default().push(entry.id);
        by_date.entry(entry.date.date()).or_default().push(entry.id);
        data.insert(entry.id, entry);
        Ok(())
    }

    /// Delete an entry, returning it if it existed
    pub fn delete(&self, id: EntryId) -> Result<Option<Entry>, DeskError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_category = self
            .by_category
            .write()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_date = self
            .by_date
            .write()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(entry) = data.remove(&id) {
            if let Some(ids) = by_category.get_mut(&entry.category) {
                ids.retain(|&eid| eid != id);
            }
            if let Some(ids) = by_date.get_mut(&entry.date.date()) {
                ids.retain(|&eid| eid != id);
            }
            Ok(Some(entry))
        } else {
            Ok(None)
        }
    }

    /// Count entries
    pub fn count(&self) -> Result<usize, DeskError> {
        let data = self
            .data
            .read()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }

    /// Number of malformed records excluded at the last load
    pub fn skipped_count(&self) -> Result<usize, DeskError> {
        let skipped = self
            .skipped
            .read()
            .map_err(|e| DeskError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(*skipped)
    }
}
