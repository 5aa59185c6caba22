//! Storage layer for enrol-desk
//!
//! Provides JSON file storage with atomic writes, validated load, and
//! automatic directory creation.

pub mod entries;
pub mod file_io;

pub use entries::EntryRepository;
pub use file_io::{read_json, write_json_atomic};

use crate::audit::{AuditLogger, AuditRecord};
use crate::config::paths::DeskPaths;
use crate::error::DeskError;
use crate::models::Entry;

/// Main storage coordinator that provides access to the entry store
/// and the audit log
pub struct Storage {
    paths: DeskPaths,
    pub entries: EntryRepository,
    audit: AuditLogger,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: DeskPaths) -> Result<Self, DeskError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            entries: EntryRepository::new(paths.entries_file()),
            audit: AuditLogger::new(paths.audit_log()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &DeskPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), DeskError> {
        self.entries.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), DeskError> {
        self.entries.save()?;
        Ok(())
    }

    /// Check if storage has been initialized
    pub fn is_initialized(&self) -> bool {
        self.paths.settings_file().exists()
    }

    /// Audit an entry creation under the given operator identity
    pub fn log_create(&self, operator: &str, entry: &Entry) -> Result<(), DeskError> {
        self.audit.log(&AuditRecord::create(operator, entry))
    }

    /// Audit an entry deletion under the given operator identity
    pub fn log_delete(&self, operator: &str, entry: &Entry) -> Result<(), DeskError> {
        self.audit.log(&AuditRecord::delete(operator, entry))
    }

    /// Access the audit log
    pub fn audit(&self) -> &AuditLogger {
        &self.audit
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DeskPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data").exists());
        assert!(!storage.is_initialized());
    }
}
