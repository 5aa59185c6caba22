//! Audit record data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Entry;

/// Types of operations that can be audited
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    /// Entry was created
    Create,
    /// Entry was deleted
    Delete,
}

impl std::fmt::Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Operation::Create => write!(f, "CREATE"),
            Operation::Delete => write!(f, "DELETE"),
        }
    }
}

/// A single audit log record
///
/// Every mutation carries the operator identity it was performed as; the
/// identity arrives with the request, it is never read from ambient state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditRecord {
    /// When the operation occurred (UTC)
    pub timestamp: DateTime<Utc>,

    /// The staff identity that performed the operation
    pub operator: String,

    /// Type of operation performed
    pub operation: Operation,

    /// ID of the affected entry
    pub entry_id: String,

    /// Human-readable summary of the affected entry
    pub detail: String,
}

impl AuditRecord {
    /// Record the creation of an entry
    pub fn create(operator: impl Into<String>, entry: &Entry) -> Self {
        Self {
            timestamp: Utc::now(),
            operator: operator.into(),
            operation: Operation::Create,
            entry_id: entry.id.to_string(),
            detail: entry.to_string(),
        }
    }

    /// Record the deletion of an entry
    pub fn delete(operator: impl Into<String>, entry: &Entry) -> Self {
        Self {
            timestamp: Utc::now(),
            operator: operator.into(),
            operation: Operation::Delete,
            entry_id: entry.id.to_string(),
            detail: entry.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, Money};

    #[test]
    fn test_create_record() {
        let entry = Entry::new(
            Category::Aadhar,
            "1/6/2024".parse().unwrap(),
            "10:30".to_string(),
            5,
            Money::from_rupees(100),
        );

        let record = AuditRecord::create("kavya", &entry);
        assert_eq!(record.operator, "kavya");
        assert_eq!(record.operation, Operation::Create);
        assert_eq!(record.entry_id, entry.id.to_string());
        assert!(record.detail.contains("1/6/2024"));
    }

    #[test]
    fn test_operation_display() {
        assert_eq!(Operation::Create.to_string(), "CREATE");
        assert_eq!(Operation::Delete.to_string(), "DELETE");
    }
}
