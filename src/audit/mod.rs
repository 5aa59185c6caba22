//! Audit logging for enrol-desk
//!
//! Records entry create/delete operations with the operator identity in an
//! append-only, line-delimited JSON log.

mod entry;
mod logger;

pub use entry::{AuditRecord, Operation};
pub use logger::AuditLogger;
