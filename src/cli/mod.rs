//! Command-line interface handlers for enrol-desk

pub mod entry;
pub mod report;

pub use entry::{handle_entry_command, EntryCommands};
pub use report::{handle_report_command, ReportCommands};
