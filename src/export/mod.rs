//! Export functionality for enrol-desk

pub mod csv;

pub use csv::export_entries_csv;
