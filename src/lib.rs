//! enrol-desk - Data entry and reporting for an enrolment center
//!
//! This library provides the core functionality for enrol-desk, an internal
//! tool for an enrolment-center business tracking three transaction
//! categories (identity-document enrolments, child-document enrolments,
//! phone-number registrations). Staff log per-transaction counts and prices;
//! the system aggregates these into daily, weekly, monthly, and income
//! reports, exportable as CSV.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Configuration and path management
//! - `error`: Custom error types
//! - `models`: Core data models (entries, categories, date keys, money)
//! - `storage`: JSON file storage layer with validated load
//! - `audit`: Audit logging of mutations with operator identity
//! - `services`: Business logic layer, including the aggregation core
//! - `reports`: The four report views
//! - `export`: CSV export of the raw entry register
//! - `cli`: Command handlers for the binary

pub mod audit;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use error::{DeskError, DeskResult};
