//! Core data models for enrol-desk
//!
//! This module contains the data structures that represent the enrolment
//! domain: entries, categories, canonical date keys, money, and holidays.

pub mod category;
pub mod datekey;
pub mod entry;
pub mod holiday;
pub mod ids;
pub mod money;

pub use category::Category;
pub use datekey::DateKey;
pub use entry::{Entry, EntryValidationError, StoredEntry};
pub use holiday::{HolidayCalendar, HolidayKind};
pub use ids::EntryId;
pub use money::Money;
