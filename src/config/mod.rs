//! Configuration and path management for enrol-desk

pub mod paths;
pub mod settings;

pub use paths::DeskPaths;
pub use settings::Settings;
