//! User settings for enrol-desk
//!
//! Manages the center's preferences: the weekly rest day, the designated
//! holiday list, and presentation defaults. Holiday dates may be supplied in
//! either the canonical `day/month/year` key form or ISO `YYYY-MM-DD`; both
//! are normalized through the date key parser when the calendar is built.

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use super::paths::DeskPaths;
use crate::error::DeskError;
use crate::models::{DateKey, HolidayCalendar};

/// User settings for enrol-desk
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in terminal output
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Weekly rest day (0 = Sunday, 1 = Monday, ...)
    #[serde(default)]
    pub weekly_off_day: u8,

    /// Designated holiday dates, in any supported date representation
    #[serde(default)]
    pub holidays: Vec<String>,

    /// Whether initial setup has been completed
    #[serde(default)]
    pub setup_completed: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "₹".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            weekly_off_day: 0,
            holidays: Vec::new(),
            setup_completed: false,
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &DeskPaths) -> Result<Self, DeskError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path)
                .map_err(|e| DeskError::Io(format!("Failed to read settings file: {}", e)))?;

            let settings: Settings = serde_json::from_str(&contents)
                .map_err(|e| DeskError::Config(format!("Failed to parse settings file: {}", e)))?;

            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &DeskPaths) -> Result<(), DeskError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| DeskError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(&settings_path, contents)
            .map_err(|e| DeskError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// The configured weekly rest day
    pub fn weekly_off(&self) -> Result<Weekday, DeskError> {
        match self.weekly_off_day {
            0 => Ok(Weekday::Sun),
            1 => Ok(Weekday::Mon),
            2 => Ok(Weekday::Tue),
            3 => Ok(Weekday::Wed),
            4 => Ok(Weekday::Thu),
            5 => Ok(Weekday::Fri),
            6 => Ok(Weekday::Sat),
            other => Err(DeskError::Config(format!(
                "Invalid weekly rest day {} (expected 0-6)",
                other
            ))),
        }
    }

    /// Build the holiday calendar from these settings
    ///
    /// A holiday entry that parses in no supported representation is a
    /// configuration error, not a silently skipped date.
    pub fn holiday_calendar(&self) -> Result<HolidayCalendar, DeskError> {
        let weekly_off = self.weekly_off()?;

        let mut dates = Vec::with_capacity(self.holidays.len());
        for raw in &self.holidays {
            let key: DateKey = raw
                .parse()
                .map_err(|e| DeskError::Config(format!("Invalid holiday date '{}': {}", raw, e)))?;
            dates.push(key.date());
        }

        Ok(HolidayCalendar::new(weekly_off, dates))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.currency_symbol, "₹");
        assert_eq!(settings.weekly_off_day, 0);
        assert!(settings.holidays.is_empty());
        assert!(!settings.setup_completed);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = DeskPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.holidays = vec!["2024-06-19".to_string(), "21/6/2024".to_string()];
        settings.setup_completed = true;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.holidays.len(), 2);
        assert!(loaded.setup_completed);
    }

    #[test]
    fn test_holiday_calendar_normalizes_both_forms() {
        let mut settings = Settings::default();
        settings.holidays = vec!["2024-06-19".to_string(), "21/6/2024".to_string()];

        let calendar = settings.holiday_calendar().unwrap();
        assert!(calendar.is_holiday(NaiveDate::from_ymd_opt(2024, 6, 19).unwrap()));
        assert!(calendar.is_holiday(NaiveDate::from_ymd_opt(2024, 6, 21).unwrap()));
        assert!(!calendar.is_holiday(NaiveDate::from_ymd_opt(2024, 6, 20).unwrap()));
    }

    #[test]
    fn test_bad_holiday_entry_is_config_error() {
        let mut settings = Settings::default();
        settings.holidays = vec!["next tuesday".to_string()];

        let err = settings.holiday_calendar().unwrap_err();
        assert!(matches!(err, DeskError::Config(_)));
    }

    #[test]
    fn test_invalid_weekly_off_day() {
        let mut settings = Settings::default();
        settings.weekly_off_day = 9;
        assert!(settings.weekly_off().is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let settings = Settings::default();
        let json = serde_json::to_string(&settings).unwrap();
        let deserialized: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(settings.weekly_off_day, deserialized.weekly_off_day);
    }
}
