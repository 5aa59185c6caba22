//! Transaction categories tracked by the enrolment center
//!
//! The set is fixed: identity-document enrolments, child-document enrolments,
//! and phone-number registrations. Stored records use the lowercase names.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The category an entry was recorded under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Identity-document (Aadhar) enrolments
    Aadhar,
    /// Child-document enrolments
    Child,
    /// Phone-number registrations
    Phone,
}

impl Category {
    /// All categories, in the order reports present them
    pub const ALL: [Category; 3] = [Category::Aadhar, Category::Child, Category::Phone];

    /// Section heading used by reports and exports
    pub fn label(&self) -> &'static str {
        match self {
            Category::Aadhar => "Aadhar Entries",
            Category::Child => "Child Enrolment",
            Category::Phone => "Phone Enrolment",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Aadhar => write!(f, "aadhar"),
            Category::Child => write!(f, "child"),
            Category::Phone => write!(f, "phone"),
        }
    }
}

impl FromStr for Category {
    type Err = CategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "aadhar" => Ok(Category::Aadhar),
            "child" => Ok(Category::Child),
            "phone" => Ok(Category::Phone),
            other => Err(CategoryParseError(other.to_string())),
        }
    }
}

/// Error type for category parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryParseError(pub String);

impl fmt::Display for CategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown category '{}' (expected aadhar, child, or phone)",
            self.0
        )
    }
}

impl std::error::Error for CategoryParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        assert_eq!("aadhar".parse::<Category>().unwrap(), Category::Aadhar);
        assert_eq!("Child".parse::<Category>().unwrap(), Category::Child);
        assert_eq!(" phone ".parse::<Category>().unwrap(), Category::Phone);
        assert!("passport".parse::<Category>().is_err());

        assert_eq!(Category::Aadhar.to_string(), "aadhar");
    }

    #[test]
    fn test_serde_lowercase() {
        let json = serde_json::to_string(&Category::Child).unwrap();
        assert_eq!(json, "\"child\"");

        let parsed: Category = serde_json::from_str("\"phone\"").unwrap();
        assert_eq!(parsed, Category::Phone);
    }

    #[test]
    fn test_all_order() {
        assert_eq!(
            Category::ALL,
            [Category::Aadhar, Category::Child, Category::Phone]
        );
    }
}
