use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

/// First year published by the DVF open-data service.
pub const FIRST_PUBLISHED_YEAR: u16 = 2014;

/// Year selected when a session starts.
pub const DEFAULT_YEAR: u16 = 2023;

/// Prefix shown in the year selector ("Vendus en 2023").
const LABEL_PREFIX: &str = "Vendus en";

/// Transaction year.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(try_from = "u16", into = "u16")]
pub struct Year(u16);

impl Year {
    pub fn new(value: u16) -> Result<Self> {
        if value < FIRST_PUBLISHED_YEAR || value > 9999 {
            return Err(ModelError::InvalidYear(value.to_string()));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u16 {
        self.0
    }

    /// Selector label, e.g. `Vendus en 2023`.
    pub fn label(self) -> String {
        format!("{LABEL_PREFIX} {}", self.0)
    }

    /// Parse either a bare year or a selector label.
    pub fn parse_label(label: &str) -> Result<Self> {
        let last = label
            .split_whitespace()
            .last()
            .ok_or_else(|| ModelError::InvalidYear(label.to_string()))?;
        let value = last
            .parse::<u16>()
            .map_err(|_| ModelError::InvalidYear(label.to_string()))?;
        Self::new(value)
    }
}

impl Default for Year {
    fn default() -> Self {
        Self(DEFAULT_YEAR)
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Year {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse_label(s)
    }
}

impl TryFrom<u16> for Year {
    type Error = ModelError;

    fn try_from(value: u16) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Year> for u16 {
    fn from(value: Year) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_round_trip() {
        let year = Year::new(2023).unwrap();
        assert_eq!(year.label(), "Vendus en 2023");
        assert_eq!(Year::parse_label("Vendus en 2023").unwrap(), year);
        assert_eq!("2023".parse::<Year>().unwrap(), year);
    }

    #[test]
    fn rejects_years_before_publication() {
        assert!(Year::new(2013).is_err());
        assert!("Vendus en".parse::<Year>().is_err());
        assert!("".parse::<Year>().is_err());
    }
}
