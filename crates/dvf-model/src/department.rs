use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{ModelError, Result};

/// Department selected when a session starts.
pub const DEFAULT_DEPARTMENT: &str = "06";

/// Overseas departments published by the open-data portal.
const OVERSEAS: &[&str] = &["971", "972", "973", "974"];

/// Corsican departments (alphanumeric codes).
const CORSICA: &[&str] = &["2A", "2B"];

/// French department code (INSEE style: `01`..`95`, `971`..`974`, `2A`, `2B`).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Department(String);

impl Department {
    /// Validate a department code against the catalogue.
    ///
    /// Single-digit metropolitan codes are zero-padded (`6` -> `06`) and
    /// Corsican codes are upper-cased (`2a` -> `2A`).
    pub fn new(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        let trimmed = value.trim();
        let candidate = if trimmed.len() == 1 && trimmed.chars().all(|c| c.is_ascii_digit()) {
            format!("0{trimmed}")
        } else {
            trimmed.to_ascii_uppercase()
        };
        if is_known(&candidate) {
            Ok(Self(candidate))
        } else {
            Err(ModelError::InvalidDepartment(value))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The full department catalogue, in selector order.
    pub fn all() -> Vec<Department> {
        catalogue().into_iter().map(Department).collect()
    }

    pub fn default_department() -> Self {
        Self(DEFAULT_DEPARTMENT.to_string())
    }

    pub fn is_overseas(&self) -> bool {
        OVERSEAS.contains(&self.0.as_str())
    }
}

fn catalogue() -> Vec<String> {
    let mut codes: Vec<String> = (1..=95).map(|n| format!("{n:02}")).collect();
    codes.extend(OVERSEAS.iter().map(|code| (*code).to_string()));
    codes.extend(CORSICA.iter().map(|code| (*code).to_string()));
    codes
}

fn is_known(code: &str) -> bool {
    if OVERSEAS.contains(&code) || CORSICA.contains(&code) {
        return true;
    }
    code.len() == 2
        && code
            .parse::<u8>()
            .is_ok_and(|number| (1..=95).contains(&number))
}

impl Default for Department {
    fn default() -> Self {
        Self::default_department()
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Department {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for Department {
    type Error = ModelError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Department> for String {
    fn from(value: Department) -> Self {
        value.0
    }
}
