//! Dashboard catalogue settings.

use dvf_model::{Department, SelectionState, Year};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SessionError};

/// Years published by the open-data portal and offered in the selector.
pub const DEFAULT_YEARS: [u16; 6] = [2018, 2019, 2020, 2021, 2022, 2023];

/// Selector catalogue and initial selections of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Offered years, oldest first.
    pub years: Vec<Year>,
    pub default_department: Department,
    /// Defaults to the latest offered year.
    pub default_year: Year,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let years: Vec<Year> = DEFAULT_YEARS.iter().filter_map(|y| Year::new(*y).ok()).collect();
        let default_year = years.last().copied().unwrap_or_default();
        Self {
            years,
            default_department: Department::default_department(),
            default_year,
        }
    }
}

impl DashboardConfig {
    /// Build from a year list, selecting the latest year by default.
    pub fn with_years(mut years: Vec<Year>, default_department: Department) -> Result<Self> {
        years.sort_unstable();
        years.dedup();
        let default_year = *years
            .last()
            .ok_or_else(|| SessionError::InvalidConfig("no year configured".to_string()))?;
        Ok(Self {
            years,
            default_department,
            default_year,
        })
    }

    pub fn validate(&self) -> Result<()> {
        if self.years.is_empty() {
            return Err(SessionError::InvalidConfig("no year configured".to_string()));
        }
        if !self.offers(self.default_year) {
            return Err(SessionError::InvalidConfig(format!(
                "default year {} is not in the year list",
                self.default_year
            )));
        }
        Ok(())
    }

    pub fn offers(&self, year: Year) -> bool {
        self.years.contains(&year)
    }

    /// Year selector labels (`Vendus en 2023`).
    pub fn year_labels(&self) -> Vec<String> {
        self.years.iter().map(|year| year.label()).collect()
    }

    pub fn initial_state(&self) -> SelectionState {
        SelectionState::new(self.default_department.clone(), self.default_year)
    }
}
