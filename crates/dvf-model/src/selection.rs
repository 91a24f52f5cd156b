//! Session selection state.
//!
//! The state is a plain value: handlers take the previous state and return a
//! new one, so every transition can be exercised without a UI.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ChartId, DatasetKey, Department, Year};

/// Current choices of one dashboard session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    pub department: Department,
    /// Department recorded at the previous transition, used for change detection.
    pub previous_department: Option<Department>,
    pub year: Year,
    pub property_type: Option<String>,
    pub postcode: Option<String>,
    /// Display title of the selected postcode (`06000 - Nice`).
    pub postcode_title: Option<String>,
    pub normalize_by_area: bool,
    pub charts: BTreeSet<ChartId>,
}

impl SelectionState {
    /// Fresh session state. Price-per-area is on and every chart is shown.
    pub fn new(department: Department, year: Year) -> Self {
        Self {
            previous_department: Some(department.clone()),
            department,
            year,
            property_type: None,
            postcode: None,
            postcode_title: None,
            normalize_by_area: true,
            charts: ChartId::all().iter().copied().collect(),
        }
    }

    pub fn key(&self) -> DatasetKey {
        DatasetKey::new(self.department.clone(), self.year)
    }

    /// Clear the postcode and its title.
    pub fn clear_postcode(&mut self) {
        self.postcode = None;
        self.postcode_title = None;
    }
}

/// One entry of the postcode selector.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostcodeOption {
    pub code: String,
    /// `06000 - Nice`, or the bare code when no commune is known.
    pub title: String,
}

impl PostcodeOption {
    pub fn new(code: impl Into<String>, communes: &[String]) -> Self {
        let code = code.into();
        let title = if communes.is_empty() {
            code.clone()
        } else {
            format!("{code} - {}", communes.join(" / "))
        };
        Self { code, title }
    }
}

/// Field of the selection cascade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SelectionField {
    Department,
    Year,
    PropertyType,
    Postcode,
    NormalizeByArea,
    Charts,
}

impl SelectionField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Department => "department",
            Self::Year => "year",
            Self::PropertyType => "property_type",
            Self::Postcode => "postcode",
            Self::NormalizeByArea => "normalize_by_area",
            Self::Charts => "charts",
        }
    }
}

impl fmt::Display for SelectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A user input: the field that changed and its new value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionChange {
    Department(Department),
    Year(Year),
    PropertyType(String),
    /// `None` deselects the postcode.
    Postcode(Option<String>),
    NormalizeByArea(bool),
    Charts(BTreeSet<ChartId>),
}

impl SelectionChange {
    pub fn field(&self) -> SelectionField {
        match self {
            Self::Department(_) => SelectionField::Department,
            Self::Year(_) => SelectionField::Year,
            Self::PropertyType(_) => SelectionField::PropertyType,
            Self::Postcode(_) => SelectionField::Postcode,
            Self::NormalizeByArea(_) => SelectionField::NormalizeByArea,
            Self::Charts(_) => SelectionField::Charts,
        }
    }
}
