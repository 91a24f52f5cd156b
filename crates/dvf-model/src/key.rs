use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Department, Year};

/// Identity of a transaction dataset: one department for one year.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct DatasetKey {
    pub department: Department,
    pub year: Year,
}

impl DatasetKey {
    pub fn new(department: Department, year: Year) -> Self {
        Self { department, year }
    }
}

impl fmt::Display for DatasetKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.department, self.year)
    }
}
