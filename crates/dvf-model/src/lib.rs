//! DVF domain model.
//!
//! Plain value types shared by the ingestion, core and CLI crates:
//! department and year catalogues, dataset keys, chart identifiers and the
//! session selection state.

pub mod chart;
pub mod columns;
pub mod department;
pub mod error;
pub mod key;
pub mod record;
pub mod selection;
pub mod year;

pub use chart::ChartId;
pub use department::{DEFAULT_DEPARTMENT, Department};
pub use error::{ModelError, Result};
pub use key::DatasetKey;
pub use record::TransactionRecord;
pub use selection::{PostcodeOption, SelectionChange, SelectionField, SelectionState};
pub use year::{DEFAULT_YEAR, FIRST_PUBLISHED_YEAR, Year};
