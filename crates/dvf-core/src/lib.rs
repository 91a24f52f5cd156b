//! DVF dashboard core.
//!
//! Field derivation (price per m²), the selection reconciler and the
//! session that ties them to the dataset cache and the summary.

pub mod config;
pub mod derive;
pub mod error;
pub mod reconcile;
pub mod session;

// === Configuration ===
pub use config::{DEFAULT_YEARS, DashboardConfig};

// === Errors ===
pub use error::{Result, SessionError};

// === Field derivation ===
pub use derive::{filter_selection, normalize, normalize_frame, undefined_count};

// === Reconciliation ===
pub use reconcile::{ReadyView, SelectionView, ViewSummary, handle_selection_change, reconcile};

// === Session ===
pub use session::DashboardSession;
