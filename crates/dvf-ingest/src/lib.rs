//! DVF data acquisition.
//!
//! Resolves (department, year) keys to transaction datasets through a
//! [`DatasetProvider`], memoizes the answers in a per-session
//! [`DatasetCache`] and loads the department-level summary.

pub mod cache;
pub mod dataset;
pub mod error;
pub mod payload;
pub mod polars_utils;
pub mod provider;
pub mod summary;

// === Errors ===
pub use error::{IngestError, Result};

// === Datasets ===
pub use dataset::{Dataset, records_from_frame};
pub use payload::decode_table;

// === Providers ===
pub use provider::{
    DEFAULT_DATASET_BASE_URL, DatasetProvider, HttpConfig, HttpProvider, MirrorProvider,
};

// === Cache ===
pub use cache::{DatasetCache, DatasetLookup, UnavailableReason};

// === Summary ===
pub use summary::{SUMMARY_FILE_NAME, SummaryDataset, SummaryLoader, SummarySource};
