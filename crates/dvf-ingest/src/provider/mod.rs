//! Dataset providers.
//!
//! A provider resolves a [`DatasetKey`] to a raw frame. `Ok(None)` is a valid
//! "no data" answer (unsupported key, empty file); `Err` is a transport or
//! payload failure.

mod http;
mod mirror;

pub use http::{DEFAULT_DATASET_BASE_URL, HttpConfig, HttpProvider, build_client, fetch_bytes};
pub use mirror::MirrorProvider;

use dvf_model::DatasetKey;
use polars::prelude::DataFrame;

use crate::error::Result;

/// Source of per-(department, year) transaction tables.
pub trait DatasetProvider {
    /// Short name used in log events.
    fn name(&self) -> &str;

    /// Fetch the raw table for `key`.
    fn fetch(&self, key: &DatasetKey) -> Result<Option<DataFrame>>;
}

impl<P: DatasetProvider + ?Sized> DatasetProvider for Box<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn fetch(&self, key: &DatasetKey) -> Result<Option<DataFrame>> {
        (**self).fetch(key)
    }
}

/// Relative location of a dataset in the geo-dvf layout, without extension.
pub(crate) fn relative_stem(key: &DatasetKey) -> String {
    format!("{}/departements/{}", key.year, key.department)
}
