//! Local mirror of the geo-dvf layout.

use std::fs;
use std::path::{Path, PathBuf};

use dvf_model::DatasetKey;
use polars::prelude::DataFrame;

use super::{DatasetProvider, relative_stem};
use crate::error::{IngestError, Result};
use crate::payload::decode_table;

/// Reads `<root>/<year>/departements/<department>.csv.gz`, falling back to
/// the uncompressed `.csv`. A key with neither file has no data.
#[derive(Debug, Clone)]
pub struct MirrorProvider {
    root: PathBuf,
}

impl MirrorProvider {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Candidate paths for `key`, in lookup order.
    pub fn candidates(&self, key: &DatasetKey) -> [PathBuf; 2] {
        let stem = self.root.join(relative_stem(key));
        [stem.with_extension("csv.gz"), stem.with_extension("csv")]
    }
}

impl DatasetProvider for MirrorProvider {
    fn name(&self) -> &str {
        "mirror"
    }

    fn fetch(&self, key: &DatasetKey) -> Result<Option<DataFrame>> {
        let Some(path) = self.candidates(key).into_iter().find(|path| path.is_file()) else {
            return Ok(None);
        };
        let bytes = fs::read(&path).map_err(|source| IngestError::FileRead {
            path: path.clone(),
            source,
        })?;
        decode_table(bytes, &path.display().to_string())
    }
}
