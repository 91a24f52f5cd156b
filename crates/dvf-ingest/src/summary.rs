//! Department-level summary dataset, loaded once per session.

use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use dvf_model::Department;
use dvf_model::columns::CODE_DEPARTEMENT;
use polars::prelude::*;
use tracing::info;

use crate::error::{IngestError, Result};
use crate::payload::decode_table;
use crate::polars_utils::{has_column, string_values};
use crate::provider::{HttpConfig, build_client, fetch_bytes};

/// File name of the pre-aggregated summary under the assets base URL.
pub const SUMMARY_FILE_NAME: &str = "geo_dvf_summarized_full.csv.gz";

/// Where the summary comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SummarySource {
    File(PathBuf),
    Url(String),
}

impl SummarySource {
    /// `http://` and `https://` values are URLs, anything else a path.
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.starts_with("http://") || value.starts_with("https://") {
            Self::Url(value.to_string())
        } else {
            Self::File(PathBuf::from(value))
        }
    }

    /// Summary file under an assets base URL.
    pub fn from_assets_base(base: &str) -> Self {
        Self::Url(format!("{}/{SUMMARY_FILE_NAME}", base.trim_end_matches('/')))
    }
}

impl fmt::Display for SummarySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Url(url) => f.write_str(url),
        }
    }
}

/// Read-only per-department aggregate.
#[derive(Debug, Clone)]
pub struct SummaryDataset {
    source: SummarySource,
    frame: DataFrame,
    codes: Vec<Option<String>>,
}

impl SummaryDataset {
    /// Validate a decoded summary table.
    ///
    /// Department codes are normalized (`6` -> `06`) so they match the live
    /// datasets; codes outside the catalogue are kept verbatim.
    pub fn from_frame(source: SummarySource, frame: DataFrame) -> Result<Self> {
        if frame.height() == 0 {
            return Err(IngestError::EmptySummary {
                origin: source.to_string(),
            });
        }
        if !has_column(&frame, CODE_DEPARTEMENT) {
            return Err(IngestError::MissingColumn {
                column: CODE_DEPARTEMENT.to_string(),
                origin: source.to_string(),
            });
        }
        let codes = string_values(&frame, CODE_DEPARTEMENT)?
            .into_iter()
            .map(|code| {
                code.map(|code| {
                    Department::new(code.as_str())
                        .map(String::from)
                        .unwrap_or(code)
                })
            })
            .collect();
        Ok(Self {
            source,
            frame,
            codes,
        })
    }

    pub fn source(&self) -> &SummarySource {
        &self.source
    }

    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    pub fn height(&self) -> usize {
        self.frame.height()
    }

    /// Distinct department codes present in the summary, in catalogue order.
    pub fn departments(&self) -> Vec<Department> {
        Department::all()
            .into_iter()
            .filter(|department| {
                self.codes
                    .iter()
                    .flatten()
                    .any(|code| code == department.as_str())
            })
            .collect()
    }

    /// Rows of one department.
    pub fn for_department(&self, department: &Department) -> Result<DataFrame> {
        let mask: Vec<bool> = self
            .codes
            .iter()
            .map(|code| code.as_deref() == Some(department.as_str()))
            .collect();
        let mask = BooleanChunked::from_slice("mask".into(), &mask);
        Ok(self.frame.filter(&mask)?)
    }
}

/// Loads the summary at most once.
pub struct SummaryLoader {
    source: SummarySource,
    http: HttpConfig,
    loaded: Option<Arc<SummaryDataset>>,
}

impl SummaryLoader {
    pub fn new(source: SummarySource, http: HttpConfig) -> Self {
        Self {
            source,
            http,
            loaded: None,
        }
    }

    pub fn source(&self) -> &SummarySource {
        &self.source
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    /// Return the summary, reading the source on the first call only.
    ///
    /// Failures are not memoized.
    pub fn load(&mut self) -> Result<Arc<SummaryDataset>> {
        if let Some(summary) = &self.loaded {
            return Ok(Arc::clone(summary));
        }

        info!(source = %self.source, "loading summary dataset");
        let origin = self.source.to_string();
        let bytes = match &self.source {
            SummarySource::File(path) => {
                if !path.is_file() {
                    return Err(IngestError::FileNotFound { path: path.clone() });
                }
                fs::read(path).map_err(|source| IngestError::FileRead {
                    path: path.clone(),
                    source,
                })?
            }
            SummarySource::Url(url) => {
                let client = build_client(&self.http)?;
                fetch_bytes(&client, &self.http, url)?.ok_or_else(|| IngestError::HttpStatus {
                    url: url.clone(),
                    status: 404,
                })?
            }
        };

        let frame = decode_table(bytes, &origin)?
            .ok_or_else(|| IngestError::EmptySummary { origin })?;
        let summary = Arc::new(SummaryDataset::from_frame(self.source.clone(), frame)?);
        info!(rows = summary.height(), "summary dataset loaded");
        self.loaded = Some(Arc::clone(&summary));
        Ok(summary)
    }
}
