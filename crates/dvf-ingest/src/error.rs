//! Error types for DVF data acquisition.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while fetching or decoding DVF data.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum IngestError {
    // === File System Errors ===
    /// Source file not found.
    #[error("file not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // === Transport Errors ===
    /// HTTP client could not be built.
    #[error("failed to create HTTP client: {0}")]
    HttpClient(String),

    /// Request failed before a response was received.
    #[error("network error for {url}: {message}")]
    Network { url: String, message: String },

    /// Server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    HttpStatus { url: String, status: u16 },

    // === Payload Errors ===
    /// Gzip payload could not be decompressed.
    #[error("failed to decompress {origin}: {source}")]
    Decompress {
        origin: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse CSV with Polars.
    #[error("failed to parse CSV {origin}: {message}")]
    CsvParse { origin: String, message: String },

    /// Required column not found in the payload.
    #[error("required column '{column}' not found in {origin}")]
    MissingColumn { column: String, origin: String },

    /// Summary source contains no rows.
    #[error("summary dataset is empty: {origin}")]
    EmptySummary { origin: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl IngestError {
    /// Whether the error comes from reaching or reading the remote source,
    /// as opposed to a local file problem.
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::HttpClient(_)
                | Self::Network { .. }
                | Self::HttpStatus { .. }
                | Self::Decompress { .. }
                | Self::CsvParse { .. }
                | Self::MissingColumn { .. }
        )
    }

    /// Returns a short message suitable for display in the dashboard.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::HttpClient(_) | Self::Network { .. } | Self::HttpStatus { .. } => {
                "The open-data service could not be reached."
            }
            Self::Decompress { .. } | Self::CsvParse { .. } | Self::MissingColumn { .. } => {
                "The open-data service returned an unreadable file."
            }
            Self::FileNotFound { .. } | Self::FileRead { .. } => "A data file could not be read.",
            Self::EmptySummary { .. } => "The summary dataset is empty.",
            Self::DataFrame { .. } => "An unexpected error occurred.",
        }
    }
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
