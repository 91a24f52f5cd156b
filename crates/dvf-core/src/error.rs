use dvf_ingest::IngestError;
use dvf_model::{ModelError, Year};
use thiserror::Error;

/// Errors raised by a dashboard session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The summary could not be loaded; the session cannot start.
    #[error("summary dataset could not be loaded: {0}")]
    Summary(#[source] IngestError),

    #[error("year {0} is not offered by this dashboard")]
    YearNotOffered(Year),

    #[error("dashboard configuration is invalid: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for SessionError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, SessionError>;
