use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("unknown department code: '{0}'")]
    InvalidDepartment(String),
    #[error("invalid year: '{0}'")]
    InvalidYear(String),
    #[error("unknown chart identifier: '{0}'")]
    UnknownChart(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
