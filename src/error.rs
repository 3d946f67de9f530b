use crate::store::DatasetKind;
use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("{kind} data not available for {date}")]
    DataUnavailable { kind: DatasetKind, date: NaiveDate },

    #[error("Failed to persist {kind} batch for {date}: {message}")]
    WriteFailed {
        kind: DatasetKind,
        date: NaiveDate,
        message: String,
    },

    #[error("Registry error: {0}")]
    Registry(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Polars error: {0}")]
    Polars(String),
}

impl From<polars::error::PolarsError> for EnrichError {
    fn from(err: polars::error::PolarsError) -> Self {
        EnrichError::Polars(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, EnrichError>;
