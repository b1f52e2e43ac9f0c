//! Error handling for the candidate matcher

use thiserror::Error;

#[derive(Error, Debug)]
pub enum MatcherError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Row normalization failed: {0}")]
    Normalization(#[from] NormalizationError),

    #[error("Processing error: {0}")]
    Processing(String),

    #[error("Output formatting error: {0}")]
    OutputFormatting(String),
}

/// Why a single raw row could not be turned into a canonical record.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum NormalizationError {
    #[error("column '{column}' holds a nested value ({kind}) where a scalar was expected")]
    MalformedCell { column: String, kind: String },

    #[error("row is not a record: {0}")]
    MalformedRow(String),
}

pub type Result<T> = std::result::Result<T, MatcherError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for MatcherError {
    fn from(err: anyhow::Error) -> Self {
        MatcherError::Processing(format!("{:#}", err))
    }
}
