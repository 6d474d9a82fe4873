use thiserror::Error;

#[derive(Error, Debug)]
pub enum LabelError {
    #[error("Invalid lookback: {0} (must be at least 1)")]
    InvalidLookback(usize),

    #[error("Unsupported resample frequency: {0}")]
    UnsupportedFrequency(String),

    #[error("Length mismatch: {index} timestamps, {values} values")]
    LengthMismatch { index: usize, values: usize },

    #[error("Column not found: {0}")]
    ColumnNotFound(String),

    #[error("Data loading error: {0}")]
    DataLoading(String),

    #[error("Computation error: {0}")]
    Computation(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, LabelError>;
