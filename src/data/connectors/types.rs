use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Columns the connector looks for by name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnRole {
    Time,
    Close,
}

impl ColumnRole {
    /// Accepted names, matched case-insensitively, in order of preference
    pub fn aliases(&self) -> Vec<&'static str> {
        match self {
            Self::Time => vec!["date", "datetime", "time", "timestamp"],
            Self::Close => vec!["close", "adj_close", "adj close", "price", "c"],
        }
    }
}

/// Metadata about a loaded price file
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetMetadata {
    pub file_path: String,
    pub num_rows: usize,
    pub time_column: String,
    pub price_columns: Vec<String>,
    pub date_range: Option<(DateTime<Utc>, DateTime<Utc>)>,
}
