use super::traits::ConfigSection;
use crate::error::LabelError;
use serde::{Deserialize, Serialize};

/// How price files are read
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Time column name; detected from common aliases when unset
    pub time_column: Option<String>,
    /// Price columns to label; every numeric column when empty
    pub price_columns: Vec<String>,
    pub min_rows: usize,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            time_column: None,
            price_columns: Vec::new(),
            min_rows: 2,
        }
    }
}

impl ConfigSection for DataConfig {
    fn section_name() -> &'static str {
        "data"
    }

    fn validate(&self) -> Result<(), LabelError> {
        if self.min_rows == 0 {
            return Err(LabelError::Configuration(
                "min_rows must be at least 1".to_string()
            ));
        }
        if let Some(time_column) = &self.time_column {
            if self.price_columns.iter().any(|c| c == time_column) {
                return Err(LabelError::Configuration(format!(
                    "Column '{}' cannot be both the time column and a price column",
                    time_column
                )));
            }
        }
        Ok(())
    }
}
