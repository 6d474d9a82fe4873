use crate::error::{LabelError, Result};
use chrono::{DateTime, Utc};
use polars::prelude::*;

pub struct DataValidator;

impl DataValidator {
    /// Check for minimum required rows
    pub fn validate_minimum_rows(df: &DataFrame, min_rows: usize) -> Result<()> {
        if df.height() < min_rows {
            return Err(LabelError::DataLoading(format!(
                "Insufficient data: {} rows, minimum {} required",
                df.height(),
                min_rows
            )));
        }
        Ok(())
    }

    /// Null counts per column, for columns that have any
    pub fn check_nulls(df: &DataFrame) -> Vec<(String, usize)> {
        df.get_columns()
            .iter()
            .filter(|c| c.null_count() > 0)
            .map(|c| (c.name().to_string(), c.null_count()))
            .collect()
    }

    /// Timestamps must be strictly increasing.
    pub fn check_monotonic(index: &[DateTime<Utc>]) -> Result<()> {
        for (row, pair) in index.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(LabelError::DataLoading(format!(
                    "Timestamps not strictly increasing at row {}: {} follows {}",
                    row + 1,
                    pair[1],
                    pair[0]
                )));
            }
        }
        Ok(())
    }
}
