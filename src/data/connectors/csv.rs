use crate::config::DataConfig;
use crate::error::{LabelError, Result};
use crate::labeling::frame::{numeric_columns, timestamps};
use crate::types::PriceSeries;
use polars::prelude::*;
use std::path::Path;
use super::{
    types::{ColumnRole, DatasetMetadata},
    validator::DataValidator,
};

pub struct CsvConnector;

impl CsvConnector {
    /// Load CSV file into DataFrame, parsing date-like columns
    pub fn load<P: AsRef<Path>>(path: P) -> Result<DataFrame> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_parse_options(CsvParseOptions::default().with_try_parse_dates(true))
            .try_into_reader_with_file_path(Some(path.as_ref().to_path_buf()))?
            .finish()
            .map_err(|e| LabelError::DataLoading(format!("Failed to read CSV: {}", e)))?;

        Ok(df)
    }

    /// Load a price table and check it can be labeled.
    ///
    /// Returns the frame with the time column and price columns resolved
    /// from `config`, or detected when the config leaves them unset.
    pub fn load_and_validate<P: AsRef<Path>>(
        path: P,
        config: &DataConfig,
    ) -> Result<(DataFrame, DatasetMetadata)> {
        let df = Self::load(&path)?;

        let time_column = match &config.time_column {
            Some(name) => name.clone(),
            None => Self::detect_time_column(&df).ok_or_else(|| {
                LabelError::DataLoading(format!(
                    "No time column found (tried aliases: {:?})",
                    ColumnRole::Time.aliases()
                ))
            })?,
        };

        let price_columns = if config.price_columns.is_empty() {
            numeric_columns(&df, &time_column)
        } else {
            config.price_columns.clone()
        };
        if price_columns.is_empty() {
            return Err(LabelError::DataLoading("No numeric price columns found".to_string()));
        }

        DataValidator::validate_minimum_rows(&df, config.min_rows)?;

        let column = df
            .column(&time_column)
            .map_err(|_| LabelError::ColumnNotFound(time_column.clone()))?;
        let index = timestamps(column)?;
        DataValidator::check_monotonic(&index)?;

        // Warn about nulls but don't fail
        let null_report = DataValidator::check_nulls(&df);
        if !null_report.is_empty() {
            log::warn!("Null values detected: {:?}", null_report);
        }

        let metadata = DatasetMetadata {
            file_path: path.as_ref().to_string_lossy().to_string(),
            num_rows: df.height(),
            time_column,
            price_columns,
            date_range: index.first().copied().zip(index.last().copied()),
        };

        Ok((df, metadata))
    }

    /// Load one price series. Without `price_column`, the first close-like
    /// column is used.
    pub fn load_prices<P: AsRef<Path>>(path: P, price_column: Option<&str>) -> Result<PriceSeries> {
        let config = DataConfig::default();
        let (df, metadata) = Self::load_and_validate(path, &config)?;

        let price_column = match price_column {
            Some(name) => name.to_string(),
            None => Self::find_close_column(&df).ok_or_else(|| {
                LabelError::DataLoading(format!(
                    "No close column found (tried aliases: {:?})",
                    ColumnRole::Close.aliases()
                ))
            })?,
        };

        PriceSeries::from_frame(&df, &metadata.time_column, &price_column)
    }

    pub fn detect_time_column(df: &DataFrame) -> Option<String> {
        Self::find_column(df, ColumnRole::Time)
    }

    pub fn find_close_column(df: &DataFrame) -> Option<String> {
        Self::find_column(df, ColumnRole::Close)
    }

    fn find_column(df: &DataFrame, role: ColumnRole) -> Option<String> {
        let columns = df.get_column_names();
        role.aliases().iter().find_map(|alias| {
            columns
                .iter()
                .find(|col| col.as_str().eq_ignore_ascii_case(alias))
                .map(|col| col.to_string())
        })
    }
}
