use super::raw_return::{Diagnostic, RawReturnLabeler};
use crate::config::LabelingConfig;
use crate::error::{LabelError, Result};
use crate::types::{PriceSeries, ReturnSeries};
use chrono::{DateTime, Utc};
use polars::prelude::*;

/// Result of labeling every price column of a frame
#[derive(Debug, Clone)]
pub struct FrameOutcome {
    /// Time column followed by one label column per price column
    pub frame: DataFrame,
    /// Price columns whose labels came out degenerate
    pub diagnostics: Vec<(String, Diagnostic)>,
}

fn column<'a>(frame: &'a DataFrame, name: &str) -> Result<&'a Column> {
    frame
        .column(name)
        .map_err(|_| LabelError::ColumnNotFound(name.to_string()))
}

fn is_numeric(dtype: &DataType) -> bool {
    matches!(
        dtype,
        DataType::Float64 | DataType::Float32 | DataType::Int64 | DataType::Int32 | DataType::UInt64 | DataType::UInt32
    )
}

/// Read a time column as UTC timestamps. Accepts Date, Datetime of any unit
/// or timezone, and integer epoch milliseconds.
pub(crate) fn timestamps(col: &Column) -> Result<Vec<DateTime<Utc>>> {
    let millis = match col.dtype() {
        DataType::Date => col
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?
            .cast(&DataType::Int64)?,
        DataType::Datetime(_, tz) => col
            .cast(&DataType::Datetime(TimeUnit::Milliseconds, tz.clone()))?
            .cast(&DataType::Int64)?,
        DataType::Int64 | DataType::Int32 | DataType::UInt64 | DataType::UInt32 => {
            col.cast(&DataType::Int64)?
        }
        other => {
            return Err(LabelError::DataLoading(format!(
                "Time column '{}' must be a date, datetime or integer, found {:?}",
                col.name(),
                other
            )))
        }
    };

    millis
        .i64()?
        .into_iter()
        .enumerate()
        .map(|(row, ms)| {
            ms.and_then(DateTime::from_timestamp_millis).ok_or_else(|| {
                LabelError::DataLoading(format!(
                    "Missing or out-of-range timestamp in '{}' at row {}",
                    col.name(),
                    row
                ))
            })
        })
        .collect()
}

impl PriceSeries {
    /// Build a price series from two columns of `frame`. Null prices become
    /// NaN so they propagate into the labels.
    pub fn from_frame(frame: &DataFrame, time_column: &str, price_column: &str) -> Result<Self> {
        let index = timestamps(column(frame, time_column)?)?;

        let price_col = column(frame, price_column)?;
        if !is_numeric(price_col.dtype()) {
            return Err(LabelError::DataLoading(format!(
                "Price column '{}' must be numeric, found {:?}",
                price_column,
                price_col.dtype()
            )));
        }

        let nulls = price_col.null_count();
        if nulls > 0 {
            log::warn!("{} null prices in '{}' treated as NaN", nulls, price_column);
        }

        let prices: Vec<f64> = price_col
            .cast(&DataType::Float64)?
            .f64()?
            .into_iter()
            .map(|p| p.unwrap_or(f64::NAN))
            .collect();

        Self::new(index, prices)
    }
}

impl ReturnSeries {
    /// Two-column frame: `Datetime[ms]` index and `Float64` labels, with
    /// nulls where the label is missing.
    pub fn to_frame(&self, time_column: &str, value_column: &str) -> Result<DataFrame> {
        let time = time_series(time_column, self.index())?;
        let values = Series::new(value_column.into(), self.values().to_vec());
        Ok(DataFrame::new(vec![time.into_column(), values.into_column()])?)
    }
}

fn time_series(name: &str, index: &[DateTime<Utc>]) -> Result<Series> {
    let millis: Vec<i64> = index.iter().map(|ts| ts.timestamp_millis()).collect();
    Ok(Series::new(name.into(), millis).cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?)
}

/// Numeric columns of `frame` other than `time_column`, in frame order.
pub fn numeric_columns(frame: &DataFrame, time_column: &str) -> Vec<String> {
    frame
        .get_columns()
        .iter()
        .filter(|c| c.name().as_str() != time_column && is_numeric(c.dtype()))
        .map(|c| c.name().to_string())
        .collect()
}

/// Label each price column of a wide frame (one column per asset) with the
/// same options. An empty `price_columns` selects every numeric column.
///
/// All columns share the frame's time index, so the output has a single
/// time column followed by one label column per asset, named as the input.
pub fn label_frame(
    frame: &DataFrame,
    time_column: &str,
    price_columns: &[String],
    config: &LabelingConfig,
) -> Result<FrameOutcome> {
    let columns = if price_columns.is_empty() {
        numeric_columns(frame, time_column)
    } else {
        price_columns.to_vec()
    };

    if columns.is_empty() {
        return Err(LabelError::ColumnNotFound(format!(
            "no numeric price columns besides '{}'",
            time_column
        )));
    }

    let labeler = RawReturnLabeler::new(config.clone())?;
    let mut index: Option<Vec<DateTime<Utc>>> = None;
    let mut label_columns = Vec::with_capacity(columns.len());
    let mut diagnostics = Vec::new();

    for name in &columns {
        let prices = PriceSeries::from_frame(frame, time_column, name)?;
        let outcome = labeler.label(&prices)?;

        if let Some(diagnostic) = outcome.diagnostic {
            diagnostics.push((name.clone(), diagnostic));
        }

        let series = outcome.series;
        if index.is_none() {
            index = Some(series.index().to_vec());
        }
        label_columns.push(Series::new(name.as_str().into(), series.values().to_vec()).into_column());
    }

    let index = index.unwrap_or_default();
    let mut all_columns = Vec::with_capacity(label_columns.len() + 1);
    all_columns.push(time_series(time_column, &index)?.into_column());
    all_columns.extend(label_columns);

    Ok(FrameOutcome {
        frame: DataFrame::new(all_columns)?,
        diagnostics,
    })
}
