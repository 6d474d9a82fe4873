use crate::error::{LabelError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Ordered (timestamp, price) observations.
///
/// Timestamps are expected to be strictly increasing but this is not checked
/// here; the loaders in `data::connectors` own that validation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSeries {
    index: Vec<DateTime<Utc>>,
    prices: Vec<f64>,
}

impl PriceSeries {
    pub fn new(index: Vec<DateTime<Utc>>, prices: Vec<f64>) -> Result<Self> {
        if index.len() != prices.len() {
            return Err(LabelError::LengthMismatch {
                index: index.len(),
                values: prices.len(),
            });
        }
        Ok(Self { index, prices })
    }

    pub fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (DateTime<Utc>, f64)>,
    {
        let (index, prices) = pairs.into_iter().unzip();
        Self { index, prices }
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, f64)> + '_ {
        self.index.iter().copied().zip(self.prices.iter().copied())
    }
}

/// Whether a return series holds raw magnitudes or sign categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LabelKind {
    Continuous,
    Categorical,
}

/// Sign category of a return
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sign {
    Down = -1,
    Flat = 0,
    Up = 1,
}

impl Sign {
    /// `None` for NaN, which has no sign.
    pub fn of(value: f64) -> Option<Self> {
        if value.is_nan() {
            None
        } else if value > 0.0 {
            Some(Self::Up)
        } else if value < 0.0 {
            Some(Self::Down)
        } else {
            Some(Self::Flat)
        }
    }

    pub fn as_f64(self) -> f64 {
        self as i8 as f64
    }
}

/// Labels aligned to a (possibly resampled) price index.
///
/// `None` marks a position with no defined label: not enough lookback
/// history, or the trailing positions of a lagged series. `Some(NaN)` and
/// `Some(inf)` are real results of the arithmetic and are kept as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnSeries {
    index: Vec<DateTime<Utc>>,
    values: Vec<Option<f64>>,
    kind: LabelKind,
}

impl ReturnSeries {
    pub fn new(
        index: Vec<DateTime<Utc>>,
        values: Vec<Option<f64>>,
        kind: LabelKind,
    ) -> Result<Self> {
        if index.len() != values.len() {
            return Err(LabelError::LengthMismatch {
                index: index.len(),
                values: values.len(),
            });
        }
        Ok(Self { index, values, kind })
    }

    /// A series with every position missing.
    pub fn missing(index: Vec<DateTime<Utc>>, kind: LabelKind) -> Self {
        let values = vec![None; index.len()];
        Self { index, values, kind }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn index(&self) -> &[DateTime<Utc>] {
        &self.index
    }

    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    pub fn kind(&self) -> LabelKind {
        self.kind
    }

    pub fn get(&self, position: usize) -> Option<f64> {
        self.values.get(position).copied().flatten()
    }

    pub fn iter(&self) -> impl Iterator<Item = (DateTime<Utc>, Option<f64>)> + '_ {
        self.index.iter().copied().zip(self.values.iter().copied())
    }

    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    pub fn is_all_missing(&self) -> bool {
        self.values.iter().all(Option::is_none)
    }

    /// Replace every defined value with its sign. NaN stays NaN.
    pub fn to_binary(&self) -> Self {
        let values = self
            .values
            .iter()
            .map(|v| v.map(|r| Sign::of(r).map_or(f64::NAN, Sign::as_f64)))
            .collect();

        Self {
            index: self.index.clone(),
            values,
            kind: LabelKind::Categorical,
        }
    }

    pub fn signs(&self) -> Vec<Option<Sign>> {
        self.values
            .iter()
            .map(|v| v.and_then(Sign::of))
            .collect()
    }

    /// Shift values back one period so the label at `t` is the one computed
    /// for `t + 1`. The final position becomes missing.
    pub fn lag(&self) -> Self {
        self.lag_by(1)
    }

    pub fn lag_by(&self, periods: usize) -> Self {
        let len = self.values.len();
        let values = (0..len)
            .map(|i| {
                i.checked_add(periods)
                    .and_then(|src| self.values.get(src).copied().flatten())
            })
            .collect();

        Self {
            index: self.index.clone(),
            values,
            kind: self.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn days(n: usize) -> Vec<DateTime<Utc>> {
        (0..n)
            .map(|d| Utc.with_ymd_and_hms(2024, 1, 1 + d as u32, 0, 0, 0).unwrap())
            .collect()
    }

    #[test]
    fn test_price_series_length_mismatch() {
        let result = PriceSeries::new(days(3), vec![1.0, 2.0]);
        assert!(matches!(
            result,
            Err(LabelError::LengthMismatch { index: 3, values: 2 })
        ));
    }

    #[test]
    fn test_sign_of_special_values() {
        assert_eq!(Sign::of(0.5), Some(Sign::Up));
        assert_eq!(Sign::of(-0.5), Some(Sign::Down));
        assert_eq!(Sign::of(0.0), Some(Sign::Flat));
        assert_eq!(Sign::of(-0.0), Some(Sign::Flat));
        assert_eq!(Sign::of(f64::INFINITY), Some(Sign::Up));
        assert_eq!(Sign::of(f64::NEG_INFINITY), Some(Sign::Down));
        assert_eq!(Sign::of(f64::NAN), None);
    }

    #[test]
    fn test_lag_moves_values_back() {
        let series = ReturnSeries::new(
            days(4),
            vec![None, Some(0.1), Some(-0.2), Some(0.3)],
            LabelKind::Continuous,
        )
        .unwrap();

        let lagged = series.lag();
        assert_eq!(lagged.values(), &[Some(0.1), Some(-0.2), Some(0.3), None]);
        assert_eq!(lagged.index(), series.index());
    }

    #[test]
    fn test_lag_twice_equals_lag_by_two() {
        let series = ReturnSeries::new(
            days(5),
            vec![None, Some(0.1), Some(-0.2), Some(0.3), Some(0.0)],
            LabelKind::Continuous,
        )
        .unwrap();

        assert_eq!(series.lag().lag(), series.lag_by(2));
        assert_eq!(series.lag_by(2).values(), &[Some(-0.2), Some(0.3), Some(0.0), None, None]);
    }

    #[test]
    fn test_lag_beyond_length_is_all_missing() {
        let series = ReturnSeries::new(days(2), vec![Some(1.0), Some(2.0)], LabelKind::Continuous)
            .unwrap();
        assert!(series.lag_by(5).is_all_missing());
        assert!(series.lag_by(usize::MAX).is_all_missing());
    }

    #[test]
    fn test_to_binary_keeps_nan() {
        let series = ReturnSeries::new(
            days(4),
            vec![None, Some(f64::NAN), Some(-0.01), Some(0.0)],
            LabelKind::Continuous,
        )
        .unwrap();

        let binary = series.to_binary();
        assert_eq!(binary.kind(), LabelKind::Categorical);
        assert_eq!(binary.get(0), None);
        assert!(binary.get(1).unwrap().is_nan());
        assert_eq!(binary.get(2), Some(-1.0));
        assert_eq!(binary.get(3), Some(0.0));
        assert_eq!(binary.signs(), vec![None, None, Some(Sign::Down), Some(Sign::Flat)]);
    }
}
