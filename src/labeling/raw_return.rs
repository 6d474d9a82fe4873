use crate::config::{ConfigSection, LabelingConfig};
use crate::data::resample_last;
use crate::error::Result;
use crate::types::{LabelKind, PriceSeries, ReturnSeries};
use std::borrow::Cow;
use std::fmt;

/// Non-fatal condition detected while labeling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diagnostic {
    /// The lookback reaches past the start of the series at every position,
    /// so no label is defined.
    InsufficientHistory { lookback: usize, observations: usize },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientHistory { lookback, observations } => write!(
                f,
                "lookback {} is not smaller than the {} available observations; every label is missing",
                lookback, observations
            ),
        }
    }
}

/// Labels plus any diagnostic raised while computing them
#[derive(Debug, Clone, PartialEq)]
pub struct LabelOutcome {
    pub series: ReturnSeries,
    pub diagnostic: Option<Diagnostic>,
}

impl LabelOutcome {
    pub fn is_degenerate(&self) -> bool {
        self.diagnostic.is_some()
    }

    pub fn into_series(self) -> ReturnSeries {
        self.series
    }
}

pub struct RawReturnLabeler {
    config: LabelingConfig,
}

impl RawReturnLabeler {
    pub fn new(config: LabelingConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &LabelingConfig {
        &self.config
    }

    /// Label `prices` with raw returns.
    ///
    /// Order of operations: resample, compute returns over `lookback`
    /// periods, take signs if `binary`, then shift back one period if `lag`.
    pub fn label(&self, prices: &PriceSeries) -> Result<LabelOutcome> {
        let prices: Cow<'_, PriceSeries> = match self.config.resample_by {
            Some(frequency) => Cow::Owned(resample_last(prices, frequency)?),
            None => Cow::Borrowed(prices),
        };

        let lookback = self.config.lookback;
        let kind = if self.config.binary {
            LabelKind::Categorical
        } else {
            LabelKind::Continuous
        };

        if lookback >= prices.len() {
            let diagnostic = Diagnostic::InsufficientHistory {
                lookback,
                observations: prices.len(),
            };
            log::warn!("{}", diagnostic);
            return Ok(LabelOutcome {
                series: ReturnSeries::missing(prices.index().to_vec(), kind),
                diagnostic: Some(diagnostic),
            });
        }

        let values = raw_returns(prices.prices(), lookback, self.config.logarithmic);
        let mut series = ReturnSeries::new(prices.index().to_vec(), values, LabelKind::Continuous)?;

        if self.config.binary {
            series = series.to_binary();
        }
        if self.config.lag {
            series = series.lag();
        }

        Ok(LabelOutcome {
            series,
            diagnostic: None,
        })
    }
}

/// Label `prices` with the options in `config`.
pub fn label(prices: &PriceSeries, config: &LabelingConfig) -> Result<LabelOutcome> {
    RawReturnLabeler::new(config.clone())?.label(prices)
}

/// Returns over `lookback` positions. The first `lookback` entries are
/// `None`; zero or negative prices yield inf/NaN as IEEE-754 dictates.
pub fn raw_returns(prices: &[f64], lookback: usize, logarithmic: bool) -> Vec<Option<f64>> {
    (0..prices.len())
        .map(|t| {
            let past = prices[t.checked_sub(lookback)?];
            let ratio = prices[t] / past;
            Some(if logarithmic { ratio.ln() } else { ratio - 1.0 })
        })
        .collect()
}
