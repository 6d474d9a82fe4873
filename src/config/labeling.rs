use super::traits::ConfigSection;
use crate::data::Frequency;
use crate::error::LabelError;
use serde::{Deserialize, Serialize};

/// Options for a single labeling pass.
///
/// Every field has a default, so a config file only needs to name the
/// options it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelingConfig {
    /// Periods between the compared observations
    pub lookback: usize,
    /// `ln(p_t / p_{t-k})` instead of `p_t / p_{t-k} - 1`
    pub logarithmic: bool,
    /// Emit the sign of each return instead of its magnitude
    pub binary: bool,
    /// Aggregate to the last price per bucket before computing returns
    pub resample_by: Option<Frequency>,
    /// Report the return from `t` to `t + 1` at `t`
    pub lag: bool,
}

impl Default for LabelingConfig {
    fn default() -> Self {
        Self {
            lookback: 1,
            logarithmic: false,
            binary: false,
            resample_by: None,
            lag: false,
        }
    }
}

impl LabelingConfig {
    pub fn with_lookback(mut self, lookback: usize) -> Self {
        self.lookback = lookback;
        self
    }

    pub fn logarithmic(mut self) -> Self {
        self.logarithmic = true;
        self
    }

    pub fn binary(mut self) -> Self {
        self.binary = true;
        self
    }

    pub fn resample_by(mut self, frequency: Frequency) -> Self {
        self.resample_by = Some(frequency);
        self
    }

    pub fn lagged(mut self) -> Self {
        self.lag = true;
        self
    }
}

impl ConfigSection for LabelingConfig {
    fn section_name() -> &'static str {
        "labeling"
    }

    fn validate(&self) -> Result<(), LabelError> {
        if self.lookback == 0 {
            return Err(LabelError::InvalidLookback(self.lookback));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = LabelingConfig::default();
        assert_eq!(config.lookback, 1);
        assert!(!config.logarithmic);
        assert!(!config.binary);
        assert!(config.resample_by.is_none());
        assert!(!config.lag);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_lookback_rejected() {
        let config = LabelingConfig::default().with_lookback(0);
        assert!(matches!(config.validate(), Err(LabelError::InvalidLookback(0))));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: LabelingConfig = toml::from_str("lookback = 5\nresample_by = \"W\"").unwrap();
        assert_eq!(config.lookback, 5);
        assert_eq!(config.resample_by, Some(Frequency::Weekly(chrono::Weekday::Sun)));
        assert!(!config.binary);
    }

    #[test]
    fn test_unknown_frequency_in_toml_fails() {
        let result: Result<LabelingConfig, _> = toml::from_str("resample_by = \"fortnightly\"");
        assert!(result.is_err());
    }
}
