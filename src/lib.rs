//! Raw-return labels for price series.
//!
//! [`labeling::label`] turns a [`types::PriceSeries`] into a
//! [`types::ReturnSeries`] of simple or logarithmic returns over a lookback,
//! optionally resampled to a coarser [`data::Frequency`], reduced to signs,
//! or lagged into forward-looking labels.

pub mod config;
pub mod data;
pub mod error;
pub mod labeling;
pub mod types;

pub use crate::config::{AppConfig, ConfigManager, LabelingConfig};
pub use crate::data::Frequency;
pub use crate::error::{LabelError, Result};
pub use crate::labeling::{label, label_frame, Diagnostic, LabelOutcome};
pub use crate::types::{LabelKind, PriceSeries, ReturnSeries, Sign};
