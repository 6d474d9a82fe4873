pub mod connectors;
pub mod frequency;
pub mod resample;

pub use connectors::{CsvConnector, DataValidator, DatasetMetadata};
pub use frequency::Frequency;
pub use resample::resample_last;
