pub mod traits;
pub mod labeling;
pub mod data;
pub mod manager;

pub use manager::{ConfigManager, AppConfig};
pub use labeling::LabelingConfig;
pub use data::DataConfig;
pub use traits::ConfigSection;
