pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::{storage::LocalStorage, toml_config::TomlConfig, ConversionConfig};

pub use crate::core::convert::{convert, convert_with_timezone};
pub use crate::core::date::TimeZoneMode;
pub use crate::core::{etl::EtlEngine, pipeline::WeightsPipeline};
pub use domain::model::ConversionSummary;
pub use utils::error::{ConvertError, Result};
