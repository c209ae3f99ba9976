use crate::config::{storage::LocalStorage, ConversionConfig};
use crate::core::date::TimeZoneMode;
use crate::core::etl::EtlEngine;
use crate::core::pipeline::WeightsPipeline;
use crate::core::ConversionSummary;
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use std::path::Path;

/// Converts the JSON export at `input` into a CSV at `output`, dating rows in local time.
pub fn convert(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<ConversionSummary> {
    convert_with_timezone(input, output, TimeZoneMode::default())
}

pub fn convert_with_timezone(
    input: impl AsRef<Path>,
    output: impl AsRef<Path>,
    zone: TimeZoneMode,
) -> Result<ConversionSummary> {
    let config = ConversionConfig::new(input.as_ref(), output.as_ref()).with_timezone(zone);
    run(config)
}

pub fn run(config: ConversionConfig) -> Result<ConversionSummary> {
    config.validate()?;
    let pipeline = WeightsPipeline::new(LocalStorage::new(), config);
    EtlEngine::new(pipeline).run()
}
