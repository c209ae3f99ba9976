pub mod storage;
pub mod toml_config;

use crate::core::date::TimeZoneMode;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_distinct_paths, validate_output_target, validate_path, Validate,
};
use std::path::{Path, PathBuf};

pub const DEFAULT_INPUT_PATH: &str = "public/data.json";
pub const DEFAULT_OUTPUT_PATH: &str = "weights.csv";

/// Resolved settings for one conversion run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionConfig {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub timezone: TimeZoneMode,
}

impl ConversionConfig {
    pub fn new(input_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            timezone: TimeZoneMode::default(),
        }
    }

    pub fn with_timezone(mut self, timezone: TimeZoneMode) -> Self {
        self.timezone = timezone;
        self
    }
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self::new(DEFAULT_INPUT_PATH, DEFAULT_OUTPUT_PATH)
    }
}

impl ConfigProvider for ConversionConfig {
    fn input_path(&self) -> &Path {
        &self.input_path
    }

    fn output_path(&self) -> &Path {
        &self.output_path
    }

    fn timezone(&self) -> TimeZoneMode {
        self.timezone
    }
}

impl Validate for ConversionConfig {
    fn validate(&self) -> Result<()> {
        validate_path("input_path", &self.input_path)?;
        validate_path("output_path", &self.output_path)?;
        validate_distinct_paths(&self.input_path, &self.output_path)?;
        validate_output_target("output_path", &self.output_path)
    }
}

#[cfg(feature = "cli")]
pub use self::args::CliConfig;

#[cfg(feature = "cli")]
mod args {
    use super::toml_config::TomlConfig;
    use super::ConversionConfig;
    use crate::core::date::TimeZoneMode;
    use crate::utils::error::Result;
    use crate::utils::logger::LogFormat;
    use crate::utils::validation::Validate;
    use clap::Parser;
    use std::path::PathBuf;

    #[derive(Debug, Clone, Parser)]
    #[command(name = "weights-csv", version)]
    #[command(about = "Convert a weight-tracking JSON export into a Date,Weight CSV file")]
    pub struct CliConfig {
        /// JSON export to read [default: public/data.json]
        #[arg(env = "WEIGHTS_INPUT")]
        pub input: Option<PathBuf>,

        /// CSV file to write [default: weights.csv]
        #[arg(env = "WEIGHTS_OUTPUT")]
        pub output: Option<PathBuf>,

        /// TOML config file; explicit arguments override its values
        #[arg(short, long)]
        pub config: Option<PathBuf>,

        /// Time zone used to turn timestamps into dates [default: local]
        #[arg(long, value_enum)]
        pub timezone: Option<TimeZoneMode>,

        #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
        pub log_format: LogFormat,

        /// Parse and convert, but do not write the CSV
        #[arg(long)]
        pub dry_run: bool,

        /// Enable verbose output
        #[arg(short, long)]
        pub verbose: bool,
    }

    impl CliConfig {
        /// Merges arguments over the config file (if any) over the defaults.
        /// The config file must be valid on its own.
        pub fn resolve(&self) -> Result<ConversionConfig> {
            let base = match &self.config {
                Some(path) => {
                    let file_config = TomlConfig::from_file(path)?;
                    file_config.validate()?;
                    file_config.to_conversion_config()
                }
                None => ConversionConfig::default(),
            };

            Ok(ConversionConfig {
                input_path: self.input.clone().unwrap_or(base.input_path),
                output_path: self.output.clone().unwrap_or(base.output_path),
                timezone: self.timezone.unwrap_or(base.timezone),
            })
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_paths() {
        let config = ConversionConfig::default();
        assert_eq!(config.input_path, PathBuf::from(DEFAULT_INPUT_PATH));
        assert_eq!(config.output_path, PathBuf::from(DEFAULT_OUTPUT_PATH));
        assert_eq!(config.timezone, TimeZoneMode::Local);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_same_input_and_output_rejected() {
        let config = ConversionConfig::new("data.json", "data.json");
        assert!(config.validate().is_err());
    }
}
