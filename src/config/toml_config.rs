use crate::config::ConversionConfig;
use crate::core::date::TimeZoneMode;
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{validate_path, Validate};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub source: SourceConfig,
    #[serde(default)]
    pub transform: TransformConfig,
    pub load: LoadConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    pub input_path: PathBuf,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformConfig {
    pub timezone: Option<TimeZoneMode>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    pub output_path: PathBuf,
}

impl TomlConfig {
    /// Loads and parses a TOML config file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| ConvertError::Config {
            message: format!("failed to read config file '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConvertError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR}` with the value of the environment variable. Unknown
    /// variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConvertError::Config {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.into_owned())
    }

    pub fn to_conversion_config(&self) -> ConversionConfig {
        ConversionConfig::new(&self.source.input_path, &self.load.output_path)
            .with_timezone(self.transform.timezone.unwrap_or_default())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validate_path("source.input_path", &self.source.input_path)?;
        validate_path("load.output_path", &self.load.output_path)?;
        self.to_conversion_config().validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[source]
input_path = "public/data.json"

[transform]
timezone = "utc"

[load]
output_path = "out/weights.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.source.input_path, PathBuf::from("public/data.json"));
        assert_eq!(config.load.output_path, PathBuf::from("out/weights.csv"));
        assert_eq!(config.to_conversion_config().timezone, TimeZoneMode::Utc);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_transform_section_is_optional() {
        let toml_content = r#"
[source]
input_path = "data.json"

[load]
output_path = "weights.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.to_conversion_config().timezone, TimeZoneMode::Local);
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("WEIGHTS_CSV_TEST_HOME", "/home/tester");

        let toml_content = r#"
[source]
input_path = "${WEIGHTS_CSV_TEST_HOME}/data.json"

[load]
output_path = "${WEIGHTS_CSV_TEST_UNSET_VAR}/weights.csv"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.source.input_path, PathBuf::from("/home/tester/data.json"));
        assert_eq!(
            config.load.output_path,
            PathBuf::from("${WEIGHTS_CSV_TEST_UNSET_VAR}/weights.csv")
        );

        std::env::remove_var("WEIGHTS_CSV_TEST_HOME");
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let toml_content = r#"
[source]
input_path = "data.json"

[transform]
timezone = "mars"

[load]
output_path = "weights.csv"
"#;

        let err = TomlConfig::from_toml_str(toml_content).unwrap_err();
        assert!(matches!(err, ConvertError::Config { .. }));
    }

    #[test]
    fn test_config_validation() {
        let toml_content = r#"
[source]
input_path = "same.json"

[load]
output_path = "same.json"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_directory_output_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let toml_content = format!(
            "[source]\ninput_path = \"data.json\"\n\n[load]\noutput_path = \"{}\"\n",
            dir.path().display().to_string().replace('\\', "/")
        );

        let config = TomlConfig::from_toml_str(&toml_content).unwrap();
        let err = config.validate().unwrap_err();
        assert!(
            matches!(err, ConvertError::InvalidConfigValue { ref field, .. } if field == "output_path")
        );
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\ninput_path = \"a.json\"\n\n[load]\noutput_path = \"a.csv\"\n")
            .unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        let resolved = config.to_conversion_config();
        assert_eq!(resolved.input_path, PathBuf::from("a.json"));
        assert_eq!(resolved.output_path, PathBuf::from("a.csv"));
    }

    #[test]
    fn test_missing_config_file() {
        let err = TomlConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(matches!(err, ConvertError::Config { .. }));
    }
}
