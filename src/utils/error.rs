use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Cannot read input file '{}': {source}", .path.display())]
    InputNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Input file '{}' is not valid JSON: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Missing field '{field}': {reason}")]
    MissingField { field: String, reason: String },

    #[error("Malformed record at index {index}: {reason}")]
    MalformedRecord { index: usize, reason: String },

    #[error("Cannot write output file '{}': {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV encoding error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// The input document could not be read or parsed.
    Input,
    /// The document parsed but does not have the expected shape.
    Data,
    /// The CSV could not be produced or written.
    Output,
    Configuration,
}

impl ConvertError {
    pub fn missing_field(field: &str, reason: impl Into<String>) -> Self {
        Self::MissingField {
            field: field.to_string(),
            reason: reason.into(),
        }
    }

    pub fn malformed(index: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            index,
            reason: reason.into(),
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InputNotFound { .. } | Self::Parse { .. } => ErrorCategory::Input,
            Self::MissingField { .. } | Self::MalformedRecord { .. } => ErrorCategory::Data,
            Self::Write { .. } | Self::Csv(_) => ErrorCategory::Output,
            Self::Config { .. } | Self::InvalidConfigValue { .. } => ErrorCategory::Configuration,
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self.category() {
            ErrorCategory::Input | ErrorCategory::Configuration => 1,
            ErrorCategory::Data => 2,
            ErrorCategory::Output => 3,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::InputNotFound { path, .. } => {
                format!("Input file '{}' was not found or is unreadable", path.display())
            }
            Self::Parse { path, source } => format!(
                "Input file '{}' is not valid JSON (line {}, column {})",
                path.display(),
                source.line(),
                source.column()
            ),
            Self::MissingField { field, .. } => {
                format!("The input document has no '{}' array", field)
            }
            Self::MalformedRecord { index, reason } => {
                format!("Weight record #{} is malformed: {}", index, reason)
            }
            Self::Write { path, .. } => {
                format!("Could not write the CSV file to '{}'", path.display())
            }
            Self::Csv(_) => "Could not encode the CSV output".to_string(),
            Self::Config { message } => format!("Invalid configuration: {}", message),
            Self::InvalidConfigValue { field, reason, .. } => {
                format!("Invalid configuration for '{}': {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::InputNotFound { .. } => "Check the input path or set WEIGHTS_INPUT",
            Self::Parse { .. } => "Make sure the input is a JSON export of your weights",
            Self::MissingField { .. } => {
                "The document must be an object with a top-level \"weights\" array"
            }
            Self::MalformedRecord { .. } => {
                "Every record needs a non-negative integer \"date\" (epoch ms) and a numeric \"weight\""
            }
            Self::Write { .. } | Self::Csv(_) => {
                "Check that the output directory is writable and has free space"
            }
            Self::Config { .. } | Self::InvalidConfigValue { .. } => {
                "Fix the configuration file or command-line arguments"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn io_error() -> std::io::Error {
        std::io::Error::new(std::io::ErrorKind::NotFound, "missing")
    }

    #[test]
    fn test_exit_codes_follow_category() {
        let not_found = ConvertError::InputNotFound {
            path: PathBuf::from("data.json"),
            source: io_error(),
        };
        assert_eq!(not_found.category(), ErrorCategory::Input);
        assert_eq!(not_found.exit_code(), 1);

        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let parse = ConvertError::Parse {
            path: PathBuf::from("data.json"),
            source: parse_err,
        };
        assert_eq!(parse.exit_code(), 1);

        assert_eq!(ConvertError::missing_field("weights", "absent").exit_code(), 2);
        assert_eq!(ConvertError::malformed(3, "missing `weight`").exit_code(), 2);

        let write = ConvertError::Write {
            path: PathBuf::from("out.csv"),
            source: io_error(),
        };
        assert_eq!(write.category(), ErrorCategory::Output);
        assert_eq!(write.exit_code(), 3);

        let config = ConvertError::Config {
            message: "bad".to_string(),
        };
        assert_eq!(config.exit_code(), 1);
    }

    #[test]
    fn test_messages_name_the_record() {
        let err = ConvertError::malformed(4, "missing `date`");
        assert_eq!(err.to_string(), "Malformed record at index 4: missing `date`");
        assert!(err.user_friendly_message().contains("#4"));
    }
}
