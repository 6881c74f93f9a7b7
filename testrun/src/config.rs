use crate::classify::STATUS_COLUMN;
use crate::error::{Result, TestRunError};
use crate::report::REPORT_FILE_NAME;
use crate::validate::{DEFAULT_ACCEPTABLE_PERCENT, ValidationStrategy};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Name of the optional configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "jmcheck.toml";

/// Settings for a single check run
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct CheckConfig {
    /// Highest combined 4xx + 5xx percentage that still passes
    pub acceptable_percent: f64,
    /// Header of the status code column
    pub status_column: String,
    /// File name of the error summary written next to the run
    pub report_file: String,
    pub strategy: ValidationStrategy,
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            acceptable_percent: DEFAULT_ACCEPTABLE_PERCENT,
            status_column: STATUS_COLUMN.to_string(),
            report_file: REPORT_FILE_NAME.to_string(),
            strategy: ValidationStrategy::default(),
        }
    }
}

impl CheckConfig {
    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path_ref = path.as_ref();
        if !path_ref.exists() {
            return Err(TestRunError::FileNotFound {
                path: path_ref.to_path_buf(),
            });
        }

        let content = std::fs::read_to_string(path_ref)?;
        let config: CheckConfig = toml::from_str(&content).map_err(|e| {
            TestRunError::ConfigParse(e).with_context(format!("Failed to parse {}", path_ref.display()))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load the file when it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load_from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !self.acceptable_percent.is_finite() || !(0.0..=100.0).contains(&self.acceptable_percent) {
            return Err(TestRunError::invalid_config(format!(
                "acceptable_percent must be between 0 and 100, got {}",
                self.acceptable_percent
            )));
        }

        if self.status_column.trim().is_empty() {
            return Err(TestRunError::invalid_config("status_column must not be empty"));
        }

        if self.report_file.trim().is_empty() {
            return Err(TestRunError::invalid_config("report_file must not be empty"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = CheckConfig::default();

        assert_eq!(config.acceptable_percent, 1.0);
        assert_eq!(config.status_column, "responseCode");
        assert_eq!(config.report_file, "TestRunErrorInfo.txt");
        assert_eq!(config.strategy, ValidationStrategy::ErrorPercent);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "acceptable_percent = 2.5\nstrategy = \"legacy\"\n").unwrap();

        let config = CheckConfig::load_from_file(&path).unwrap();

        assert_eq!(config.acceptable_percent, 2.5);
        assert_eq!(config.strategy, ValidationStrategy::Legacy);
        assert_eq!(config.status_column, "responseCode");
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let temp_dir = TempDir::new().unwrap();

        let config = CheckConfig::load_or_default(temp_dir.path().join(CONFIG_FILE_NAME)).unwrap();
        assert_eq!(config, CheckConfig::default());

        let err = CheckConfig::load_from_file(temp_dir.path().join(CONFIG_FILE_NAME)).unwrap_err();
        assert!(matches!(err, TestRunError::FileNotFound { .. }));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "threshold = 5\n").unwrap();

        let err = CheckConfig::load_from_file(&path).unwrap_err();
        assert!(err.user_message().contains("Failed to parse"));
    }

    #[test]
    fn test_out_of_range_percent_rejected() {
        let config = CheckConfig {
            acceptable_percent: 150.0,
            ..CheckConfig::default()
        };
        assert!(matches!(config.validate(), Err(TestRunError::InvalidConfig { .. })));

        let config = CheckConfig {
            acceptable_percent: f64::NAN,
            ..CheckConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_empty_status_column_rejected() {
        let config = CheckConfig {
            status_column: " ".to_string(),
            ..CheckConfig::default()
        };
        assert!(config.validate().is_err());
    }
}
