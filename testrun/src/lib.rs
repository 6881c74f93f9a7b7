//! Load-test result checking.
//!
//! Reads a JMeter result export, reshapes it into columns and decides whether
//! the run's error rate is acceptable.

pub mod classify;
pub mod config;
pub mod discover;
pub mod error;
pub mod legacy;
pub mod report;
pub mod table;
pub mod validate;

pub use classify::{ErrorSplit, STATUS_COLUMN, StatusClass};
pub use config::{CONFIG_FILE_NAME, CheckConfig};
pub use error::{Result, ResultExt, TestRunError};
pub use report::{ErrorReport, REPORT_FILE_NAME};
pub use table::{ColumnTable, RawTable};
pub use validate::{
    DEFAULT_ACCEPTABLE_PERCENT, ErrorPercentages, RunValidator, ValidationResult,
    ValidationStrategy, create_validator, validate, validate_column,
};

use std::fs;
use std::path::{Path, PathBuf};

/// Everything a finished check produced
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub input: PathBuf,
    pub row_count: usize,
    pub result: ValidationResult,
    /// Set when an error summary was written
    pub report_path: Option<PathBuf>,
}

/// Stages of [`TestRun::check_with`], reported in this order
#[derive(Debug)]
pub enum CheckEvent<'a> {
    Parsing(&'a Path),
    Parsed(&'a ColumnTable),
    Validating(ValidationStrategy),
    Validated(&'a ValidationResult),
    Reporting,
    /// Carries the summary path, `None` when there was nothing to report
    Reported(Option<&'a Path>),
}

// Central entry points for checking a run
pub struct TestRun;

impl TestRun {
    /// Read and reshape a results file
    pub fn load(path: &Path) -> Result<ColumnTable> {
        if !path.is_file() {
            return Err(TestRunError::FileNotFound {
                path: path.to_path_buf(),
            });
        }

        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        ColumnTable::parse(&text).map_err(|e| e.with_context(format!("Failed to parse {}", path.display())))
    }

    /// Write the error summary for a result that computed percentages.
    /// Returns `None` when there is nothing to report.
    pub fn write_report(
        result: &ValidationResult,
        report_dir: &Path,
        file_name: &str,
    ) -> Result<Option<PathBuf>> {
        match &result.percentages {
            Some(percentages) => {
                let path = ErrorReport::from_percentages(percentages).write_to(report_dir, file_name)?;
                Ok(Some(path))
            }
            None => Ok(None),
        }
    }

    /// Load, validate and report in one go
    pub fn check(path: &Path, config: &CheckConfig, report_dir: &Path) -> Result<CheckOutcome> {
        Self::check_with(path, config, report_dir, |_| {})
    }

    /// Load, validate and report, telling `on_event` as each stage starts and ends
    pub fn check_with<F>(
        path: &Path,
        config: &CheckConfig,
        report_dir: &Path,
        mut on_event: F,
    ) -> Result<CheckOutcome>
    where
        F: FnMut(CheckEvent<'_>),
    {
        config.validate()?;

        on_event(CheckEvent::Parsing(path));
        let table = Self::load(path)?;
        on_event(CheckEvent::Parsed(&table));

        let validator = create_validator(config);
        on_event(CheckEvent::Validating(validator.strategy()));
        let result = validator.validate(&table)?;
        on_event(CheckEvent::Validated(&result));

        on_event(CheckEvent::Reporting);
        let report_path = Self::write_report(&result, report_dir, &config.report_file)?;
        on_event(CheckEvent::Reported(report_path.as_deref()));

        Ok(CheckOutcome {
            input: path.to_path_buf(),
            row_count: table.row_count(),
            result,
            report_path,
        })
    }
}
