use crate::classify::{ErrorSplit, STATUS_COLUMN};
use crate::config::CheckConfig;
use crate::error::Result;
use crate::legacy;
use crate::table::ColumnTable;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Combined error percentage a run may reach before it is marked failed
pub const DEFAULT_ACCEPTABLE_PERCENT: f64 = 1.0;

/// Which rule decides whether a run failed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ValidationStrategy {
    /// Share of 4xx and 5xx response codes against a threshold
    #[default]
    ErrorPercent,
    /// Every sample must be marked successful and carry no failure message
    Legacy,
}

impl fmt::Display for ValidationStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ErrorPercent => "error-percent",
            Self::Legacy => "legacy",
        };
        write!(f, "{name}")
    }
}

/// Per-class error rates of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorPercentages {
    pub total_responses: usize,
    pub client_errors: usize,
    pub server_errors: usize,
    /// Rounded to two decimals
    pub client_percent: f64,
    /// Rounded to two decimals
    pub server_percent: f64,
}

impl ErrorPercentages {
    pub fn from_split(split: &ErrorSplit, total_responses: usize) -> Self {
        Self {
            total_responses,
            client_errors: split.client.len(),
            server_errors: split.server.len(),
            client_percent: percent_of(split.client.len(), total_responses),
            server_percent: percent_of(split.server.len(), total_responses),
        }
    }

    /// Sum of the two rounded class percentages. Not rounded again.
    pub fn combined(&self) -> f64 {
        self.server_percent + self.client_percent
    }
}

/// Outcome of validating one results table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    pub passed: bool,
    pub strategy: ValidationStrategy,
    /// Limit the combined percentage was held against; the legacy strategy has none
    #[serde(skip_serializing_if = "Option::is_none")]
    pub acceptable_percent: Option<f64>,
    pub has_errors: bool,
    /// Absent when the run had no errors at all, and for the legacy strategy
    pub percentages: Option<ErrorPercentages>,
}

impl ValidationResult {
    /// Combined error percentage, zero when nothing was computed
    pub fn combined_percent(&self) -> f64 {
        self.percentages
            .as_ref()
            .map_or(0.0, ErrorPercentages::combined)
    }

    /// Pretty-printed JSON for machine consumers
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Round to two decimals, ties to even
pub fn round_percent(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

fn percent_of(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_percent(count as f64 * 100.0 / total as f64)
}

/// Validate the `responseCode` column against an acceptable error percentage
pub fn validate(table: &ColumnTable, acceptable_percent: f64) -> Result<ValidationResult> {
    validate_column(table, STATUS_COLUMN, acceptable_percent)
}

/// Validate an arbitrary status column against an acceptable error percentage.
///
/// A column without a single 4xx/5xx code passes straight away and no
/// percentages are computed. Otherwise the run passes while the sum of the
/// rounded client and server percentages stays at or below the limit.
pub fn validate_column(
    table: &ColumnTable,
    column: &str,
    acceptable_percent: f64,
) -> Result<ValidationResult> {
    let codes = table.column(column)?;
    let split = ErrorSplit::from_codes(codes);

    if split.is_empty() {
        return Ok(ValidationResult {
            passed: true,
            strategy: ValidationStrategy::ErrorPercent,
            acceptable_percent: Some(acceptable_percent),
            has_errors: false,
            percentages: None,
        });
    }

    let percentages = ErrorPercentages::from_split(&split, codes.len());
    Ok(ValidationResult {
        passed: percentages.combined() <= acceptable_percent,
        strategy: ValidationStrategy::ErrorPercent,
        acceptable_percent: Some(acceptable_percent),
        has_errors: true,
        percentages: Some(percentages),
    })
}

/// Something that can decide whether a run passed
pub trait RunValidator {
    fn strategy(&self) -> ValidationStrategy;

    /// # Errors
    /// Returns `MissingColumn` when a column the rule reads is absent
    fn validate(&self, table: &ColumnTable) -> Result<ValidationResult>;
}

pub struct ErrorPercentValidator {
    pub status_column: String,
    pub acceptable_percent: f64,
}

impl RunValidator for ErrorPercentValidator {
    fn strategy(&self) -> ValidationStrategy {
        ValidationStrategy::ErrorPercent
    }

    fn validate(&self, table: &ColumnTable) -> Result<ValidationResult> {
        validate_column(table, &self.status_column, self.acceptable_percent)
    }
}

pub struct LegacyValidator;

impl RunValidator for LegacyValidator {
    fn strategy(&self) -> ValidationStrategy {
        ValidationStrategy::Legacy
    }

    fn validate(&self, table: &ColumnTable) -> Result<ValidationResult> {
        let messages_clean = legacy::validate_failure_messages(table)?;
        let all_successful = legacy::validate_success_flags(table)?;
        let passed = messages_clean && all_successful;

        Ok(ValidationResult {
            passed,
            strategy: ValidationStrategy::Legacy,
            acceptable_percent: None,
            has_errors: !passed,
            percentages: None,
        })
    }
}

/// Create the validator for a strategy
pub fn create_validator(config: &CheckConfig) -> Box<dyn RunValidator> {
    match config.strategy {
        ValidationStrategy::ErrorPercent => Box::new(ErrorPercentValidator {
            status_column: config.status_column.clone(),
            acceptable_percent: config.acceptable_percent,
        }),
        ValidationStrategy::Legacy => Box::new(LegacyValidator),
    }
}
