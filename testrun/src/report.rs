use crate::error::{Result, TestRunError};
use crate::validate::ErrorPercentages;
use std::fs;
use std::path::{Path, PathBuf};

/// Default name of the error summary file
pub const REPORT_FILE_NAME: &str = "TestRunErrorInfo.txt";

const LINE_SEPARATOR: &str = "\r\n";

/// Two-line human readable summary of a run's error rates
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    /// Empty when the run had no server errors
    pub server_line: String,
    /// Empty when the run had no client errors
    pub client_line: String,
}

impl ErrorReport {
    pub fn from_percentages(percentages: &ErrorPercentages) -> Self {
        let server_line = if percentages.server_errors > 0 {
            format!(
                "The test run finished with {} % of server errors",
                percentages.server_percent
            )
        } else {
            String::new()
        };

        let client_line = if percentages.client_errors > 0 {
            format!(
                "The test run finished with {} % of client errors",
                percentages.client_percent
            )
        } else {
            String::new()
        };

        Self {
            server_line,
            client_line,
        }
    }

    /// Server line first, CRLF, then the client line
    pub fn render(&self) -> String {
        format!("{}{}{}", self.server_line, LINE_SEPARATOR, self.client_line)
    }

    /// Write the report as `file_name` inside `dir`, replacing any earlier report
    pub fn write_to<P: AsRef<Path>>(&self, dir: P, file_name: &str) -> Result<PathBuf> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir).map_err(|e| {
            TestRunError::Io(e).with_context(format!("Failed to create directory {}", dir.display()))
        })?;

        let path = dir.join(file_name);
        let temp_path = dir.join(format!("{file_name}.tmp"));

        fs::write(&temp_path, self.render()).map_err(|e| {
            TestRunError::Io(e)
                .with_context(format!("Failed to write temp file {}", temp_path.display()))
        })?;

        fs::rename(&temp_path, &path).map_err(|e| {
            TestRunError::Io(e).with_context(format!("Failed to rename temp file to {}", path.display()))
        })?;

        Ok(path)
    }
}
