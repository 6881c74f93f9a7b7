use std::path::PathBuf;
use std::result;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum TestRunError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Glob pattern error: {0}")]
    Glob(#[from] glob::PatternError),

    #[error("No csv files in {dir}")]
    NoCsvFile { dir: PathBuf },

    #[error("Results file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("Malformed input: {message}")]
    MalformedInput { message: String },

    #[error("Column '{column}' not found")]
    MissingColumn { column: String, available: String },

    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("{0}: {1}")]
    WithContext(String, Box<TestRunError>),
}

impl TestRunError {
    /// Create a new malformed input error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedInput {
            message: message.into(),
        }
    }

    /// Create a new missing column error listing the columns that do exist
    pub fn missing_column<S: Into<String>>(column: S, available: &[String]) -> Self {
        Self::MissingColumn {
            column: column.into(),
            available: available.join(", "),
        }
    }

    pub fn invalid_config<S: Into<String>>(message: S) -> Self {
        Self::InvalidConfig {
            message: message.into(),
        }
    }

    /// Add context to an error
    pub fn with_context<C: Into<String>>(self, context: C) -> Self {
        TestRunError::WithContext(context.into(), Box::new(self))
    }

    /// The underlying error with every layer of context removed
    pub fn root(&self) -> &TestRunError {
        match self {
            TestRunError::WithContext(_, err) => err.root(),
            _ => self,
        }
    }

    pub fn is_malformed(&self) -> bool {
        matches!(self.root(), TestRunError::MalformedInput { .. })
    }

    /// Get a user-friendly message for command line display
    pub fn user_message(&self) -> String {
        match self {
            TestRunError::NoCsvFile { dir } => {
                format!("No csv files in {}. Pass the results file path explicitly.", dir.display())
            }
            TestRunError::MissingColumn { column, available } => {
                format!("Column '{column}' not found in results file. Available columns: {available}")
            }
            TestRunError::ConfigParse(e) => format!("Failed to parse configuration: {e}"),
            TestRunError::WithContext(ctx, err) => format!("{}: {}", ctx, err.user_message()),
            _ => format!("{}", self),
        }
    }
}

pub type Result<T> = result::Result<T, TestRunError>;

// Helper trait for adding context to results
pub trait ResultExt<T, E> {
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C;
}

impl<T, E> ResultExt<T, E> for result::Result<T, E>
where
    E: Into<TestRunError>,
{
    fn with_context<C, F>(self, context: F) -> Result<T>
    where
        C: Into<String>,
        F: FnOnce() -> C,
    {
        self.map_err(|err| {
            let run_err: TestRunError = err.into();
            run_err.with_context(context())
        })
    }
}
