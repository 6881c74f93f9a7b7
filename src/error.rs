use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    TestRun(#[from] testrun::TestRunError),
}

impl CliError {
    pub fn user_message(&self) -> String {
        match self {
            Self::Io(err) => format!("I/O operation failed: {err}"),
            Self::TestRun(err) => err.user_message(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CliError>;
