use crate::error::Result;
use crate::table::ColumnTable;

/// Header of the status code column in JMeter result exports
pub const STATUS_COLUMN: &str = "responseCode";

/// Error class of a single status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 4xx
    Client,
    /// 5xx
    Server,
    Other,
}

impl StatusClass {
    /// Classify by the first character only; the code is never parsed as a number
    pub fn of(code: &str) -> Self {
        if code.starts_with('4') {
            Self::Client
        } else if code.starts_with('5') {
            Self::Server
        } else {
            Self::Other
        }
    }
}

/// Client and server error codes pulled out of a status column, in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorSplit {
    pub client: Vec<String>,
    pub server: Vec<String>,
}

impl ErrorSplit {
    pub fn from_codes<S: AsRef<str>>(codes: &[S]) -> Self {
        let mut split = Self::default();
        for code in codes {
            let code = code.as_ref();
            match StatusClass::of(code) {
                StatusClass::Client => split.client.push(code.to_string()),
                StatusClass::Server => split.server.push(code.to_string()),
                StatusClass::Other => {}
            }
        }
        split
    }

    /// Classify the named status column of a table
    pub fn from_table(table: &ColumnTable, column: &str) -> Result<Self> {
        Ok(Self::from_codes(table.column(column)?))
    }

    pub fn error_count(&self) -> usize {
        self.client.len() + self.server.len()
    }

    pub fn is_empty(&self) -> bool {
        self.error_count() == 0
    }
}
