//! Older pass/fail checks that look at JMeter's own failure bookkeeping
//! instead of status codes. Only used by the `legacy` strategy.

use crate::error::Result;
use crate::table::ColumnTable;

pub const FAILURE_MESSAGE_COLUMN: &str = "failureMessage";
pub const SUCCESS_COLUMN: &str = "success";

/// Passes when every `failureMessage` cell is blank
pub fn validate_failure_messages(table: &ColumnTable) -> Result<bool> {
    let messages = table.column(FAILURE_MESSAGE_COLUMN)?;
    Ok(messages.iter().all(|message| message.trim().is_empty()))
}

/// Passes when every `success` cell reads `true`, ignoring case and surrounding whitespace
pub fn validate_success_flags(table: &ColumnTable) -> Result<bool> {
    let flags = table.column(SUCCESS_COLUMN)?;
    Ok(flags
        .iter()
        .all(|flag| flag.trim().eq_ignore_ascii_case("true")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TestRunError;

    #[test]
    fn test_blank_failure_messages_pass() {
        let table = ColumnTable::parse("label,failureMessage\r\nhome,\r\nlogin,  \r\n").unwrap();
        assert!(validate_failure_messages(&table).unwrap());
    }

    #[test]
    fn test_any_failure_message_fails() {
        let table =
            ColumnTable::parse("label,failureMessage\r\nhome,\r\nlogin,Test failed: text expected\r\n")
                .unwrap();
        assert!(!validate_failure_messages(&table).unwrap());
    }

    #[test]
    fn test_success_flags_ignore_case_and_whitespace() {
        let table = ColumnTable::parse("success\r\ntrue\r\nTRUE\r\n True \r\n").unwrap();
        assert!(validate_success_flags(&table).unwrap());
    }

    #[test]
    fn test_false_success_flag_fails() {
        let table = ColumnTable::parse("success\r\ntrue\r\nfalse\r\n").unwrap();
        assert!(!validate_success_flags(&table).unwrap());
    }

    #[test]
    fn test_legacy_columns_required() {
        let table = ColumnTable::parse("responseCode\r\n200\r\n").unwrap();

        assert!(matches!(
            validate_failure_messages(&table),
            Err(TestRunError::MissingColumn { .. })
        ));
        assert!(matches!(
            validate_success_flags(&table),
            Err(TestRunError::MissingColumn { .. })
        ));
    }
}
