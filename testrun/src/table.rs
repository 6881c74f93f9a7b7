//! Naive CSV splitting and column-oriented reshaping.
//!
//! Fields are assumed to be unquoted: commas and line terminators are treated
//! as competing delimiters, so a field boundary and a record boundary look the
//! same to the tokenizer. Rows are recovered afterwards by striding over the
//! flat cell stream with the header count.

use crate::error::{Result, TestRunError};
use std::collections::{HashMap, HashSet};

/// Header names plus the row-major cell stream that follows them
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    /// Column names in CSV order
    pub headers: Vec<String>,
    /// Every data cell, row after row, header tokens excluded
    pub cells: Vec<String>,
}

impl RawTable {
    /// Split raw file text into headers and a flat cell stream
    pub fn parse(text: &str) -> Result<Self> {
        // Excel and some JMeter plugins prefix the export with a UTF-8 BOM
        let text = text.strip_prefix('\u{feff}').unwrap_or(text);

        let header_line = text
            .lines()
            .next()
            .ok_or_else(|| TestRunError::malformed("file is empty, expected a header row"))?;
        let headers: Vec<String> = header_line.split(',').map(str::to_string).collect();

        let mut cells = tokenize(text);

        // A terminator at the very end of the text leaves one empty token behind
        if cells.last().is_some_and(|cell| cell.is_empty()) {
            cells.pop();
        }

        if cells.len() < headers.len() {
            return Err(TestRunError::malformed(format!(
                "header row has {} columns but only {} tokens were found",
                headers.len(),
                cells.len()
            )));
        }
        cells.drain(..headers.len());

        Ok(Self { headers, cells })
    }

    pub fn header_count(&self) -> usize {
        self.headers.len()
    }
}

/// Split on `,` and on line terminators without distinguishing the two.
/// `\r\n` and bare `\n` both end a record.
fn tokenize(text: &str) -> Vec<String> {
    text.split(',')
        .flat_map(|field| field.split('\n'))
        .map(|token| token.strip_suffix('\r').unwrap_or(token).to_string())
        .collect()
}

/// Pick every `stride`-th cell starting at `first`.
///
/// With `stride` equal to the header count this yields one whole column out of
/// a row-major cell stream.
pub fn strided_column(cells: &[String], first: usize, stride: usize) -> Vec<String> {
    if stride == 0 {
        return Vec::new();
    }
    cells.iter().skip(first).step_by(stride).cloned().collect()
}

/// Column-oriented view of a results file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnTable {
    headers: Vec<String>,
    columns: HashMap<String, Vec<String>>,
    row_count: usize,
}

impl ColumnTable {
    /// Parse raw text straight into columns
    pub fn parse(text: &str) -> Result<Self> {
        Self::from_raw(RawTable::parse(text)?)
    }

    /// Regroup a row-major cell stream into one sequence per header
    pub fn from_raw(raw: RawTable) -> Result<Self> {
        let header_count = raw.header_count();
        if header_count == 0 {
            return Err(TestRunError::malformed("header row has no columns"));
        }

        if raw.cells.len() % header_count != 0 {
            return Err(TestRunError::malformed(format!(
                "{} data cells cannot be split evenly into {} columns",
                raw.cells.len(),
                header_count
            )));
        }

        let mut seen = HashSet::new();
        if let Some(duplicate) = raw.headers.iter().find(|h| !seen.insert(h.as_str())) {
            return Err(TestRunError::malformed(format!(
                "header '{duplicate}' appears more than once"
            )));
        }

        let row_count = raw.cells.len() / header_count;
        let columns = raw
            .headers
            .iter()
            .enumerate()
            .map(|(index, header)| {
                (header.clone(), strided_column(&raw.cells, index, header_count))
            })
            .collect();

        Ok(Self {
            headers: raw.headers,
            columns,
            row_count,
        })
    }

    /// Look up a column by header name
    pub fn column(&self, name: &str) -> Result<&[String]> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| TestRunError::missing_column(name, &self.headers))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Flatten back into row-major order, the inverse of [`ColumnTable::from_raw`]
    pub fn to_row_major(&self) -> Vec<String> {
        let mut cells = Vec::with_capacity(self.row_count * self.headers.len());
        for row in 0..self.row_count {
            for header in &self.headers {
                cells.push(self.columns[header][row].clone());
            }
        }
        cells
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_reshape_two_columns() {
        let raw = RawTable {
            headers: strings(&["responseCode", "success"]),
            cells: strings(&["200", "true", "404", "false"]),
        };

        let table = ColumnTable::from_raw(raw).unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("responseCode").unwrap(), strings(&["200", "404"]).as_slice());
        assert_eq!(table.column("success").unwrap(), strings(&["true", "false"]).as_slice());
    }

    #[test]
    fn test_parse_crlf_text() {
        let text = "timeStamp,label,responseCode\r\n1,home,200\r\n2,login,503\r\n";

        let raw = RawTable::parse(text).unwrap();
        assert_eq!(raw.headers, strings(&["timeStamp", "label", "responseCode"]));
        assert_eq!(raw.cells, strings(&["1", "home", "200", "2", "login", "503"]));

        let table = ColumnTable::from_raw(raw).unwrap();
        assert_eq!(table.column("label").unwrap(), strings(&["home", "login"]).as_slice());
    }

    #[test]
    fn test_parse_lf_text() {
        let table = ColumnTable::parse("a,b\n1,2\n3,4\n").unwrap();

        assert_eq!(table.row_count(), 2);
        assert_eq!(table.column("b").unwrap(), strings(&["2", "4"]).as_slice());
    }

    #[test]
    fn test_last_cell_kept_without_trailing_newline() {
        let raw = RawTable::parse("a,b\r\n1,2\r\n3,4").unwrap();

        assert_eq!(raw.cells, strings(&["1", "2", "3", "4"]));
    }

    #[test]
    fn test_bom_is_ignored() {
        let table = ColumnTable::parse("\u{feff}responseCode,label\r\n500,home\r\n200,login\r\n").unwrap();

        assert_eq!(table.headers(), strings(&["responseCode", "label"]).as_slice());
        assert_eq!(table.column("responseCode").unwrap(), strings(&["500", "200"]).as_slice());
    }

    #[test]
    fn test_header_only_file_has_no_rows() {
        let table = ColumnTable::parse("responseCode,success\r\n").unwrap();

        assert_eq!(table.row_count(), 0);
        assert!(table.column("responseCode").unwrap().is_empty());
    }

    #[test]
    fn test_empty_text_is_malformed() {
        let err = RawTable::parse("").unwrap_err();
        assert!(matches!(err, TestRunError::MalformedInput { .. }));
    }

    #[test]
    fn test_uneven_cell_count_is_malformed() {
        let err = ColumnTable::parse("a,b\r\n1,2\r\n3\r\n").unwrap_err();
        assert!(matches!(err, TestRunError::MalformedInput { .. }));
    }

    #[test]
    fn test_duplicate_header_is_malformed() {
        let err = ColumnTable::parse("code,code\r\n1,2\r\n").unwrap_err();
        assert!(matches!(err, TestRunError::MalformedInput { .. }));
    }

    #[test]
    fn test_missing_column() {
        let table = ColumnTable::parse("label,success\r\nhome,true\r\n").unwrap();

        let err = table.column("responseCode").unwrap_err();
        assert!(matches!(err, TestRunError::MissingColumn { ref column, .. } if column == "responseCode"));
    }

    #[test]
    fn test_every_column_has_row_count_entries() {
        for header_count in 1..=5 {
            for rows in 0..=4 {
                let headers: Vec<String> = (0..header_count).map(|h| format!("h{h}")).collect();
                let cells: Vec<String> = (0..header_count * rows).map(|c| c.to_string()).collect();
                let table = ColumnTable::from_raw(RawTable {
                    headers: headers.clone(),
                    cells,
                })
                .unwrap();

                assert_eq!(table.row_count(), rows);
                for header in &headers {
                    assert_eq!(table.column(header).unwrap().len(), rows);
                }
            }
        }
    }

    #[test]
    fn test_row_major_round_trip() {
        let cells = strings(&["1", "a", "x", "2", "b", "y", "3", "c", "z"]);
        let table = ColumnTable::from_raw(RawTable {
            headers: strings(&["n", "l", "s"]),
            cells: cells.clone(),
        })
        .unwrap();

        assert_eq!(table.to_row_major(), cells);
    }

    #[test]
    fn test_strided_column() {
        let cells = strings(&["a0", "b0", "c0", "a1", "b1", "c1"]);

        assert_eq!(strided_column(&cells, 1, 3), strings(&["b0", "b1"]));
        assert!(strided_column(&cells, 0, 0).is_empty());
    }
}
