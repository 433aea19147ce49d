/*!
# CSV Table Parser

Reads the raw text of one table. The layout is fixed:

- line 1: column names
- line 2: column type tokens
- line 3..N: data

Cells are split on commas only. Quoting is disabled, so a cell containing a comma
is an authoring error in the input and shows up as a row with too many cells.
*/

use crate::errors::{CsvError, CsvResult, RowShapeError};
use csv::{ReaderBuilder, StringRecord};
use tracing::{debug, warn};

/// One data row: raw cell text addressable by column name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowValue {
    line: u64,
    cells: Vec<(String, String)>,
}

impl RowValue {
    pub fn new(line: u64, cells: Vec<(String, String)>) -> Self {
        Self { line, cells }
    }

    /// Build a row by zipping header names with cell values.
    pub fn from_cells<S: AsRef<str>>(line: u64, header: &[String], values: &[S]) -> Self {
        let cells = header
            .iter()
            .zip(values.iter())
            .map(|(name, value)| (name.clone(), value.as_ref().to_string()))
            .collect();
        Self { line, cells }
    }

    /// 1-based line in the source file.
    pub fn line(&self) -> u64 {
        self.line
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.cells.get(index).map(|(_, value)| value.as_str())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells
            .iter()
            .map(|(name, value)| (name.as_str(), value.as_str()))
    }
}

/// Result of parsing one table's CSV text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub header: Vec<String>,
    pub types: Vec<String>,
    pub rows: Vec<RowValue>,
    /// Data rows dropped because their cell count did not match the header.
    pub rejected: Vec<RowShapeError>,
}

/// Parse the raw text of one table.
///
/// Fails with [`CsvError::MalformedTable`] when the header or type row is
/// missing or empty, or when their lengths differ. Data rows with the wrong
/// number of cells are collected in [`ParsedTable::rejected`].
pub fn parse_table(raw: &str) -> CsvResult<ParsedTable> {
    let raw = raw.strip_prefix('\u{feff}').unwrap_or(raw);

    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(raw.as_bytes());

    let mut records = Vec::new();
    for result in rdr.records() {
        let record = result?;
        if is_blank(&record) {
            continue;
        }
        records.push(record);
    }

    let mut records = records.into_iter();

    let header = match records.next() {
        Some(record) => trimmed(&record),
        None => {
            return Err(CsvError::MalformedTable(
                "table is empty (missing header row)".to_string(),
            ))
        }
    };
    if header.iter().all(|name| name.is_empty()) {
        return Err(CsvError::MalformedTable("header row is empty".to_string()));
    }

    let types = match records.next() {
        Some(record) => trimmed(&record),
        None => {
            return Err(CsvError::MalformedTable(
                "missing type row".to_string(),
            ))
        }
    };
    if types.iter().all(|token| token.is_empty()) {
        return Err(CsvError::MalformedTable("type row is empty".to_string()));
    }

    if header.len() != types.len() {
        return Err(CsvError::MalformedTable(format!(
            "header has {} columns but type row has {}",
            header.len(),
            types.len()
        )));
    }

    let mut rows = Vec::new();
    let mut rejected = Vec::new();

    for record in records {
        let line = record_line(&record);

        if record.len() != header.len() {
            let error = RowShapeError {
                line,
                expected: header.len(),
                found: record.len(),
            };
            warn!("Rejecting row: {}", error);
            rejected.push(error);
            continue;
        }

        let values: Vec<&str> = record.iter().collect();
        rows.push(RowValue::from_cells(line, &header, &values));
    }

    debug!(
        columns = header.len(),
        rows = rows.len(),
        rejected = rejected.len(),
        "Parsed table"
    );

    Ok(ParsedTable {
        header,
        types,
        rows,
        rejected,
    })
}

fn trimmed(record: &StringRecord) -> Vec<String> {
    record.iter().map(|cell| cell.trim().to_string()).collect()
}

fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|cell| cell.trim().is_empty())
}

fn record_line(record: &StringRecord) -> u64 {
    record.position().map(|pos| pos.line()).unwrap_or(0)
}
