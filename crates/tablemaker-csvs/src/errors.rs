use std::path::PathBuf;
use thiserror::Error;

pub type CsvResult<T> = Result<T, CsvError>;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Malformed table: {0}")]
    MalformedTable(String),

    #[error("{} is not valid UTF-8 (first bad byte at offset {offset})", .path.display())]
    InvalidEncoding { path: PathBuf, offset: usize },

    #[error("CSV folder does not exist: {0}")]
    MissingFolder(String),
}

/// A data row whose cell count does not match the header.
///
/// Reported per row; the rest of the table is still parsed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: expected {expected} cells, found {found}")]
pub struct RowShapeError {
    pub line: u64,
    pub expected: usize,
    pub found: usize,
}
