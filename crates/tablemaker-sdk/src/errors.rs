use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while compiling a table to Rust source.
#[derive(Debug, Error)]
pub enum CompilerError {
    #[error(transparent)]
    Csv(#[from] tablemaker_csvs::CsvError),

    #[error(transparent)]
    Schema(#[from] tablemaker_schema::SchemaError),

    #[error(transparent)]
    Codegen(#[from] tablemaker_codegen::CodegenError),

    #[error("Table {table} is defined by both {} and {}", .first.display(), .second.display())]
    DuplicateTableName {
        table: String,
        first: PathBuf,
        second: PathBuf,
    },
}

pub type CompilerResult<T> = std::result::Result<T, CompilerError>;

/// Errors raised while binding a table's data and persisting it.
#[derive(Debug, Error)]
pub enum BindTablesError {
    #[error(transparent)]
    Csv(#[from] tablemaker_csvs::CsvError),

    #[error(transparent)]
    Schema(#[from] tablemaker_schema::SchemaError),

    #[error(transparent)]
    Bind(#[from] tablemaker_runtime::BindError),

    #[error(transparent)]
    Store(#[from] tablemaker_runtime::StoreError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error("Table {table} has not been compiled (no manifest at {})", .path.display())]
    SchemaNotCompiled { table: String, path: PathBuf },

    #[error("Table {table} is defined by both {} and {}", .first.display(), .second.display())]
    DuplicateTableName {
        table: String,
        first: PathBuf,
        second: PathBuf,
    },
}

pub type BindTablesResult<T> = std::result::Result<T, BindTablesError>;

/// A table that could not be processed. The rest of the batch carries on.
#[derive(Debug)]
pub struct TableFailure<E> {
    pub table: String,
    pub path: PathBuf,
    pub error: E,
}

impl<E: std::fmt::Display> std::fmt::Display for TableFailure<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({}): {}", self.table, self.path.display(), self.error)
    }
}
