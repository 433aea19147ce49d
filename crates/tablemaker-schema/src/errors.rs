use thiserror::Error;

pub type SchemaResult<T> = Result<T, SchemaError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchemaError {
    #[error("Invalid column name '{column}': {reason}")]
    InvalidColumnName { column: String, reason: String },

    #[error("Unknown type token '{token}' for column '{column}'")]
    UnknownTypeToken { column: String, token: String },

    #[error("Invalid table name '{table}': {reason}")]
    InvalidTableName { table: String, reason: String },

    #[error("Header has {header} columns but type row has {types}")]
    ColumnCountMismatch { header: usize, types: usize },
}
