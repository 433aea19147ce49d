use thiserror::Error;

/// Why a cell could not be coerced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoercionFailure {
    NotAnInteger,
    NotANumber,
    NotABoolean,
    UnknownLiteral,
    MissingColumn,
}

impl std::fmt::Display for CoercionFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            CoercionFailure::NotAnInteger => "is not an integer",
            CoercionFailure::NotANumber => "is not a finite number",
            CoercionFailure::NotABoolean => "is not a boolean (expected true/false)",
            CoercionFailure::UnknownLiteral => "is not a known enum literal",
            CoercionFailure::MissingColumn => "is missing from the row",
        };
        f.write_str(text)
    }
}

/// A cell whose text does not fit its column's type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("column '{column}': {raw_value:?} {reason}")]
pub struct TypeCoercionError {
    pub column: String,
    pub raw_value: String,
    pub reason: CoercionFailure,
}

impl TypeCoercionError {
    pub fn new(column: &str, raw_value: &str, reason: CoercionFailure) -> Self {
        Self {
            column: column.to_string(),
            raw_value: raw_value.to_string(),
            reason,
        }
    }
}

#[derive(Error, Debug)]
pub enum BindError {
    #[error("table {table}, line {line}: {source}")]
    Coercion {
        table: String,
        line: u64,
        #[source]
        source: TypeCoercionError,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk error: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Asset already exists: {0}")]
    AlreadyExists(String),
}

#[derive(Error, Debug)]
pub enum RegistryLoadError {
    #[error("No persisted instance found for table {name}")]
    NotFound { name: String },

    #[error("Expected exactly one persisted instance for table {name}, found {count}")]
    Ambiguous { name: String, count: usize },

    #[error("Failed to decode table {name}: {source}")]
    Decode {
        name: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to read table {name}: {source}")]
    Store {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("Table {name} is already loaded as a different type than {expected}")]
    TypeMismatch { name: String, expected: &'static str },
}
