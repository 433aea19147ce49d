/*!
# Schema Model

The normalized column structure of one table. A `TableSchema` is produced once per
compile pass and never mutated afterwards; it is also serialized as the table's
manifest so the binder can resolve the compiled shape by name.
*/

use serde::{Deserialize, Serialize};

// ================================================================================================
// Type Tokens
// ================================================================================================

/// Scalar column types recognized in the type row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScalarType {
    Int,
    Long,
    Float,
    Double,
    String,
    Bool,
}

impl ScalarType {
    /// Rust type used for the generated field.
    pub fn rust_type(&self) -> &'static str {
        match self {
            ScalarType::Int => "i32",
            ScalarType::Long => "i64",
            ScalarType::Float => "f32",
            ScalarType::Double => "f64",
            ScalarType::String => "String",
            ScalarType::Bool => "bool",
        }
    }

    /// Canonical token as written in the type row.
    pub fn token(&self) -> &'static str {
        match self {
            ScalarType::Int => "int",
            ScalarType::Long => "long",
            ScalarType::Float => "float",
            ScalarType::Double => "double",
            ScalarType::String => "string",
            ScalarType::Bool => "bool",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, ScalarType::Int | ScalarType::Long)
    }
}

/// A declared type from the type row: a scalar or the literal `enum`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeToken {
    Scalar(ScalarType),
    Enum,
}

impl TypeToken {
    /// Case-insensitive token lookup. Returns `None` for unknown tokens.
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim().to_ascii_lowercase();
        let parsed = match token.as_str() {
            "int" | "integer" => TypeToken::Scalar(ScalarType::Int),
            "long" => TypeToken::Scalar(ScalarType::Long),
            "float" => TypeToken::Scalar(ScalarType::Float),
            "double" => TypeToken::Scalar(ScalarType::Double),
            "string" => TypeToken::Scalar(ScalarType::String),
            "bool" | "boolean" => TypeToken::Scalar(ScalarType::Bool),
            "enum" => TypeToken::Enum,
            _ => return None,
        };
        Some(parsed)
    }
}

impl std::fmt::Display for TypeToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeToken::Scalar(scalar) => write!(f, "{}", scalar.token()),
            TypeToken::Enum => write!(f, "enum"),
        }
    }
}

// ================================================================================================
// Columns
// ================================================================================================

/// One distinct value of an enum column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumLiteral {
    /// Cell text as it appears in the CSV
    pub text: String,

    /// Generated variant identifier
    pub variant: String,
}

/// Closed set of values derived from an enum column, in first-appearance order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumSpec {
    pub type_name: String,
    pub literals: Vec<EnumLiteral>,
}

impl EnumSpec {
    pub fn contains(&self, text: &str) -> bool {
        self.literals.iter().any(|literal| literal.text == text)
    }

    pub fn texts(&self) -> Vec<&str> {
        self.literals.iter().map(|l| l.text.as_str()).collect()
    }

    /// An enum with no literals has no values; it is valid but uninhabited.
    pub fn is_uninhabited(&self) -> bool {
        self.literals.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnKind {
    Scalar(ScalarType),
    Enum(EnumSpec),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnSpec {
    /// Column name from the header row
    pub name: String,

    /// Generated record field name
    pub field_name: String,

    pub kind: ColumnKind,
}

impl ColumnSpec {
    pub fn declared_type(&self) -> TypeToken {
        match &self.kind {
            ColumnKind::Scalar(scalar) => TypeToken::Scalar(*scalar),
            ColumnKind::Enum(_) => TypeToken::Enum,
        }
    }

    pub fn enum_spec(&self) -> Option<&EnumSpec> {
        match &self.kind {
            ColumnKind::Enum(spec) => Some(spec),
            ColumnKind::Scalar(_) => None,
        }
    }

    /// Rust type of the generated field.
    pub fn rust_type(&self) -> &str {
        match &self.kind {
            ColumnKind::Scalar(scalar) => scalar.rust_type(),
            ColumnKind::Enum(spec) => &spec.type_name,
        }
    }
}

// ================================================================================================
// Tables
// ================================================================================================

/// Name of the key column used for indexed lookup.
pub const ID_COLUMN: &str = "ID";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableSchema {
    /// Generated table type name (`ItemList`)
    pub table_name: String,

    /// Generated module and file name (`item_list`)
    pub module_name: String,

    /// Generated record type name (`ItemListRecord`)
    pub record_name: String,

    /// Columns in CSV header order
    pub columns: Vec<ColumnSpec>,

    /// True when an integer column named `ID` exists
    pub has_id_column: bool,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&ColumnSpec> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The integer `ID` column, if present.
    pub fn id_column(&self) -> Option<&ColumnSpec> {
        if !self.has_id_column {
            return None;
        }
        self.column(ID_COLUMN)
    }

    pub fn enum_columns(&self) -> impl Iterator<Item = (&ColumnSpec, &EnumSpec)> {
        self.columns
            .iter()
            .filter_map(|c| c.enum_spec().map(|spec| (c, spec)))
    }
}
