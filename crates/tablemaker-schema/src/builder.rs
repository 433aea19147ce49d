/*!
# Schema Builder

Turns parsed header/type/data rows into a [`TableSchema`].

## Enum derivation

An `enum` column declares no literals. They are the distinct trimmed, non-empty cell
values of that column across all data rows, compared by exact (case-sensitive) text and
kept in first-appearance order. Identical input rows therefore always give the same
literal order, which keeps regenerated code byte-identical.

## Enum type names

The enum type is named after its column (`kind` -> `Kind`). If that name is already
taken in the module (by the table type, the record type, an earlier enum, or a name
the generated module imports) it becomes `<Table><Column>`, then `<Table><Column>2`, ...
*/

use crate::errors::{SchemaError, SchemaResult};
use crate::naming::{
    claim_unique, field_ident, is_keyword, to_upper_camel_case, type_ident,
    validate_identifier, RESERVED_MODULE_NAMES, RESERVED_TYPE_NAMES,
};
use crate::types::{
    ColumnKind, ColumnSpec, EnumLiteral, EnumSpec, TableSchema, TypeToken, ID_COLUMN,
};
use std::collections::HashSet;
use tablemaker_csvs::RowValue;
use tracing::{debug, warn};

/// Generated names for one table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub type_name: String,
    pub module_name: String,
}

impl TableNames {
    /// Derive names from a CSV file stem (`item_list` -> `ItemList` / `item_list`).
    pub fn from_source(source_name: &str) -> SchemaResult<Self> {
        let invalid = |reason: &str| SchemaError::InvalidTableName {
            table: source_name.to_string(),
            reason: reason.to_string(),
        };

        let type_name = to_upper_camel_case(source_name);
        if type_name.is_empty() {
            return Err(invalid("contains no letters or digits"));
        }
        if validate_identifier(&type_name).is_err() {
            return Err(invalid("must start with a letter"));
        }
        if is_keyword(&type_name) || RESERVED_TYPE_NAMES.contains(&type_name.as_str()) {
            return Err(invalid("name is reserved"));
        }

        let module_name = field_ident(&type_name);
        if RESERVED_MODULE_NAMES.contains(&module_name.as_str()) {
            return Err(invalid("name is reserved"));
        }

        Ok(Self {
            type_name,
            module_name,
        })
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SchemaBuilder;

impl SchemaBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build the schema for the table read from `source_name` (the CSV file stem).
    pub fn build(
        &self,
        source_name: &str,
        header: &[String],
        types: &[String],
        rows: &[RowValue],
    ) -> SchemaResult<TableSchema> {
        if header.len() != types.len() {
            return Err(SchemaError::ColumnCountMismatch {
                header: header.len(),
                types: types.len(),
            });
        }

        let names = TableNames::from_source(source_name)?;
        let record_name = format!("{}Record", names.type_name);

        validate_column_names(header)?;

        let mut field_names = HashSet::new();
        let mut type_names: HashSet<String> = RESERVED_TYPE_NAMES
            .iter()
            .map(|name| name.to_string())
            .collect();
        type_names.insert(names.type_name.clone());
        type_names.insert(record_name.clone());

        let mut columns = Vec::with_capacity(header.len());

        for (index, (name, token)) in header.iter().zip(types.iter()).enumerate() {
            let declared = TypeToken::parse(token).ok_or_else(|| SchemaError::UnknownTypeToken {
                column: name.clone(),
                token: token.clone(),
            })?;

            let field_name = claim_unique(&field_ident(name), "_", &mut field_names);

            let kind = match declared {
                TypeToken::Scalar(scalar) => ColumnKind::Scalar(scalar),
                TypeToken::Enum => {
                    let type_name = enum_type_name(&names.type_name, name, &mut type_names);
                    let literals = derive_literals(index, rows);
                    if literals.is_empty() {
                        warn!(
                            "Enum column '{}' of table {} has no values; {} will be uninhabited",
                            name, names.type_name, type_name
                        );
                    }
                    ColumnKind::Enum(EnumSpec {
                        type_name,
                        literals,
                    })
                }
            };

            columns.push(ColumnSpec {
                name: name.clone(),
                field_name,
                kind,
            });
        }

        let has_id_column = columns.iter().any(|c| {
            c.name == ID_COLUMN && matches!(c.kind, ColumnKind::Scalar(s) if s.is_integer())
        });
        if !has_id_column {
            warn!(
                "Table {} has no integer '{}' column; indexed lookup will never match",
                names.type_name, ID_COLUMN
            );
        }

        debug!(
            table = %names.type_name,
            columns = columns.len(),
            "Built table schema"
        );

        Ok(TableSchema {
            table_name: names.type_name,
            module_name: names.module_name,
            record_name,
            columns,
            has_id_column,
        })
    }
}

fn validate_column_names(header: &[String]) -> SchemaResult<()> {
    let mut seen = HashSet::new();
    for name in header {
        if let Err(issue) = validate_identifier(name) {
            return Err(SchemaError::InvalidColumnName {
                column: name.clone(),
                reason: issue.to_string(),
            });
        }
        if !seen.insert(name.as_str()) {
            return Err(SchemaError::InvalidColumnName {
                column: name.clone(),
                reason: "duplicate column name".to_string(),
            });
        }
    }
    Ok(())
}

fn enum_type_name(table: &str, column: &str, taken: &mut HashSet<String>) -> String {
    let base = type_ident(column, "Column");
    if !taken.contains(&base) {
        taken.insert(base.clone());
        return base;
    }
    claim_unique(&format!("{}{}", table, base), "", taken)
}

/// Distinct non-empty values of column `index`, first appearance first.
fn derive_literals(index: usize, rows: &[RowValue]) -> Vec<EnumLiteral> {
    let mut seen = HashSet::new();
    let mut variants = HashSet::new();
    let mut literals = Vec::new();

    for row in rows {
        let text = match row.value_at(index) {
            Some(value) => value.trim(),
            None => continue,
        };
        if text.is_empty() || !seen.insert(text.to_string()) {
            continue;
        }
        let variant = claim_unique(&type_ident(text, "Literal"), "", &mut variants);
        literals.push(EnumLiteral {
            text: text.to_string(),
            variant,
        });
    }

    literals
}
