/*!
# Table Binder

Turns parsed rows into records of a compiled table.

Each row is coerced as a unit: either every column converts and the record is
appended, or the row is rejected and nothing from it is kept. What happens next
depends on the [`BindPolicy`]:

- `SkipInvalidRows` (default): log the rejection, record it, keep binding.
- `FailFast`: stop at the first rejected row and return [`BindError::Coercion`].

Cells are looked up by column name, so binding does not depend on column position.
*/

use crate::coerce;
use crate::errors::{BindError, TypeCoercionError};
use crate::table::{FromRow, Table};
use serde::{Deserialize, Serialize};
use std::marker::PhantomData;
use tablemaker_csvs::RowValue;
use tablemaker_schema::TableSchema;
use tracing::{debug, warn};

/// Builds one record from one row.
pub trait RecordFactory {
    type Record;

    fn build(&self, row: &RowValue) -> Result<Self::Record, TypeCoercionError>;
}

/// Record keyed by column name, built from a compiled schema.
pub type DynamicRecord = serde_json::Map<String, serde_json::Value>;

/// Schema-driven factory, for callers that cannot name the generated record type.
#[derive(Debug, Clone, Copy)]
pub struct SchemaRecordFactory<'a> {
    schema: &'a TableSchema,
}

impl<'a> SchemaRecordFactory<'a> {
    pub fn new(schema: &'a TableSchema) -> Self {
        Self { schema }
    }
}

impl RecordFactory for SchemaRecordFactory<'_> {
    type Record = DynamicRecord;

    fn build(&self, row: &RowValue) -> Result<DynamicRecord, TypeCoercionError> {
        let mut record = DynamicRecord::new();
        for column in &self.schema.columns {
            record.insert(column.name.clone(), coerce::value(column, row)?);
        }
        Ok(record)
    }
}

/// Factory backed by a generated `FromRow` impl.
pub struct GeneratedRecordFactory<R> {
    _record: PhantomData<fn() -> R>,
}

impl<R> GeneratedRecordFactory<R> {
    pub fn new() -> Self {
        Self {
            _record: PhantomData,
        }
    }
}

impl<R> Default for GeneratedRecordFactory<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: FromRow> RecordFactory for GeneratedRecordFactory<R> {
    type Record = R;

    fn build(&self, row: &RowValue) -> Result<R, TypeCoercionError> {
        R::from_row(row)
    }
}

/// Persisted shape of a table bound without its generated type.
///
/// Serializes as `{"records": [...]}`, the same layout as generated table structs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DynamicTable {
    pub records: Vec<DynamicRecord>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BindPolicy {
    #[default]
    SkipInvalidRows,
    FailFast,
}

/// A row dropped during binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowRejection {
    pub line: u64,
    pub error: TypeCoercionError,
}

impl std::fmt::Display for RowRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}: {}", self.line, self.error)
    }
}

#[derive(Debug, Clone)]
pub struct Bound<R> {
    pub records: Vec<R>,
    pub rejected: Vec<RowRejection>,
}

#[derive(Debug, Clone)]
pub struct BoundTable<T> {
    pub table: T,
    pub rejected: Vec<RowRejection>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TableBinder {
    policy: BindPolicy,
}

impl TableBinder {
    pub fn new(policy: BindPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> BindPolicy {
        self.policy
    }

    /// Coerce `rows` in order, keeping one record per accepted row.
    pub fn bind<F: RecordFactory>(
        &self,
        table: &str,
        factory: &F,
        rows: &[RowValue],
    ) -> Result<Bound<F::Record>, BindError> {
        let mut records = Vec::with_capacity(rows.len());
        let mut rejected = Vec::new();

        for row in rows {
            match factory.build(row) {
                Ok(record) => records.push(record),
                Err(error) => {
                    if self.policy == BindPolicy::FailFast {
                        return Err(BindError::Coercion {
                            table: table.to_string(),
                            line: row.line(),
                            source: error,
                        });
                    }
                    warn!("Skipping row {} of table {}: {}", row.line(), table, error);
                    rejected.push(RowRejection {
                        line: row.line(),
                        error,
                    });
                }
            }
        }

        debug!(
            table,
            bound = records.len(),
            rejected = rejected.len(),
            "Bound table rows"
        );

        Ok(Bound { records, rejected })
    }

    /// Bind into a generated table type.
    pub fn bind_table<T: Table>(&self, rows: &[RowValue]) -> Result<BoundTable<T>, BindError> {
        let factory = GeneratedRecordFactory::<T::Record>::new();
        let bound = self.bind(T::NAME, &factory, rows)?;

        let mut table = T::default();
        for record in bound.records {
            table.push_record(record);
        }

        Ok(BoundTable {
            table,
            rejected: bound.rejected,
        })
    }

    /// Bind against a compiled schema, producing the persisted JSON shape.
    pub fn bind_schema(
        &self,
        schema: &TableSchema,
        rows: &[RowValue],
    ) -> Result<BoundTable<DynamicTable>, BindError> {
        let factory = SchemaRecordFactory::new(schema);
        let bound = self.bind(&schema.table_name, &factory, rows)?;

        Ok(BoundTable {
            table: DynamicTable {
                records: bound.records,
            },
            rejected: bound.rejected,
        })
    }
}
