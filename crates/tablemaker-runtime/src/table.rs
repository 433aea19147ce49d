//! Traits implemented by generated table modules.

use crate::errors::TypeCoercionError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tablemaker_csvs::RowValue;

/// A compiled table: a named collection of records.
pub trait Table: Default + Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Table name, also the key in the asset store and the registry.
    const NAME: &'static str;

    type Record: FromRow;

    fn records(&self) -> &[Self::Record];

    fn push_record(&mut self, record: Self::Record);
}

/// Generated row constructor: build a record from raw cells, all or nothing.
pub trait FromRow: Sized {
    fn from_row(row: &RowValue) -> Result<Self, TypeCoercionError>;
}

/// An enum derived from the values of an enum column.
pub trait TableEnum: Sized {
    /// Literal texts in first-appearance order.
    const LITERALS: &'static [&'static str];

    fn from_literal(literal: &str) -> Option<Self>;
}
