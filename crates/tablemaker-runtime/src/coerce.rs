/*!
# Cell Coercion

Text-to-value conversion shared by generated `FromRow` impls and the schema-driven
binder. Numeric, boolean and enum cells are trimmed before parsing; string cells are
passed through untouched.
*/

use crate::errors::{CoercionFailure, TypeCoercionError};
use crate::table::TableEnum;
use serde_json::Value;
use std::str::FromStr;
use tablemaker_csvs::RowValue;
use tablemaker_schema::{ColumnKind, ColumnSpec, ScalarType};

fn cell<'a>(row: &'a RowValue, column: &str) -> Result<&'a str, TypeCoercionError> {
    row.get(column)
        .ok_or_else(|| TypeCoercionError::new(column, "", CoercionFailure::MissingColumn))
}

fn parse<T: FromStr>(
    row: &RowValue,
    column: &str,
    failure: CoercionFailure,
) -> Result<T, TypeCoercionError> {
    let raw = cell(row, column)?;
    raw.trim()
        .parse()
        .map_err(|_| TypeCoercionError::new(column, raw, failure))
}

pub fn int(row: &RowValue, column: &str) -> Result<i32, TypeCoercionError> {
    parse(row, column, CoercionFailure::NotAnInteger)
}

pub fn long(row: &RowValue, column: &str) -> Result<i64, TypeCoercionError> {
    parse(row, column, CoercionFailure::NotAnInteger)
}

pub fn float(row: &RowValue, column: &str) -> Result<f32, TypeCoercionError> {
    let value: f32 = parse(row, column, CoercionFailure::NotANumber)?;
    if !value.is_finite() {
        return Err(non_finite(row, column));
    }
    Ok(value)
}

pub fn double(row: &RowValue, column: &str) -> Result<f64, TypeCoercionError> {
    let value: f64 = parse(row, column, CoercionFailure::NotANumber)?;
    if !value.is_finite() {
        return Err(non_finite(row, column));
    }
    Ok(value)
}

fn non_finite(row: &RowValue, column: &str) -> TypeCoercionError {
    let raw = row.get(column).unwrap_or_default();
    TypeCoercionError::new(column, raw, CoercionFailure::NotANumber)
}

/// `true` or `false`, any case.
pub fn boolean(row: &RowValue, column: &str) -> Result<bool, TypeCoercionError> {
    let raw = cell(row, column)?;
    let text = raw.trim();
    if text.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if text.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(TypeCoercionError::new(
            column,
            raw,
            CoercionFailure::NotABoolean,
        ))
    }
}

pub fn string(row: &RowValue, column: &str) -> Result<String, TypeCoercionError> {
    cell(row, column).map(str::to_string)
}

/// Exact literal match against a generated enum.
pub fn enumeration<E: TableEnum>(row: &RowValue, column: &str) -> Result<E, TypeCoercionError> {
    let raw = cell(row, column)?;
    E::from_literal(raw.trim())
        .ok_or_else(|| TypeCoercionError::new(column, raw, CoercionFailure::UnknownLiteral))
}

/// Exact literal match against a literal list; returns the matched text.
pub fn literal(row: &RowValue, column: &str, literals: &[&str]) -> Result<String, TypeCoercionError> {
    let raw = cell(row, column)?;
    let text = raw.trim();
    if literals.contains(&text) {
        Ok(text.to_string())
    } else {
        Err(TypeCoercionError::new(
            column,
            raw,
            CoercionFailure::UnknownLiteral,
        ))
    }
}

/// Coerce one column of `row` into a JSON value, per the column's compiled kind.
pub fn value(column: &ColumnSpec, row: &RowValue) -> Result<Value, TypeCoercionError> {
    let name = column.name.as_str();
    let value = match &column.kind {
        ColumnKind::Scalar(ScalarType::Int) => Value::from(int(row, name)?),
        ColumnKind::Scalar(ScalarType::Long) => Value::from(long(row, name)?),
        ColumnKind::Scalar(ScalarType::Float) => Value::from(float(row, name)?),
        ColumnKind::Scalar(ScalarType::Double) => Value::from(double(row, name)?),
        ColumnKind::Scalar(ScalarType::String) => Value::from(string(row, name)?),
        ColumnKind::Scalar(ScalarType::Bool) => Value::from(boolean(row, name)?),
        ColumnKind::Enum(spec) => Value::from(literal(row, name, &spec.texts())?),
    };
    Ok(value)
}
