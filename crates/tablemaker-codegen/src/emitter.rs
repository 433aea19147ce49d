/*!
# Source Emitter

Renders a [`TableSchema`] as a Rust module and a set of tables as the registry module.

Output depends only on the input schemas: no timestamps, no hash-map iteration, no
environment. Compiling the same CSVs twice yields byte-identical files.
*/

use crate::errors::CodegenResult;
use tablemaker_schema::{ColumnKind, EnumSpec, ScalarType, TableSchema};

const BANNER: &str = "// @generated by tablemaker. Do not edit by hand.";

/// One table as seen by the registry module.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistryEntry {
    pub type_name: String,
    pub module_name: String,
}

impl From<&TableSchema> for RegistryEntry {
    fn from(schema: &TableSchema) -> Self {
        Self {
            type_name: schema.table_name.clone(),
            module_name: schema.module_name.clone(),
        }
    }
}

/// Line buffer with four-space indentation.
#[derive(Default)]
struct SourceWriter {
    text: String,
}

impl SourceWriter {
    fn line(&mut self, indent: usize, line: &str) {
        for _ in 0..indent {
            self.text.push_str("    ");
        }
        self.text.push_str(line);
        self.text.push('\n');
    }

    fn blank(&mut self) {
        self.text.push('\n');
    }

    fn finish(self) -> String {
        self.text
    }
}

/// Rust string literal for `text`.
fn quoted(text: &str) -> String {
    format!("{:?}", text)
}

fn coerce_fn(kind: &ColumnKind) -> &'static str {
    match kind {
        ColumnKind::Scalar(ScalarType::Int) => "int",
        ColumnKind::Scalar(ScalarType::Long) => "long",
        ColumnKind::Scalar(ScalarType::Float) => "float",
        ColumnKind::Scalar(ScalarType::Double) => "double",
        ColumnKind::Scalar(ScalarType::String) => "string",
        ColumnKind::Scalar(ScalarType::Bool) => "boolean",
        ColumnKind::Enum(_) => "enumeration",
    }
}

// ================================================================================================
// Table Modules
// ================================================================================================

/// Source of `tables/<module>.rs` for one table.
pub fn emit_schema(schema: &TableSchema) -> String {
    let mut out = SourceWriter::default();
    let has_enums = schema.enum_columns().next().is_some();

    out.line(0, BANNER);
    out.line(0, &format!("// Table: {}", schema.table_name));
    out.blank();
    out.line(0, "use serde::{Deserialize, Serialize};");
    if has_enums {
        out.line(
            0,
            "use tablemaker_runtime::{coerce, FromRow, RowValue, Table, TableEnum, TypeCoercionError};",
        );
    } else {
        out.line(
            0,
            "use tablemaker_runtime::{coerce, FromRow, RowValue, Table, TypeCoercionError};",
        );
    }
    out.blank();

    emit_table_struct(&mut out, schema);
    emit_record_struct(&mut out, schema);
    for (_, spec) in schema.enum_columns() {
        emit_enum(&mut out, spec);
    }
    emit_inherent_impl(&mut out, schema);
    emit_from_row(&mut out, schema);
    emit_table_impl(&mut out, schema);

    out.finish()
}

fn emit_table_struct(out: &mut SourceWriter, schema: &TableSchema) {
    out.line(0, "#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]");
    out.line(0, &format!("pub struct {} {{", schema.table_name));
    out.line(1, &format!("pub records: Vec<{}>,", schema.record_name));
    out.line(0, "}");
    out.blank();
}

fn emit_record_struct(out: &mut SourceWriter, schema: &TableSchema) {
    out.line(0, "#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]");
    out.line(0, &format!("pub struct {} {{", schema.record_name));
    for column in &schema.columns {
        out.line(1, &format!("#[serde(rename = {})]", quoted(&column.name)));
        out.line(
            1,
            &format!("pub {}: {},", column.field_name, column.rust_type()),
        );
    }
    out.line(0, "}");
    out.blank();
}

fn emit_enum(out: &mut SourceWriter, spec: &EnumSpec) {
    out.line(
        0,
        "#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]",
    );
    if spec.is_uninhabited() {
        out.line(0, &format!("pub enum {} {{}}", spec.type_name));
    } else {
        out.line(0, &format!("pub enum {} {{", spec.type_name));
        for literal in &spec.literals {
            out.line(1, &format!("#[serde(rename = {})]", quoted(&literal.text)));
            out.line(1, &format!("{},", literal.variant));
        }
        out.line(0, "}");
    }
    out.blank();

    let literals: Vec<String> = spec.literals.iter().map(|l| quoted(&l.text)).collect();

    out.line(0, &format!("impl TableEnum for {} {{", spec.type_name));
    out.line(
        1,
        &format!(
            "const LITERALS: &'static [&'static str] = &[{}];",
            literals.join(", ")
        ),
    );
    out.blank();
    if spec.is_uninhabited() {
        out.line(1, "fn from_literal(_literal: &str) -> Option<Self> {");
        out.line(2, "None");
        out.line(1, "}");
    } else {
        out.line(1, "fn from_literal(literal: &str) -> Option<Self> {");
        out.line(2, "match literal {");
        for literal in &spec.literals {
            out.line(
                3,
                &format!("{} => Some(Self::{}),", quoted(&literal.text), literal.variant),
            );
        }
        out.line(3, "_ => None,");
        out.line(2, "}");
        out.line(1, "}");
    }
    out.line(0, "}");
    out.blank();
}

fn emit_inherent_impl(out: &mut SourceWriter, schema: &TableSchema) {
    out.line(0, &format!("impl {} {{", schema.table_name));
    match schema.id_column() {
        Some(id) => {
            out.line(1, &format!("/// First record whose `{}` equals `id`.", id.name));
            out.line(
                1,
                &format!(
                    "pub fn get(&self, id: {}) -> Option<&{}> {{",
                    id.rust_type(),
                    schema.record_name
                ),
            );
            out.line(
                2,
                &format!(
                    "self.records.iter().find(|record| record.{} == id)",
                    id.field_name
                ),
            );
            out.line(1, "}");
        }
        None => {
            out.line(1, "/// Always `None`: this table has no integer `ID` column.");
            out.line(
                1,
                &format!(
                    "pub fn get(&self, _id: i32) -> Option<&{}> {{",
                    schema.record_name
                ),
            );
            out.line(2, "None");
            out.line(1, "}");
        }
    }
    out.blank();
    out.line(
        1,
        &format!("pub fn add_record(&mut self, record: {}) {{", schema.record_name),
    );
    out.line(2, "self.records.push(record);");
    out.line(1, "}");
    out.line(0, "}");
    out.blank();
}

fn emit_from_row(out: &mut SourceWriter, schema: &TableSchema) {
    out.line(0, &format!("impl FromRow for {} {{", schema.record_name));
    out.line(
        1,
        "fn from_row(row: &RowValue) -> Result<Self, TypeCoercionError> {",
    );
    out.line(2, "Ok(Self {");
    for column in &schema.columns {
        out.line(
            3,
            &format!(
                "{}: coerce::{}(row, {})?,",
                column.field_name,
                coerce_fn(&column.kind),
                quoted(&column.name)
            ),
        );
    }
    out.line(2, "})");
    out.line(1, "}");
    out.line(0, "}");
    out.blank();
}

fn emit_table_impl(out: &mut SourceWriter, schema: &TableSchema) {
    let record = &schema.record_name;

    out.line(0, &format!("impl Table for {} {{", schema.table_name));
    out.line(
        1,
        &format!(
            "const NAME: &'static str = {};",
            quoted(&schema.table_name)
        ),
    );
    out.line(1, &format!("type Record = {};", record));
    out.blank();
    out.line(1, &format!("fn records(&self) -> &[{}] {{", record));
    out.line(2, "&self.records");
    out.line(1, "}");
    out.blank();
    out.line(1, &format!("fn push_record(&mut self, record: {}) {{", record));
    out.line(2, "self.add_record(record);");
    out.line(1, "}");
    out.line(0, "}");
}

// ================================================================================================
// Registry Module
// ================================================================================================

/// Source of `tables.rs`: one module and one accessor per table, in the given order.
pub fn emit_registry(entries: &[RegistryEntry]) -> String {
    let mut out = SourceWriter::default();

    out.line(0, BANNER);
    out.blank();
    if entries.is_empty() {
        out.line(0, "use tablemaker_runtime::{AssetStore, TableRegistry};");
    } else {
        out.line(0, "use std::sync::Arc;");
        out.line(
            0,
            "use tablemaker_runtime::{AssetStore, RegistryLoadError, TableRegistry};",
        );
    }
    out.blank();

    if !entries.is_empty() {
        for entry in entries {
            out.line(0, &format!("pub mod {};", entry.module_name));
        }
        out.blank();
        for entry in entries {
            out.line(
                0,
                &format!("pub use {}::{};", entry.module_name, entry.type_name),
            );
        }
        out.blank();
    }

    let names: Vec<String> = entries.iter().map(|e| quoted(&e.type_name)).collect();
    out.line(0, "/// Every compiled table, in compile order.");
    out.line(
        0,
        &format!("pub const TABLE_NAMES: &[&str] = &[{}];", names.join(", ")),
    );
    out.blank();

    out.line(0, "/// Typed access to every compiled table, each loaded once on first use.");
    out.line(0, "pub struct Tables<S: AssetStore> {");
    out.line(1, "registry: TableRegistry<S>,");
    out.line(0, "}");
    out.blank();
    out.line(0, "impl<S: AssetStore> Tables<S> {");
    out.line(1, "pub fn new(store: S) -> Self {");
    out.line(2, "Self {");
    out.line(3, "registry: TableRegistry::new(store),");
    out.line(2, "}");
    out.line(1, "}");
    out.blank();
    out.line(1, "pub fn registry(&self) -> &TableRegistry<S> {");
    out.line(2, "&self.registry");
    out.line(1, "}");
    for entry in entries {
        out.blank();
        out.line(
            1,
            &format!(
                "pub fn {}(&self) -> Result<Arc<{}>, RegistryLoadError> {{",
                entry.module_name, entry.type_name
            ),
        );
        out.line(
            2,
            &format!("self.registry.table::<{}>()", entry.type_name),
        );
        out.line(1, "}");
    }
    out.line(0, "}");

    out.finish()
}

// ================================================================================================
// Schema Manifest
// ================================================================================================

/// Compiled schema as pretty JSON, read back when binding data.
pub fn emit_manifest(schema: &TableSchema) -> CodegenResult<String> {
    let mut json = serde_json::to_string_pretty(schema)?;
    json.push('\n');
    Ok(json)
}
