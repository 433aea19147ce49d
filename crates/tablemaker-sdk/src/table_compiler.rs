/*!
# Table Compiler

Compiles every CSV under a folder into generated Rust source.

## Steps
- Discover `.csv` files under the CSV folder
- Claim each table name in path order; later duplicates fail
- Read and parse header, type and data rows
- Build the table schema (enum literals are derived here)
- Write `tables/<module>.rs` and its schema manifest
- Write `tables.rs` listing every table that compiled

A table that fails at any step is reported and skipped; it never stops the batch and
never appears in the registry module.
*/

use crate::errors::{CompilerError, CompilerResult, TableFailure};
use crate::table_names::claim_table_names;
use std::path::{Path, PathBuf};
use tablemaker_codegen::{ArtifactWriter, RegistryEntry};
use tablemaker_csvs::{discover_tables, parse_table, CsvSource, RowShapeError};
use tablemaker_schema::{SchemaBuilder, TableNames, TableSchema};
use tracing::{debug, error, info};

/// A table whose source was generated.
#[derive(Debug, Clone)]
pub struct CompiledTable {
    pub schema: TableSchema,
    pub source_path: PathBuf,
    pub module_path: PathBuf,

    /// Data rows skipped by the parser for having the wrong cell count
    pub rejected_rows: Vec<RowShapeError>,
}

#[derive(Debug)]
pub struct CompileReport {
    pub compiled: Vec<CompiledTable>,
    pub failures: Vec<TableFailure<CompilerError>>,
    pub registry_path: PathBuf,
}

impl CompileReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}

/// Compile every table under `csv_folder`, writing generated code under `source_root`.
///
/// Errors only when the folder cannot be read or the registry cannot be written;
/// per-table problems are collected in [`CompileReport::failures`].
pub fn compile_tables(csv_folder: &Path, source_root: &Path) -> CompilerResult<CompileReport> {
    let sources = discover_tables(csv_folder)?;
    info!(
        "Compiling {} table(s) from {}",
        sources.len(),
        csv_folder.display()
    );

    let writer = ArtifactWriter::new(source_root);
    let builder = SchemaBuilder::new();

    let claims = claim_table_names(&sources, |table, first, second| {
        CompilerError::DuplicateTableName {
            table,
            first,
            second,
        }
    });

    let mut compiled = Vec::new();
    let mut failures = Vec::new();

    for (source, claim) in sources.iter().zip(claims) {
        let result = claim.and_then(|names| compile_source(source, &names, &builder, &writer));
        match result {
            Ok(table) => {
                info!(
                    "Compiled table {} -> {}",
                    table.schema.table_name,
                    table.module_path.display()
                );
                compiled.push(table);
            }
            Err(e) => {
                error!("Failed to compile {}: {}", source.path.display(), e);
                failures.push(TableFailure {
                    table: source.name.clone(),
                    path: source.path.clone(),
                    error: e,
                });
            }
        }
    }

    let entries: Vec<RegistryEntry> = compiled
        .iter()
        .map(|table| RegistryEntry::from(&table.schema))
        .collect();
    let registry_path = writer.write_registry(&entries)?;
    debug!("Wrote registry with {} table(s)", entries.len());

    Ok(CompileReport {
        compiled,
        failures,
        registry_path,
    })
}

fn compile_source(
    source: &CsvSource,
    names: &TableNames,
    builder: &SchemaBuilder,
    writer: &ArtifactWriter,
) -> CompilerResult<CompiledTable> {
    let text = source.read()?;
    let parsed = parse_table(&text)?;
    let schema = builder.build(&source.name, &parsed.header, &parsed.types, &parsed.rows)?;
    debug_assert_eq!(schema.table_name, names.type_name);

    let module_path = writer.write_schema(&schema)?;

    Ok(CompiledTable {
        schema,
        source_path: source.path.clone(),
        module_path,
        rejected_rows: parsed.rejected,
    })
}
