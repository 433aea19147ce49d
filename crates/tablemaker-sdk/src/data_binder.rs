/*!
# Data Binder

Populates compiled tables from their CSVs and persists them to an [`AssetStore`].

Table names are claimed in path order before anything is read, the same way the compiler
claims them. For each CSV that owns its name the compiled schema is resolved from its manifest,
the rows are bound against it, and the previous persisted object (if any) is replaced.
Binding uses the compiled schema, not the current CSV header: a literal added to an
enum column since the last compile rejects that row until the tables are recompiled.
*/

use crate::errors::{BindTablesError, BindTablesResult, TableFailure};
use crate::table_names::claim_table_names;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tablemaker_codegen::ArtifactWriter;
use tablemaker_csvs::{discover_tables, parse_table, CsvSource, RowShapeError};
use tablemaker_runtime::{AssetStore, BindPolicy, RowRejection, TableBinder};
use tablemaker_schema::{TableNames, TableSchema};
use tracing::{debug, error, info};

/// A table whose data was persisted.
#[derive(Debug, Clone)]
pub struct BoundTableSummary {
    pub table: String,
    pub source_path: PathBuf,
    pub records: usize,

    /// Rows dropped because a cell failed to coerce
    pub rejected_rows: Vec<RowRejection>,

    /// Rows dropped by the parser for having the wrong cell count
    pub malformed_rows: Vec<RowShapeError>,
}

#[derive(Debug)]
pub struct BindReport {
    pub bound: Vec<BoundTableSummary>,
    pub failures: Vec<TableFailure<BindTablesError>>,
}

impl BindReport {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }

    pub fn rejected_row_count(&self) -> usize {
        self.bound
            .iter()
            .map(|t| t.rejected_rows.len() + t.malformed_rows.len())
            .sum()
    }
}

/// Read the compiled schema for the table named by `table` (a CSV stem or type name).
pub fn load_compiled_schema(source_root: &Path, table: &str) -> BindTablesResult<TableSchema> {
    let names = TableNames::from_source(table)?;
    load_manifest(source_root, names)
}

fn load_manifest(source_root: &Path, names: TableNames) -> BindTablesResult<TableSchema> {
    let path = ArtifactWriter::new(source_root).manifest_path(&names.module_name);

    let json = match fs::read_to_string(&path) {
        Ok(json) => json,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            return Err(BindTablesError::SchemaNotCompiled {
                table: names.type_name,
                path,
            });
        }
        Err(e) => return Err(e.into()),
    };

    let schema = serde_json::from_str(&json)?;
    debug!("Loaded compiled schema {}", path.display());
    Ok(schema)
}

/// Bind every table under `csv_folder` and persist it to `store`.
///
/// Errors only when the folder cannot be read; per-table problems are collected in
/// [`BindReport::failures`].
pub fn bind_tables<S: AssetStore + ?Sized>(
    csv_folder: &Path,
    source_root: &Path,
    store: &S,
    policy: BindPolicy,
) -> BindTablesResult<BindReport> {
    let sources = discover_tables(csv_folder)?;
    info!(
        "Binding {} table(s) from {}",
        sources.len(),
        csv_folder.display()
    );

    let claims = claim_table_names(&sources, |table, first, second| {
        BindTablesError::DuplicateTableName {
            table,
            first,
            second,
        }
    });

    let binder = TableBinder::new(policy);
    let mut bound = Vec::new();
    let mut failures = Vec::new();

    for (source, claim) in sources.iter().zip(claims) {
        let result =
            claim.and_then(|names| bind_source(source, names, source_root, store, &binder));
        match result {
            Ok(summary) => {
                info!(
                    "Bound table {}: {} record(s), {} row(s) rejected",
                    summary.table,
                    summary.records,
                    summary.rejected_rows.len() + summary.malformed_rows.len()
                );
                bound.push(summary);
            }
            Err(e) => {
                error!("Failed to bind {}: {}", source.path.display(), e);
                failures.push(TableFailure {
                    table: source.name.clone(),
                    path: source.path.clone(),
                    error: e,
                });
            }
        }
    }

    Ok(BindReport { bound, failures })
}

fn bind_source<S: AssetStore + ?Sized>(
    source: &CsvSource,
    names: TableNames,
    source_root: &Path,
    store: &S,
    binder: &TableBinder,
) -> BindTablesResult<BoundTableSummary> {
    let schema = load_manifest(source_root, names)?;

    let text = source.read()?;
    let parsed = parse_table(&text)?;
    let result = binder.bind_schema(&schema, &parsed.rows)?;
    let data = serde_json::to_vec(&result.table)?;

    if store.exists(&schema.table_name)? {
        debug!("Replacing persisted table {}", schema.table_name);
    }
    store.delete(&schema.table_name)?;
    store.create(&schema.table_name, &data)?;

    Ok(BoundTableSummary {
        table: schema.table_name,
        source_path: source.path.clone(),
        records: result.table.records.len(),
        rejected_rows: result.rejected,
        malformed_rows: parsed.rejected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_compiler::compile_tables;
    use tablemaker_runtime::{
        BindError, CoercionFailure, DynamicTable, FsAssetStore, MemoryAssetStore, TableRegistry,
    };
    use tempfile::TempDir;

    const ITEMS_CSV: &str =
        "ID,Name,Kind\nint,string,enum\n1,Sword,Weapon\n2,Shield,Armor\n3,Axe,Weapon\n";

    struct Project {
        _dir: TempDir,
        csv_folder: PathBuf,
        source_root: PathBuf,
        object_folder: PathBuf,
    }

    fn project(tables: &[(&str, &str)]) -> Project {
        let dir = TempDir::new().unwrap();
        let csv_folder = dir.path().join("Tables");
        fs::create_dir_all(&csv_folder).unwrap();
        for (file, text) in tables {
            fs::write(csv_folder.join(file), text).unwrap();
        }
        Project {
            source_root: dir.path().join("src"),
            object_folder: dir.path().join("Resources/Tables"),
            csv_folder,
            _dir: dir,
        }
    }

    #[test]
    fn test_bind_persists_one_object_per_table() {
        let p = project(&[("Items.csv", ITEMS_CSV)]);
        compile_tables(&p.csv_folder, &p.source_root).unwrap();

        let store = FsAssetStore::new(&p.object_folder);
        let report =
            bind_tables(&p.csv_folder, &p.source_root, &store, BindPolicy::default()).unwrap();

        assert!(!report.has_failures());
        assert_eq!(report.bound[0].records, 3);
        assert!(p.object_folder.join("Items.json").is_file());

        let registry = TableRegistry::new(store);
        let items = registry.get::<DynamicTable>("Items").unwrap();
        assert_eq!(items.records[1]["Name"], "Shield");
        assert_eq!(items.records[1]["Kind"], "Armor");
    }

    #[test]
    fn test_rebinding_replaces_the_object() {
        let p = project(&[("Items.csv", ITEMS_CSV)]);
        compile_tables(&p.csv_folder, &p.source_root).unwrap();
        let store = MemoryAssetStore::new();

        bind_tables(&p.csv_folder, &p.source_root, &store, BindPolicy::default()).unwrap();
        fs::write(
            p.csv_folder.join("Items.csv"),
            "ID,Name,Kind\nint,string,enum\n9,Bow,Weapon\n",
        )
        .unwrap();
        bind_tables(&p.csv_folder, &p.source_root, &store, BindPolicy::default()).unwrap();

        let objects = store.load_all("Items").unwrap();
        assert_eq!(objects.len(), 1);
        let table: DynamicTable = serde_json::from_slice(&objects[0]).unwrap();
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0]["ID"], 9);
    }

    #[test]
    fn test_uncompiled_table_is_reported() {
        let p = project(&[("Items.csv", ITEMS_CSV)]);
        let store = MemoryAssetStore::new();

        let report =
            bind_tables(&p.csv_folder, &p.source_root, &store, BindPolicy::default()).unwrap();

        assert!(report.bound.is_empty());
        assert!(matches!(
            report.failures[0].error,
            BindTablesError::SchemaNotCompiled { .. }
        ));
        assert!(!store.exists("Items").unwrap());
    }

    #[test]
    fn test_rejected_rows_are_counted() {
        let p = project(&[("Items.csv", ITEMS_CSV)]);
        compile_tables(&p.csv_folder, &p.source_root).unwrap();

        // Edited after compile: unknown literal, bad ID, short row.
        fs::write(
            p.csv_folder.join("Items.csv"),
            "ID,Name,Kind\nint,string,enum\n1,Sword,Weapon\n2,Ring,Trinket\nx,Axe,Weapon\n4,Bow\n",
        )
        .unwrap();

        let store = MemoryAssetStore::new();
        let report =
            bind_tables(&p.csv_folder, &p.source_root, &store, BindPolicy::default()).unwrap();

        let items = &report.bound[0];
        assert_eq!(items.records, 1);
        assert_eq!(items.rejected_rows.len(), 2);
        assert_eq!(
            items.rejected_rows[0].error.reason,
            CoercionFailure::UnknownLiteral
        );
        assert_eq!(items.malformed_rows.len(), 1);
        assert_eq!(report.rejected_row_count(), 3);
    }

    #[test]
    fn test_fail_fast_fails_the_table_and_keeps_the_old_object() {
        let p = project(&[("Items.csv", ITEMS_CSV)]);
        compile_tables(&p.csv_folder, &p.source_root).unwrap();
        let store = MemoryAssetStore::new();
        bind_tables(&p.csv_folder, &p.source_root, &store, BindPolicy::FailFast).unwrap();

        fs::write(
            p.csv_folder.join("Items.csv"),
            "ID,Name,Kind\nint,string,enum\n1,Sword,Weapon\nx,Axe,Weapon\n",
        )
        .unwrap();
        let report =
            bind_tables(&p.csv_folder, &p.source_root, &store, BindPolicy::FailFast).unwrap();

        assert!(report.bound.is_empty());
        assert!(matches!(
            report.failures[0].error,
            BindTablesError::Bind(BindError::Coercion { line: 4, .. })
        ));

        let table: DynamicTable =
            serde_json::from_slice(&store.load_all("Items").unwrap()[0]).unwrap();
        assert_eq!(table.records.len(), 3);
    }

    #[test]
    fn test_duplicate_of_a_broken_table_binds_nothing() {
        let p = project(&[("Items.csv", "ID,Name\nint,vector3\n1,FromFirst\n")]);
        fs::create_dir_all(p.csv_folder.join("more")).unwrap();
        fs::write(
            p.csv_folder.join("more/Items.csv"),
            "ID,Name\nint,string\n1,FromSecond\n",
        )
        .unwrap();
        compile_tables(&p.csv_folder, &p.source_root).unwrap();

        let store = MemoryAssetStore::new();
        let report =
            bind_tables(&p.csv_folder, &p.source_root, &store, BindPolicy::default()).unwrap();

        assert!(report.bound.is_empty());
        assert!(matches!(
            report.failures[0].error,
            BindTablesError::SchemaNotCompiled { .. }
        ));
        assert!(matches!(
            report.failures[1].error,
            BindTablesError::DuplicateTableName { .. }
        ));
        assert_eq!(report.failures[1].path, p.csv_folder.join("more/Items.csv"));
        assert!(!store.exists("Items").unwrap());
    }

    #[test]
    fn test_load_compiled_schema() {
        let p = project(&[("item_list.csv", "ID,Kind\nint,enum\n1,A\n")]);
        compile_tables(&p.csv_folder, &p.source_root).unwrap();

        let schema = load_compiled_schema(&p.source_root, "ItemList").unwrap();
        assert_eq!(schema.module_name, "item_list");
        assert_eq!(schema.columns[1].enum_spec().unwrap().texts(), vec!["A"]);

        let missing = load_compiled_schema(&p.source_root, "Monsters");
        assert!(matches!(
            missing,
            Err(BindTablesError::SchemaNotCompiled { .. })
        ));
    }
}
