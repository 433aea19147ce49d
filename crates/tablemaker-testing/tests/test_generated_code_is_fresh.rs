use std::fs;
use tablemaker_codegen::{emit_manifest, emit_registry, emit_schema, RegistryEntry};
use tablemaker_csvs::parse_table;
use tablemaker_schema::{SchemaBuilder, TableSchema};
use tablemaker_sdk::compile_tables;
use tablemaker_testing::{read_fixture, source_root, TestProject, FIXTURE_TABLES};

const ITEMS_RS: &str = include_str!("../src/tables/items.rs");
const MONSTERS_RS: &str = include_str!("../src/tables/monsters.rs");
const TABLES_RS: &str = include_str!("../src/tables.rs");

fn build(table: &str) -> TableSchema {
    let parsed = parse_table(&read_fixture(table)).unwrap();
    SchemaBuilder::new()
        .build(table, &parsed.header, &parsed.types, &parsed.rows)
        .unwrap()
}

#[test]
fn test_checked_in_modules_match_emitter() {
    assert_eq!(emit_schema(&build("Items")), ITEMS_RS);
    assert_eq!(emit_schema(&build("Monsters")), MONSTERS_RS);

    let entries: Vec<RegistryEntry> = FIXTURE_TABLES
        .iter()
        .map(|table| RegistryEntry::from(&build(table)))
        .collect();
    assert_eq!(emit_registry(&entries), TABLES_RS);
}

#[test]
fn test_checked_in_manifests_match_emitter() {
    for table in FIXTURE_TABLES {
        let schema = build(table);
        let path = source_root()
            .join("tables")
            .join(format!("{}.schema.json", schema.module_name));
        assert_eq!(
            emit_manifest(&schema).unwrap(),
            fs::read_to_string(&path).unwrap(),
            "stale manifest {}",
            path.display()
        );
    }
}

#[test]
fn test_compiling_fixtures_reproduces_checked_in_tree() {
    let project = TestProject::with_fixtures();
    let report = compile_tables(&project.csv_folder, &project.source_root).unwrap();
    assert!(!report.has_failures());

    for relative in [
        "tables.rs",
        "tables/items.rs",
        "tables/items.schema.json",
        "tables/monsters.rs",
        "tables/monsters.schema.json",
    ] {
        let generated = fs::read(project.source_root.join(relative)).unwrap();
        let checked_in = fs::read(source_root().join(relative)).unwrap();
        assert!(generated == checked_in, "{} differs from emitter output", relative);
    }
}
