//! Fixture tables and the code generated from them.
//!
//! `src/tables.rs` and `src/tables/` are produced by `tablemaker compile-schemas` from
//! `fixtures/`. The freshness test fails when they drift from what the emitter produces;
//! regenerate them with:
//!
//! ```text
//! tablemaker compile-schemas --csv-folder crates/tablemaker-testing/fixtures \
//!     --source-root crates/tablemaker-testing/src
//! ```

pub mod tables;

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub const FIXTURE_TABLES: &[&str] = &["Items", "Monsters"];

pub fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

/// Source root holding the checked-in generated code and manifests.
pub fn source_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("src")
}

pub fn read_fixture(table: &str) -> String {
    let path = fixtures_dir().join(format!("{}.csv", table));
    fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read fixture {}: {}", path.display(), e))
}

/// A scratch project with the standard folder layout, removed on drop.
pub struct TestProject {
    _dir: TempDir,
    pub csv_folder: PathBuf,
    pub source_root: PathBuf,
    pub object_folder: PathBuf,
}

impl TestProject {
    /// Empty project: no CSVs, nothing compiled.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let csv_folder = dir.path().join("Tables");
        fs::create_dir_all(&csv_folder).expect("failed to create csv folder");

        Self {
            source_root: dir.path().join("src"),
            object_folder: dir.path().join("Resources").join("Tables"),
            csv_folder,
            _dir: dir,
        }
    }

    /// Project seeded with every fixture CSV.
    pub fn with_fixtures() -> Self {
        let project = Self::new();
        for table in FIXTURE_TABLES {
            project.write_csv(table, &read_fixture(table));
        }
        project
    }

    pub fn write_csv(&self, table: &str, contents: impl AsRef<[u8]>) {
        let path = self.csv_folder.join(format!("{}.csv", table));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .unwrap_or_else(|e| panic!("failed to create {}: {}", parent.display(), e));
        }
        fs::write(&path, contents)
            .unwrap_or_else(|e| panic!("failed to write {}: {}", path.display(), e));
    }
}

impl Default for TestProject {
    fn default() -> Self {
        Self::new()
    }
}
