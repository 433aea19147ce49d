/*!
# Artifact Writer

Places generated files under a source root:

```text
<source_root>/tables.rs                    registry module
<source_root>/tables/<module>.rs           one module per table
<source_root>/tables/<module>.schema.json  compiled schema manifest
```

Existing files are overwritten. Files for tables that no longer exist are left alone.
*/

use crate::emitter::{emit_manifest, emit_registry, emit_schema, RegistryEntry};
use crate::errors::CodegenResult;
use std::fs;
use std::path::{Path, PathBuf};
use tablemaker_schema::TableSchema;
use tracing::debug;

pub const TABLES_DIR: &str = "tables";
pub const REGISTRY_FILE: &str = "tables.rs";

#[derive(Debug, Clone)]
pub struct ArtifactWriter {
    source_root: PathBuf,
}

impl ArtifactWriter {
    pub fn new<P: Into<PathBuf>>(source_root: P) -> Self {
        Self {
            source_root: source_root.into(),
        }
    }

    pub fn source_root(&self) -> &Path {
        &self.source_root
    }

    pub fn tables_dir(&self) -> PathBuf {
        self.source_root.join(TABLES_DIR)
    }

    pub fn schema_path(&self, module_name: &str) -> PathBuf {
        self.tables_dir().join(format!("{}.rs", module_name))
    }

    pub fn manifest_path(&self, module_name: &str) -> PathBuf {
        self.tables_dir().join(format!("{}.schema.json", module_name))
    }

    pub fn registry_path(&self) -> PathBuf {
        self.source_root.join(REGISTRY_FILE)
    }

    /// Write the table module and its manifest. Returns the module path.
    pub fn write_schema(&self, schema: &TableSchema) -> CodegenResult<PathBuf> {
        fs::create_dir_all(self.tables_dir())?;

        let path = self.schema_path(&schema.module_name);
        write_file(&path, &emit_schema(schema))?;
        write_file(
            &self.manifest_path(&schema.module_name),
            &emit_manifest(schema)?,
        )?;

        Ok(path)
    }

    pub fn write_registry(&self, entries: &[RegistryEntry]) -> CodegenResult<PathBuf> {
        fs::create_dir_all(&self.source_root)?;

        let path = self.registry_path();
        write_file(&path, &emit_registry(entries))?;
        Ok(path)
    }
}

fn write_file(path: &Path, contents: &str) -> CodegenResult<()> {
    if path.exists() {
        debug!("Replacing {}", path.display());
    }
    fs::write(path, contents)?;
    Ok(())
}
