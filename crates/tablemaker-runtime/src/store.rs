/*!
# Asset Stores

Persistence for bound table instances, one object per table name.

`load_all` returns every object stored under a name rather than just one, so the
registry can enforce that exactly one exists.
*/

use crate::errors::{StoreError, StoreResult};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;
use walkdir::WalkDir;

pub trait AssetStore: Send + Sync {
    fn exists(&self, name: &str) -> StoreResult<bool>;

    fn delete(&self, name: &str) -> StoreResult<()>;

    /// Store a new object. Fails if one already exists under `name`.
    fn create(&self, name: &str, data: &[u8]) -> StoreResult<()>;

    fn load_all(&self, name: &str) -> StoreResult<Vec<Vec<u8>>>;
}

impl<S: AssetStore + ?Sized> AssetStore for Arc<S> {
    fn exists(&self, name: &str) -> StoreResult<bool> {
        (**self).exists(name)
    }

    fn delete(&self, name: &str) -> StoreResult<()> {
        (**self).delete(name)
    }

    fn create(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        (**self).create(name, data)
    }

    fn load_all(&self, name: &str) -> StoreResult<Vec<Vec<u8>>> {
        (**self).load_all(name)
    }
}

// ================================================================================================
// Filesystem Store
// ================================================================================================

/// Stores each table as `<root>/<name>.json`.
///
/// `load_all` searches the whole tree under `root`, so a stray copy in a sub-folder
/// makes the name ambiguous.
#[derive(Debug, Clone)]
pub struct FsAssetStore {
    root: PathBuf,
}

impl FsAssetStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, name: &str) -> PathBuf {
        self.root.join(file_name(name))
    }
}

fn file_name(name: &str) -> String {
    format!("{}.json", name)
}

impl AssetStore for FsAssetStore {
    fn exists(&self, name: &str) -> StoreResult<bool> {
        Ok(self.path_for(name).is_file())
    }

    fn delete(&self, name: &str) -> StoreResult<()> {
        let path = self.path_for(name);
        if path.is_file() {
            fs::remove_file(&path)?;
            debug!("Deleted asset {}", path.display());
        }
        Ok(())
    }

    fn create(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        let path = self.path_for(name);
        if path.exists() {
            return Err(StoreError::AlreadyExists(path.display().to_string()));
        }
        fs::create_dir_all(&self.root)?;
        fs::write(&path, data)?;
        debug!("Created asset {}", path.display());
        Ok(())
    }

    fn load_all(&self, name: &str) -> StoreResult<Vec<Vec<u8>>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }

        let wanted = file_name(name);
        let mut objects = Vec::new();

        for entry in WalkDir::new(&self.root).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && entry.file_name().to_str() == Some(wanted.as_str())
            {
                objects.push(fs::read(entry.path())?);
            }
        }

        Ok(objects)
    }
}

// ================================================================================================
// In-Memory Store
// ================================================================================================

#[derive(Debug, Default)]
pub struct MemoryAssetStore {
    objects: Mutex<BTreeMap<String, Vec<Vec<u8>>>>,
}

impl MemoryAssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add another object under `name` even if one exists.
    pub fn insert_copy(&self, name: &str, data: &[u8]) {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_default()
            .push(data.to_vec());
    }
}

impl AssetStore for MemoryAssetStore {
    fn exists(&self, name: &str) -> StoreResult<bool> {
        let objects = self.objects.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(objects.get(name).map(|v| !v.is_empty()).unwrap_or(false))
    }

    fn delete(&self, name: &str) -> StoreResult<()> {
        self.objects
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
        Ok(())
    }

    fn create(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        let mut objects = self.objects.lock().unwrap_or_else(PoisonError::into_inner);
        let slot = objects.entry(name.to_string()).or_default();
        if !slot.is_empty() {
            return Err(StoreError::AlreadyExists(name.to_string()));
        }
        slot.push(data.to_vec());
        Ok(())
    }

    fn load_all(&self, name: &str) -> StoreResult<Vec<Vec<u8>>> {
        let objects = self.objects.lock().unwrap_or_else(PoisonError::into_inner);
        Ok(objects.get(name).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_fs_store_create_exists_delete() {
        let dir = TempDir::new().unwrap();
        let store = FsAssetStore::new(dir.path().join("objects"));

        assert!(!store.exists("Items").unwrap());
        assert!(store.load_all("Items").unwrap().is_empty());

        store.create("Items", b"{\"records\":[]}").unwrap();
        assert!(store.exists("Items").unwrap());
        assert_eq!(
            store.load_all("Items").unwrap(),
            vec![b"{\"records\":[]}".to_vec()]
        );

        let again = store.create("Items", b"{}");
        assert!(matches!(again, Err(StoreError::AlreadyExists(_))));

        store.delete("Items").unwrap();
        assert!(!store.exists("Items").unwrap());
        // Deleting a missing asset is not an error
        store.delete("Items").unwrap();
    }

    #[test]
    fn test_fs_store_load_all_finds_nested_copies() {
        let dir = TempDir::new().unwrap();
        let store = FsAssetStore::new(dir.path());
        store.create("Items", b"a").unwrap();

        let nested = dir.path().join("old");
        fs::create_dir(&nested).unwrap();
        fs::write(nested.join("Items.json"), b"b").unwrap();
        fs::write(nested.join("Other.json"), b"c").unwrap();

        let objects = store.load_all("Items").unwrap();
        assert_eq!(objects.len(), 2);
    }

    #[test]
    fn test_memory_store_duplicates() {
        let store = MemoryAssetStore::new();
        store.create("Items", b"a").unwrap();
        assert!(store.create("Items", b"b").is_err());

        store.insert_copy("Items", b"b");
        assert_eq!(store.load_all("Items").unwrap().len(), 2);

        store.delete("Items").unwrap();
        assert!(!store.exists("Items").unwrap());
    }
}
