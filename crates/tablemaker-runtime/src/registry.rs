/*!
# Table Registry

Process-wide access to table instances by name, loaded on first use.

Every name owns a slot behind its own mutex. The first caller for a name loads the
table while holding that slot's lock; concurrent callers for the same name block on
the lock and then observe the cached instance, so each table is loaded at most once.
Different names only share the brief map lookup that finds their slot.

A failed load is not cached: the slot is marked failed and the next call retries.
A name with nothing persisted under it is dropped from the map altogether, so lookups of
unknown names leave no entry behind. Slots of names that do exist are kept for the life
of the registry; there is no eviction.
*/

use crate::errors::RegistryLoadError;
use crate::store::AssetStore;
use crate::table::Table;
use serde::de::DeserializeOwned;
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, info, warn};

/// Observable state of one registry entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Unloaded,
    Loaded,
    Failed(String),
}

enum Slot {
    Unloaded,
    Loaded(Arc<dyn Any + Send + Sync>),
    Failed(String),
    /// Removed from the map; waiters must look the name up again.
    Discarded,
}

pub struct TableRegistry<S> {
    store: S,
    slots: Mutex<HashMap<String, Arc<Mutex<Slot>>>>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl<S: AssetStore> TableRegistry<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            slots: Mutex::new(HashMap::new()),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load `T` under its own table name.
    pub fn table<T: Table>(&self) -> Result<Arc<T>, RegistryLoadError> {
        self.get::<T>(T::NAME)
    }

    /// Return the single instance stored under `name`, loading it on first call.
    pub fn get<T>(&self, name: &str) -> Result<Arc<T>, RegistryLoadError>
    where
        T: DeserializeOwned + Send + Sync + 'static,
    {
        loop {
            let slot = self.slot(name);
            let mut state = lock(&slot);

            match &*state {
                Slot::Loaded(instance) => {
                    return Arc::clone(instance).downcast::<T>().map_err(|_| {
                        RegistryLoadError::TypeMismatch {
                            name: name.to_string(),
                            expected: type_name::<T>(),
                        }
                    });
                }
                Slot::Discarded => continue,
                Slot::Unloaded | Slot::Failed(_) => {}
            }

            return match self.load::<T>(name) {
                Ok(table) => {
                    let table = Arc::new(table);
                    *state = Slot::Loaded(table.clone());
                    info!("Loaded table {}", name);
                    Ok(table)
                }
                Err(error @ RegistryLoadError::NotFound { .. }) => {
                    debug!("No persisted table {}", name);
                    *state = Slot::Discarded;
                    self.discard(name, &slot);
                    Err(error)
                }
                Err(error) => {
                    warn!("Failed to load table {}: {}", name, error);
                    *state = Slot::Failed(error.to_string());
                    Err(error)
                }
            };
        }
    }

    pub fn load_state(&self, name: &str) -> LoadState {
        let slot = match lock(&self.slots).get(name) {
            Some(slot) => Arc::clone(slot),
            None => return LoadState::Unloaded,
        };
        let state = lock(&slot);
        match &*state {
            Slot::Unloaded | Slot::Discarded => LoadState::Unloaded,
            Slot::Loaded(_) => LoadState::Loaded,
            Slot::Failed(message) => LoadState::Failed(message.clone()),
        }
    }

    /// Names with a cached instance, sorted.
    pub fn loaded_names(&self) -> Vec<String> {
        let slots: Vec<(String, Arc<Mutex<Slot>>)> = lock(&self.slots)
            .iter()
            .map(|(name, slot)| (name.clone(), Arc::clone(slot)))
            .collect();

        let mut names: Vec<String> = slots
            .into_iter()
            .filter(|(_, slot)| matches!(&*lock(slot), Slot::Loaded(_)))
            .map(|(name, _)| name)
            .collect();
        names.sort();
        names
    }

    fn slot(&self, name: &str) -> Arc<Mutex<Slot>> {
        let mut slots = lock(&self.slots);
        Arc::clone(
            slots
                .entry(name.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(Slot::Unloaded))),
        )
    }

    /// Called with the slot's lock held, so no other caller can have replaced it.
    fn discard(&self, name: &str, slot: &Arc<Mutex<Slot>>) {
        let mut slots = lock(&self.slots);
        if slots.get(name).is_some_and(|current| Arc::ptr_eq(current, slot)) {
            slots.remove(name);
        }
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T, RegistryLoadError> {
        let mut objects = self
            .store
            .load_all(name)
            .map_err(|source| RegistryLoadError::Store {
                name: name.to_string(),
                source,
            })?;

        debug!("Found {} persisted object(s) for table {}", objects.len(), name);

        match objects.len() {
            0 => Err(RegistryLoadError::NotFound {
                name: name.to_string(),
            }),
            1 => {
                let data = objects.remove(0);
                serde_json::from_slice(&data).map_err(|source| RegistryLoadError::Decode {
                    name: name.to_string(),
                    source,
                })
            }
            count => Err(RegistryLoadError::Ambiguous {
                name: name.to_string(),
                count,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{StoreResult, TypeCoercionError};
    use crate::store::MemoryAssetStore;
    use crate::table::FromRow;
    use serde::{Deserialize, Serialize};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;
    use std::time::Duration;
    use tablemaker_csvs::RowValue;

    #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
    struct Levels {
        records: Vec<LevelsRecord>,
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct LevelsRecord {
        #[serde(rename = "ID")]
        id: i32,
    }

    impl FromRow for LevelsRecord {
        fn from_row(row: &RowValue) -> Result<Self, TypeCoercionError> {
            Ok(Self {
                id: crate::coerce::int(row, "ID")?,
            })
        }
    }

    impl Table for Levels {
        const NAME: &'static str = "Levels";
        type Record = LevelsRecord;

        fn records(&self) -> &[LevelsRecord] {
            &self.records
        }

        fn push_record(&mut self, record: LevelsRecord) {
            self.records.push(record);
        }
    }

    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    struct Other {
        records: Vec<LevelsRecord>,
    }

    impl Table for Other {
        const NAME: &'static str = "Other";
        type Record = LevelsRecord;

        fn records(&self) -> &[LevelsRecord] {
            &self.records
        }

        fn push_record(&mut self, record: LevelsRecord) {
            self.records.push(record);
        }
    }

    const LEVELS_JSON: &[u8] = br#"{"records":[{"ID":1},{"ID":2}]}"#;

    /// Counts loads and slows them down so concurrent callers overlap.
    struct SlowStore {
        inner: MemoryAssetStore,
        loads: AtomicUsize,
    }

    impl AssetStore for SlowStore {
        fn exists(&self, name: &str) -> StoreResult<bool> {
            self.inner.exists(name)
        }

        fn delete(&self, name: &str) -> StoreResult<()> {
            self.inner.delete(name)
        }

        fn create(&self, name: &str, data: &[u8]) -> StoreResult<()> {
            self.inner.create(name, data)
        }

        fn load_all(&self, name: &str) -> StoreResult<Vec<Vec<u8>>> {
            self.loads.fetch_add(1, Ordering::SeqCst);
            thread::sleep(Duration::from_millis(50));
            self.inner.load_all(name)
        }
    }

    #[test]
    fn test_single_instance_is_cached() {
        let store = MemoryAssetStore::new();
        store.create("Levels", LEVELS_JSON).unwrap();
        let registry = TableRegistry::new(store);

        assert_eq!(registry.load_state("Levels"), LoadState::Unloaded);

        let first = registry.table::<Levels>().unwrap();
        let second = registry.get::<Levels>("Levels").unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.records().len(), 2);
        assert_eq!(registry.load_state("Levels"), LoadState::Loaded);
        assert_eq!(registry.loaded_names(), vec!["Levels".to_string()]);
    }

    #[test]
    fn test_missing_instance_fails_and_is_retried() {
        let registry = TableRegistry::new(MemoryAssetStore::new());

        let result = registry.table::<Levels>();
        assert!(matches!(result, Err(RegistryLoadError::NotFound { .. })));
        assert_eq!(registry.load_state("Levels"), LoadState::Unloaded);

        // Failure is not cached: once the asset exists the next call succeeds.
        registry.store().create("Levels", LEVELS_JSON).unwrap();
        let table = registry.table::<Levels>().unwrap();
        assert_eq!(table.records()[1].id, 2);
    }

    #[test]
    fn test_unknown_names_leave_no_slot() {
        let registry = TableRegistry::new(MemoryAssetStore::new());
        registry.store().create("Levels", LEVELS_JSON).unwrap();
        registry.table::<Levels>().unwrap();

        for i in 0..100 {
            let name = format!("Missing{}", i);
            let result = registry.get::<Levels>(&name);
            assert!(matches!(result, Err(RegistryLoadError::NotFound { .. })));
        }

        assert_eq!(lock(&registry.slots).len(), 1);
        assert_eq!(registry.loaded_names(), vec!["Levels"]);
    }

    #[test]
    fn test_duplicate_instances_are_ambiguous() {
        let store = MemoryAssetStore::new();
        store.create("Levels", LEVELS_JSON).unwrap();
        store.insert_copy("Levels", LEVELS_JSON);
        let registry = TableRegistry::new(store);

        match registry.table::<Levels>() {
            Err(RegistryLoadError::Ambiguous { name, count }) => {
                assert_eq!(name, "Levels");
                assert_eq!(count, 2);
            }
            other => panic!("expected Ambiguous, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_decode_error() {
        let store = MemoryAssetStore::new();
        store.create("Levels", b"not json").unwrap();
        let registry = TableRegistry::new(store);

        assert!(matches!(
            registry.table::<Levels>(),
            Err(RegistryLoadError::Decode { .. })
        ));
    }

    #[test]
    fn test_type_mismatch_for_cached_name() {
        let store = MemoryAssetStore::new();
        store.create("Levels", LEVELS_JSON).unwrap();
        let registry = TableRegistry::new(store);

        registry.table::<Levels>().unwrap();
        assert!(matches!(
            registry.get::<Other>("Levels"),
            Err(RegistryLoadError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_concurrent_first_access_loads_once() {
        let inner = MemoryAssetStore::new();
        inner.create("Levels", LEVELS_JSON).unwrap();
        let registry = TableRegistry::new(SlowStore {
            inner,
            loads: AtomicUsize::new(0),
        });

        let tables: Vec<Arc<Levels>> = thread::scope(|scope| {
            let handles: Vec<_> = (0..8)
                .map(|_| scope.spawn(|| registry.table::<Levels>().unwrap()))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(registry.store().loads.load(Ordering::SeqCst), 1);
        assert!(tables.iter().all(|t| Arc::ptr_eq(t, &tables[0])));
    }
}
