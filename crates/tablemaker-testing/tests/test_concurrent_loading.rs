use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tablemaker_runtime::{AssetStore, BindPolicy, MemoryAssetStore, StoreResult};
use tablemaker_sdk::bind_tables;
use tablemaker_testing::tables::{Items, Monsters, Tables};
use tablemaker_testing::{fixtures_dir, source_root};

/// Counts `load_all` calls per run and widens the race window.
struct CountingStore {
    inner: MemoryAssetStore,
    loads: AtomicUsize,
}

impl AssetStore for CountingStore {
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
        thread::sleep(Duration::from_millis(25));
        self.inner.load_all(name)
    }
}

fn tables() -> Tables<CountingStore> {
    let inner = MemoryAssetStore::new();
    bind_tables(&fixtures_dir(), &source_root(), &inner, BindPolicy::default()).unwrap();
    Tables::new(CountingStore {
        inner,
        loads: AtomicUsize::new(0),
    })
}

#[test]
fn test_first_access_from_many_threads_loads_once() {
    let tables = tables();

    let results: Vec<Arc<Items>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..16)
            .map(|_| scope.spawn(|| tables.items().unwrap()))
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    assert_eq!(tables.registry().store().loads.load(Ordering::SeqCst), 1);
    assert!(results.iter().all(|t| Arc::ptr_eq(t, &results[0])));
    assert_eq!(results[0].records.len(), 3);
}

#[test]
fn test_different_tables_load_independently() {
    let tables = tables();

    let (items, monsters): (Vec<Arc<Items>>, Vec<Arc<Monsters>>) = thread::scope(|scope| {
        let items: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| tables.items().unwrap()))
            .collect();
        let monsters: Vec<_> = (0..4)
            .map(|_| scope.spawn(|| tables.monsters().unwrap()))
            .collect();
        (
            items.into_iter().map(|h| h.join().unwrap()).collect(),
            monsters.into_iter().map(|h| h.join().unwrap()).collect(),
        )
    });

    assert_eq!(tables.registry().store().loads.load(Ordering::SeqCst), 2);
    assert!(items.iter().all(|t| Arc::ptr_eq(t, &items[0])));
    assert!(monsters.iter().all(|t| Arc::ptr_eq(t, &monsters[0])));
}
