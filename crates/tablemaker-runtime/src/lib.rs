/*!
# tablemaker Runtime

Everything generated table code links against:

- [`Table`], [`FromRow`] and [`TableEnum`]: implemented by each generated module
- [`coerce`]: text-to-value conversion used by generated `FromRow` impls
- [`TableBinder`]: turns parsed rows into records, rejecting bad rows as a unit
- [`AssetStore`]: persistence of bound tables, one object per name
- [`TableRegistry`]: lazily loaded, cached access to tables by name

## Loading tables

```rust
use tablemaker_runtime::{AssetStore, MemoryAssetStore, TableRegistry, DynamicTable};

let store = MemoryAssetStore::new();
store.create("Items", br#"{"records":[]}"#).unwrap();

let registry = TableRegistry::new(store);
let items = registry.get::<DynamicTable>("Items");
assert!(items.is_ok());
```
*/

pub mod binder;
pub mod coerce;
pub mod errors;
pub mod registry;
pub mod store;
pub mod table;

pub use binder::{
    BindPolicy, Bound, BoundTable, DynamicRecord, DynamicTable, GeneratedRecordFactory,
    RecordFactory, RowRejection, SchemaRecordFactory, TableBinder,
};
pub use errors::{
    BindError, CoercionFailure, RegistryLoadError, StoreError, StoreResult, TypeCoercionError,
};
pub use registry::{LoadState, TableRegistry};
pub use store::{AssetStore, FsAssetStore, MemoryAssetStore};
pub use table::{FromRow, Table, TableEnum};

// Generated code names rows through this crate only
pub use tablemaker_csvs::RowValue;
