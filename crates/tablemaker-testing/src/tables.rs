// @generated by tablemaker. Do not edit by hand.

use std::sync::Arc;
use tablemaker_runtime::{AssetStore, RegistryLoadError, TableRegistry};

pub mod items;
pub mod monsters;

pub use items::Items;
pub use monsters::Monsters;

/// Every compiled table, in compile order.
pub const TABLE_NAMES: &[&str] = &["Items", "Monsters"];

/// Typed access to every compiled table, each loaded once on first use.
pub struct Tables<S: AssetStore> {
    registry: TableRegistry<S>,
}

impl<S: AssetStore> Tables<S> {
    pub fn new(store: S) -> Self {
        Self {
            registry: TableRegistry::new(store),
        }
    }

    pub fn registry(&self) -> &TableRegistry<S> {
        &self.registry
    }

    pub fn items(&self) -> Result<Arc<Items>, RegistryLoadError> {
        self.registry.table::<Items>()
    }

    pub fn monsters(&self) -> Result<Arc<Monsters>, RegistryLoadError> {
        self.registry.table::<Monsters>()
    }
}
