//! # Asset Registry
//!
//! Maintains the single record listing every house identifier ever created.
//! The record is always read-modify-written wholesale; this is only safe
//! because the hosting ledger serializes invocations.

use crate::codec::{decode_registry, encode_registry};
use crate::domain::{HouseId, HouseRegistry, LifecycleError, REGISTRY_KEY};
use crate::ports::{BatchOperation, LedgerStore};
use std::sync::Arc;
use tracing::debug;

/// Registry access over a ledger store.
pub struct AssetRegistry<S: LedgerStore> {
    store: Arc<S>,
}

impl<S: LedgerStore> AssetRegistry<S> {
    /// Create a registry handle.
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Load the registry record; absent means empty.
    pub fn load(&self) -> Result<HouseRegistry, LifecycleError> {
        match self.store.get(REGISTRY_KEY)? {
            Some(bytes) => decode_registry(&bytes),
            None => Ok(HouseRegistry::new()),
        }
    }

    /// All identifiers, in creation order.
    pub fn list_ids(&self) -> Result<Vec<HouseId>, LifecycleError> {
        Ok(self.load()?.hids)
    }

    /// Whether a registry record has been written.
    pub fn is_initialized(&self) -> Result<bool, LifecycleError> {
        Ok(self.store.get(REGISTRY_KEY)?.is_some())
    }

    /// Append `id` and persist the registry on its own.
    pub fn register_id(&self, id: HouseId) -> Result<(), LifecycleError> {
        let op = self.stage_registration(id)?;
        self.store.atomic_batch_write(vec![op])?;
        Ok(())
    }

    /// Build the registry write that appends `id`, without committing it.
    ///
    /// Lets callers commit the registry update in the same batch as the
    /// house record.
    pub fn stage_registration(&self, id: HouseId) -> Result<BatchOperation, LifecycleError> {
        let mut registry = self.load()?;
        debug!(house_id = %id, registered = registry.len(), "Staging registry append");
        registry.register(id)?;
        self.stage_write(&registry)
    }

    /// Build the write that stores `registry` as-is.
    pub fn stage_write(&self, registry: &HouseRegistry) -> Result<BatchOperation, LifecycleError> {
        Ok(BatchOperation::put(REGISTRY_KEY, encode_registry(registry)?))
    }
}
