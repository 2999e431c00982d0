//! # Inbound Ports
//!
//! API trait defining what the house lifecycle core can do. One entry point
//! per operation, typed parameters only; string routing lives in
//! [`crate::dispatch`].

use crate::domain::{Caller, House, HouseId, LifecycleError, Party, TransferKind};

/// House lifecycle API - inbound port.
pub trait HouseLifecycleApi: Send + Sync {
    /// Write an empty registry if none exists yet. Idempotent.
    fn init(&self) -> Result<(), LifecycleError>;

    /// Create a house in `Unassigned` and register its identifier.
    fn create(&self, caller: &Caller, house_id: &str, address: &str)
        -> Result<House, LifecycleError>;

    /// Apply whichever table row matches the house state and caller role.
    fn transition(
        &self,
        house: House,
        caller: &Caller,
        recipient: &Party,
        price: Option<String>,
    ) -> Result<House, LifecycleError>;

    /// Apply the named transfer; fails unless it is the matching row.
    fn transfer(
        &self,
        kind: TransferKind,
        house: House,
        caller: &Caller,
        recipient: &Party,
        price: Option<String>,
    ) -> Result<House, LifecycleError>;

    /// Load a house by identifier.
    fn retrieve(&self, house_id: &HouseId) -> Result<House, LifecycleError>;

    /// Encoded house, if the caller may see it.
    fn get_details(&self, caller: &Caller, house: &House) -> Result<Vec<u8>, LifecycleError>;

    /// Encoded houses visible to the caller, in registry order.
    fn list_visible(&self, caller: &Caller) -> Result<Vec<Vec<u8>>, LifecycleError>;

    /// Add houses that exist on the ledger but are missing from the registry.
    fn reconcile_registry(
        &self,
        caller: &Caller,
        candidates: &[HouseId],
    ) -> Result<Vec<HouseId>, LifecycleError>;
}
