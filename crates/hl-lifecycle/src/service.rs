//! # House Ledger Service
//!
//! Implements [`HouseLifecycleApi`] by composing the engine and the query
//! service over one shared store.

use crate::domain::{Caller, House, HouseId, LifecycleError, Party, TransferKind};
use crate::engine::LifecycleEngine;
use crate::ports::{HouseLifecycleApi, LedgerStore};
use crate::query::QueryService;
use std::sync::Arc;

/// The house lifecycle core.
pub struct HouseLedger<S: LedgerStore> {
    engine: LifecycleEngine<S>,
    query: QueryService<S>,
}

impl<S: LedgerStore> HouseLedger<S> {
    /// Create the core over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            engine: LifecycleEngine::new(store.clone()),
            query: QueryService::new(store),
        }
    }

    /// Read side.
    pub fn query(&self) -> &QueryService<S> {
        &self.query
    }
}

impl<S: LedgerStore> HouseLifecycleApi for HouseLedger<S> {
    fn init(&self) -> Result<(), LifecycleError> {
        self.engine.init().map(|_| ())
    }

    fn create(
        &self,
        caller: &Caller,
        house_id: &str,
        address: &str,
    ) -> Result<House, LifecycleError> {
        self.engine.create(caller, house_id, address)
    }

    fn transition(
        &self,
        house: House,
        caller: &Caller,
        recipient: &Party,
        price: Option<String>,
    ) -> Result<House, LifecycleError> {
        self.engine.transition(house, caller, recipient, price)
    }

    fn transfer(
        &self,
        kind: TransferKind,
        house: House,
        caller: &Caller,
        recipient: &Party,
        price: Option<String>,
    ) -> Result<House, LifecycleError> {
        self.engine.transfer(kind, house, caller, recipient, price)
    }

    fn retrieve(&self, house_id: &HouseId) -> Result<House, LifecycleError> {
        self.engine.retrieve(house_id)
    }

    fn get_details(&self, caller: &Caller, house: &House) -> Result<Vec<u8>, LifecycleError> {
        self.query.get_details(caller, house)
    }

    fn list_visible(&self, caller: &Caller) -> Result<Vec<Vec<u8>>, LifecycleError> {
        self.query.list_visible(caller)
    }

    fn reconcile_registry(
        &self,
        caller: &Caller,
        candidates: &[HouseId],
    ) -> Result<Vec<HouseId>, LifecycleError> {
        self.engine.reconcile_registry(caller, candidates)
    }
}
