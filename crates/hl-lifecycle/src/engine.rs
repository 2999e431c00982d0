//! # Lifecycle Engine
//!
//! Creates houses and moves them through the transition table.
//!
//! ## Write model
//!
//! `create` commits the house record and the updated registry in one
//! `atomic_batch_write`, so a store failure leaves neither. Transitions
//! rewrite only the house record. Ledgers written by hosts without atomic
//! batches may still hold orphaned houses; `reconcile_registry` re-indexes
//! them.

use crate::codec::{decode_house, encode_house};
use crate::domain::{
    invariant_forward_step, lookup, Caller, House, HouseId, LifecycleError, Party,
    TransferKind, TransitionRule, REGISTRY_KEY,
};
use crate::ports::{BatchOperation, LedgerStore};
use crate::registry::AssetRegistry;
use std::sync::Arc;
use tracing::{error, info, warn};

/// Operation name used for permission errors on `create`.
pub const CREATE_OPERATION: &str = "create_house";

/// Operation name used for permission errors on generic transitions.
pub const TRANSITION_OPERATION: &str = "transition";

/// Operation name used for permission errors on reconciliation.
pub const RECONCILE_OPERATION: &str = "reconcile_registry";

/// The write side of the house lifecycle.
pub struct LifecycleEngine<S: LedgerStore> {
    store: Arc<S>,
    registry: AssetRegistry<S>,
}

impl<S: LedgerStore> LifecycleEngine<S> {
    /// Create an engine over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            registry: AssetRegistry::new(store.clone()),
            store,
        }
    }

    /// The registry view over the same store.
    pub fn registry(&self) -> &AssetRegistry<S> {
        &self.registry
    }

    /// Write an empty registry unless one exists. Returns whether it wrote.
    pub fn init(&self) -> Result<bool, LifecycleError> {
        if self.registry.is_initialized()? {
            return Ok(false);
        }
        let op = self.registry.stage_write(&Default::default())?;
        self.commit(REGISTRY_KEY, vec![op])?;
        info!("Initialized empty house registry");
        Ok(true)
    }

    /// Create a house in `Unassigned` and register it.
    ///
    /// Checks run in order: identifier shape, caller role, existence.
    pub fn create(
        &self,
        caller: &Caller,
        house_id: &str,
        address: &str,
    ) -> Result<House, LifecycleError> {
        let id = HouseId::parse(house_id)?;

        if !caller.affiliation.is_authority() {
            warn!(caller = %caller.name, role = %caller.affiliation, house_id = %id, "Create denied");
            return Err(LifecycleError::denied(
                CREATE_OPERATION,
                format!("caller is {}, requires regulator", caller.affiliation),
            ));
        }

        if self.store.get(id.as_str())?.is_some() {
            return Err(LifecycleError::AlreadyExists(id.to_string()));
        }

        let house = House::new(id.clone(), address);
        let registry_op = self.registry.stage_registration(id.clone())?;
        let house_op = BatchOperation::put(id.as_str(), encode_house(&house)?);
        self.commit(id.as_str(), vec![house_op, registry_op])?;

        info!(house_id = %id, caller = %caller.name, "House created");
        Ok(house)
    }

    /// Load a house by identifier.
    pub fn retrieve(&self, house_id: &HouseId) -> Result<House, LifecycleError> {
        match self.store.get(house_id.as_str())? {
            Some(bytes) => decode_house(house_id.as_str(), &bytes),
            None => Err(LifecycleError::NotFound(house_id.to_string())),
        }
    }

    /// Apply whichever table row matches the house state and caller role.
    pub fn transition(
        &self,
        house: House,
        caller: &Caller,
        recipient: &Party,
        price: Option<String>,
    ) -> Result<House, LifecycleError> {
        let Some(rule) = lookup(house.status, caller.affiliation) else {
            warn!(
                house_id = %house.house_id,
                state = %house.status,
                role = %caller.affiliation,
                "Transition denied: no matching row"
            );
            return Err(LifecycleError::denied(
                TRANSITION_OPERATION,
                format!(
                    "no transition from {} for {}",
                    house.status, caller.affiliation
                ),
            ));
        };
        self.apply_rule(rule, house, caller, recipient, price)
    }

    /// Apply the named transfer. Fails unless the house state and caller
    /// role select exactly this transfer's row.
    pub fn transfer(
        &self,
        kind: TransferKind,
        house: House,
        caller: &Caller,
        recipient: &Party,
        price: Option<String>,
    ) -> Result<House, LifecycleError> {
        if let Some(found) = lookup(house.status, caller.affiliation) {
            if found.kind != kind {
                warn!(house_id = %house.house_id, requested = %kind, admitted = %found.kind, "Transfer denied");
                return Err(LifecycleError::denied(
                    kind.operation(),
                    format!(
                        "house {} in {} only admits {}",
                        house.house_id, house.status, found.kind
                    ),
                ));
            }
        }
        self.apply_rule(kind.rule(), house, caller, recipient, price)
    }

    /// Append every candidate that has a readable house record but is
    /// missing from the registry. Returns the identifiers added.
    pub fn reconcile_registry(
        &self,
        caller: &Caller,
        candidates: &[HouseId],
    ) -> Result<Vec<HouseId>, LifecycleError> {
        if !caller.affiliation.is_authority() {
            warn!(caller = %caller.name, role = %caller.affiliation, "Reconcile denied");
            return Err(LifecycleError::denied(
                RECONCILE_OPERATION,
                format!("caller is {}, requires regulator", caller.affiliation),
            ));
        }

        let mut registry = self.registry.load()?;
        let mut added = Vec::new();
        for id in candidates {
            if registry.contains(id) {
                continue;
            }
            match self.store.get(id.as_str())? {
                Some(bytes) => {
                    decode_house(id.as_str(), &bytes)?;
                    registry.register(id.clone())?;
                    added.push(id.clone());
                }
                None => continue,
            }
        }

        if !added.is_empty() {
            let op = self.registry.stage_write(&registry)?;
            self.commit(REGISTRY_KEY, vec![op])?;
            info!(added = added.len(), "Registry reconciled");
        }
        Ok(added)
    }

    fn apply_rule(
        &self,
        rule: &TransitionRule,
        mut house: House,
        caller: &Caller,
        recipient: &Party,
        price: Option<String>,
    ) -> Result<House, LifecycleError> {
        if let Err(e) = rule.authorize(&house, caller, recipient) {
            warn!(
                house_id = %house.house_id,
                operation = rule.kind.operation(),
                caller = %caller.name,
                "{e}"
            );
            return Err(e);
        }

        let from = house.status;
        rule.apply(&mut house, recipient, price)?;
        debug_assert!(invariant_forward_step(from, house.status));

        let op = BatchOperation::put(house.house_id.as_str(), encode_house(&house)?);
        self.commit(house.house_id.as_str(), vec![op])?;

        info!(
            house_id = %house.house_id,
            from = %from,
            to = %house.status,
            owner = %recipient.name,
            "Transition applied"
        );
        Ok(house)
    }

    fn commit(&self, key: &str, ops: Vec<BatchOperation>) -> Result<(), LifecycleError> {
        self.store.atomic_batch_write(ops).map_err(|e| {
            error!(key, error = %e, "Ledger write failed");
            LifecycleError::from(e)
        })
    }
}
