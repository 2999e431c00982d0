//! # Query Service
//!
//! Read side with per-caller visibility. A caller sees a house if they are
//! its current owner or a regulator; there is no partial view.
//!
//! Listing walks the registry in order and stops at the first house it
//! cannot load.

use crate::codec::{decode_house, encode_house};
use crate::domain::{Caller, House, LifecycleError};
use crate::ports::LedgerStore;
use crate::registry::AssetRegistry;
use std::sync::Arc;
use tracing::{debug, warn};

/// Operation name used for permission errors on detail reads.
pub const DETAILS_OPERATION: &str = "get_house_details";

/// Whether `caller` may see `house`.
pub fn is_visible_to(house: &House, caller: &Caller) -> bool {
    caller.affiliation.is_authority() || house.is_owned_by(&caller.name)
}

/// Read-side access to houses.
pub struct QueryService<S: LedgerStore> {
    store: Arc<S>,
    registry: AssetRegistry<S>,
}

impl<S: LedgerStore> QueryService<S> {
    /// Create a query service over `store`.
    pub fn new(store: Arc<S>) -> Self {
        Self {
            registry: AssetRegistry::new(store.clone()),
            store,
        }
    }

    /// Encoded house, if the caller may see it.
    pub fn get_details(&self, caller: &Caller, house: &House) -> Result<Vec<u8>, LifecycleError> {
        if !is_visible_to(house, caller) {
            warn!(house_id = %house.house_id, caller = %caller.name, "Detail read denied");
            return Err(LifecycleError::denied(
                DETAILS_OPERATION,
                format!(
                    "caller {} is neither the owner of {} nor a regulator",
                    caller.name, house.house_id
                ),
            ));
        }
        encode_house(house)
    }

    /// Houses visible to the caller, in registry order.
    pub fn visible_houses(&self, caller: &Caller) -> Result<Vec<House>, LifecycleError> {
        let ids = self.registry.list_ids()?;
        let mut visible = Vec::new();

        for id in &ids {
            let house = self.load_listed(id.as_str())?;
            if is_visible_to(&house, caller) {
                visible.push(house);
            }
        }

        debug!(caller = %caller.name, scanned = ids.len(), visible = visible.len(), "Listed houses");
        Ok(visible)
    }

    /// Encoded houses visible to the caller, in registry order.
    pub fn list_visible(&self, caller: &Caller) -> Result<Vec<Vec<u8>>, LifecycleError> {
        self.visible_houses(caller)?
            .iter()
            .map(encode_house)
            .collect()
    }

    fn load_listed(&self, key: &str) -> Result<House, LifecycleError> {
        let retrieval_failed = |reason: String| LifecycleError::AssetRetrievalFailed {
            house_id: key.to_string(),
            reason,
        };

        let bytes = self
            .store
            .get(key)
            .map_err(|e| retrieval_failed(e.to_string()))?
            .ok_or_else(|| retrieval_failed("no record on the ledger".to_string()))?;
        decode_house(key, &bytes).map_err(|e| retrieval_failed(e.to_string()))
    }
}
