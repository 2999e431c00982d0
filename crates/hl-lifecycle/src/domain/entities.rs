//! # Domain Entities
//!
//! The house record and the registry that indexes every house ever created.

use super::errors::LifecycleError;
use super::invariants::invariant_registry_unique;
use super::value_objects::{HouseId, LifecycleState};
use serde::{Deserialize, Deserializer, Serialize};

/// Well-known ledger key of the registry record.
pub const REGISTRY_KEY: &str = "HouseIDs";

/// A housing asset whose custody moves through the lifecycle.
///
/// Field names match the persisted record shape.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct House {
    /// Street address. Immutable.
    pub address: String,
    /// Current custodian; `None` until the regulator assigns an owner.
    #[serde(default)]
    pub owner: Option<String>,
    /// Lifecycle state, persisted as its integer code.
    pub status: LifecycleState,
    /// Identifier. Immutable, globally unique.
    #[serde(rename = "houseID")]
    pub house_id: HouseId,
    /// Transfer price or memo, set from the agent state onward.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub money: Option<String>,
}

impl House {
    /// Create a house in its initial state.
    pub fn new(house_id: HouseId, address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            owner: None,
            status: LifecycleState::Unassigned,
            house_id,
            money: None,
        }
    }

    /// Whether `name` is the current custodian.
    pub fn is_owned_by(&self, name: &str) -> bool {
        self.owner.as_deref() == Some(name)
    }
}

/// Ordered list of every house identifier ever created.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HouseRegistry {
    /// Identifiers in creation order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub hids: Vec<HouseId>,
}

/// Older ledgers store an empty registry as `{"hids":null}`.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<HouseId>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<HouseId>>::deserialize(deserializer)?.unwrap_or_default())
}

impl HouseRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check membership.
    pub fn contains(&self, id: &HouseId) -> bool {
        self.hids.contains(id)
    }

    /// Append an identifier, refusing duplicates.
    pub fn register(&mut self, id: HouseId) -> Result<(), LifecycleError> {
        if self.contains(&id) {
            return Err(LifecycleError::DuplicateIdentifier(id.to_string()));
        }
        self.hids.push(id);
        debug_assert!(invariant_registry_unique(&self.hids));
        Ok(())
    }

    /// Number of registered houses.
    pub fn len(&self) -> usize {
        self.hids.len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.hids.is_empty()
    }
}
