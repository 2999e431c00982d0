//! # Asset Codec
//!
//! Converts houses and the registry to and from their persisted JSON form.
//!
//! Persisted shapes:
//!
//! ```text
//! house:    {"address":"1 Main St","owner":"alice","status":2,"houseID":"AB1234567","money":"500"}
//! registry: {"hids":["AB1234567","CD7654321"]}
//! ```
//!
//! `owner` is `null` while unassigned; `money` is omitted until set.

use crate::domain::{House, HouseRegistry, LifecycleError, REGISTRY_KEY};

/// Encode a house record.
pub fn encode_house(house: &House) -> Result<Vec<u8>, LifecycleError> {
    serde_json::to_vec(house).map_err(|e| LifecycleError::CorruptRecord {
        key: house.house_id.to_string(),
        reason: e.to_string(),
    })
}

/// Decode the house record stored under `key`.
pub fn decode_house(key: &str, bytes: &[u8]) -> Result<House, LifecycleError> {
    let house: House = serde_json::from_slice(bytes).map_err(|e| LifecycleError::CorruptRecord {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    if house.house_id.as_str() != key {
        return Err(LifecycleError::CorruptRecord {
            key: key.to_string(),
            reason: format!("record carries houseID {}", house.house_id),
        });
    }
    Ok(house)
}

/// Encode a list of houses as a JSON array.
pub fn encode_house_list(houses: &[House]) -> Result<Vec<u8>, LifecycleError> {
    serde_json::to_vec(houses).map_err(|e| LifecycleError::CorruptRecord {
        key: "house list".to_string(),
        reason: e.to_string(),
    })
}

/// Encode the registry record.
pub fn encode_registry(registry: &HouseRegistry) -> Result<Vec<u8>, LifecycleError> {
    serde_json::to_vec(registry).map_err(|e| LifecycleError::RegistryCorrupt(e.to_string()))
}

/// Decode the registry record.
pub fn decode_registry(bytes: &[u8]) -> Result<HouseRegistry, LifecycleError> {
    serde_json::from_slice(bytes)
        .map_err(|e| LifecycleError::RegistryCorrupt(format!("{REGISTRY_KEY}: {e}")))
}
