//! # Domain Invariants
//!
//! Business rules for the house lifecycle.

use super::value_objects::{HouseId, LifecycleState};
use lazy_static::lazy_static;
use regex::Regex;

/// Identifier shape: two ASCII letters followed by seven digits.
pub const HOUSE_ID_PATTERN: &str = "^[A-Za-z]{2}[0-9]{7}$";

lazy_static! {
    static ref HOUSE_ID_RE: Regex = Regex::new(HOUSE_ID_PATTERN).expect("static pattern compiles");
}

/// Pure predicate over the identifier shape.
pub fn is_valid_house_id(raw: &str) -> bool {
    HOUSE_ID_RE.is_match(raw)
}

/// Invariant: state only advances to its direct successor.
pub fn invariant_forward_step(from: LifecycleState, to: LifecycleState) -> bool {
    from.successor() == Some(to)
}

/// Invariant: the registry never holds an identifier twice.
pub fn invariant_registry_unique(ids: &[HouseId]) -> bool {
    let mut seen = std::collections::HashSet::with_capacity(ids.len());
    ids.iter().all(|id| seen.insert(id))
}
