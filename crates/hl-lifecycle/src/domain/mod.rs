//! # Domain Module
//!
//! Core domain types for the house lifecycle: the house record, the
//! registry, roles and states, the transition table, errors.

pub mod entities;
pub mod errors;
pub mod invariants;
pub mod transitions;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use invariants::*;
pub use transitions::*;
pub use value_objects::*;
