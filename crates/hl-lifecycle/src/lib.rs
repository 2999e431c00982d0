//! # HL Lifecycle
//!
//! Custody state machine for housing assets on a key-value ledger.
//!
//! **Architecture:** Hexagonal (DDD + Ports/Adapters)
//!
//! ## Purpose
//!
//! A house is created once by a regulator and then moves forward through
//! fixed custodial states. Only the role the transition table names for the
//! current state may move it, and every change is persisted to the ledger:
//!
//! ```text
//! Unassigned ──regulator──▶ HeldByOwner ──owner──▶ HeldByAgent ──agent──▶ HeldByLeasee
//! ```
//!
//! ## Module Structure
//!
//! ```text
//! hl-lifecycle/
//! ├── domain/      # House, HouseRegistry, HouseId, roles, states, transition table
//! ├── codec        # JSON encoding of houses and the registry
//! ├── registry     # Registry read-modify-write
//! ├── engine       # create / transition / reconcile
//! ├── query        # visibility-filtered reads
//! ├── service      # HouseLifecycleApi implementation
//! ├── ports/       # HouseLifecycleApi, LedgerStore, IdentityResolver
//! ├── adapters/    # In-memory, file and RocksDB ledgers; directory resolver
//! └── dispatch/    # Invocation parsing and routing
//! ```
//!
//! ## Usage
//!
//! ```
//! use hl_lifecycle::{Affiliation, DirectoryResolver, Dispatcher, InMemoryLedger, Invocation};
//! use std::sync::Arc;
//!
//! let directory = DirectoryResolver::new()
//!     .with_entry("reg", Affiliation::Regulator)
//!     .with_entry("alice", Affiliation::HouseOwner);
//! let dispatcher = Dispatcher::new(Arc::new(InMemoryLedger::new()), directory);
//!
//! dispatcher
//!     .invoke("reg", &Invocation::new("create_house", ["AB1234567", "1 Main St"]))
//!     .unwrap();
//! dispatcher
//!     .invoke("reg", &Invocation::new("authority_to_houseowner", ["AB1234567", "alice"]))
//!     .unwrap();
//! let details = dispatcher
//!     .invoke("alice", &Invocation::new("get_house_details", ["AB1234567"]))
//!     .unwrap();
//! assert!(!details.is_empty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod codec;
pub mod dispatch;
pub mod domain;
pub mod engine;
pub mod ports;
pub mod query;
pub mod registry;
pub mod service;

// Re-exports
pub use adapters::{DirectoryError, DirectoryResolver, FileLedger, InMemoryLedger};
#[cfg(feature = "rocksdb")]
pub use adapters::{RocksDbConfig, RocksDbLedger};
pub use dispatch::{Command, Dispatcher, Invocation, PING_RESPONSE};
pub use domain::{
    Affiliation, Caller, ErrorKind, House, HouseId, HouseRegistry, LifecycleError,
    LifecycleState, Party, StoreError, TransferKind, TransitionRule, REGISTRY_KEY,
    TRANSITION_TABLE,
};
pub use engine::LifecycleEngine;
pub use ports::{BatchOperation, HouseLifecycleApi, IdentityResolver, LedgerStore};
pub use query::QueryService;
pub use registry::AssetRegistry;
pub use service::HouseLedger;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
