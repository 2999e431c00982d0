//! # Outbound Ports
//!
//! Traits for the collaborators the lifecycle core consumes: the ledger
//! key-value store and the caller-identity resolver.
//!
//! The hosting ledger serializes invocations, so implementations only need
//! to be safe to share, not to resolve write conflicts.

use crate::domain::{Affiliation, LifecycleError, StoreError};
use std::sync::Arc;

/// A single write inside an atomic batch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchOperation {
    /// Put a key-value pair.
    Put {
        /// Ledger key.
        key: String,
        /// Encoded value.
        value: Vec<u8>,
    },
}

impl BatchOperation {
    /// Create a Put operation.
    pub fn put(key: impl Into<String>, value: impl Into<Vec<u8>>) -> Self {
        BatchOperation::Put {
            key: key.into(),
            value: value.into(),
        }
    }

    /// Key touched by this operation.
    pub fn key(&self) -> &str {
        match self {
            BatchOperation::Put { key, .. } => key,
        }
    }
}

/// Ledger key-value store - outbound port.
pub trait LedgerStore: Send + Sync {
    /// Get the value stored under `key`, `None` if absent.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Put a single key-value pair.
    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError>;

    /// Execute an atomic batch write.
    ///
    /// Either ALL operations in the batch are applied, or NONE are.
    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError>;
}

impl<T: LedgerStore + ?Sized> LedgerStore for Arc<T> {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        (**self).atomic_batch_write(operations)
    }
}

/// Caller-identity resolver - outbound port.
///
/// The host authenticates the caller's name; this port maps names to roles
/// for both the caller and the recipient of a transfer.
pub trait IdentityResolver: Send + Sync {
    /// Resolve the affiliation of `name`.
    ///
    /// Fails with [`LifecycleError::UnknownIdentity`] for names it does not know.
    fn affiliation_of(&self, name: &str) -> Result<Affiliation, LifecycleError>;
}
