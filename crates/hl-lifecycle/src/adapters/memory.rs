use crate::domain::StoreError;
use crate::ports::{BatchOperation, LedgerStore};
#[cfg(any(test, feature = "test-utils"))]
use parking_lot::Mutex;
use parking_lot::RwLock;
use std::collections::HashMap;
#[cfg(any(test, feature = "test-utils"))]
use std::collections::HashSet;

/// Injected failures, used by tests to exercise store error paths.
#[cfg(any(test, feature = "test-utils"))]
#[derive(Debug, Default)]
struct FaultPlan {
    /// Remaining successful writes before every write fails.
    writes_before_failure: Option<usize>,
    /// Keys whose reads fail.
    unreadable_keys: HashSet<String>,
}

/// In-memory ledger for unit tests and the `memory` node backend.
///
/// Batches are applied under a single write lock, so they are atomic.
///
/// With the `test-utils` feature the ledger also takes injected read and
/// write failures, and [`InMemoryLedger::non_atomic`] builds a ledger that
/// applies batch operations one at a time, each counting as a separate
/// write, which reproduces hosts that cannot commit several keys together.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    data: RwLock<HashMap<String, Vec<u8>>>,
    #[cfg(any(test, feature = "test-utils"))]
    faults: Mutex<FaultPlan>,
    #[cfg(any(test, feature = "test-utils"))]
    non_atomic: bool,
}

impl InMemoryLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        self.data.read().len()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.data.read().is_empty()
    }

    /// Copy of every stored pair.
    pub fn snapshot(&self) -> HashMap<String, Vec<u8>> {
        self.data.read().clone()
    }

    fn apply(&self, operations: Vec<BatchOperation>) {
        let mut data = self.data.write();
        for op in operations {
            let BatchOperation::Put { key, value } = op;
            data.insert(key, value);
        }
    }
}

/// Fault injection. Requires feature: `test-utils`
#[cfg(any(test, feature = "test-utils"))]
impl InMemoryLedger {
    /// Ledger whose batches are not atomic.
    pub fn non_atomic() -> Self {
        Self {
            non_atomic: true,
            ..Self::default()
        }
    }

    /// Allow `n` more writes, then fail every write.
    pub fn fail_writes_after(&self, n: usize) {
        self.faults.lock().writes_before_failure = Some(n);
    }

    /// Fail every read of `key`.
    pub fn fail_reads_of(&self, key: impl Into<String>) {
        self.faults.lock().unreadable_keys.insert(key.into());
    }

    /// Remove all injected failures.
    pub fn clear_faults(&self) {
        *self.faults.lock() = FaultPlan::default();
    }

    fn check_read(&self, key: &str) -> Result<(), StoreError> {
        if self.faults.lock().unreadable_keys.contains(key) {
            return Err(StoreError::Io(format!("injected read failure for {key}")));
        }
        Ok(())
    }

    fn take_write_permit(&self) -> Result<(), StoreError> {
        let mut faults = self.faults.lock();
        match faults.writes_before_failure.as_mut() {
            Some(0) => Err(StoreError::Io("injected write failure".to_string())),
            Some(remaining) => {
                *remaining -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn is_non_atomic(&self) -> bool {
        self.non_atomic
    }
}

#[cfg(not(any(test, feature = "test-utils")))]
impl InMemoryLedger {
    fn check_read(&self, _key: &str) -> Result<(), StoreError> {
        Ok(())
    }

    fn take_write_permit(&self) -> Result<(), StoreError> {
        Ok(())
    }

    fn is_non_atomic(&self) -> bool {
        false
    }
}

impl LedgerStore for InMemoryLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.check_read(key)?;
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.take_write_permit()?;
        self.data.write().insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        if self.is_non_atomic() {
            for op in operations {
                let BatchOperation::Put { key, value } = op;
                self.put(&key, &value)?;
            }
            return Ok(());
        }

        self.take_write_permit()?;
        self.apply(operations);
        Ok(())
    }
}
