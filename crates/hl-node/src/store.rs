//! Ledger backend selected at startup.

#[cfg(not(feature = "rocksdb"))]
use crate::config::ConfigError;
use crate::config::{StorageBackend, StorageConfig};
use hl_lifecycle::{BatchOperation, FileLedger, InMemoryLedger, LedgerStore, StoreError};
#[cfg(feature = "rocksdb")]
use hl_lifecycle::{RocksDbConfig, RocksDbLedger};
use tracing::info;

/// The ledger the node runs against.
pub enum NodeStore {
    /// In-memory ledger.
    Memory(InMemoryLedger),
    /// File snapshot ledger.
    File(FileLedger),
    /// RocksDB ledger.
    #[cfg(feature = "rocksdb")]
    RocksDb(RocksDbLedger),
}

impl NodeStore {
    /// Open the configured backend.
    pub fn open(config: &StorageConfig) -> anyhow::Result<Self> {
        let store = match config.backend {
            StorageBackend::Memory => NodeStore::Memory(InMemoryLedger::new()),
            StorageBackend::File => NodeStore::File(FileLedger::open(config.ledger_file())?),
            #[cfg(feature = "rocksdb")]
            StorageBackend::RocksDb => NodeStore::RocksDb(RocksDbLedger::open(RocksDbConfig {
                path: config.rocksdb_dir().to_string_lossy().to_string(),
                sync_writes: config.sync_writes,
                ..Default::default()
            })?),
            #[cfg(not(feature = "rocksdb"))]
            StorageBackend::RocksDb => {
                return Err(ConfigError::BackendUnavailable("rocksdb").into());
            }
        };
        info!(backend = %config.backend, data_dir = %config.data_dir.display(), "Ledger opened");
        Ok(store)
    }

    fn inner(&self) -> &dyn LedgerStore {
        match self {
            NodeStore::Memory(store) => store,
            NodeStore::File(store) => store,
            #[cfg(feature = "rocksdb")]
            NodeStore::RocksDb(store) => store,
        }
    }
}

impl LedgerStore for NodeStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.inner().get(key)
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.inner().put(key, value)
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        self.inner().atomic_batch_write(operations)
    }
}
