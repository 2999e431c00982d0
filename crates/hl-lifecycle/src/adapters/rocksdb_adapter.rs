//! # RocksDB Ledger Adapter
//!
//! Durable [`LedgerStore`] backed by RocksDB. All records live in the
//! `ledger` column family; batches go through a single `WriteBatch`.

use crate::domain::StoreError;
use crate::ports::{BatchOperation, LedgerStore};
use parking_lot::RwLock;
use rocksdb::{ColumnFamilyDescriptor, Options, WriteBatch, WriteOptions, DB};
use tracing::info;

/// Column family holding house records and the registry.
pub const CF_LEDGER: &str = "ledger";

/// RocksDB tuning for the ledger.
#[derive(Debug, Clone)]
pub struct RocksDbConfig {
    /// Path to the database directory
    pub path: String,
    /// Block cache size in bytes (default: 64MB)
    pub block_cache_size: usize,
    /// Write buffer size in bytes (default: 16MB)
    pub write_buffer_size: usize,
    /// Enable fsync after each write (default: true)
    pub sync_writes: bool,
}

impl Default for RocksDbConfig {
    fn default() -> Self {
        Self {
            path: "./data/rocksdb".to_string(),
            block_cache_size: 64 * 1024 * 1024,
            write_buffer_size: 16 * 1024 * 1024,
            sync_writes: true,
        }
    }
}

impl RocksDbConfig {
    /// Config for tests (small buffers, no sync)
    pub fn for_testing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            block_cache_size: 8 * 1024 * 1024,
            write_buffer_size: 4 * 1024 * 1024,
            sync_writes: false,
        }
    }
}

/// RocksDB-backed ledger.
pub struct RocksDbLedger {
    db: RwLock<DB>,
    config: RocksDbConfig,
}

impl RocksDbLedger {
    /// Open or create the database.
    pub fn open(config: RocksDbConfig) -> Result<Self, StoreError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);
        opts.set_write_buffer_size(config.write_buffer_size);
        opts.set_compression_type(rocksdb::DBCompressionType::Snappy);

        let mut block_opts = rocksdb::BlockBasedOptions::default();
        block_opts.set_bloom_filter(10.0, false);
        block_opts.set_block_cache(&rocksdb::Cache::new_lru_cache(config.block_cache_size));
        opts.set_block_based_table_factory(&block_opts);

        let mut cf_opts = Options::default();
        cf_opts.set_compression_type(rocksdb::DBCompressionType::Snappy);
        let cf = ColumnFamilyDescriptor::new(CF_LEDGER, cf_opts);

        let db = DB::open_cf_descriptors(&opts, &config.path, vec![cf])
            .map_err(|e| StoreError::Io(format!("Failed to open RocksDB: {e}")))?;
        info!(path = %config.path, "Opened RocksDB ledger");

        Ok(Self {
            db: RwLock::new(db),
            config,
        })
    }

    fn write_opts(&self) -> WriteOptions {
        let mut write_opts = WriteOptions::default();
        write_opts.set_sync(self.config.sync_writes);
        write_opts
    }
}

fn missing_cf() -> StoreError {
    StoreError::Corruption(format!("column family {CF_LEDGER} missing"))
}

impl LedgerStore for RocksDbLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let db = self.db.read();
        let cf = db.cf_handle(CF_LEDGER).ok_or_else(missing_cf)?;
        db.get_cf(cf, key.as_bytes())
            .map_err(|e| StoreError::Io(format!("RocksDB get failed: {e}")))
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        let db = self.db.write();
        let cf = db.cf_handle(CF_LEDGER).ok_or_else(missing_cf)?;
        db.put_cf_opt(cf, key.as_bytes(), value, &self.write_opts())
            .map_err(|e| StoreError::Io(format!("RocksDB put failed: {e}")))
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        let db = self.db.write();
        let cf = db.cf_handle(CF_LEDGER).ok_or_else(missing_cf)?;
        let mut batch = WriteBatch::default();
        for op in operations {
            let BatchOperation::Put { key, value } = op;
            batch.put_cf(cf, key.as_bytes(), &value);
        }
        db.write_opt(batch, &self.write_opts())
            .map_err(|e| StoreError::Io(format!("RocksDB batch write failed: {e}")))
    }
}
