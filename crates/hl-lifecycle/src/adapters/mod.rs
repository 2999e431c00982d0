//! Ledger and identity adapters
//!
//! Implementations of the `LedgerStore` and `IdentityResolver` ports.

mod directory;
mod file;
mod memory;
#[cfg(feature = "rocksdb")]
mod rocksdb_adapter;

pub use directory::{DirectoryError, DirectoryResolver};
pub use file::FileLedger;
pub use memory::InMemoryLedger;
#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbLedger, CF_LEDGER};
