use crate::domain::StoreError;
use crate::ports::{BatchOperation, LedgerStore};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// File-backed ledger for running a node without RocksDB.
///
/// Holds the whole ledger in memory and rewrites a bincode snapshot on every
/// write. The snapshot is written to a temp file and renamed into place, so
/// a crash leaves either the old or the new snapshot. A write that fails to
/// persist is not applied in memory either.
pub struct FileLedger {
    data: RwLock<BTreeMap<String, Vec<u8>>>,
    path: PathBuf,
}

impl FileLedger {
    /// Open the ledger at `path`, loading the snapshot if one exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let data = Self::load_from_file(&path)?;

        if data.is_empty() {
            info!(path = %path.display(), "No existing ledger snapshot");
        } else {
            info!(path = %path.display(), keys = data.len(), "Loaded ledger snapshot");
        }

        Ok(Self {
            data: RwLock::new(data),
            path,
        })
    }

    fn load_from_file(path: &Path) -> Result<BTreeMap<String, Vec<u8>>, StoreError> {
        let bytes = match std::fs::read(path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(e) => return Err(StoreError::Io(e.to_string())),
        };
        if bytes.is_empty() {
            return Ok(BTreeMap::new());
        }
        bincode::deserialize(&bytes)
            .map_err(|e| StoreError::Corruption(format!("{}: {e}", path.display())))
    }

    fn save_to_file(&self, data: &BTreeMap<String, Vec<u8>>) -> Result<(), StoreError> {
        use std::io::Write;

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io(e.to_string()))?;
        }

        let bytes = bincode::serialize(data).map_err(|e| StoreError::Io(e.to_string()))?;

        let temp_path = self.path.with_extension("tmp");
        let mut file =
            std::fs::File::create(&temp_path).map_err(|e| StoreError::Io(e.to_string()))?;
        file.write_all(&bytes)
            .map_err(|e| StoreError::Io(e.to_string()))?;
        file.sync_all().map_err(|e| StoreError::Io(e.to_string()))?;

        std::fs::rename(&temp_path, &self.path).map_err(|e| StoreError::Io(e.to_string()))?;
        debug!(path = %self.path.display(), bytes = bytes.len(), "Ledger snapshot written");
        Ok(())
    }

    fn commit(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        let mut data = self.data.write();
        let mut next = data.clone();
        for op in operations {
            let BatchOperation::Put { key, value } = op;
            next.insert(key, value);
        }
        self.save_to_file(&next)?;
        *data = next;
        Ok(())
    }
}

impl LedgerStore for FileLedger {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.data.read().get(key).cloned())
    }

    fn put(&self, key: &str, value: &[u8]) -> Result<(), StoreError> {
        self.commit(vec![BatchOperation::put(key, value.to_vec())])
    }

    fn atomic_batch_write(&self, operations: Vec<BatchOperation>) -> Result<(), StoreError> {
        self.commit(operations)
    }
}
