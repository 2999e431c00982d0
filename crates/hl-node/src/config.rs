//! # Node Configuration
//!
//! Defaults in code, overridden by environment variables, then by CLI
//! flags (see `cli`).

use hl_telemetry::TelemetryConfig;
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// Unknown storage backend name.
    #[error("unknown storage backend {0:?}: expected memory, file or rocksdb")]
    UnknownBackend(String),

    /// Backend exists but this build does not include it.
    #[error("storage backend {0} is not compiled in; rebuild with --features {0}")]
    BackendUnavailable(&'static str),
}

/// Ledger backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageBackend {
    /// Volatile, for demos and scripts.
    #[default]
    Memory,
    /// Bincode snapshot file under the data directory.
    File,
    /// RocksDB under the data directory.
    RocksDb,
}

impl StorageBackend {
    /// Config name of the backend.
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageBackend::Memory => "memory",
            StorageBackend::File => "file",
            StorageBackend::RocksDb => "rocksdb",
        }
    }
}

impl FromStr for StorageBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "mem" => Ok(StorageBackend::Memory),
            "file" => Ok(StorageBackend::File),
            "rocksdb" => Ok(StorageBackend::RocksDb),
            _ => Err(ConfigError::UnknownBackend(s.to_string())),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Storage configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageConfig {
    /// Which backend to open.
    pub backend: StorageBackend,
    /// Data directory for the file and RocksDB backends.
    pub data_dir: PathBuf,
    /// fsync every RocksDB write.
    pub sync_writes: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            data_dir: PathBuf::from("./data"),
            sync_writes: true,
        }
    }
}

impl StorageConfig {
    /// Snapshot path used by the file backend.
    pub fn ledger_file(&self) -> PathBuf {
        self.data_dir.join("ledger.bin")
    }

    /// Database directory used by the RocksDB backend.
    pub fn rocksdb_dir(&self) -> PathBuf {
        self.data_dir.join("rocksdb")
    }
}

/// Complete node configuration.
#[derive(Debug, Clone, Default)]
pub struct NodeConfig {
    /// Storage configuration.
    pub storage: StorageConfig,
    /// Identity directory file; `None` means an empty directory.
    pub directory: Option<PathBuf>,
    /// Logging and metrics.
    pub telemetry: TelemetryConfig,
}

/// Load configuration from the environment.
///
/// - `HL_STORAGE_BACKEND`: memory | file | rocksdb (default: memory)
/// - `HL_DATA_DIR`: data directory (default: ./data)
/// - `HL_DIRECTORY`: identity directory JSON file
/// - `HL_SYNC_WRITES`: fsync RocksDB writes (default: true)
/// - telemetry variables, see [`TelemetryConfig::from_env`]
pub fn load_config() -> Result<NodeConfig, ConfigError> {
    load_config_from(|key| env::var(key).ok())
}

/// Load configuration from any variable source.
pub fn load_config_from<F>(lookup: F) -> Result<NodeConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = NodeConfig {
        telemetry: TelemetryConfig::from_lookup(&lookup),
        ..Default::default()
    };

    if let Some(backend) = lookup("HL_STORAGE_BACKEND") {
        config.storage.backend = backend.parse()?;
    }
    if let Some(dir) = lookup("HL_DATA_DIR") {
        config.storage.data_dir = PathBuf::from(dir);
    }
    if let Some(sync) = lookup("HL_SYNC_WRITES") {
        config.storage.sync_writes = !matches!(sync.to_lowercase().as_str(), "false" | "0" | "no");
    }
    config.directory = lookup("HL_DIRECTORY").map(PathBuf::from);

    Ok(config)
}
