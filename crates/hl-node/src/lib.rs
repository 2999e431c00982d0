//! # HL Node
//!
//! Host process for the house lifecycle core: chooses a ledger backend,
//! loads the identity directory, installs telemetry and runs invocations.
//!
//! ```text
//! hl-node/
//! ├── config   # HL_* environment configuration
//! ├── store    # Backend selection
//! ├── script   # Invocation script parsing
//! ├── runner   # Dispatcher + metrics, script execution
//! └── cli      # clap interface
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cli;
pub mod config;
pub mod runner;
pub mod script;
pub mod store;

pub use config::{load_config, ConfigError, NodeConfig, StorageBackend, StorageConfig};
pub use runner::{NodeRunner, ScriptSummary};
pub use store::NodeStore;
