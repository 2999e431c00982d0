//! Command-line interface.

use crate::config::{NodeConfig, StorageBackend};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// HL-Node: house lifecycle ledger host
#[derive(Parser, Debug)]
#[command(name = "hl-node")]
#[command(about = "Runs house lifecycle invocations against a ledger")]
pub struct Cli {
    /// Ledger backend (memory, file, rocksdb); overrides HL_STORAGE_BACKEND
    #[arg(long, global = true)]
    pub backend: Option<StorageBackend>,

    /// Data directory; overrides HL_DATA_DIR
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Identity directory JSON file; overrides HL_DIRECTORY
    #[arg(long, global = true)]
    pub directory: Option<PathBuf>,

    /// Action to perform
    #[command(subcommand)]
    pub command: CliCommand,
}

/// Subcommands.
#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CliCommand {
    /// Run a single invocation
    Invoke {
        /// Invoking identity
        #[arg(short, long, default_value = "")]
        caller: String,

        /// Function name
        function: String,

        /// Function arguments
        #[arg(allow_hyphen_values = true)]
        args: Vec<String>,
    },

    /// Run invocations read from stdin, one `<caller> <function> [args...]` per line
    Run {
        /// Print Prometheus metrics after the script finishes
        #[arg(long)]
        print_metrics: bool,
    },
}

impl Cli {
    /// Apply flag overrides on top of the environment configuration.
    pub fn apply(&self, config: &mut NodeConfig) {
        if let Some(backend) = self.backend {
            config.storage.backend = backend;
        }
        if let Some(dir) = &self.data_dir {
            config.storage.data_dir = dir.clone();
        }
        if let Some(directory) = &self.directory {
            config.directory = Some(directory.clone());
        }
    }
}
