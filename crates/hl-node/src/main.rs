//! HL-Node entry point.

use anyhow::{Context, Result};
use clap::Parser;
use hl_lifecycle::{DirectoryResolver, Dispatcher, Invocation};
use hl_node::cli::{Cli, CliCommand};
use hl_node::runner::format_result;
use hl_node::{load_config, NodeConfig, NodeRunner, NodeStore};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{info, warn};

fn load_directory(config: &NodeConfig) -> Result<DirectoryResolver> {
    match &config.directory {
        Some(path) => DirectoryResolver::from_json_file(path)
            .with_context(|| format!("loading identity directory {}", path.display())),
        None => {
            warn!("No identity directory configured; only ping and init will succeed");
            Ok(DirectoryResolver::new())
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    let mut config = load_config()?;
    cli.apply(&mut config);

    hl_telemetry::init_telemetry(&config.telemetry)?;

    info!(
        service = %config.telemetry.service_name,
        backend = %config.storage.backend,
        version = hl_lifecycle::VERSION,
        "Starting hl-node"
    );

    let store = NodeStore::open(&config.storage)?;
    let directory = load_directory(&config)?;
    info!(identities = directory.len(), "Identity directory loaded");

    let runner = NodeRunner::new(
        Dispatcher::new(Arc::new(store), directory),
        config.telemetry.metrics_enabled,
    );

    match cli.command {
        CliCommand::Invoke {
            caller,
            function,
            args,
        } => {
            let result = runner.invoke(&caller, &Invocation::new(function, args));
            println!("{}", format_result(&result));
            if result.is_err() {
                return Ok(ExitCode::FAILURE);
            }
        }
        CliCommand::Run { print_metrics } => {
            let stdin = io::stdin();
            let summary = runner.run_script(stdin.lock(), io::stdout().lock())?;
            if print_metrics {
                print!("{}", hl_telemetry::gather_text()?);
            }
            if summary.failures > 0 {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
