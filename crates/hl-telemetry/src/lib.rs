//! # HL Telemetry
//!
//! Logging and metrics for the house ledger.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use hl_telemetry::{init_telemetry, TelemetryConfig};
//!
//! let config = TelemetryConfig::from_env();
//! init_telemetry(&config)?;
//! ```
//!
//! ## Environment Variables
//!
//! | Variable | Default | Description |
//! |----------|---------|-------------|
//! | `HL_SERVICE_NAME` | `house-ledger` | Service name in logs |
//! | `HL_LOG_LEVEL` / `RUST_LOG` | `info` | Log level filter |
//! | `HL_JSON_LOGS` | `false` | JSON log lines |
//! | `HL_METRICS` | `true` | Register Prometheus metrics |

#![warn(missing_docs)]

mod config;
mod logging;
pub mod metrics;

pub use config::{TelemetryConfig, DEFAULT_SERVICE_NAME};
pub use logging::{env_filter, init_logging};
pub use metrics::{
    gather_text, register_metrics, HistogramTimer, HOUSES_CREATED, INVOCATIONS,
    INVOCATION_DURATION, PERMISSION_DENIALS, TRANSFERS_APPLIED,
};

use thiserror::Error;

/// Telemetry initialization errors
#[derive(Error, Debug)]
pub enum TelemetryError {
    /// Subscriber could not be installed.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Metric registration or encoding failed.
    #[error("Failed to initialize Prometheus metrics: {0}")]
    MetricsInit(String),

    /// Configuration value is unusable.
    #[error("Invalid configuration: {0}")]
    Config(String),
}

/// Register metrics (when enabled) and install the log subscriber.
pub fn init_telemetry(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    if config.metrics_enabled {
        register_metrics()?;
    }
    init_logging(config)
}

/// Convenience macro for recording a metric increment.
#[macro_export]
macro_rules! metric_inc {
    ($metric:expr) => {
        $metric.inc()
    };
    ($metric:expr, $labels:expr) => {
        $metric.with_label_values($labels).inc()
    };
}
