//! Prometheus metrics for the house ledger.
//!
//! All metrics follow the naming convention: `hl_<area>_<metric>_<unit>`

use lazy_static::lazy_static;
use prometheus::{
    exponential_buckets, Counter, CounterVec, Encoder, Histogram, HistogramOpts, HistogramVec,
    Opts, Registry, TextEncoder,
};

use crate::TelemetryError;

lazy_static! {
    /// Crate-local metrics registry
    pub static ref REGISTRY: Registry = Registry::new();

    /// Invocations by function and outcome (`ok` or an error kind code)
    pub static ref INVOCATIONS: CounterVec = CounterVec::new(
        Opts::new("hl_invocations_total", "Invocations processed"),
        &["function", "outcome"]
    ).expect("metric creation failed");

    /// Houses created
    pub static ref HOUSES_CREATED: Counter = Counter::new(
        "hl_houses_created_total",
        "Total number of houses created"
    ).expect("metric creation failed");

    /// Transfers applied, by transfer kind
    pub static ref TRANSFERS_APPLIED: CounterVec = CounterVec::new(
        Opts::new("hl_transfers_applied_total", "Custody transfers applied"),
        &["kind"]
    ).expect("metric creation failed");

    /// Permission denials, by operation
    pub static ref PERMISSION_DENIALS: CounterVec = CounterVec::new(
        Opts::new("hl_permission_denials_total", "Invocations refused by a role or ownership check"),
        &["operation"]
    ).expect("metric creation failed");

    /// Invocation duration, by function
    pub static ref INVOCATION_DURATION: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "hl_invocation_duration_seconds",
            "Time spent processing an invocation"
        ).buckets(exponential_buckets(0.00001, 2.0, 16).expect("bucket layout")),
        &["function"]
    ).expect("metric creation failed");
}

/// Register all metrics with the crate registry. Safe to call repeatedly.
pub fn register_metrics() -> Result<(), TelemetryError> {
    let metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        Box::new(INVOCATIONS.clone()),
        Box::new(HOUSES_CREATED.clone()),
        Box::new(TRANSFERS_APPLIED.clone()),
        Box::new(PERMISSION_DENIALS.clone()),
        Box::new(INVOCATION_DURATION.clone()),
    ];

    for metric in metrics {
        match REGISTRY.register(metric) {
            Ok(()) | Err(prometheus::Error::AlreadyReg) => {}
            Err(e) => return Err(TelemetryError::MetricsInit(e.to_string())),
        }
    }
    Ok(())
}

/// Render every registered metric in the Prometheus text format.
pub fn gather_text() -> Result<String, TelemetryError> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder
        .encode(&metric_families, &mut buffer)
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;
    String::from_utf8(buffer).map_err(|e| TelemetryError::MetricsInit(e.to_string()))
}

/// Timer guard for automatic histogram observation.
pub struct HistogramTimer {
    histogram: Histogram,
    start: std::time::Instant,
}

impl HistogramTimer {
    /// Start a new timer for the given histogram.
    pub fn new(histogram: &Histogram) -> Self {
        Self {
            histogram: histogram.clone(),
            start: std::time::Instant::now(),
        }
    }
}

impl Drop for HistogramTimer {
    fn drop(&mut self) {
        let duration = self.start.elapsed().as_secs_f64();
        self.histogram.observe(duration);
    }
}

/// Start timing for a histogram. Observation happens on drop.
#[macro_export]
macro_rules! time_histogram {
    ($histogram:expr) => {
        $crate::metrics::HistogramTimer::new(&$histogram)
    };
}
