//! # Invocation Runner
//!
//! Wraps the dispatcher with metrics, and runs invocation scripts.

use crate::script::parse_line;
use hl_lifecycle::dispatch::FUNCTIONS;
use hl_lifecycle::{
    Dispatcher, ErrorKind, IdentityResolver, Invocation, LedgerStore, LifecycleError,
    TRANSITION_TABLE,
};
use hl_telemetry::metrics::HistogramTimer;
use hl_telemetry::{
    log_event, HOUSES_CREATED, INVOCATIONS, INVOCATION_DURATION, PERMISSION_DENIALS,
    TRANSFERS_APPLIED,
};
use std::io::{BufRead, Write};

/// Label used for functions outside the supported set.
pub const UNKNOWN_FUNCTION_LABEL: &str = "unknown";

/// Counts from one script run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScriptSummary {
    /// Invocations executed.
    pub invocations: usize,
    /// Invocations that returned an error.
    pub failures: usize,
}

/// Dispatcher plus metrics recording.
pub struct NodeRunner<S: LedgerStore, R: IdentityResolver> {
    dispatcher: Dispatcher<S, R>,
    metrics_enabled: bool,
}

fn function_label(function: &str) -> &'static str {
    FUNCTIONS
        .iter()
        .copied()
        .find(|known| *known == function)
        .unwrap_or(UNKNOWN_FUNCTION_LABEL)
}

fn is_transfer(function: &str) -> bool {
    TRANSITION_TABLE
        .iter()
        .any(|rule| rule.kind.operation() == function)
}

/// Render an invocation result as one output line.
pub fn format_result(result: &Result<Vec<u8>, LifecycleError>) -> String {
    match result {
        Ok(payload) if payload.is_empty() => "ok".to_string(),
        Ok(payload) => format!("ok {}", String::from_utf8_lossy(payload)),
        Err(e) => format!("error {}: {e}", e.kind()),
    }
}

impl<S: LedgerStore, R: IdentityResolver> NodeRunner<S, R> {
    /// Create a runner.
    pub fn new(dispatcher: Dispatcher<S, R>, metrics_enabled: bool) -> Self {
        Self {
            dispatcher,
            metrics_enabled,
        }
    }

    /// Run one invocation and record its metrics.
    pub fn invoke(&self, caller: &str, invocation: &Invocation) -> Result<Vec<u8>, LifecycleError> {
        let function = function_label(&invocation.function);
        let timer = self
            .metrics_enabled
            .then(|| HistogramTimer::new(&INVOCATION_DURATION.with_label_values(&[function])));

        let result = self.dispatcher.invoke(caller, invocation);
        drop(timer);

        if self.metrics_enabled {
            record_outcome(function, &result);
        }
        result
    }

    /// Run every line of `input`, writing one result line per invocation.
    ///
    /// Syntax errors are reported as failed lines; I/O errors abort.
    pub fn run_script<I: BufRead, O: Write>(
        &self,
        input: I,
        mut output: O,
    ) -> anyhow::Result<ScriptSummary> {
        let mut summary = ScriptSummary::default();

        for (index, line) in input.lines().enumerate() {
            let line = line?;
            let parsed = match parse_line(&line, index + 1) {
                Ok(Some(parsed)) => parsed,
                Ok(None) => continue,
                Err(e) => {
                    summary.failures += 1;
                    writeln!(output, "error script: {e}")?;
                    continue;
                }
            };

            let result = self.invoke(&parsed.caller, &parsed.invocation);
            summary.invocations += 1;
            if result.is_err() {
                summary.failures += 1;
            }
            writeln!(output, "{}", format_result(&result))?;
        }

        log_event!(
            info,
            "runner",
            "Script finished",
            invocations = summary.invocations,
            failures = summary.failures
        );
        Ok(summary)
    }
}

fn record_outcome(function: &'static str, result: &Result<Vec<u8>, LifecycleError>) {
    match result {
        Ok(_) => {
            INVOCATIONS.with_label_values(&[function, "ok"]).inc();
            if function == "create_house" {
                HOUSES_CREATED.inc();
            }
            if is_transfer(function) {
                TRANSFERS_APPLIED.with_label_values(&[function]).inc();
            }
        }
        Err(e) => {
            let kind = e.kind();
            INVOCATIONS.with_label_values(&[function, kind.as_str()]).inc();
            if kind == ErrorKind::PermissionDenied {
                PERMISSION_DENIALS.with_label_values(&[function]).inc();
            }
        }
    }
}
