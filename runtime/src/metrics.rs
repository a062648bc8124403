//! Prometheus metrics for observability and monitoring.
//!
//! The store records through the `metrics` facade, so nothing is collected
//! until a recorder is installed. [`install_recorder`] installs a Prometheus
//! recorder and returns a handle that renders the text exposition format.
//!
//! # Example
//!
//! ```rust,no_run
//! use slicestore_runtime::metrics::install_recorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handle = install_recorder()?;
//! // ... dispatch some actions ...
//! println!("{}", handle.render());
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_gauge, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Duration;
use thiserror::Error;

/// Counter: actions dispatched, labelled by `store` and `action`
pub const ACTIONS_DISPATCHED: &str = "store_actions_dispatched_total";
/// Histogram: time spent in the reducer per dispatch, labelled by `store`
pub const REDUCER_DURATION: &str = "store_reducer_duration_seconds";
/// Counter: dispatches that returned the previous snapshot, labelled by `store`
pub const UNCHANGED_SNAPSHOTS: &str = "store_unchanged_snapshots_total";
/// Gauge: registered listeners, labelled by `store`
pub const LISTENERS: &str = "store_listeners";

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Install a Prometheus recorder as the global metrics recorder.
///
/// # Errors
///
/// Returns [`MetricsError::Build`] if the exporter cannot be configured and
/// [`MetricsError::Install`] if a global recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        // Reducers are pure in-memory work; buckets start at a microsecond.
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            &[
                0.000_001, 0.000_005, 0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01,
                0.05,
            ],
        )
        .map_err(|e| MetricsError::Build(e.to_string()))?
        .install_recorder()
        .map_err(|e| MetricsError::Install(e.to_string()))?;

    register_metrics();
    tracing::info!("Metrics recorder installed");

    Ok(handle)
}

/// Register all metric descriptions.
fn register_metrics() {
    describe_counter!(ACTIONS_DISPATCHED, "Total number of actions dispatched to a store");
    describe_histogram!(
        REDUCER_DURATION,
        metrics::Unit::Seconds,
        "Time taken by the root reducer for one dispatch"
    );
    describe_counter!(
        UNCHANGED_SNAPSHOTS,
        "Total number of dispatches that left the snapshot unchanged"
    );
    describe_gauge!(LISTENERS, "Number of listeners subscribed to a store");
}

pub(crate) fn record_dispatch(store: &str, action: &'static str, duration: Duration) {
    metrics::counter!(ACTIONS_DISPATCHED, "store" => store.to_string(), "action" => action)
        .increment(1);
    metrics::histogram!(REDUCER_DURATION, "store" => store.to_string())
        .record(duration.as_secs_f64());
}

pub(crate) fn record_unchanged(store: &str) {
    metrics::counter!(UNCHANGED_SNAPSHOTS, "store" => store.to_string()).increment(1);
}

pub(crate) fn record_listeners(store: &str, count: usize) {
    // Precision loss acceptable for a gauge (listener counts < 2^52)
    #[allow(clippy::cast_precision_loss)]
    metrics::gauge!(LISTENERS, "store" => store.to_string()).set(count as f64);
}
