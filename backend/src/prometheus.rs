use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use thiserror::Error;

pub const RESULTS_REQUESTS: &str = "round_results_requests_total";
pub const RESULTS_QUERY_SECONDS: &str = "round_results_query_duration_seconds";

/// How a results request ended, as the `outcome` label.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultsOutcome {
    Ok,
    InvalidId,
    StorageError,
}

impl ResultsOutcome {
    pub const ALL: [ResultsOutcome; 3] =
        [ResultsOutcome::Ok, ResultsOutcome::InvalidId, ResultsOutcome::StorageError];

    pub const fn as_str(self) -> &'static str {
        match self {
            ResultsOutcome::Ok => "ok",
            ResultsOutcome::InvalidId => "invalid_id",
            ResultsOutcome::StorageError => "storage_error",
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Failed to install Prometheus recorder: {0}")]
pub struct MetricsError(String);

// The recorder is process-global; tests build many rockets.
static HANDLE: OnceLock<Result<PrometheusHandle, MetricsError>> = OnceLock::new();

/// Installs the global Prometheus recorder on first use and returns a handle
/// for rendering. Must run before anything records metrics.
pub fn setup_metrics_recorder() -> Result<PrometheusHandle, MetricsError> {
    HANDLE.get_or_init(install).clone()
}

fn install() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError(e.to_string()))?;

    describe_counter!(RESULTS_REQUESTS, "Round results requests by outcome");
    // Zeroed so every series is present right after startup.
    for outcome in ResultsOutcome::ALL {
        counter!(RESULTS_REQUESTS, "outcome" => outcome.as_str()).absolute(0);
    }

    describe_histogram!(
        RESULTS_QUERY_SECONDS,
        Unit::Seconds,
        "Time spent fetching a round's tallies from the store"
    );

    Ok(handle)
}

pub fn record_results(outcome: ResultsOutcome) {
    counter!(RESULTS_REQUESTS, "outcome" => outcome.as_str()).increment(1);
}

pub fn record_query_duration(elapsed: Duration) {
    histogram!(RESULTS_QUERY_SECONDS).record(elapsed.as_secs_f64());
}
