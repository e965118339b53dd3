use std::sync::Arc;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusHandle;
use rocket::{State, get, http::{ContentType, Status}, serde::json::Json};
use tally_shared::models::{HealthStatus, OptionTally, RoundId};
use tally_shared::tally::rank;
use tally_shared::validation::RoundIdError;
use tracing::{debug, instrument, Span};

use crate::error::ApiError;
use crate::prometheus::{record_query_duration, record_results, ResultsOutcome};
use crate::store::ResultsStore;

pub struct AppState {
    pub store: Arc<dyn ResultsStore>,
    pub metrics: PrometheusHandle,
}

impl AppState {
    pub fn new(store: impl ResultsStore + 'static, metrics: PrometheusHandle) -> Self {
        Self { store: Arc::new(store), metrics }
    }

    pub fn with_store(store: Arc<dyn ResultsStore>, metrics: PrometheusHandle) -> Self {
        Self { store, metrics }
    }
}

/// Liveness only. Never touches the store.
#[get("/health")]
pub fn health() -> Json<HealthStatus> {
    Json(HealthStatus::ok())
}

#[instrument(skip_all, fields(round_id))]
#[get("/rounds/<id>/results")]
pub async fn round_results(
    state: &State<AppState>,
    id: Result<RoundId, RoundIdError>,
) -> Result<Json<Vec<OptionTally>>, ApiError> {
    let round = id.map_err(|e| {
        record_results(ResultsOutcome::InvalidId);
        e
    })?;
    Span::current().record("round_id", round.as_str());

    let started = Instant::now();
    let rows = state.store.round_results(&round).await;
    record_query_duration(started.elapsed());
    let rows = rows.map_err(|e| {
        record_results(ResultsOutcome::StorageError);
        e
    })?;

    record_results(ResultsOutcome::Ok);
    debug!(options = rows.len(), "Round results ready");
    Ok(Json(rank(rows)))
}

/// Prometheus text exposition.
#[get("/metrics")]
pub fn scrape_metrics(state: &State<AppState>) -> (ContentType, String) {
    (ContentType::Plain, state.metrics.render())
}

#[rocket::options("/<_..>")]
pub async fn all_options() -> Status {
    Status::Ok
}
