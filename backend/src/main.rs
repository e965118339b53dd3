use tally_server::{
    build_rocket,
    config::Settings,
    prometheus::setup_metrics_recorder,
    routes::AppState,
    store::PgStore,
    telemetry,
};
use tracing::{error, info};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[rocket::main]
async fn main() -> Result<(), BoxError> {
    // Read first so RUST_LOG from `.env` reaches the subscriber.
    let settings = Settings::from_env();
    telemetry::init_tracing()?;

    let settings = match settings {
        Ok(settings) => settings,
        Err(e) => {
            error!("Configuration error: {}", e);
            return Err(e.into());
        }
    };

    // Before anything records, or early data points are lost.
    let metrics = setup_metrics_recorder().map_err(|e| {
        error!("{}", e);
        e
    })?;

    info!(
        host = %settings.host,
        port = settings.port,
        max_connections = settings.max_connections,
        "Starting round results service"
    );

    let store = PgStore::connect_lazy(&settings).map_err(|e| {
        error!("Failed to set up database pool: {}", e);
        e
    })?;

    if let Err(e) = build_rocket(&settings, AppState::new(store, metrics)).launch().await {
        error!("Server stopped with error: {}", e);
        return Err(format!("server failed: {e}").into());
    }

    info!("Server shut down");
    Ok(())
}
