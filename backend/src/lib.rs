pub mod catchers;
pub mod config;
pub mod cors;
pub mod error;
pub mod prometheus;
pub mod queries;
pub mod routes;
pub mod store;
pub mod telemetry;
pub mod trace;

pub use tally_shared::{models::*, error::{ErrorCode, ErrorResponse}};

use rocket::{catchers, routes, Build, Rocket};

use crate::catchers::{bad_request, internal_error, not_found};
use crate::config::Settings;
use crate::cors::Cors;
use crate::routes::{all_options, health, round_results, scrape_metrics, AppState};
use crate::trace::RequestTrace;

/// Assembles the application around an already-built store.
pub fn build_rocket(settings: &Settings, state: AppState) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", settings.host))
        .merge(("port", settings.port))
        .merge(("log_level", "off"));

    rocket::custom(figment)
        .attach(RequestTrace)
        .attach(Cors::new(settings.cors_allowed_origins.clone()))
        .manage(state)
        .mount("/", routes![health, round_results, scrape_metrics, all_options])
        .register(
            "/",
            catchers![bad_request, not_found, internal_error],
        )
}
