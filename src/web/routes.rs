//! HTTP route definitions.
//!
//! API routes live under `/v1`; health probes sit at the root. The
//! supervision endpoint is POST-only, so axum's method routing answers 405
//! for anything else on that path.

use axum::routing::{get, post};
use axum::Router;

use crate::web::handlers;
use crate::web::state::AppState;

/// Create API v1 routes
pub fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .route("/modulos", get(handlers::modules::list_modules))
        .route("/:modulo/registros", get(handlers::listing::list_records))
        .route(
            "/:modulo/supervision",
            post(handlers::supervision::decide_supervision),
        )
}

/// Create health probe routes
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::basic_health))
        .route("/health/live", get(handlers::health::liveness_probe))
        .route("/health/ready", get(handlers::health::readiness_probe))
}
