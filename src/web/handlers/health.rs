//! Health check handlers.
//!
//! Kubernetes-compatible probes; readiness pings both database stores and
//! reports a per-check breakdown.

use std::collections::HashMap;

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::debug;

use crate::database::SupervisionStore;
use crate::web::errors::ApiError;
use crate::web::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct HealthCheck {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub status: String,
    pub timestamp: String,
    pub checks: HashMap<String, HealthCheck>,
}

/// Basic health check endpoint: GET /health
pub async fn basic_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Kubernetes liveness probe: GET /health/live
pub async fn liveness_probe() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "alive".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}

/// Kubernetes readiness probe: GET /health/ready
///
/// Ready only when both stores answer a connectivity probe.
pub async fn readiness_probe(
    State(state): State<AppState>,
) -> Result<Json<DetailedHealthResponse>, ApiError> {
    debug!("Performing readiness probe");

    let mut checks = HashMap::new();
    let mut overall_healthy = true;

    let main_check = check_store_health(state.main_store.as_ref()).await;
    overall_healthy = overall_healthy && main_check.status == "healthy";
    checks.insert("main_database".to_string(), main_check);

    let staging_check = check_store_health(state.staging_store.as_ref()).await;
    overall_healthy = overall_healthy && staging_check.status == "healthy";
    checks.insert("staging_database".to_string(), staging_check);

    if !overall_healthy {
        return Err(ApiError::ServiceUnavailable);
    }

    Ok(Json(DetailedHealthResponse {
        status: "ready".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        checks,
    }))
}

async fn check_store_health(store: &dyn SupervisionStore) -> HealthCheck {
    match store.ping().await {
        Ok(()) => HealthCheck {
            status: "healthy".to_string(),
            message: None,
        },
        Err(e) => HealthCheck {
            status: "unhealthy".to_string(),
            message: Some(e.to_string()),
        },
    }
}
