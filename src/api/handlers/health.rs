//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: Storage or stat queue unusable
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "backend": "sqlite",
///   "checks": {
///     "storage": { "status": "ok" },
///     "stats_queue": { "status": "ok", "message": "Capacity: 10000" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let storage = check_storage(&state).await;
    let stats_queue = check_stats_queue(&state);

    let all_healthy = storage.is_ok() && stats_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        backend: state.backend.backend_name().to_string(),
        checks: HealthChecks {
            storage,
            stats_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_storage(state: &AppState) -> CheckStatus {
    match state.backend.health_check().await {
        Ok(()) => CheckStatus::ok(None),
        Err(e) => {
            tracing::error!(error = %e, "Storage health check failed");
            CheckStatus::error("Storage unreachable")
        }
    }
}

fn check_stats_queue(state: &AppState) -> CheckStatus {
    if state.stat_sender.is_closed() {
        CheckStatus::error("Stat queue is closed")
    } else {
        CheckStatus::ok(Some(format!("Capacity: {}", state.stat_sender.capacity())))
    }
}
