//! Handler for per-link statistics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::{StatItem, StatsResponse};
use crate::api::middleware::auth::Authenticated;
use crate::error::AppError;
use crate::state::AppState;

/// Returns every stat record for an id.
///
/// # Endpoint
///
/// `GET /api/stats/{id}`
///
/// # Response
///
/// ```json
/// {
///   "id": "abc",
///   "total": 1,
///   "items": [
///     {
///       "status_code": 200,
///       "headers": { "user-agent": "curl/8.0" },
///       "recorded_at": "2024-01-01T00:00:00Z"
///     }
///   ]
/// }
/// ```
///
/// Unknown ids return an empty list. Requires the shared secret.
pub async fn stats_handler(
    _auth: Authenticated,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let records = state.stats_service.stats_for_id(&id).await?;

    Ok(Json(StatsResponse {
        id,
        total: records.len(),
        items: records.into_iter().map(StatItem::from).collect(),
    }))
}
