//! `/api` route configuration.

use crate::api::handlers::stats_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes nested under `/api`.
///
/// Handlers authenticate themselves through the
/// [`Authenticated`](crate::api::middleware::auth::Authenticated) extractor.
///
/// # Endpoints
///
/// - `GET /stats/{id}` - Stat records for a short link
pub fn api_routes() -> Router<AppState> {
    Router::new().route("/stats/{id}", get(stats_handler))
}
