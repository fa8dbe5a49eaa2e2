//! Top-level router.
//!
//! # Route Structure
//!
//! - `POST /`                - Shorten with a generated id (secret required)
//! - `GET  /health`          - Health check (public)
//! - `GET  /{id}`            - Redirect and record a stat (public)
//! - `POST /{id}`            - Shorten under an explicit id (secret required)
//! - `GET  /api/stats/{id}`  - Stat records (secret required)
//!
//! Static segments win over `/{id}`, which is why `health` and `api` are
//! reserved ids.

use crate::api;
use crate::api::handlers::{
    health_handler, redirect_handler, shorten_handler, shorten_with_id_handler,
};
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use axum::routing::{get, post};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", post(shorten_handler))
        .route("/health", get(health_handler))
        .route("/{id}", get(redirect_handler).post(shorten_with_id_handler))
        .nest("/api", api::routes::api_routes())
        .with_state(state)
        .layer(tracing::layer())
}
