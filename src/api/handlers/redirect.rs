//! Handler for short link resolution.

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    response::Response,
};
use serde_json::json;
use tracing::debug;

use crate::api::handlers::location::temporary;
use crate::domain::entities::{STAT_HIT, STAT_MISS};
use crate::domain::stat_event::StatEvent;
use crate::domain::stat_worker::enqueue;
use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short id to its URL.
///
/// # Endpoint
///
/// `GET /{id}`
///
/// # Stat Recording
///
/// Every lookup queues one stat event carrying the request headers, hit or
/// miss. The write happens in the background worker and never delays the
/// response.
///
/// # Errors
///
/// Returns 404 ("Sorry can't find that!") if the id is unknown.
pub async fn redirect_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let link = state.link_service.resolve(&id).await?;

    let status = if link.is_some() { STAT_HIT } else { STAT_MISS };
    enqueue(&state.stat_sender, StatEvent::new(id.as_str(), status, &headers));

    match link {
        Some(link) => {
            metrics::counter!("redirects_total", "outcome" => "hit").increment(1);
            temporary(&link.url)
        }
        None => {
            metrics::counter!("redirects_total", "outcome" => "miss").increment(1);
            debug!(id = %id, "Short link not found");
            Err(AppError::not_found(
                "Sorry can't find that!",
                json!({ "id": id }),
            ))
        }
    }
}
