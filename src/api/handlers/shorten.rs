//! Handlers for link creation.

use axum::{
    extract::{Path, State},
    response::Response,
};

use crate::api::extract::PlainText;
use crate::api::handlers::location::see_other;
use crate::api::middleware::auth::Authenticated;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL under a generated id.
///
/// # Endpoint
///
/// `POST /`
///
/// # Request
///
/// ```text
/// auth: <secret>
/// Content-Type: text/plain
///
/// https://example.com
/// ```
///
/// # Response
///
/// `303 See Other` with `Location: <id>`. A URL that was shortened before
/// redirects to its existing id.
///
/// # Errors
///
/// - 401 if the secret is missing or wrong
/// - 400 if the body is not `text/plain` or has no `http` marker
/// - 503 if no free id could be allocated
pub async fn shorten_handler(
    _auth: Authenticated,
    State(state): State<AppState>,
    PlainText(url): PlainText,
) -> Result<Response, AppError> {
    let link = state.link_service.shorten(&url).await?;
    see_other(link.location())
}

/// Shortens a URL under the id given in the path.
///
/// # Endpoint
///
/// `POST /{id}`
///
/// # Errors
///
/// - 401 if the secret is missing or wrong
/// - 400 for a bad body or a reserved id
/// - 409 ("Already a URL with that id!") if the id is taken
pub async fn shorten_with_id_handler(
    _auth: Authenticated,
    State(state): State<AppState>,
    Path(id): Path<String>,
    PlainText(url): PlainText,
) -> Result<Response, AppError> {
    let link = state.link_service.shorten_with_id(&id, &url).await?;
    see_other(link.location())
}
