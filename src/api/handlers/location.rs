//! Redirect response builders.

use axum::{
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;

/// Builds a redirect with the given status.
///
/// `axum::response::Redirect` panics on a location that is not a valid
/// header value, so the header is built here and failures become errors.
pub fn redirect(status: StatusCode, location: &str) -> Result<Response, AppError> {
    let value = HeaderValue::from_bytes(location.as_bytes()).map_err(|_| {
        AppError::bad_request(
            "Location is not a valid header value",
            json!({ "location": location }),
        )
    })?;

    Ok((status, [(header::LOCATION, value)]).into_response())
}

/// `303 See Other`, sent after a create.
pub fn see_other(location: &str) -> Result<Response, AppError> {
    redirect(StatusCode::SEE_OTHER, location)
}

/// `307 Temporary Redirect`, sent on a resolve hit.
pub fn temporary(location: &str) -> Result<Response, AppError> {
    redirect(StatusCode::TEMPORARY_REDIRECT, location)
}
