//! Custom request body extractors.

use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};
use serde_json::json;

use crate::error::AppError;

/// A `text/plain` request body decoded as UTF-8.
///
/// # Errors
///
/// Rejects with `400 Bad Request` ("Expecting Content-Type: text/plain")
/// when the content type is anything else or the body is not UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlainText(pub String);

fn expecting_plain_text(reason: &str) -> AppError {
    AppError::bad_request(
        "Expecting Content-Type: text/plain",
        json!({ "reason": reason }),
    )
}

/// Matches the media type, ignoring parameters such as `charset`.
fn is_plain_text(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("text/plain"))
}

impl<S> FromRequest<S> for PlainText
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if !is_plain_text(content_type) {
            return Err(expecting_plain_text("unsupported content type"));
        }

        let bytes = Bytes::from_request(req, state).await.map_err(|e| {
            AppError::bad_request(
                "Failed to read request body",
                json!({ "reason": e.body_text() }),
            )
        })?;

        let text = String::from_utf8(bytes.to_vec())
            .map_err(|_| expecting_plain_text("body is not valid UTF-8"))?;

        Ok(PlainText(text))
    }
}
