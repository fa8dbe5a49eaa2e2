//! Shared-secret authentication extractor.

use axum::{extract::FromRequestParts, http::request::Parts};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Header carrying the shared secret.
pub const AUTH_HEADER: &str = "auth";

/// Proof that the request carried the configured secret.
///
/// Add it as the first argument of a handler to protect that handler only.
/// Routes that share a path with public ones (`GET /{id}` vs `POST /{id}`)
/// can then be protected per method.
///
/// # Header Format
///
/// ```text
/// auth: <secret>
/// ```
///
/// `Authorization: Bearer <secret>` is accepted when no `auth` header is sent.
///
/// # Errors
///
/// Rejects with `401 Unauthorized` ("Authentication failed!") if neither
/// header is present or the token does not match.
#[derive(Debug, Clone, Copy)]
pub struct Authenticated;

impl FromRequestParts<AppState> for Authenticated {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = match parts.headers.get(AUTH_HEADER) {
            Some(value) => value.to_str().ok().map(str::to_owned),
            None => AuthBearer::from_request_parts(parts, &())
                .await
                .ok()
                .map(|AuthBearer(token)| token),
        };

        state.auth_service.authenticate(token.as_deref())?;

        Ok(Authenticated)
    }
}
