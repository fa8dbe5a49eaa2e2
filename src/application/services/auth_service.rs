//! Shared-secret authentication.

use hmac::{Hmac, Mac};
use sha2::Sha256;

use crate::error::AppError;
use serde_json::json;

type HmacSha256 = Hmac<Sha256>;

/// Checks request tokens against the configured secret.
///
/// Tokens are never compared directly. Both sides are run through
/// HMAC-SHA256 keyed by the secret and the tags are compared in constant
/// time.
#[derive(Clone)]
pub struct AuthService {
    secret: Vec<u8>,
    expected_tag: Vec<u8>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService").finish_non_exhaustive()
    }
}

impl AuthService {
    /// Creates the service for `secret`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if the secret is empty.
    pub fn new(secret: &str) -> Result<Self, AppError> {
        if secret.is_empty() {
            return Err(AppError::configuration(
                "AUTH_HEADER must not be empty",
                json!({}),
            ));
        }

        let secret = secret.as_bytes().to_vec();
        let expected_tag = mac_for(&secret)?
            .chain_update(&secret)
            .finalize()
            .into_bytes()
            .to_vec();

        Ok(Self {
            secret,
            expected_tag,
        })
    }

    /// Authenticates a request token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is missing or wrong.
    pub fn authenticate(&self, token: Option<&str>) -> Result<(), AppError> {
        let Some(token) = token else {
            return Err(failed("Missing token"));
        };

        mac_for(&self.secret)?
            .chain_update(token.as_bytes())
            .verify_slice(&self.expected_tag)
            .map_err(|_| failed("Invalid token"))
    }
}

fn mac_for(key: &[u8]) -> Result<HmacSha256, AppError> {
    HmacSha256::new_from_slice(key).map_err(|e| {
        AppError::configuration("Unusable auth secret", json!({ "reason": e.to_string() }))
    })
}

fn failed(reason: &str) -> AppError {
    AppError::unauthorized("Authentication failed!", json!({ "reason": reason }))
}
