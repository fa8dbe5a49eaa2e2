//! Short id generation and validation utilities.

use crate::error::AppError;
use rand::Rng;
use serde_json::json;

/// Number of random bits behind a generated id.
const ID_BITS: u32 = 56;

const ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Ids that cannot be used as short links because other routes own them.
pub const RESERVED_IDS: &[&str] = &["health", "api"];

/// Generates a random short id.
///
/// The id is the base-36 form of a random 56-bit value, so it is between 1
/// and 11 characters of `0-9a-z`.
///
/// ```ignore
/// let id = generate_id();
/// assert!(id.len() <= 11);
/// ```
pub fn generate_id() -> String {
    let value: u64 = rand::rng().random::<u64>() & ((1u64 << ID_BITS) - 1);
    to_base36(value)
}

/// Encodes `value` in lowercase base 36 without leading zeros.
pub fn to_base36(mut value: u64) -> String {
    if value == 0 {
        return "0".to_string();
    }

    let mut digits = Vec::with_capacity(13);
    while value > 0 {
        digits.push(ALPHABET[(value % 36) as usize]);
        value /= 36;
    }
    digits.reverse();

    // Every byte comes from ALPHABET.
    digits.into_iter().map(char::from).collect()
}

/// Validates a client-chosen id.
///
/// # Rules
///
/// - Non-empty
/// - None of `/ ? #` and no control characters, so the id survives as a
///   single path segment in `Location`
/// - Not one of [`RESERVED_IDS`]
///
/// Any other UTF-8 text is accepted.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_explicit_id(id: &str) -> Result<(), AppError> {
    if id.is_empty() {
        return Err(AppError::bad_request("Id must not be empty", json!({})));
    }

    if id
        .chars()
        .any(|c| c.is_control() || matches!(c, '/' | '?' | '#'))
    {
        return Err(AppError::bad_request(
            "Id contains characters that are not allowed",
            json!({ "id": id }),
        ));
    }

    if RESERVED_IDS.contains(&id) {
        return Err(AppError::bad_request(
            "This id is reserved",
            json!({ "id": id }),
        ));
    }

    Ok(())
}
