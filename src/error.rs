//! Application error type and its HTTP mapping.
//!
//! Every fallible operation in the crate returns [`AppError`]. Per-request
//! variants are turned into JSON error responses by the [`IntoResponse`]
//! impl; [`AppError::Configuration`] only ever surfaces at startup.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload returned to clients.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Unknown backend scheme, missing secret or otherwise unusable settings.
    #[error("{message}")]
    Configuration { message: String, details: Value },

    #[error("{message}")]
    Unauthorized { message: String, details: Value },

    #[error("{message}")]
    Validation { message: String, details: Value },

    #[error("{message}")]
    NotFound { message: String, details: Value },

    #[error("{message}")]
    Conflict { message: String, details: Value },

    /// The identifier allocator hit its retry limit.
    #[error("Failed to allocate a unique id after {attempts} attempts")]
    AllocationExhausted { attempts: usize },

    /// The storage backend failed. Never retried.
    #[error("{message}")]
    Storage { message: String, details: Value },
}

impl AppError {
    pub fn configuration(message: impl Into<String>, details: Value) -> Self {
        Self::Configuration {
            message: message.into(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>, details: Value) -> Self {
        Self::Unauthorized {
            message: message.into(),
            details,
        }
    }

    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn conflict(message: impl Into<String>, details: Value) -> Self {
        Self::Conflict {
            message: message.into(),
            details,
        }
    }

    pub fn storage(message: impl Into<String>, details: Value) -> Self {
        Self::Storage {
            message: message.into(),
            details,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Configuration { .. } | AppError::Storage { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Conflict { .. } => StatusCode::CONFLICT,
            AppError::AllocationExhausted { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }

    /// Converts the error into the payload shape used in responses.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (code, details) = match self {
            AppError::Configuration { details, .. } => ("configuration_error", details.clone()),
            AppError::Unauthorized { details, .. } => ("unauthorized", details.clone()),
            AppError::Validation { details, .. } => ("validation_error", details.clone()),
            AppError::NotFound { details, .. } => ("not_found", details.clone()),
            AppError::Conflict { details, .. } => ("conflict", details.clone()),
            AppError::AllocationExhausted { attempts } => {
                ("allocation_exhausted", json!({ "attempts": attempts }))
            }
            // Storage internals stay in the logs.
            AppError::Storage { .. } => ("internal_error", json!({})),
        };

        let message = match self {
            AppError::Storage { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        };

        ErrorInfo {
            code,
            message,
            details,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            AppError::Storage { message, details } => {
                tracing::error!(%details, "Storage failure: {}", message);
            }
            AppError::Configuration { message, .. } => {
                tracing::error!("Configuration error reached a request: {}", message);
            }
            AppError::AllocationExhausted { attempts } => {
                tracing::error!(attempts, "Identifier allocation exhausted");
            }
            _ => {}
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        map_sqlx_error(e)
    }
}

/// Maps driver errors onto the taxonomy: unique violations become
/// [`AppError::Conflict`], everything else is a storage failure.
pub fn map_sqlx_error(e: sqlx::Error) -> AppError {
    if let Some(db) = e.as_database_error()
        && db.is_unique_violation()
    {
        return AppError::conflict(
            "Already a URL with that id!",
            json!({ "constraint": db.constraint() }),
        );
    }

    AppError::storage("Database error", json!({ "reason": e.to_string() }))
}
