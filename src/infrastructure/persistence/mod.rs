//! Storage backends and the factory that picks one from a descriptor.
//!
//! # Backends
//!
//! - [`SqliteBackend`] - durable storage in an SQLite file
//! - [`MemoryBackend`] - process-local maps, lost on restart

pub mod memory_backend;
pub mod sqlite_backend;

pub use memory_backend::MemoryBackend;
pub use sqlite_backend::SqliteBackend;

use std::sync::Arc;

use serde_json::json;
use tracing::info;

use crate::domain::repositories::StorageBackend;
use crate::error::AppError;

/// Descriptor schemes accepted by [`open_backend`].
pub const SUPPORTED_SCHEMES: &[&str] = &["sqlite", "memory"];

/// Connection pool limits for pooled backends. Ignored by [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolSettings {
    pub max_connections: u32,
    /// Seconds to wait for a connection.
    pub connect_timeout: u64,
    /// Seconds.
    pub idle_timeout: u64,
    /// Seconds.
    pub max_lifetime: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            max_connections: 10,
            connect_timeout: 30,
            idle_timeout: 600,
            max_lifetime: 1800,
        }
    }
}

/// Extracts the scheme of a backend descriptor.
///
/// # Errors
///
/// Returns [`AppError::Configuration`] if the descriptor has no scheme.
pub fn descriptor_scheme(descriptor: &str) -> Result<String, AppError> {
    url::Url::parse(descriptor)
        .map(|u| u.scheme().to_string())
        .map_err(|e| {
            AppError::configuration(
                "Invalid database descriptor",
                json!({ "reason": e.to_string() }),
            )
        })
}

/// Opens the backend named by `descriptor` and returns it as a shared handle.
///
/// `sqlite:` descriptors open an SQLite pool, `memory:` descriptors an
/// in-memory store. The backend is not migrated here.
///
/// # Errors
///
/// Returns [`AppError::Configuration`] for an unknown or malformed scheme,
/// or [`AppError::Storage`] if the SQLite pool cannot be opened.
pub async fn open_backend(
    descriptor: &str,
    settings: &PoolSettings,
) -> Result<Arc<dyn StorageBackend>, AppError> {
    let scheme = descriptor_scheme(descriptor)?;

    let backend: Arc<dyn StorageBackend> = match scheme.as_str() {
        "sqlite" => Arc::new(SqliteBackend::connect(descriptor, settings).await?),
        "memory" => Arc::new(MemoryBackend::new()),
        other => {
            return Err(AppError::configuration(
                "Unknown database protocol",
                json!({ "scheme": other, "supported": SUPPORTED_SCHEMES }),
            ));
        }
    };

    info!(backend = backend.backend_name(), "Storage backend opened");
    Ok(backend)
}
