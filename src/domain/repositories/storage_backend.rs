//! Lifecycle contract shared by every storage variant.

use async_trait::async_trait;

use super::{LinkRepository, StatsRepository};
use crate::error::AppError;

/// A complete storage backend: links, stats, and the lifecycle around them.
///
/// Constructed once at startup by
/// [`crate::infrastructure::persistence::open_backend`] and shared as
/// `Arc<dyn StorageBackend>`. Callers that only need one capability take
/// `Arc<dyn LinkRepository>` or `Arc<dyn StatsRepository>` instead.
#[async_trait]
pub trait StorageBackend: LinkRepository + StatsRepository {
    /// Short name of the variant, e.g. `"sqlite"`.
    fn backend_name(&self) -> &'static str;

    /// Creates the `links` and `stats` tables if they are missing.
    ///
    /// Idempotent.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the schema cannot be created.
    async fn migrate(&self) -> Result<(), AppError>;

    /// Performs a cheap round trip to the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] if the store is unreachable.
    async fn health_check(&self) -> Result<(), AppError>;

    /// Releases connections. Further calls fail or are no-ops.
    async fn close(&self);
}
