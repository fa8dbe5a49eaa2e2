//! Repository trait for short link data access.

use crate::domain::entities::Link;
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for reading and writing links.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteBackend`] - durable SQLite file
/// - [`crate::infrastructure::persistence::MemoryBackend`] - process-local maps
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend errors.
    async fn get_link_by_id(&self, id: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link by its target URL.
    ///
    /// Used for de-duplication: a URL that was already shortened keeps its id.
    /// When several ids map to the same URL (explicit-id creates), any one of
    /// them may be returned.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend errors.
    async fn get_link_by_url(&self, url: &str) -> Result<Option<Link>, AppError>;

    /// Stores a new link.
    ///
    /// The existence check and the write are atomic at the backend boundary,
    /// so of two concurrent inserts for one id exactly one succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the id is already taken.
    /// Returns [`AppError::Storage`] on backend errors.
    async fn insert_link(&self, id: &str, url: &str) -> Result<Link, AppError>;
}
