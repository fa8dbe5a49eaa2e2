//! Repository trait for access statistics.

use crate::domain::entities::{NewStat, StatRecord};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for the append-only stats log.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::SqliteBackend`]
/// - [`crate::infrastructure::persistence::MemoryBackend`]
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StatsRepository: Send + Sync {
    /// Appends one record. The id does not have to exist as a link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend errors.
    async fn append_stat(&self, new_stat: NewStat) -> Result<StatRecord, AppError>;

    /// Returns all records for an id, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend errors.
    async fn stats_for_id(&self, id: &str) -> Result<Vec<StatRecord>, AppError>;

    /// Counts every record in the log.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Storage`] on backend errors.
    async fn count_stats(&self) -> Result<i64, AppError>;
}
