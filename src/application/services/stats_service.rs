//! Access statistics queries.

use std::sync::Arc;

use crate::domain::entities::StatRecord;
use crate::domain::repositories::StatsRepository;
use crate::error::AppError;

/// Read side of the stat log. Writes go through the background worker.
pub struct StatsService<R: StatsRepository + ?Sized> {
    repository: Arc<R>,
}

impl<R: StatsRepository + ?Sized> StatsService<R> {
    pub fn new(repository: Arc<R>) -> Self {
        Self { repository }
    }

    /// Returns every record for `id`, oldest first.
    ///
    /// An id that was never looked up yields an empty list, not an error.
    pub async fn stats_for_id(&self, id: &str) -> Result<Vec<StatRecord>, AppError> {
        self.repository.stats_for_id(id).await
    }
}
