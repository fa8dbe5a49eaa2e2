//! Collision-checked short id allocation.

use std::sync::Arc;

use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_id;

/// How many candidates are tried before giving up.
pub const MAX_ATTEMPTS: usize = 10;

type Generator = Box<dyn Fn() -> String + Send + Sync>;

/// Hands out random ids that are not yet taken in the repository.
pub struct IdAllocator<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    generator: Generator,
    max_attempts: usize,
}

impl<L: LinkRepository + ?Sized> IdAllocator<L> {
    pub fn new(repository: Arc<L>) -> Self {
        Self::with_generator(repository, generate_id)
    }

    /// Creates an allocator drawing candidates from `generator`.
    pub fn with_generator(
        repository: Arc<L>,
        generator: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            repository,
            generator: Box::new(generator),
            max_attempts: MAX_ATTEMPTS,
        }
    }

    /// Draws one candidate and returns it if no link has that id yet.
    async fn free_candidate(&self) -> Result<Option<String>, AppError> {
        let candidate = (self.generator)();

        if self.repository.get_link_by_id(&candidate).await?.is_some() {
            return Ok(None);
        }

        Ok(Some(candidate))
    }

    /// Returns the first generated candidate that has no link yet.
    ///
    /// Check only: the id is not reserved, so a concurrent writer may still
    /// take it before the caller inserts. Creates go through
    /// [`Self::allocate_link`], which checks and stores in one step.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AllocationExhausted`] after [`MAX_ATTEMPTS`]
    /// taken candidates, or [`AppError::Storage`] on backend errors.
    pub async fn allocate(&self) -> Result<String, AppError> {
        for attempt in 1..=self.max_attempts {
            match self.free_candidate().await? {
                Some(candidate) => return Ok(candidate),
                None => tracing::debug!(attempt, "Generated id already taken"),
            }
        }

        Err(self.exhausted())
    }

    /// Allocates an id and stores `url` under it.
    ///
    /// A conflict on insert means another writer took the candidate between
    /// the check and the write; it counts as a spent attempt and a new
    /// candidate is drawn.
    ///
    /// # Errors
    ///
    /// Same as [`Self::allocate`].
    pub async fn allocate_link(&self, url: &str) -> Result<Link, AppError> {
        for attempt in 1..=self.max_attempts {
            let Some(candidate) = self.free_candidate().await? else {
                tracing::debug!(attempt, "Generated id already taken");
                continue;
            };

            match self.repository.insert_link(&candidate, url).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) => {
                    tracing::debug!(attempt, "Generated id taken concurrently");
                }
                Err(e) => return Err(e),
            }
        }

        Err(self.exhausted())
    }

    fn exhausted(&self) -> AppError {
        AppError::AllocationExhausted {
            attempts: self.max_attempts,
        }
    }
}
