//! Link creation and lookup service.

use std::sync::Arc;

use crate::application::services::id_allocator::IdAllocator;
use crate::domain::entities::Link;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::validate_explicit_id;
use serde_json::json;

/// Service for creating and resolving short links.
///
/// URLs are stored exactly as received. Auto-assigned creates are
/// de-duplicated by URL; explicit-id creates never are.
pub struct LinkService<L: LinkRepository + ?Sized> {
    repository: Arc<L>,
    allocator: IdAllocator<L>,
}

impl<L: LinkRepository + ?Sized> LinkService<L> {
    pub fn new(repository: Arc<L>) -> Self {
        let allocator = IdAllocator::new(repository.clone());
        Self {
            repository,
            allocator,
        }
    }

    /// Shortens `url` under a generated id.
    ///
    /// If the URL was shortened before, the existing link is returned and
    /// nothing is written.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL has no protocol marker.
    /// Returns [`AppError::AllocationExhausted`] if no free id was found.
    pub async fn shorten(&self, url: &str) -> Result<Link, AppError> {
        validate_target_url(url)?;

        if let Some(existing) = self.repository.get_link_by_url(url).await? {
            metrics::counter!("links_deduplicated_total").increment(1);
            tracing::debug!(id = %existing.id, "URL already shortened");
            return Ok(existing);
        }

        let link = self.allocator.allocate_link(url).await?;

        metrics::counter!("links_created_total").increment(1);
        tracing::info!(id = %link.id, "Link created");

        Ok(link)
    }

    /// Shortens `url` under the client-chosen `id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a bad URL or a reserved id.
    /// Returns [`AppError::Conflict`] if the id is taken, regardless of the
    /// URL stored under it.
    pub async fn shorten_with_id(&self, id: &str, url: &str) -> Result<Link, AppError> {
        validate_target_url(url)?;
        validate_explicit_id(id)?;

        if self.repository.get_link_by_id(id).await?.is_some() {
            return Err(AppError::conflict(
                "Already a URL with that id!",
                json!({ "id": id }),
            ));
        }

        let link = self.repository.insert_link(id, url).await?;

        metrics::counter!("links_created_total").increment(1);
        tracing::info!(id = %link.id, "Link created with explicit id");

        Ok(link)
    }

    /// Looks up the link stored under `id`.
    pub async fn resolve(&self, id: &str) -> Result<Option<Link>, AppError> {
        self.repository.get_link_by_id(id).await
    }
}

/// Checks that a submitted URL is acceptable as a redirect target.
///
/// The protocol check is a substring test for `"http"`, nothing stricter.
/// Control characters are rejected because the URL ends up in a
/// `Location` header.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if either check fails.
pub fn validate_target_url(url: &str) -> Result<(), AppError> {
    if !url.contains("http") {
        return Err(AppError::bad_request("Protocol missing", json!({})));
    }

    if url.chars().any(char::is_control) {
        return Err(AppError::bad_request(
            "URL contains control characters",
            json!({}),
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;

    fn create_test_link(id: &str, url: &str) -> Link {
        Link::new(id, url)
    }

    #[test]
    fn test_validate_target_url() {
        assert!(validate_target_url("http://example.com").is_ok());
        assert!(validate_target_url("https://example.com/path?q=1").is_ok());
        // Weak check: the marker may appear anywhere.
        assert!(validate_target_url("ftp://example.com/http").is_ok());

        let err = validate_target_url("not-a-url").unwrap_err();
        assert_eq!(err.to_string(), "Protocol missing");

        assert!(validate_target_url("").is_err());
        assert!(validate_target_url("http://a.test/\r\nSet-Cookie: x").is_err());
    }

    #[tokio::test]
    async fn test_shorten_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_get_link_by_url()
            .withf(|url| url == "http://example.com")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_get_link_by_id()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert_link()
            .withf(|_, url| url == "http://example.com")
            .times(1)
            .returning(|id, url| Ok(create_test_link(id, url)));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service.shorten("http://example.com").await.unwrap();
        assert_eq!(link.url, "http://example.com");
        assert!(!link.id.is_empty());
    }

    #[tokio::test]
    async fn test_shorten_deduplication() {
        let mut mock_repo = MockLinkRepository::new();

        let existing = create_test_link("existing", "http://example.com");
        mock_repo
            .expect_get_link_by_url()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        mock_repo.expect_insert_link().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service.shorten("http://example.com").await.unwrap();
        assert_eq!(link.id, "existing");
    }

    #[tokio::test]
    async fn test_shorten_protocol_missing() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_get_link_by_url().times(0);
        mock_repo.expect_insert_link().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.shorten("example.com").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_shorten_with_id_success() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_get_link_by_id()
            .withf(|id| id == "mylink")
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert_link()
            .withf(|id, url| id == "mylink" && url == "https://example.com")
            .times(1)
            .returning(|id, url| Ok(create_test_link(id, url)));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service
            .shorten_with_id("mylink", "https://example.com")
            .await
            .unwrap();
        assert_eq!(link.id, "mylink");
    }

    #[tokio::test]
    async fn test_shorten_with_id_conflict() {
        let mut mock_repo = MockLinkRepository::new();

        let existing = create_test_link("taken", "https://other.com");
        mock_repo
            .expect_get_link_by_id()
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));

        mock_repo.expect_insert_link().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.shorten_with_id("taken", "https://other.com").await;

        match result {
            Err(AppError::Conflict { message, .. }) => {
                assert_eq!(message, "Already a URL with that id!");
            }
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_shorten_with_id_insert_race_is_conflict() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_get_link_by_id()
            .times(1)
            .returning(|_| Ok(None));

        mock_repo
            .expect_insert_link()
            .times(1)
            .returning(|_, _| Err(AppError::conflict("Already a URL with that id!", json!({}))));

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.shorten_with_id("race", "http://example.com").await;
        assert!(matches!(result, Err(AppError::Conflict { .. })));
    }

    #[tokio::test]
    async fn test_shorten_with_reserved_id() {
        let mut mock_repo = MockLinkRepository::new();
        mock_repo.expect_get_link_by_id().times(0);

        let service = LinkService::new(Arc::new(mock_repo));

        let result = service.shorten_with_id("health", "http://example.com").await;
        assert!(matches!(result, Err(AppError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_resolve_hit() {
        let mut mock_repo = MockLinkRepository::new();

        mock_repo
            .expect_get_link_by_id()
            .withf(|id| id == "abc")
            .times(1)
            .returning(|id| Ok(Some(create_test_link(id, "http://example.com"))));

        let service = LinkService::new(Arc::new(mock_repo));

        let link = service.resolve("abc").await.unwrap().unwrap();
        assert_eq!(link.url, "http://example.com");
    }
}
