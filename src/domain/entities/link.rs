//! Link entity representing a shortened URL mapping.

/// A mapping from a short identifier to its target URL.
///
/// Links are immutable once stored: there is no update path, and writing an
/// id that already exists is rejected by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: String,
    pub url: String,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
        }
    }

    /// Relative redirect target pointing at this link's resolve route.
    pub fn location(&self) -> &str {
        &self.id
    }
}
