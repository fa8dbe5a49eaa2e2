//! In-memory implementation of the storage backend.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, NewStat, StatRecord};
use crate::domain::repositories::{LinkRepository, StatsRepository, StorageBackend};
use crate::error::AppError;

#[derive(Debug, Default)]
struct LinkTable {
    by_id: HashMap<String, String>,
    /// First id stored for each URL, used for de-duplication.
    by_url: HashMap<String, String>,
}

/// Process-local backend. Nothing survives a restart.
///
/// Each table sits behind its own `RwLock`. `insert_link` holds the write
/// lock across the existence check and the write, which is what makes
/// concurrent inserts for one id race-free.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    links: RwLock<LinkTable>,
    stats: RwLock<Vec<StatRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryBackend {
    async fn get_link_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        let links = self.links.read().await;
        Ok(links.by_id.get(id).map(|url| Link::new(id, url.as_str())))
    }

    async fn get_link_by_url(&self, url: &str) -> Result<Option<Link>, AppError> {
        let links = self.links.read().await;
        Ok(links.by_url.get(url).map(|id| Link::new(id.as_str(), url)))
    }

    async fn insert_link(&self, id: &str, url: &str) -> Result<Link, AppError> {
        let mut links = self.links.write().await;

        if links.by_id.contains_key(id) {
            return Err(AppError::conflict(
                "Already a URL with that id!",
                json!({ "id": id }),
            ));
        }

        links.by_id.insert(id.to_string(), url.to_string());
        links
            .by_url
            .entry(url.to_string())
            .or_insert_with(|| id.to_string());

        Ok(Link::new(id, url))
    }
}

#[async_trait]
impl StatsRepository for MemoryBackend {
    async fn append_stat(&self, new_stat: NewStat) -> Result<StatRecord, AppError> {
        let record = new_stat.into_record(Utc::now());
        self.stats.write().await.push(record.clone());
        Ok(record)
    }

    async fn stats_for_id(&self, id: &str) -> Result<Vec<StatRecord>, AppError> {
        let stats = self.stats.read().await;
        Ok(stats.iter().filter(|s| s.id == id).cloned().collect())
    }

    async fn count_stats(&self) -> Result<i64, AppError> {
        let stats = self.stats.read().await;
        Ok(stats.len() as i64)
    }
}

#[async_trait]
impl StorageBackend for MemoryBackend {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn migrate(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        Ok(())
    }

    async fn close(&self) {}
}
