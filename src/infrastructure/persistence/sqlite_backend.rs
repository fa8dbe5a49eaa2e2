//! SQLite implementation of the storage backend.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::FromRow;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use super::PoolSettings;
use crate::domain::entities::{Link, NewStat, StatRecord};
use crate::domain::repositories::{LinkRepository, StatsRepository, StorageBackend};
use crate::error::AppError;

const CREATE_LINKS: &str = r#"
    CREATE TABLE IF NOT EXISTS links (
        id  TEXT PRIMARY KEY NOT NULL,
        url TEXT NOT NULL
    )
"#;

const CREATE_STATS: &str = r#"
    CREATE TABLE IF NOT EXISTS stats (
        id          TEXT NOT NULL,
        status_code INTEGER NOT NULL,
        headers     TEXT NOT NULL,
        recorded_at TEXT NOT NULL
    )
"#;

#[derive(FromRow)]
struct LinkRow {
    id: String,
    url: String,
}

impl From<LinkRow> for Link {
    fn from(row: LinkRow) -> Self {
        Link::new(row.id, row.url)
    }
}

#[derive(FromRow)]
struct StatRow {
    id: String,
    status_code: i64,
    headers: String,
    recorded_at: DateTime<Utc>,
}

impl TryFrom<StatRow> for StatRecord {
    type Error = AppError;

    fn try_from(row: StatRow) -> Result<Self, Self::Error> {
        let status_code = u16::try_from(row.status_code).map_err(|_| {
            AppError::storage(
                "Corrupt stat row",
                json!({ "id": row.id, "status_code": row.status_code }),
            )
        })?;

        Ok(StatRecord {
            id: row.id,
            status_code,
            headers: row.headers,
            recorded_at: row.recorded_at,
        })
    }
}

/// Durable backend over an SQLite file.
///
/// Id uniqueness is enforced by the `links` primary key, so concurrent
/// inserts for the same id resolve inside SQLite and the loser gets
/// [`AppError::Conflict`].
pub struct SqliteBackend {
    pool: SqlitePool,
}

impl SqliteBackend {
    /// Opens a pool for `descriptor` (`sqlite://file.db`, `sqlite::memory:`, ...).
    ///
    /// The database file is created if it does not exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Configuration`] if the descriptor is not a valid
    /// SQLite URL and [`AppError::Storage`] if the pool cannot connect.
    pub async fn connect(descriptor: &str, settings: &PoolSettings) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(descriptor)
            .map_err(|e| {
                AppError::configuration(
                    "Invalid SQLite descriptor",
                    json!({ "reason": e.to_string() }),
                )
            })?
            .create_if_missing(true);

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(settings.max_connections)
            .acquire_timeout(Duration::from_secs(settings.connect_timeout));

        // An in-memory database lives only as long as one of its connections.
        pool_options = if descriptor.contains(":memory:") {
            pool_options
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options
                .idle_timeout(Duration::from_secs(settings.idle_timeout))
                .max_lifetime(Duration::from_secs(settings.max_lifetime))
        };

        let pool = pool_options.connect_with(options).await?;
        debug!("SQLite pool opened");

        Ok(Self { pool })
    }
}

#[async_trait]
impl LinkRepository for SqliteBackend {
    async fn get_link_by_id(&self, id: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>("SELECT id, url FROM links WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(Link::from))
    }

    async fn get_link_by_url(&self, url: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            "SELECT id, url FROM links WHERE url = ? ORDER BY rowid LIMIT 1",
        )
        .bind(url)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Link::from))
    }

    async fn insert_link(&self, id: &str, url: &str) -> Result<Link, AppError> {
        sqlx::query("INSERT INTO links (id, url) VALUES (?, ?)")
            .bind(id)
            .bind(url)
            .execute(&self.pool)
            .await?;

        Ok(Link::new(id, url))
    }
}

#[async_trait]
impl StatsRepository for SqliteBackend {
    async fn append_stat(&self, new_stat: NewStat) -> Result<StatRecord, AppError> {
        let recorded_at = Utc::now();

        sqlx::query(
            "INSERT INTO stats (id, status_code, headers, recorded_at) VALUES (?, ?, ?, ?)",
        )
        .bind(&new_stat.id)
        .bind(i64::from(new_stat.status_code))
        .bind(&new_stat.headers)
        .bind(recorded_at)
        .execute(&self.pool)
        .await?;

        Ok(new_stat.into_record(recorded_at))
    }

    async fn stats_for_id(&self, id: &str) -> Result<Vec<StatRecord>, AppError> {
        let rows = sqlx::query_as::<_, StatRow>(
            r#"
            SELECT id, status_code, headers, recorded_at
            FROM stats
            WHERE id = ?
            ORDER BY rowid
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(StatRecord::try_from).collect()
    }

    async fn count_stats(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stats")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl StorageBackend for SqliteBackend {
    fn backend_name(&self) -> &'static str {
        "sqlite"
    }

    async fn migrate(&self) -> Result<(), AppError> {
        sqlx::query(CREATE_LINKS).execute(&self.pool).await?;
        sqlx::query(CREATE_STATS).execute(&self.pool).await?;
        Ok(())
    }

    async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
