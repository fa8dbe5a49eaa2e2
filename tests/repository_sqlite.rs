use linkshort::domain::entities::{Link, NewStat};
use linkshort::domain::repositories::{LinkRepository, StatsRepository, StorageBackend};
use linkshort::error::AppError;
use linkshort::infrastructure::persistence::{PoolSettings, SqliteBackend, open_backend};
use std::sync::Arc;
use tempfile::TempDir;

async fn file_backend(dir: &TempDir) -> Arc<dyn StorageBackend> {
    let descriptor = format!("sqlite://{}", dir.path().join("urls.db").display());
    let backend = open_backend(&descriptor, &PoolSettings::default())
        .await
        .unwrap();
    backend.migrate().await.unwrap();
    backend
}

fn stat(id: &str, status_code: u16) -> NewStat {
    NewStat {
        id: id.to_string(),
        status_code,
        headers: r#"{"host":"localhost"}"#.to_string(),
    }
}

#[tokio::test]
async fn test_insert_and_get() {
    let dir = TempDir::new().unwrap();
    let backend = file_backend(&dir).await;

    let link = backend
        .insert_link("abc", "https://example.com")
        .await
        .unwrap();
    assert_eq!(link, Link::new("abc", "https://example.com"));

    assert_eq!(
        backend.get_link_by_id("abc").await.unwrap(),
        Some(link.clone())
    );
    assert_eq!(
        backend.get_link_by_url("https://example.com").await.unwrap(),
        Some(link)
    );
    assert!(backend.get_link_by_id("nope").await.unwrap().is_none());
}

#[tokio::test]
async fn test_duplicate_id_is_conflict() {
    let dir = TempDir::new().unwrap();
    let backend = file_backend(&dir).await;

    backend.insert_link("taken", "http://first.test").await.unwrap();

    let result = backend.insert_link("taken", "http://second.test").await;
    assert!(matches!(result, Err(AppError::Conflict { .. })));

    let link = backend.get_link_by_id("taken").await.unwrap().unwrap();
    assert_eq!(link.url, "http://first.test");
}

#[tokio::test]
async fn test_url_lookup_returns_oldest() {
    let dir = TempDir::new().unwrap();
    let backend = file_backend(&dir).await;

    backend.insert_link("one", "http://same.test").await.unwrap();
    backend.insert_link("two", "http://same.test").await.unwrap();

    let link = backend.get_link_by_url("http://same.test").await.unwrap().unwrap();
    assert_eq!(link.id, "one");
}

#[tokio::test]
async fn test_stats_append_and_query() {
    let dir = TempDir::new().unwrap();
    let backend = file_backend(&dir).await;

    backend.append_stat(stat("a", 200)).await.unwrap();
    backend.append_stat(stat("missing", 404)).await.unwrap();
    backend.append_stat(stat("a", 200)).await.unwrap();

    assert_eq!(backend.count_stats().await.unwrap(), 3);

    let records = backend.stats_for_id("a").await.unwrap();
    assert_eq!(records.len(), 2);
    assert!(records[0].recorded_at <= records[1].recorded_at);
    assert_eq!(records[0].headers, r#"{"host":"localhost"}"#);

    let missing = backend.stats_for_id("missing").await.unwrap();
    assert_eq!(missing[0].status_code, 404);
}

#[tokio::test]
async fn test_data_survives_reopen() {
    let dir = TempDir::new().unwrap();

    let backend = file_backend(&dir).await;
    backend.insert_link("kept", "http://kept.test").await.unwrap();
    backend.append_stat(stat("kept", 200)).await.unwrap();
    backend.close().await;

    let reopened = file_backend(&dir).await;
    let link = reopened.get_link_by_id("kept").await.unwrap().unwrap();
    assert_eq!(link.url, "http://kept.test");
    assert_eq!(reopened.count_stats().await.unwrap(), 1);
}

#[tokio::test]
async fn test_migrate_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let backend = file_backend(&dir).await;

    backend.insert_link("x", "http://x.test").await.unwrap();
    backend.migrate().await.unwrap();
    backend.migrate().await.unwrap();

    assert!(backend.get_link_by_id("x").await.unwrap().is_some());
}

#[tokio::test]
async fn test_missing_file_is_created() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("fresh.db");
    assert!(!path.exists());

    let descriptor = format!("sqlite://{}", path.display());
    let backend = SqliteBackend::connect(&descriptor, &PoolSettings::default())
        .await
        .unwrap();
    backend.migrate().await.unwrap();

    assert!(path.exists());
}

#[tokio::test]
async fn test_query_without_schema_is_storage_error() {
    let backend = open_backend("sqlite::memory:", &PoolSettings::default())
        .await
        .unwrap();

    let result = backend.get_link_by_id("abc").await;
    assert!(matches!(result, Err(AppError::Storage { .. })));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_inserts_single_winner() {
    let dir = TempDir::new().unwrap();
    let backend = file_backend(&dir).await;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let backend = backend.clone();
            tokio::spawn(async move {
                backend
                    .insert_link("race", &format!("http://racer{i}.test"))
                    .await
            })
        })
        .collect();

    let mut successes = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(AppError::Conflict { .. }) => conflicts += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(successes, 1);
    assert_eq!(conflicts, 7);
}
