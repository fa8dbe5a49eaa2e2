use linkshort::domain::repositories::LinkRepository;
use linkshort::error::AppError;
use linkshort::infrastructure::persistence::{PoolSettings, open_backend};

#[tokio::test]
async fn test_memory_descriptors() {
    for descriptor in ["memory:", "memory://"] {
        let backend = open_backend(descriptor, &PoolSettings::default())
            .await
            .unwrap();
        assert_eq!(backend.backend_name(), "memory", "{descriptor}");
    }
}

#[tokio::test]
async fn test_sqlite_descriptor() {
    let dir = tempfile::TempDir::new().unwrap();
    let descriptor = format!("sqlite://{}", dir.path().join("f.db").display());

    let backend = open_backend(&descriptor, &PoolSettings::default())
        .await
        .unwrap();
    assert_eq!(backend.backend_name(), "sqlite");
}

#[tokio::test]
async fn test_backends_share_behaviour() {
    let dir = tempfile::TempDir::new().unwrap();
    let sqlite = format!("sqlite://{}", dir.path().join("shared.db").display());

    for descriptor in ["memory://", sqlite.as_str()] {
        let backend = open_backend(descriptor, &PoolSettings::default())
            .await
            .unwrap();
        backend.migrate().await.unwrap();

        backend.insert_link("same", "http://a.test").await.unwrap();
        assert!(matches!(
            backend.insert_link("same", "http://b.test").await,
            Err(AppError::Conflict { .. })
        ));
        assert_eq!(
            backend.get_link_by_url("http://a.test").await.unwrap().unwrap().id,
            "same"
        );
    }
}

#[tokio::test]
async fn test_unknown_descriptors_rejected() {
    for descriptor in ["postgres://localhost/db", "redis://localhost", "urls.db", ""] {
        let result = open_backend(descriptor, &PoolSettings::default()).await;
        assert!(
            matches!(result, Err(AppError::Configuration { .. })),
            "{descriptor:?} should be rejected"
        );
    }
}
