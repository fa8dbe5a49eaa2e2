#![allow(dead_code)]

use axum_test::TestServer;
use std::sync::Arc;
use tokio::sync::mpsc;
use linkshort::application::services::AuthService;
use linkshort::domain::repositories::{StatsRepository, StorageBackend};
use linkshort::domain::stat_event::StatEvent;
use linkshort::infrastructure::persistence::MemoryBackend;
use linkshort::routes::app_router;
use linkshort::state::AppState;

pub const SECRET: &str = "test-secret";

pub fn create_test_state(
    backend: Arc<dyn StorageBackend>,
) -> (AppState, mpsc::Receiver<StatEvent>) {
    let (tx, rx) = mpsc::channel(100);
    let auth_service = AuthService::new(SECRET).unwrap();

    (AppState::new(backend, auth_service, tx), rx)
}

/// A server over a fresh in-memory backend. Stat events stay in `rx` until
/// [`TestApp::drain_stats`] writes them.
pub struct TestApp {
    pub server: TestServer,
    pub backend: Arc<dyn StorageBackend>,
    pub rx: mpsc::Receiver<StatEvent>,
}

impl TestApp {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        let (state, rx) = create_test_state(backend.clone());
        let server = TestServer::new(app_router(state)).unwrap();

        Self { server, backend, rx }
    }

    pub fn memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()))
    }

    /// Writes every queued stat event to the backend, returning how many.
    pub async fn drain_stats(&mut self) -> usize {
        let mut written = 0;
        while let Ok(event) = self.rx.try_recv() {
            self.backend
                .append_stat(event.into_new_stat())
                .await
                .unwrap();
            written += 1;
        }
        written
    }

    /// `POST /` with the secret and a text body.
    pub async fn shorten(&self, url: &str) -> axum_test::TestResponse {
        self.server
            .post("/")
            .add_header("auth", SECRET)
            .text(url.to_string())
            .await
    }

    /// `POST /{id}` with the secret and a text body.
    pub async fn shorten_with_id(&self, id: &str, url: &str) -> axum_test::TestResponse {
        self.server
            .post(&format!("/{id}"))
            .add_header("auth", SECRET)
            .text(url.to_string())
            .await
    }
}

pub fn location(response: &axum_test::TestResponse) -> String {
    response
        .header("location")
        .to_str()
        .unwrap()
        .to_string()
}
