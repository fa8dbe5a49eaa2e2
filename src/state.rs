//! Shared state injected into every handler.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::application::services::{AuthService, LinkService, StatsService};
use crate::domain::repositories::{LinkRepository, StatsRepository, StorageBackend};
use crate::domain::stat_event::StatEvent;

/// Application state cloned per request.
///
/// Everything is behind `Arc`, so cloning is cheap. The storage backend is
/// opened once at startup and shared by all services.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService<dyn LinkRepository>>,
    pub stats_service: Arc<StatsService<dyn StatsRepository>>,
    pub auth_service: Arc<AuthService>,
    pub backend: Arc<dyn StorageBackend>,
    pub stat_sender: mpsc::Sender<StatEvent>,
}

impl AppState {
    pub fn new(
        backend: Arc<dyn StorageBackend>,
        auth_service: AuthService,
        stat_sender: mpsc::Sender<StatEvent>,
    ) -> Self {
        let links: Arc<dyn LinkRepository> = backend.clone();
        let stats: Arc<dyn StatsRepository> = backend.clone();

        Self {
            link_service: Arc::new(LinkService::new(links)),
            stats_service: Arc::new(StatsService::new(stats)),
            auth_service: Arc::new(auth_service),
            backend,
            stat_sender,
        }
    }
}
