//! # linkshort
//!
//! A small URL shortener built with Axum, storing links in SQLite or in memory.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, repository traits, stat events
//! - **Application Layer** ([`application`]) - Link creation, id allocation, auth
//! - **Infrastructure Layer** ([`infrastructure`]) - SQLite and in-memory backends
//! - **API Layer** ([`api`]) - Handlers, extractors, and middleware
//!
//! ## Features
//!
//! - Random base-36 ids with bounded collision retry, or client-chosen ids
//! - URL de-duplication for generated ids
//! - Per-lookup access statistics written by a background worker
//! - Shared-secret authentication for writes and stats
//!
//! ## Quick Start
//!
//! ```bash
//! export AUTH_HEADER="change-me"
//! export DB="sqlite://urls.db"
//!
//! cargo run -- migrate
//! cargo run
//!
//! curl -i -H 'auth: change-me' -H 'Content-Type: text/plain' \
//!      --data 'https://example.com' http://localhost:3000/
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, IdAllocator, LinkService, StatsService};
    pub use crate::domain::entities::{Link, NewStat, STAT_HIT, STAT_MISS, StatRecord};
    pub use crate::domain::repositories::{LinkRepository, StatsRepository, StorageBackend};
    pub use crate::domain::stat_event::StatEvent;
    pub use crate::error::AppError;
    pub use crate::infrastructure::persistence::{
        MemoryBackend, PoolSettings, SqliteBackend, open_backend,
    };
    pub use crate::state::AppState;
}
