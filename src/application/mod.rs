//! Application layer services.
//!
//! Services consume the repository traits and give handlers a small API.
//!
//! - [`services::link_service::LinkService`] - Create and resolve short links
//! - [`services::id_allocator::IdAllocator`] - Collision-checked random ids
//! - [`services::stats_service::StatsService`] - Stat log queries
//! - [`services::auth_service::AuthService`] - Shared-secret check

pub mod services;
