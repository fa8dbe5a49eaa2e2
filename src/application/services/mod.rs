//! Business logic services for the application layer.

pub mod auth_service;
pub mod id_allocator;
pub mod link_service;
pub mod stats_service;

pub use auth_service::AuthService;
pub use id_allocator::IdAllocator;
pub use link_service::LinkService;
pub use stats_service::StatsService;
