//! Repository trait definitions for the domain layer.
//!
//! These traits are the storage contract. Implementations live in
//! `crate::infrastructure::persistence`; mock implementations are generated
//! via `mockall` for unit tests.
//!
//! - [`LinkRepository`] - Link lookup and insertion
//! - [`StatsRepository`] - Append-only access log
//! - [`StorageBackend`] - Both of the above plus schema and lifecycle

pub mod link_repository;
pub mod stats_repository;
pub mod storage_backend;

pub use link_repository::LinkRepository;
pub use stats_repository::StatsRepository;
pub use storage_backend::StorageBackend;

#[cfg(test)]
pub use link_repository::MockLinkRepository;
#[cfg(test)]
pub use stats_repository::MockStatsRepository;
