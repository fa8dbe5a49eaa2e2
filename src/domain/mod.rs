//! Domain layer: entities, repository contracts, and stat processing.
//!
//! - [`entities`] - Core data structures
//! - [`repositories`] - Storage trait definitions
//! - [`stat_event`] - In-flight access record
//! - [`stat_worker`] - Background stat writer
//!
//! # Stat Processing Flow
//!
//! 1. The redirect handler resolves a link (hit or miss)
//! 2. A [`stat_event::StatEvent`] is queued without waiting
//! 3. [`stat_worker::run_stat_worker`] appends it via [`repositories::StatsRepository`]

pub mod entities;
pub mod repositories;
pub mod stat_event;
pub mod stat_worker;
