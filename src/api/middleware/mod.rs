//! Request processing shared by the handlers.
//!
//! Provides authentication and observability.

pub mod auth;
pub mod tracing;
