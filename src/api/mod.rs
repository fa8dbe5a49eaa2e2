//! HTTP layer: translates requests into service calls.
//!
//! # Modules
//!
//! - [`dto`] - JSON response bodies
//! - [`extract`] - Body extractors
//! - [`handlers`] - HTTP request handlers
//! - [`middleware`] - Authentication and tracing
//! - [`routes`] - `/api` routes

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod routes;
