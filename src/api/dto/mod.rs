//! Response bodies for the JSON endpoints.

pub mod health;
pub mod stats;
