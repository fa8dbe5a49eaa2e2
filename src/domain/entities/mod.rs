//! Core domain entities.
//!
//! - [`Link`] - A short id mapped to its target URL
//! - [`StatRecord`] - One resolve attempt, hit or miss
//!
//! Creation inputs live next to their entity (`NewStat`); links are created
//! from an id and a URL directly.

pub mod link;
pub mod stat;

pub use link::Link;
pub use stat::{NewStat, STAT_HIT, STAT_MISS, StatRecord};
