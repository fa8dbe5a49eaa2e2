//! Helpers shared across layers.
//!
//! - [`code_generator`] - short id generation and validation

pub mod code_generator;
