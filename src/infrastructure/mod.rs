//! Infrastructure layer: concrete storage behind the domain repository traits.

pub mod persistence;
