//! CLI command implementations.

pub mod check;
pub mod common;
pub mod dump;
pub mod schema;
