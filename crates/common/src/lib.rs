//! Shared building blocks used by every crate in the workspace:
//! tracing subscriber setup and small wire types.

pub mod types;
pub mod utils;
