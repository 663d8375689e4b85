//! HTTP plumbing shared by the sweet shop crates.

pub mod error;
pub mod health;
pub mod json;
pub mod middleware;
pub mod serde;
pub mod tracing;
