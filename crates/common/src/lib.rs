//! Shared building blocks for the seller panel crates: logging setup,
//! Prometheus metrics and small wire types.

pub mod types;
pub mod utils;
pub mod metrics;
