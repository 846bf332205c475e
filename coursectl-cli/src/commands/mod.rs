//! Command implementations for coursectl CLI

pub mod data;
pub mod serve;

pub use data::{run_reset, run_seed, run_stats};
pub use serve::run_serve;
