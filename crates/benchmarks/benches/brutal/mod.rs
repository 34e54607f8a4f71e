//! # Brutal Modular Benchmarks
//!
//! These are NOT polite benchmarks: filters run at production sizes with
//! adversarial key patterns and saturated counters.
//!
//! - `filters` - insert, query, delete, layout derivation, bitmap transfer
//! - `hashers` - raw `SeedHasher` throughput and full probe sequences

pub mod filters;
pub mod hashers;
