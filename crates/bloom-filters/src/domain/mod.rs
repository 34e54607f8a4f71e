//! Domain Layer - filter structures and layout derivation
//!
//! This layer contains:
//! - Probe sequence generation
//! - Parameter derivation
//! - Bit and counter storage
//! - Basic, counting and partitioned Bloom filters
//! - Configuration
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod any_filter;
pub mod bloom_filter;
pub mod config;
pub mod counting_bloom;
pub mod parameters;
pub mod partitioned;
pub mod probe;
pub mod storage;

pub use any_filter::{AnyBloomFilter, FilterKind};
pub use bloom_filter::BasicBloomFilter;
pub use config::{BloomConfig, BloomConfigBuilder, Sizing};
pub use counting_bloom::CountingBloomFilter;
pub use parameters::{
    calculate_fpr, FilterConfig, BIT_SLOT_WIDTH, COUNTER_SLOT_WIDTH, MAX_NUM_BYTES,
};
pub use partitioned::PartitionedBloomFilter;
pub use probe::{probe_positions, ProbeSequence, INITIAL_SEED};
pub use storage::MAX_COUNTER;
