//! # Bloom Filters
//!
//! Probabilistic set membership with no false negatives.
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure data structures, no I/O
//!   - `BasicBloomFilter`: One bit per slot
//!   - `CountingBloomFilter`: One 4-bit counter per slot, supports delete
//!   - `PartitionedBloomFilter`: One bitmap partition per probe round
//!   - `FilterConfig`: Layout derived from capacity/FPR or given explicitly
//!   - `BloomConfig`: Serde-loadable configuration with validation
//!   - `BloomConfigBuilder`: Fluent builder for configuration
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `MembershipFilter`: Driving port implemented by every filter
//!   - `DeletableFilter`: Driving port for filters that support delete
//!   - `SeedHasher`: Driven port, the seeded 64-bit mixing function
//!
//! - **Adapters Layer** (`adapters/`): `SeedHasher` implementations
//!   - `Murmur64A` (default), `Murmur3`, `SipHash13`
//!
//! ## Probing
//!
//! A key is probed `k` times. The first round mixes the key with seed 0 and
//! every later round mixes it with the previous round's output:
//!
//! ```text
//! seed_0 = 0
//! seed_i = mix(key, seed_{i-1})    for i = 1..=k
//! slot_i = seed_i mod num_slots
//! ```
//!
//! ## Invariants
//!
//! - No false negatives: after `insert(x)`, `may_contain(x)` is true until
//!   the filter is cleared, reinitialized, or (counting only) `x` is deleted.
//! - Counting filter counters saturate at 15 and never drop below 0.
//!
//! ## Usage Example
//!
//! ```
//! use bloom_filters::{BasicBloomFilter, MembershipFilter};
//!
//! let mut filter: BasicBloomFilter = BasicBloomFilter::with_capacity(1_000_000, 0.01)?;
//! assert_eq!(filter.num_probe_rounds(), 7);
//!
//! filter.insert("aaaa");
//! assert!(filter.may_contain("aaaa"));
//! # Ok::<(), bloom_filters::FilterError>(())
//! ```

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;

// Re-exports for convenience
pub use adapters::{murmur_hash64a, Murmur3, Murmur64A, SipHash13};
pub use domain::{
    AnyBloomFilter, BasicBloomFilter, BloomConfig, BloomConfigBuilder, CountingBloomFilter,
    FilterConfig, FilterKind, PartitionedBloomFilter, ProbeSequence, Sizing,
};
pub use error::FilterError;
pub use ports::{DeletableFilter, MembershipFilter, SeedHasher};
