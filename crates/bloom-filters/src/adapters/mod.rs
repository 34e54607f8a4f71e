//! Adapters Layer (Driven Adapters)
//!
//! Implementations of the `SeedHasher` port.
//!
//! ## Adapters
//!
//! - `Murmur64A` - MurmurHash64A, the default for every filter
//! - `Murmur3` - MurmurHash3 x64_128 via the `murmur3` crate
//! - `SipHash13` - SipHash-1-3 via the `siphasher` crate

pub mod murmur3_x64;
pub mod murmur64a;
pub mod siphash;

pub use murmur3_x64::Murmur3;
pub use murmur64a::{murmur_hash64a, Murmur64A};
pub use siphash::SipHash13;
