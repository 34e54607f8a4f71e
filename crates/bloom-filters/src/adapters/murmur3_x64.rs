//! MurmurHash3 seed hasher
//!
//! Wraps the `murmur3` crate. x64_128 takes a 32-bit seed, so the 64-bit
//! chained seed is folded before hashing and the 128-bit result is folded
//! back down to 64 bits.

use std::io::Cursor;

use crate::ports::SeedHasher;

/// MurmurHash3 x64_128, folded to 64 bits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Murmur3;

impl SeedHasher for Murmur3 {
    #[inline]
    fn mix(&self, key: &[u8], seed: u64) -> u64 {
        let folded_seed = (seed ^ (seed >> 32)) as u32;
        let mut cursor = Cursor::new(key);

        // Reading from an in-memory cursor cannot fail
        let hash = murmur3::murmur3_x64_128(&mut cursor, folded_seed).unwrap_or(0);
        (hash as u64) ^ ((hash >> 64) as u64)
    }
}
