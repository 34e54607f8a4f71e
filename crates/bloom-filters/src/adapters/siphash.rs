//! SipHash-1-3 seed hasher
//!
//! The chained seed becomes the first SipHash key, so every round is keyed
//! by the previous round's output.

use std::hash::Hasher;

use siphasher::sip::SipHasher13;

use crate::ports::SeedHasher;

/// SipHash-1-3 keyed by the chained seed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SipHash13;

impl SeedHasher for SipHash13 {
    #[inline]
    fn mix(&self, key: &[u8], seed: u64) -> u64 {
        let mut hasher = SipHasher13::new_with_keys(seed, 0);
        hasher.write(key);
        hasher.finish()
    }
}
