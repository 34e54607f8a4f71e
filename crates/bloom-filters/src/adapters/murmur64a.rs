//! MurmurHash64A seed hasher
//!
//! The default mixing function. Reads the key in little-endian 8-byte
//! words so results are identical across platforms.

use crate::ports::SeedHasher;

const M: u64 = 0xc6a4_a793_5bd1_e995;
const R: u32 = 47;

/// MurmurHash64A with a full 64-bit seed
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Murmur64A;

/// Hash `data` with MurmurHash64A under `seed`
#[inline]
pub fn murmur_hash64a(data: &[u8], seed: u64) -> u64 {
    let mut h = seed ^ (data.len() as u64).wrapping_mul(M);

    let mut chunks = data.chunks_exact(8);
    for chunk in &mut chunks {
        let mut word = [0u8; 8];
        word.copy_from_slice(chunk);
        let mut k = u64::from_le_bytes(word);

        k = k.wrapping_mul(M);
        k ^= k >> R;
        k = k.wrapping_mul(M);

        h ^= k;
        h = h.wrapping_mul(M);
    }

    let tail = chunks.remainder();
    if !tail.is_empty() {
        for (i, &byte) in tail.iter().enumerate() {
            h ^= (byte as u64) << (8 * i);
        }
        h = h.wrapping_mul(M);
    }

    h ^= h >> R;
    h = h.wrapping_mul(M);
    h ^= h >> R;
    h
}

impl SeedHasher for Murmur64A {
    #[inline]
    fn mix(&self, key: &[u8], seed: u64) -> u64 {
        murmur_hash64a(key, seed)
    }
}
