//! Probe sequence generation
//!
//! All k probe positions come from one mixing primitive by re-seeding:
//! `seed_0 = 0`, `seed_i = mix(key, seed_{i-1})`. This is not k independent
//! hash functions; positions may be correlated, but only a single hash
//! implementation is needed.

use crate::ports::SeedHasher;

/// Seed fed into the first mixing round
pub const INITIAL_SEED: u64 = 0;

/// Iterator over the k chained seeds of one key
///
/// Yields raw seeds. Callers reduce them into their own addressable range.
#[derive(Clone, Debug)]
pub struct ProbeSequence<'a, H: ?Sized> {
    hasher: &'a H,
    key: &'a [u8],
    seed: u64,
    remaining: u32,
}

impl<'a, H: SeedHasher + ?Sized> ProbeSequence<'a, H> {
    /// Start a sequence of `rounds` seeds for `key`
    pub fn new(hasher: &'a H, key: &'a [u8], rounds: u32) -> Self {
        Self {
            hasher,
            key,
            seed: INITIAL_SEED,
            remaining: rounds,
        }
    }
}

impl<H: SeedHasher + ?Sized> Iterator for ProbeSequence<'_, H> {
    type Item = u64;

    #[inline]
    fn next(&mut self) -> Option<u64> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        self.seed = self.hasher.mix(self.key, self.seed);
        Some(self.seed)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining as usize;
        (n, Some(n))
    }
}

impl<H: SeedHasher + ?Sized> ExactSizeIterator for ProbeSequence<'_, H> {}

/// Compute the k slot positions for a key in a table of `num_slots` slots
pub fn probe_positions<H: SeedHasher + ?Sized>(
    hasher: &H,
    key: &[u8],
    rounds: u32,
    num_slots: u64,
) -> Vec<u64> {
    ProbeSequence::new(hasher, key, rounds)
        .map(|seed| seed % num_slots)
        .collect()
}
