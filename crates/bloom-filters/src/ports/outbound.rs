//! Outbound Ports (Driven Ports)
//!
//! The hash-mixing function is the only collaborator a filter depends on.
//! It is injected as a type parameter so the probe loop is monomorphized
//! and the hot path has no indirection.

/// Seeded, non-cryptographic hash mixing (Driven Port)
///
/// Implementations must be pure: the same `(key, seed)` always yields the
/// same output. Filters chain the output of one call into the seed of the
/// next to derive every probe position from this single primitive.
pub trait SeedHasher {
    /// Mix `key` under `seed` into a new 64-bit seed
    fn mix(&self, key: &[u8], seed: u64) -> u64;
}

impl<H: SeedHasher + ?Sized> SeedHasher for &H {
    #[inline]
    fn mix(&self, key: &[u8], seed: u64) -> u64 {
        (**self).mix(key, seed)
    }
}
