//! Basic Bloom filter over bit storage
//!
//! INVARIANTS:
//! - No false negatives: if inserted, `may_contain()` MUST return true
//! - Layout is fixed at construction; only `reinitialize_*` replaces it

use std::fmt;

use super::parameters::{FilterConfig, BIT_SLOT_WIDTH};
use super::probe::ProbeSequence;
use super::storage::BitStorage;
use crate::adapters::Murmur64A;
use crate::error::FilterError;
use crate::ports::{MembershipFilter, SeedHasher};

/// Bloom filter for probabilistic membership testing
///
/// A space-efficient set that can report false positives but never false
/// negatives. One bit per slot, k slots per key.
pub struct BasicBloomFilter<H = Murmur64A> {
    /// Bit array storing the filter state
    bits: BitStorage,
    /// Derived layout
    config: FilterConfig,
    /// Inserted-minus-deleted estimate
    element_count: i64,
    hasher: H,
}

impl<H: SeedHasher + Default> BasicBloomFilter<H> {
    /// Create a filter sized for `capacity` elements at `false_positive_prob`
    pub fn with_capacity(capacity: u64, false_positive_prob: f64) -> Result<Self, FilterError> {
        Self::with_capacity_and_hasher(capacity, false_positive_prob, H::default())
    }

    /// Create a filter with an explicit bitmap size and probe-round count
    pub fn with_layout(bitmap_byte_size: u64, num_probe_rounds: u32) -> Result<Self, FilterError> {
        Self::with_layout_and_hasher(bitmap_byte_size, num_probe_rounds, H::default())
    }
}

impl<H: SeedHasher> BasicBloomFilter<H> {
    /// Like `with_capacity`, with a caller-supplied hasher instance
    pub fn with_capacity_and_hasher(
        capacity: u64,
        false_positive_prob: f64,
        hasher: H,
    ) -> Result<Self, FilterError> {
        let config = FilterConfig::from_capacity(capacity, false_positive_prob, BIT_SLOT_WIDTH)?;
        Self::from_config(config, hasher)
    }

    /// Like `with_layout`, with a caller-supplied hasher instance
    pub fn with_layout_and_hasher(
        bitmap_byte_size: u64,
        num_probe_rounds: u32,
        hasher: H,
    ) -> Result<Self, FilterError> {
        let config = FilterConfig::from_layout(bitmap_byte_size, num_probe_rounds, BIT_SLOT_WIDTH)?;
        Self::from_config(config, hasher)
    }

    fn from_config(config: FilterConfig, hasher: H) -> Result<Self, FilterError> {
        let bits = BitStorage::zeroed(config.num_bytes)?;
        config.log_derived("basic");
        Ok(Self {
            bits,
            config,
            element_count: 0,
            hasher,
        })
    }

    /// Discard the current contents and re-derive the layout from a capacity.
    ///
    /// On error the filter is left unchanged.
    pub fn reinitialize_with_capacity(
        &mut self,
        capacity: u64,
        false_positive_prob: f64,
    ) -> Result<(), FilterError> {
        let config = FilterConfig::from_capacity(capacity, false_positive_prob, BIT_SLOT_WIDTH)?;
        self.replace_layout(config)
    }

    /// Discard the current contents and adopt an explicit layout.
    ///
    /// On error the filter is left unchanged.
    pub fn reinitialize_with_layout(
        &mut self,
        bitmap_byte_size: u64,
        num_probe_rounds: u32,
    ) -> Result<(), FilterError> {
        let config = FilterConfig::from_layout(bitmap_byte_size, num_probe_rounds, BIT_SLOT_WIDTH)?;
        self.replace_layout(config)
    }

    fn replace_layout(&mut self, config: FilterConfig) -> Result<(), FilterError> {
        self.bits = BitStorage::zeroed(config.num_bytes)?;
        config.log_derived("basic");
        self.config = config;
        self.element_count = 0;
        Ok(())
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// The hasher this filter probes with
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

impl<H: SeedHasher> MembershipFilter for BasicBloomFilter<H> {
    /// Set the k probed bits, counting how many were already set.
    ///
    /// Returns `true` (and bumps the element count) when fewer than k were.
    fn insert<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) -> bool {
        let k = self.config.num_probe_rounds;
        let num_bits = self.config.num_slots;

        let mut already_set = 0u32;
        for seed in ProbeSequence::new(&self.hasher, key.as_ref(), k) {
            if self.bits.test_and_set((seed % num_bits) as usize) {
                already_set += 1;
            }
        }

        let is_new = already_set < k;
        if is_new {
            self.element_count = self.element_count.wrapping_add(1);
        }
        is_new
    }

    fn may_contain<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        let num_bits = self.config.num_slots;
        ProbeSequence::new(&self.hasher, key.as_ref(), self.config.num_probe_rounds)
            .all(|seed| self.bits.get((seed % num_bits) as usize))
    }

    fn clear(&mut self) {
        self.bits.clear();
        self.element_count = 0;
        tracing::debug!(num_bytes = self.config.num_bytes, "Basic Bloom filter cleared");
    }

    fn config(&self) -> &FilterConfig {
        &self.config
    }

    fn element_count(&self) -> i64 {
        self.element_count
    }

    fn set_element_count(&mut self, count: i64) {
        self.element_count = count;
    }

    fn bitmap(&self) -> &[u8] {
        self.bits.as_bytes()
    }

    fn bitmap_mut(&mut self) -> &mut [u8] {
        self.bits.as_bytes_mut()
    }
}

impl<H> fmt::Debug for BasicBloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicBloomFilter")
            .field("config", &self.config)
            .field("element_count", &self.element_count)
            .finish_non_exhaustive()
    }
}
