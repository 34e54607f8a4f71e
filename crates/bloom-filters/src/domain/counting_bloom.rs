//! # Counting Bloom Filter
//!
//! Allows removal without a full rebuild.
//!
//! ## Problem
//!
//! Standard Bloom filters are insert-only. Clearing a single key would
//! clear bits shared with other keys and introduce false negatives.
//!
//! ## Solution: Counting Bloom Filter (CBF)
//!
//! Replace bits with 4-bit counters packed two per byte:
//! - Insert: Increment counters at probed positions (saturating at 15)
//! - Delete: Decrement counters at probed positions (saturating at 0)
//! - Membership: True if all probed counters > 0
//!
//! A counter that saturates at 15 stays there; it never wraps to 0, which
//! would make a still-present key look deleted.

use std::fmt;

use super::parameters::{FilterConfig, COUNTER_SLOT_WIDTH};
use super::probe::ProbeSequence;
use super::storage::CounterStorage;
use crate::adapters::Murmur64A;
use crate::error::FilterError;
use crate::ports::{DeletableFilter, MembershipFilter, SeedHasher};

/// Counting Bloom Filter with 4-bit counters.
///
/// Supports both insert AND delete, unlike the basic filter.
pub struct CountingBloomFilter<H = Murmur64A> {
    /// 4-bit counters packed into bytes (2 counters per byte)
    counters: CounterStorage,
    /// Derived layout
    config: FilterConfig,
    /// Inserted-minus-deleted estimate
    element_count: i64,
    hasher: H,
}

impl<H: SeedHasher + Default> CountingBloomFilter<H> {
    /// Create a filter sized for `capacity` elements at `false_positive_prob`
    pub fn with_capacity(capacity: u64, false_positive_prob: f64) -> Result<Self, FilterError> {
        Self::with_capacity_and_hasher(capacity, false_positive_prob, H::default())
    }

    /// Create a filter with an explicit bitmap size and probe-round count
    pub fn with_layout(bitmap_byte_size: u64, num_probe_rounds: u32) -> Result<Self, FilterError> {
        Self::with_layout_and_hasher(bitmap_byte_size, num_probe_rounds, H::default())
    }
}

impl<H: SeedHasher> CountingBloomFilter<H> {
    /// Like `with_capacity`, with a caller-supplied hasher instance
    pub fn with_capacity_and_hasher(
        capacity: u64,
        false_positive_prob: f64,
        hasher: H,
    ) -> Result<Self, FilterError> {
        let config =
            FilterConfig::from_capacity(capacity, false_positive_prob, COUNTER_SLOT_WIDTH)?;
        Self::from_config(config, hasher)
    }

    /// Like `with_layout`, with a caller-supplied hasher instance
    pub fn with_layout_and_hasher(
        bitmap_byte_size: u64,
        num_probe_rounds: u32,
        hasher: H,
    ) -> Result<Self, FilterError> {
        let config =
            FilterConfig::from_layout(bitmap_byte_size, num_probe_rounds, COUNTER_SLOT_WIDTH)?;
        Self::from_config(config, hasher)
    }

    fn from_config(config: FilterConfig, hasher: H) -> Result<Self, FilterError> {
        let counters = CounterStorage::zeroed(config.num_bytes)?;
        config.log_derived("counting");
        Ok(Self {
            counters,
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
        let config =
            FilterConfig::from_capacity(capacity, false_positive_prob, COUNTER_SLOT_WIDTH)?;
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
        let config =
            FilterConfig::from_layout(bitmap_byte_size, num_probe_rounds, COUNTER_SLOT_WIDTH)?;
        self.replace_layout(config)
    }

    fn replace_layout(&mut self, config: FilterConfig) -> Result<(), FilterError> {
        self.counters = CounterStorage::zeroed(config.num_bytes)?;
        config.log_derived("counting");
        self.config = config;
        self.element_count = 0;
        Ok(())
    }

    /// Total number of counters
    pub fn total_counters(&self) -> u64 {
        self.config.num_slots
    }

    /// Read counter `index`
    ///
    /// # Panics
    /// Panics if `index >= total_counters()`.
    pub fn counter(&self, index: u64) -> u8 {
        self.counters.get(index as usize)
    }

    /// The hasher this filter probes with
    pub fn hasher(&self) -> &H {
        &self.hasher
    }
}

impl<H: SeedHasher> MembershipFilter for CountingBloomFilter<H> {
    /// Increment the k probed counters unless the key may already be present.
    ///
    /// Returns the negation of the pre-insert `may_contain` result.
    fn insert<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) -> bool {
        let key = key.as_ref();
        if self.may_contain(key) {
            return false;
        }

        let num_counters = self.config.num_slots;
        for seed in ProbeSequence::new(&self.hasher, key, self.config.num_probe_rounds) {
            let index = (seed % num_counters) as usize;
            if !self.counters.increment(index) {
                tracing::trace!(index, "Counter saturated at maximum");
            }
        }
        self.element_count = self.element_count.wrapping_add(1);
        true
    }

    fn may_contain<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        let num_counters = self.config.num_slots;
        ProbeSequence::new(&self.hasher, key.as_ref(), self.config.num_probe_rounds)
            .all(|seed| self.counters.get((seed % num_counters) as usize) > 0)
    }

    fn clear(&mut self) {
        self.counters.clear();
        self.element_count = 0;
        tracing::debug!(num_bytes = self.config.num_bytes, "Counting Bloom filter cleared");
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
        self.counters.as_bytes()
    }

    fn bitmap_mut(&mut self) -> &mut [u8] {
        self.counters.as_bytes_mut()
    }
}

impl<H: SeedHasher> DeletableFilter for CountingBloomFilter<H> {
    /// Decrement the k probed counters if the key may be present.
    ///
    /// A counter already at zero stays at zero.
    fn delete<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) -> bool {
        let key = key.as_ref();
        if !self.may_contain(key) {
            return false;
        }

        let num_counters = self.config.num_slots;
        for seed in ProbeSequence::new(&self.hasher, key, self.config.num_probe_rounds) {
            self.counters.decrement((seed % num_counters) as usize);
        }
        self.element_count = self.element_count.wrapping_sub(1);
        true
    }
}

impl<H> fmt::Debug for CountingBloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CountingBloomFilter")
            .field("config", &self.config)
            .field("element_count", &self.element_count)
            .finish_non_exhaustive()
    }
}
