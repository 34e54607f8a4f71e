//! Partitioned Bloom filter
//!
//! The bitmap is split into k equal partitions of `num_bits / k` bits and
//! probe round i only ever touches partition i:
//!
//! `bit_i = (seed_i mod bits_per_part) + i * bits_per_part`
//!
//! Keys therefore never share a bit across rounds. The last
//! `num_bits - k * bits_per_part` bits are never addressed.

use std::fmt;

use super::parameters::{FilterConfig, BIT_SLOT_WIDTH};
use super::probe::ProbeSequence;
use super::storage::BitStorage;
use crate::adapters::Murmur64A;
use crate::error::FilterError;
use crate::ports::{MembershipFilter, SeedHasher};

/// Bloom filter with one bitmap partition per probe round
pub struct PartitionedBloomFilter<H = Murmur64A> {
    bits: BitStorage,
    config: FilterConfig,
    /// Bits in each partition
    bits_per_part: u64,
    element_count: i64,
    hasher: H,
}

impl<H: SeedHasher + Default> PartitionedBloomFilter<H> {
    /// Create a filter sized for `capacity` elements at `false_positive_prob`
    pub fn with_capacity(capacity: u64, false_positive_prob: f64) -> Result<Self, FilterError> {
        Self::with_capacity_and_hasher(capacity, false_positive_prob, H::default())
    }

    /// Create a filter with an explicit bitmap size and probe-round count
    pub fn with_layout(bitmap_byte_size: u64, num_probe_rounds: u32) -> Result<Self, FilterError> {
        Self::with_layout_and_hasher(bitmap_byte_size, num_probe_rounds, H::default())
    }
}

impl<H: SeedHasher> PartitionedBloomFilter<H> {
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
        let bits_per_part = partition_size(&config)?;
        let bits = BitStorage::zeroed(config.num_bytes)?;
        log_partitions(&config, bits_per_part);
        Ok(Self {
            bits,
            config,
            bits_per_part,
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
        let bits_per_part = partition_size(&config)?;
        self.bits = BitStorage::zeroed(config.num_bytes)?;
        log_partitions(&config, bits_per_part);
        self.config = config;
        self.bits_per_part = bits_per_part;
        self.element_count = 0;
        Ok(())
    }

    /// Bits in each partition
    pub fn bits_per_part(&self) -> u64 {
        self.bits_per_part
    }

    /// Trailing bits no probe round can address
    pub fn wasted_bits(&self) -> u64 {
        self.config.num_slots - self.bits_per_part * self.config.num_probe_rounds as u64
    }

    /// Get the number of bits set in the filter
    pub fn bits_set(&self) -> usize {
        self.bits.count_ones()
    }

    /// The hasher this filter probes with
    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    /// Bit positions probed for `key`, one per partition
    pub fn positions(&self, key: &[u8]) -> Vec<u64> {
        let part = self.bits_per_part;
        ProbeSequence::new(&self.hasher, key, self.config.num_probe_rounds)
            .zip(0u64..)
            .map(|(seed, round)| seed % part + round * part)
            .collect()
    }
}

fn partition_size(config: &FilterConfig) -> Result<u64, FilterError> {
    let bits_per_part = config.num_slots / config.num_probe_rounds as u64;
    if bits_per_part == 0 {
        return Err(FilterError::InvalidParameters(format!(
            "{} bits cannot be split into {} partitions",
            config.num_slots, config.num_probe_rounds
        )));
    }
    Ok(bits_per_part)
}

fn log_partitions(config: &FilterConfig, bits_per_part: u64) {
    config.log_derived("partitioned");
    tracing::info!(
        bits_per_part,
        wasted_bits = config.num_slots - bits_per_part * config.num_probe_rounds as u64,
        "Bloom filter partitions derived"
    );
}

impl<H: SeedHasher> MembershipFilter for PartitionedBloomFilter<H> {
    fn insert<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) -> bool {
        let k = self.config.num_probe_rounds;
        let part = self.bits_per_part;

        let mut already_set = 0u32;
        for (seed, round) in ProbeSequence::new(&self.hasher, key.as_ref(), k).zip(0u64..) {
            let index = seed % part + round * part;
            if self.bits.test_and_set(index as usize) {
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
        let part = self.bits_per_part;
        ProbeSequence::new(&self.hasher, key.as_ref(), self.config.num_probe_rounds)
            .zip(0u64..)
            .all(|(seed, round)| self.bits.get((seed % part + round * part) as usize))
    }

    fn clear(&mut self) {
        self.bits.clear();
        self.element_count = 0;
        tracing::debug!(num_bytes = self.config.num_bytes, "Partitioned Bloom filter cleared");
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

impl<H> fmt::Debug for PartitionedBloomFilter<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartitionedBloomFilter")
            .field("config", &self.config)
            .field("bits_per_part", &self.bits_per_part)
            .field("element_count", &self.element_count)
            .finish_non_exhaustive()
    }
}
