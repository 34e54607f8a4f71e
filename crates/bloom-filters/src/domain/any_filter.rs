//! Runtime selection across filter variants
//!
//! The generic filter types are the primary API. `AnyBloomFilter` exists
//! for callers that only learn the variant at runtime, e.g. from a config.

use serde::{Deserialize, Serialize};

use super::bloom_filter::BasicBloomFilter;
use super::counting_bloom::CountingBloomFilter;
use super::parameters::FilterConfig;
use super::partitioned::PartitionedBloomFilter;
use crate::adapters::Murmur64A;
use crate::ports::{DeletableFilter, MembershipFilter, SeedHasher};

/// Filter variant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// One bit per slot
    #[default]
    Basic,
    /// One 4-bit counter per slot, supports delete
    Counting,
    /// One bitmap partition per probe round
    Partitioned,
}

/// A filter of any variant, selected at runtime
#[derive(Debug)]
pub enum AnyBloomFilter<H = Murmur64A> {
    Basic(BasicBloomFilter<H>),
    Counting(CountingBloomFilter<H>),
    Partitioned(PartitionedBloomFilter<H>),
}

impl<H: SeedHasher> AnyBloomFilter<H> {
    pub fn kind(&self) -> FilterKind {
        match self {
            Self::Basic(_) => FilterKind::Basic,
            Self::Counting(_) => FilterKind::Counting,
            Self::Partitioned(_) => FilterKind::Partitioned,
        }
    }

    /// Delete a key if the variant supports it.
    ///
    /// Returns `None` for variants without deletion.
    pub fn delete<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) -> Option<bool> {
        match self {
            Self::Counting(f) => Some(f.delete(key)),
            Self::Basic(_) | Self::Partitioned(_) => None,
        }
    }
}

impl<H: SeedHasher> MembershipFilter for AnyBloomFilter<H> {
    fn insert<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) -> bool {
        match self {
            Self::Basic(f) => f.insert(key),
            Self::Counting(f) => f.insert(key),
            Self::Partitioned(f) => f.insert(key),
        }
    }

    fn may_contain<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool {
        match self {
            Self::Basic(f) => f.may_contain(key),
            Self::Counting(f) => f.may_contain(key),
            Self::Partitioned(f) => f.may_contain(key),
        }
    }

    fn clear(&mut self) {
        match self {
            Self::Basic(f) => f.clear(),
            Self::Counting(f) => f.clear(),
            Self::Partitioned(f) => f.clear(),
        }
    }

    fn config(&self) -> &FilterConfig {
        match self {
            Self::Basic(f) => f.config(),
            Self::Counting(f) => f.config(),
            Self::Partitioned(f) => f.config(),
        }
    }

    fn element_count(&self) -> i64 {
        match self {
            Self::Basic(f) => f.element_count(),
            Self::Counting(f) => f.element_count(),
            Self::Partitioned(f) => f.element_count(),
        }
    }

    fn set_element_count(&mut self, count: i64) {
        match self {
            Self::Basic(f) => f.set_element_count(count),
            Self::Counting(f) => f.set_element_count(count),
            Self::Partitioned(f) => f.set_element_count(count),
        }
    }

    fn bitmap(&self) -> &[u8] {
        match self {
            Self::Basic(f) => f.bitmap(),
            Self::Counting(f) => f.bitmap(),
            Self::Partitioned(f) => f.bitmap(),
        }
    }

    fn bitmap_mut(&mut self) -> &mut [u8] {
        match self {
            Self::Basic(f) => f.bitmap_mut(),
            Self::Counting(f) => f.bitmap_mut(),
            Self::Partitioned(f) => f.bitmap_mut(),
        }
    }
}

impl<H> From<BasicBloomFilter<H>> for AnyBloomFilter<H> {
    fn from(filter: BasicBloomFilter<H>) -> Self {
        Self::Basic(filter)
    }
}

impl<H> From<CountingBloomFilter<H>> for AnyBloomFilter<H> {
    fn from(filter: CountingBloomFilter<H>) -> Self {
        Self::Counting(filter)
    }
}

impl<H> From<PartitionedBloomFilter<H>> for AnyBloomFilter<H> {
    fn from(filter: PartitionedBloomFilter<H>) -> Self {
        Self::Partitioned(filter)
    }
}
