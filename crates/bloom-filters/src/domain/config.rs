//! Bloom filter configuration and validation
//!
//! # Example
//!
//! ```
//! use bloom_filters::{BloomConfigBuilder, FilterKind, MembershipFilter};
//!
//! let config = BloomConfigBuilder::new()
//!     .kind(FilterKind::Counting)
//!     .capacity(10_000)
//!     .false_positive_prob(0.01)
//!     .build()
//!     .expect("Valid config");
//!
//! let mut filter = config.build_filter::<bloom_filters::Murmur64A>().unwrap();
//! filter.insert("aaaa");
//! assert!(filter.may_contain("aaaa"));
//! ```

use serde::{Deserialize, Serialize};

use super::any_filter::{AnyBloomFilter, FilterKind};
use super::bloom_filter::BasicBloomFilter;
use super::counting_bloom::CountingBloomFilter;
use super::partitioned::PartitionedBloomFilter;
use crate::error::FilterError;
use crate::ports::SeedHasher;

/// How the filter layout is chosen
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum Sizing {
    /// Derive the layout from a capacity and a target false positive probability
    Capacity {
        element_capacity: u64,
        false_positive_prob: f64,
    },
    /// Use an explicit bitmap size and probe-round count
    Layout {
        bitmap_bytes: u64,
        probe_rounds: u32,
    },
}

/// Bloom filter configuration
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BloomConfig {
    /// Filter variant
    #[serde(default)]
    pub kind: FilterKind,
    /// Layout selection
    pub sizing: Sizing,
}

impl Default for BloomConfig {
    fn default() -> Self {
        Self {
            kind: FilterKind::Basic,
            sizing: Sizing::Capacity {
                element_capacity: 1_000_000,
                false_positive_prob: 0.01,
            },
        }
    }
}

impl BloomConfig {
    /// Create a new configuration with validation
    pub fn new(kind: FilterKind, sizing: Sizing) -> Result<Self, FilterError> {
        let config = Self { kind, sizing };
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate a JSON configuration
    pub fn from_json(json: &str) -> Result<Self, FilterError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| FilterError::SerializationError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as JSON
    pub fn to_json(&self) -> Result<String, FilterError> {
        serde_json::to_string(self).map_err(|e| FilterError::SerializationError(e.to_string()))
    }

    /// Reject requests that cannot yield a usable layout
    pub fn validate(&self) -> Result<(), FilterError> {
        match self.sizing {
            Sizing::Capacity {
                element_capacity,
                false_positive_prob,
            } => {
                if !(false_positive_prob > 0.0 && false_positive_prob <= 1.0) {
                    return Err(FilterError::InvalidFPR {
                        fpr: false_positive_prob,
                    });
                }
                if element_capacity == 0 {
                    return Err(FilterError::ZeroCapacity {
                        capacity: element_capacity,
                        fpr: false_positive_prob,
                    });
                }
            }
            Sizing::Layout {
                bitmap_bytes,
                probe_rounds,
            } => {
                if bitmap_bytes == 0 {
                    return Err(FilterError::InvalidParameters(
                        "bitmap_bytes cannot be 0".to_string(),
                    ));
                }
                if probe_rounds == 0 {
                    return Err(FilterError::InvalidParameters(
                        "probe_rounds cannot be 0".to_string(),
                    ));
                }
                if self.kind == FilterKind::Partitioned
                    && bitmap_bytes.saturating_mul(8) < probe_rounds as u64
                {
                    return Err(FilterError::InvalidParameters(format!(
                        "{} bytes cannot be split into {} partitions",
                        bitmap_bytes, probe_rounds
                    )));
                }
            }
        }
        Ok(())
    }

    /// Construct the configured filter
    pub fn build_filter<H: SeedHasher + Default>(&self) -> Result<AnyBloomFilter<H>, FilterError> {
        let filter = match self.sizing {
            Sizing::Capacity {
                element_capacity: n,
                false_positive_prob: p,
            } => match self.kind {
                FilterKind::Basic => AnyBloomFilter::Basic(BasicBloomFilter::with_capacity(n, p)?),
                FilterKind::Counting => {
                    AnyBloomFilter::Counting(CountingBloomFilter::with_capacity(n, p)?)
                }
                FilterKind::Partitioned => {
                    AnyBloomFilter::Partitioned(PartitionedBloomFilter::with_capacity(n, p)?)
                }
            },
            Sizing::Layout {
                bitmap_bytes: bytes,
                probe_rounds: k,
            } => match self.kind {
                FilterKind::Basic => AnyBloomFilter::Basic(BasicBloomFilter::with_layout(bytes, k)?),
                FilterKind::Counting => {
                    AnyBloomFilter::Counting(CountingBloomFilter::with_layout(bytes, k)?)
                }
                FilterKind::Partitioned => {
                    AnyBloomFilter::Partitioned(PartitionedBloomFilter::with_layout(bytes, k)?)
                }
            },
        };
        Ok(filter)
    }
}

/// Builder for BloomConfig with validation
///
/// Capacity-based sizing is used unless `layout` is called; unset capacity
/// fields fall back to the defaults.
#[derive(Default)]
pub struct BloomConfigBuilder {
    kind: Option<FilterKind>,
    element_capacity: Option<u64>,
    false_positive_prob: Option<f64>,
    layout: Option<(u64, u32)>,
}

impl BloomConfigBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the filter variant
    pub fn kind(mut self, kind: FilterKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Set the expected number of elements
    pub fn capacity(mut self, elements: u64) -> Self {
        self.element_capacity = Some(elements);
        self
    }

    /// Set the target false positive probability, in (0, 1]
    pub fn false_positive_prob(mut self, fpr: f64) -> Self {
        self.false_positive_prob = Some(fpr);
        self
    }

    /// Use an explicit layout instead of capacity-based sizing
    pub fn layout(mut self, bitmap_bytes: u64, probe_rounds: u32) -> Self {
        self.layout = Some((bitmap_bytes, probe_rounds));
        self
    }

    /// Build the BloomConfig, validating all parameters
    pub fn build(self) -> Result<BloomConfig, FilterError> {
        let defaults = BloomConfig::default();
        let (default_capacity, default_fpr) = match defaults.sizing {
            Sizing::Capacity {
                element_capacity,
                false_positive_prob,
            } => (element_capacity, false_positive_prob),
            Sizing::Layout { .. } => (0, 1.0),
        };

        let sizing = match self.layout {
            Some((bitmap_bytes, probe_rounds)) => Sizing::Layout {
                bitmap_bytes,
                probe_rounds,
            },
            None => Sizing::Capacity {
                element_capacity: self.element_capacity.unwrap_or(default_capacity),
                false_positive_prob: self.false_positive_prob.unwrap_or(default_fpr),
            },
        };

        BloomConfig::new(self.kind.unwrap_or(defaults.kind), sizing)
    }
}
