//! Bloom filter layout derivation
//!
//! Two ways to fix a layout:
//! - From `(capacity, target false positive probability)`:
//!   - k = ceil(-log2(p) + 0.001)
//!   - slots = n * k / ln(2), rounded up to a whole byte
//! - From an explicit `(byte size, probe rounds)` pair, taken as given.
//!
//! Either way the effective capacity and false positive probability are
//! recomputed from the rounded layout, not copied from the request.

use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};

use crate::error::FilterError;

/// Slot width of bit storage
pub const BIT_SLOT_WIDTH: u32 = 1;

/// Slot width of 4-bit counter storage
pub const COUNTER_SLOT_WIDTH: u32 = 4;

/// Largest bitmap accepted: the byte count must fit in an `i64`
pub const MAX_NUM_BYTES: u64 = 0x7FFF_FFFF_FFFF_FFFF;

/// Guards the probe-round ceiling against landing one short
const PROBE_ROUND_EPSILON: f64 = 0.001;

/// Derived filter layout
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Capacity the caller asked for (capacity-based construction only)
    pub requested_capacity: Option<u64>,
    /// False positive probability the caller asked for (capacity-based construction only)
    pub requested_false_positive_prob: Option<f64>,
    /// Capacity supported by the rounded layout
    pub element_capacity: u64,
    /// False positive probability delivered by the rounded layout
    pub false_positive_prob: f64,
    /// Number of probe rounds (k)
    pub num_probe_rounds: u32,
    /// Number of addressable slots (bits or counters)
    pub num_slots: u64,
    /// Bitmap size in bytes
    pub num_bytes: u64,
    /// Width of one slot in bits
    pub slot_width_bits: u32,
}

impl FilterConfig {
    /// Derive a layout from a capacity and a target false positive probability
    ///
    /// # Arguments
    /// * `capacity` - Expected number of elements (n)
    /// * `false_positive_prob` - Target false positive probability, in (0, 1]
    /// * `slot_width_bits` - `BIT_SLOT_WIDTH` or `COUNTER_SLOT_WIDTH`
    pub fn from_capacity(
        capacity: u64,
        false_positive_prob: f64,
        slot_width_bits: u32,
    ) -> Result<Self, FilterError> {
        let num_probe_rounds = probe_rounds_for(false_positive_prob)?;

        // Float-to-int casts saturate, so a huge product lands on u64::MAX
        // and is caught by the size ceiling below.
        let raw_slots = (capacity as f64 * num_probe_rounds as f64 / LN_2) as u64;
        let num_bytes = bytes_for_slots(raw_slots, slot_width_bits);
        let num_slots = num_bytes * 8 / slot_width_bits as u128;

        if num_slots == 0 {
            return Err(FilterError::ZeroCapacity {
                capacity,
                fpr: false_positive_prob,
            });
        }

        if num_bytes > MAX_NUM_BYTES as u128 {
            return Err(FilterError::FilterTooLarge {
                size: u64::try_from(num_bytes).unwrap_or(u64::MAX),
                max: MAX_NUM_BYTES,
            });
        }

        let mut config = Self::from_layout(num_bytes as u64, num_probe_rounds, slot_width_bits)?;
        config.requested_capacity = Some(capacity);
        config.requested_false_positive_prob = Some(false_positive_prob);
        Ok(config)
    }

    /// Accept an explicit layout
    ///
    /// # Arguments
    /// * `num_bytes` - Bitmap size in bytes
    /// * `num_probe_rounds` - Number of probe rounds (k)
    /// * `slot_width_bits` - `BIT_SLOT_WIDTH` or `COUNTER_SLOT_WIDTH`
    pub fn from_layout(
        num_bytes: u64,
        num_probe_rounds: u32,
        slot_width_bits: u32,
    ) -> Result<Self, FilterError> {
        if num_bytes == 0 {
            return Err(FilterError::InvalidParameters(
                "bitmap byte size cannot be 0".to_string(),
            ));
        }
        if num_probe_rounds == 0 {
            return Err(FilterError::InvalidParameters(
                "probe round count cannot be 0".to_string(),
            ));
        }
        if slot_width_bits == 0 || slot_width_bits > 8 || 8 % slot_width_bits != 0 {
            return Err(FilterError::InvalidParameters(format!(
                "slot width must divide a byte, got {} bits",
                slot_width_bits
            )));
        }
        if num_bytes > MAX_NUM_BYTES {
            return Err(FilterError::FilterTooLarge {
                size: num_bytes,
                max: MAX_NUM_BYTES,
            });
        }

        let num_slots = num_bytes
            .checked_mul(8)
            .map(|bits| bits / slot_width_bits as u64)
            .ok_or(FilterError::FilterTooLarge {
                size: num_bytes,
                max: u64::MAX / 8,
            })?;

        Ok(Self {
            requested_capacity: None,
            requested_false_positive_prob: None,
            element_capacity: effective_capacity(num_slots, num_probe_rounds),
            false_positive_prob: effective_fpr(num_probe_rounds),
            num_probe_rounds,
            num_slots,
            num_bytes,
            slot_width_bits,
        })
    }

    /// Emit the derived layout as a structured log event
    pub(crate) fn log_derived(&self, variant: &'static str) {
        tracing::info!(
            variant,
            num_bytes = self.num_bytes,
            num_slots = self.num_slots,
            num_probe_rounds = self.num_probe_rounds,
            false_positive_prob = self.false_positive_prob,
            element_capacity = self.element_capacity,
            "Bloom filter layout derived"
        );
    }
}

/// Number of probe rounds needed for a target false positive probability
///
/// Formula: k = ceil(-log2(p) + 0.001)
pub fn probe_rounds_for(false_positive_prob: f64) -> Result<u32, FilterError> {
    if !(false_positive_prob > 0.0 && false_positive_prob <= 1.0) {
        return Err(FilterError::InvalidFPR {
            fpr: false_positive_prob,
        });
    }
    Ok((-false_positive_prob.log2() + PROBE_ROUND_EPSILON).ceil() as u32)
}

/// Bytes needed to hold `num_slots` slots, rounded up to a whole byte
fn bytes_for_slots(num_slots: u64, slot_width_bits: u32) -> u128 {
    (num_slots as u128 * slot_width_bits as u128).div_ceil(8)
}

/// False positive probability of a layout filled to capacity
///
/// Formula: p = e^(-ln(2) * k)
pub fn effective_fpr(num_probe_rounds: u32) -> f64 {
    (-LN_2 * num_probe_rounds as f64).exp()
}

/// Capacity supported by `num_slots` slots and k probe rounds
///
/// Formula: n = floor(m * ln(2) / k)
pub fn effective_capacity(num_slots: u64, num_probe_rounds: u32) -> u64 {
    if num_probe_rounds == 0 {
        return 0;
    }
    (num_slots as f64 * LN_2 / num_probe_rounds as f64) as u64
}

/// Calculate the false positive rate for given parameters
///
/// Formula: FPR = (1 - e^(-kn/m))^k
pub fn calculate_fpr(m: u64, n: u64, k: u32) -> f64 {
    if m == 0 {
        return 1.0;
    }
    let exponent = -(k as f64) * (n as f64) / (m as f64);
    (1.0 - exponent.exp()).powi(k as i32)
}
