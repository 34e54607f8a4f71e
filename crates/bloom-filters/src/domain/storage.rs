//! Slot storage
//!
//! Both storages own a plain byte buffer, so the raw bytes can be copied
//! out or loaded back in unchanged.
//!
//! - `BitStorage`: one presence bit per slot, bit `i` at `1 << (i % 8)` of byte `i / 8`
//! - `CounterStorage`: one 4-bit saturating counter per slot, counter `i`
//!   in byte `i / 2`, low nibble for even `i`, high nibble for odd `i`

use bitvec::prelude::*;

use crate::error::FilterError;

/// Maximum counter value (4-bit = 15)
pub const MAX_COUNTER: u8 = 15;

const NIBBLE_MASK: u8 = 0x0F;

/// Allocate a zeroed buffer without aborting on failure
fn allocate_zeroed(num_bytes: u64) -> Result<Vec<u8>, FilterError> {
    let len = usize::try_from(num_bytes).map_err(|_| FilterError::FilterTooLarge {
        size: num_bytes,
        max: usize::MAX as u64,
    })?;

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| FilterError::AllocationFailed { bytes: num_bytes })?;
    buffer.resize(len, 0);
    Ok(buffer)
}

/// Bit-addressed storage
#[derive(Debug)]
pub struct BitStorage {
    bits: BitVec<u8, Lsb0>,
}

impl BitStorage {
    /// Allocate `num_bytes` bytes of cleared bits
    pub fn zeroed(num_bytes: u64) -> Result<Self, FilterError> {
        Ok(Self {
            bits: BitVec::from_vec(allocate_zeroed(num_bytes)?),
        })
    }

    /// Number of bits
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    /// Read bit `index`
    #[inline]
    pub fn get(&self, index: usize) -> bool {
        self.bits[index]
    }

    /// Set bit `index`, returning whether it was already set
    #[inline]
    pub fn test_and_set(&mut self, index: usize) -> bool {
        self.bits.replace(index, true)
    }

    /// Number of set bits
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones()
    }

    /// Clear every bit
    pub fn clear(&mut self) {
        self.bits.fill(false);
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.bits.as_raw_slice()
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        self.bits.as_raw_mut_slice()
    }
}

/// Nibble-addressed storage of 4-bit saturating counters
#[derive(Debug)]
pub struct CounterStorage {
    /// 4-bit counters packed into bytes (2 counters per byte)
    counters: Vec<u8>,
}

impl CounterStorage {
    /// Allocate `num_bytes` bytes, i.e. `2 * num_bytes` zeroed counters
    pub fn zeroed(num_bytes: u64) -> Result<Self, FilterError> {
        Ok(Self {
            counters: allocate_zeroed(num_bytes)?,
        })
    }

    /// Number of counters
    pub fn len(&self) -> usize {
        self.counters.len() * 2
    }

    pub fn is_empty(&self) -> bool {
        self.counters.is_empty()
    }

    /// Byte index and bit shift of counter `index`
    #[inline]
    fn locate(index: usize) -> (usize, u32) {
        let shift = if index % 2 == 0 { 0 } else { 4 };
        (index / 2, shift)
    }

    /// Read counter `index`
    #[inline]
    pub fn get(&self, index: usize) -> u8 {
        let (byte_idx, shift) = Self::locate(index);
        (self.counters[byte_idx] >> shift) & NIBBLE_MASK
    }

    /// Overwrite counter `index`, leaving the neighbouring nibble intact
    #[inline]
    fn set(&mut self, index: usize, value: u8) {
        let (byte_idx, shift) = Self::locate(index);
        let byte = &mut self.counters[byte_idx];
        *byte = (*byte & !(NIBBLE_MASK << shift)) | ((value & NIBBLE_MASK) << shift);
    }

    /// Increment counter `index`, saturating at `MAX_COUNTER`.
    ///
    /// Returns `false` if the counter was already saturated.
    #[inline]
    pub fn increment(&mut self, index: usize) -> bool {
        let current = self.get(index);
        if current >= MAX_COUNTER {
            return false;
        }
        self.set(index, current + 1);
        true
    }

    /// Decrement counter `index`, saturating at 0.
    ///
    /// Returns `false` if the counter was already zero.
    #[inline]
    pub fn decrement(&mut self, index: usize) -> bool {
        let current = self.get(index);
        if current == 0 {
            return false;
        }
        self.set(index, current - 1);
        true
    }

    /// Clear every counter
    pub fn clear(&mut self) {
        self.counters.fill(0);
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.counters
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.counters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bit_storage_layout() {
        let mut bits = BitStorage::zeroed(4).unwrap();
        assert_eq!(bits.len(), 32);

        assert!(!bits.test_and_set(0));
        assert!(!bits.test_and_set(9));
        assert!(!bits.test_and_set(31));
        assert!(bits.test_and_set(9), "Second set should report already set");

        assert_eq!(bits.as_bytes(), &[0b0000_0001, 0b0000_0010, 0, 0b1000_0000]);
        assert_eq!(bits.count_ones(), 3);
        assert!(bits.get(9));
        assert!(!bits.get(10));
    }

    #[test]
    fn test_bit_storage_clear() {
        let mut bits = BitStorage::zeroed(2).unwrap();
        bits.test_and_set(3);
        bits.as_bytes_mut()[1] = 0xFF;
        assert_eq!(bits.count_ones(), 9);

        bits.clear();
        assert_eq!(bits.count_ones(), 0);
        assert_eq!(bits.as_bytes(), &[0, 0]);
    }

    #[test]
    fn test_4bit_packing() {
        let counters = CounterStorage::zeroed(50).unwrap();
        // 50 bytes hold 100 counters (2 per byte)
        assert_eq!(counters.len(), 100);
        assert_eq!(counters.as_bytes().len(), 50);
    }

    #[test]
    fn test_even_low_odd_high_nibble() {
        let mut counters = CounterStorage::zeroed(2).unwrap();
        counters.increment(0);
        counters.increment(3);
        counters.increment(3);

        assert_eq!(counters.as_bytes(), &[0x01, 0x20]);
        assert_eq!(counters.get(0), 1);
        assert_eq!(counters.get(1), 0);
        assert_eq!(counters.get(2), 0);
        assert_eq!(counters.get(3), 2);
    }

    #[test]
    fn test_neighbour_nibble_untouched() {
        let mut counters = CounterStorage::zeroed(1).unwrap();
        for _ in 0..9 {
            counters.increment(1);
        }
        for _ in 0..20 {
            counters.increment(0);
        }
        assert_eq!(counters.get(1), 9);

        for _ in 0..20 {
            counters.decrement(0);
        }
        assert_eq!(counters.get(0), 0);
        assert_eq!(counters.get(1), 9);
        assert_eq!(counters.as_bytes(), &[0x90]);
    }

    #[test]
    fn test_counter_saturates_at_max() {
        let mut counters = CounterStorage::zeroed(1).unwrap();
        for _ in 0..MAX_COUNTER {
            assert!(counters.increment(1));
        }
        assert!(!counters.increment(1), "Increment past 15 must saturate");
        assert_eq!(counters.get(1), MAX_COUNTER);
        assert_eq!(counters.get(0), 0, "Saturation must not carry into the low nibble");
        assert_eq!(counters.as_bytes(), &[0xF0]);
    }

    #[test]
    fn test_counter_floors_at_zero() {
        let mut counters = CounterStorage::zeroed(1).unwrap();
        counters.increment(1);
        assert!(!counters.decrement(0), "Decrement of zero must not wrap");
        assert_eq!(counters.get(0), 0);
        assert_eq!(counters.get(1), 1);
    }
}
