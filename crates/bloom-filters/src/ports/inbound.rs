//! Inbound Ports (Driving Ports)
//!
//! The capability every filter variant exposes to callers. Dispatch is
//! static: each variant is a distinct generic type implementing these
//! traits, and `AnyBloomFilter` covers runtime selection.

use crate::domain::parameters::{calculate_fpr, FilterConfig};
use crate::error::FilterError;

/// Probabilistic set membership (Driving Port)
///
/// Keys are anything viewable as bytes. `"abc"`, `b"abc"`, `String::from("abc")`
/// and `CString::new("abc")?.as_bytes()` all address the same slots.
pub trait MembershipFilter {
    /// Insert a key.
    ///
    /// Returns `true` when the key was not fully represented before the call.
    /// `false` means either a true duplicate or a false-positive collision;
    /// the filter cannot tell these apart.
    fn insert<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) -> bool;

    /// Test if a key might be in the filter
    ///
    /// Returns:
    /// - `true` if the key might be in the set (could be false positive)
    /// - `false` if the key is definitely NOT in the set (never false negative)
    fn may_contain<K: AsRef<[u8]> + ?Sized>(&self, key: &K) -> bool;

    /// Zero every slot and reset the element count
    fn clear(&mut self);

    /// Derived layout, fixed for the lifetime of the filter
    fn config(&self) -> &FilterConfig;

    /// Estimate of inserted-minus-deleted elements.
    ///
    /// Insert and delete update it with wrapping arithmetic, so any value set
    /// through `set_element_count` is safe to keep counting from.
    fn element_count(&self) -> i64;

    /// Override the element count, e.g. after loading a bitmap out of band
    fn set_element_count(&mut self, count: i64);

    /// Raw backing buffer. This is the filter's only serialized form.
    fn bitmap(&self) -> &[u8];

    /// Mutable raw backing buffer
    fn bitmap_mut(&mut self) -> &mut [u8];

    /// Total addressable slots (bits or counters)
    fn total_slots(&self) -> u64 {
        self.config().num_slots
    }

    /// Memory used by the bitmap, in bytes
    fn memory_size(&self) -> u64 {
        self.config().num_bytes
    }

    /// Number of probe rounds (k)
    fn num_probe_rounds(&self) -> u32 {
        self.config().num_probe_rounds
    }

    /// Element capacity supported by the rounded layout
    fn capacity(&self) -> u64 {
        self.config().element_capacity
    }

    /// False positive probability delivered by the rounded layout
    fn false_positive_prob(&self) -> f64 {
        self.config().false_positive_prob
    }

    /// Current false positive rate given the element count
    ///
    /// Formula: FPR = (1 - e^(-kn/m))^k
    fn estimated_false_positive_rate(&self) -> f64 {
        let n = self.element_count().max(0) as u64;
        calculate_fpr(self.total_slots(), n, self.num_probe_rounds())
    }

    /// Copy `bytes` into the bitmap. Lengths must match exactly.
    ///
    /// The element count is left untouched; reconcile it with
    /// `set_element_count` if it is known.
    fn load_bitmap(&mut self, bytes: &[u8]) -> Result<(), FilterError> {
        let bitmap = self.bitmap_mut();
        if bitmap.len() != bytes.len() {
            return Err(FilterError::BitmapSizeMismatch {
                expected: bitmap.len(),
                actual: bytes.len(),
            });
        }
        bitmap.copy_from_slice(bytes);
        Ok(())
    }
}

/// Membership filter that also supports removal (Driving Port)
pub trait DeletableFilter: MembershipFilter {
    /// Remove a key if it may be present.
    ///
    /// Returns `true` when counters were decremented, `false` when the key
    /// was definitely absent and nothing changed.
    fn delete<K: AsRef<[u8]> + ?Sized>(&mut self, key: &K) -> bool;
}
