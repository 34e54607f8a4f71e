//! Error types for Bloom filter construction
//!
//! Every variant is a configuration error raised while parsing a config or
//! deriving and allocating a filter layout. Operations on a constructed
//! filter are total, apart from the length check in `load_bitmap`.

use thiserror::Error;

/// Errors that can occur while building a Bloom filter
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("Invalid false positive probability: {fpr} (must be in (0, 1])")]
    InvalidFPR { fpr: f64 },

    #[error("Layout has zero slots: capacity={capacity} false_positive_prob={fpr}")]
    ZeroCapacity { capacity: u64, fpr: f64 },

    #[error("Bitmap too large: {size} bytes > {max}")]
    FilterTooLarge { size: u64, max: u64 },

    #[error("Invalid filter parameters: {0}")]
    InvalidParameters(String),

    #[error("Failed to allocate {bytes} bytes for bitmap")]
    AllocationFailed { bytes: u64 },

    #[error("Bitmap size mismatch: expected {expected} bytes, got {actual}")]
    BitmapSizeMismatch { expected: usize, actual: usize },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}
