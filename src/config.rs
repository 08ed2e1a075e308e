//! Configuration and error types for near-duplicate detection.
//!
//! This module defines the public configuration surface for the similarity
//! pipeline. It is intentionally free of any I/O or environment-dependent
//! behavior so the pipeline stays a pure function of `(texts, config)`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest Mersenne prime that fits in a `u64`: `2^61 - 1`.
///
/// Default modulus for the affine MinHash family. Hashed shingles are
/// reduced into `[0, p)` as the first step of every hash evaluation, so the
/// family analysis over Z_p applies unchanged.
pub const MERSENNE_PRIME_61: u64 = (1 << 61) - 1;

/// Semantic configuration for the similarity pipeline.
///
/// The pipeline **only** works over raw document texts supplied by the
/// caller. It never reads files, environment, or any other ambient state.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SimilarityConfig {
    /// Shingle length in characters (k-shingling).
    ///
    /// Controls local context sensitivity. Larger values are more robust to
    /// noise but less tolerant to small edits.
    pub k: usize,
    /// Number of LSH bands.
    pub bands: usize,
    /// Number of signature rows per band.
    pub rows: usize,
    /// Prime modulus for the affine hash family.
    ///
    /// Must be at least 2; the probabilistic guarantees assume a prime.
    pub modulus: u64,
    /// Random seed for shingle hashing and hash-family generation.
    ///
    /// Two configs with the same seed and parameters produce bit-identical
    /// signatures for the same input texts.
    pub seed: u64,
    /// Enable parallel signature computation across documents.
    pub use_parallel: bool,
}

impl Default for SimilarityConfig {
    fn default() -> Self {
        Self {
            k: 9,
            bands: 16,
            rows: 8,
            modulus: MERSENNE_PRIME_61,
            seed: 0x5EED_CAFE_F00D_D00D,
            use_parallel: false,
        }
    }
}

impl SimilarityConfig {
    /// Total signature length implied by the banding parameters.
    ///
    /// Signatures always have length `bands * rows`, so the banding
    /// invariant holds by construction for pipeline-produced signatures.
    pub fn num_hashes(&self) -> usize {
        self.bands * self.rows
    }

    /// Validate all numeric parameters once, at the boundary.
    pub fn validate(&self) -> Result<(), SimilarityError> {
        if self.k == 0 {
            return Err(SimilarityError::InvalidShingleLength { k: self.k });
        }
        if self.bands == 0 {
            return Err(SimilarityError::InvalidBands { bands: self.bands });
        }
        if self.rows == 0 {
            return Err(SimilarityError::InvalidRows { rows: self.rows });
        }
        if self.modulus < 2 {
            return Err(SimilarityError::InvalidModulus {
                modulus: self.modulus,
            });
        }
        Ok(())
    }
}

/// Errors returned by the similarity pipeline.
///
/// All failures are local and synchronous; every operation here is pure and
/// deterministic, so nothing is ever retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SimilarityError {
    #[error("invalid config: shingle length k must be >= 1 (got {k})")]
    InvalidShingleLength { k: usize },

    #[error("invalid config: bands must be >= 1 (got {bands})")]
    InvalidBands { bands: usize },

    #[error("invalid config: rows must be >= 1 (got {rows})")]
    InvalidRows { rows: usize },

    #[error("invalid config: modulus must be >= 2 (got {modulus})")]
    InvalidModulus { modulus: u64 },

    #[error("invalid config: hash family must contain at least one function")]
    InvalidHashCount,

    #[error("cannot compute a MinHash signature over an empty shingle set")]
    EmptyShingleSet,

    #[error("signature lengths differ ({left} vs {right}); signatures must come from the same hash family")]
    SignatureLengthMismatch { left: usize, right: usize },

    #[error("signature of document {doc} has length {len}, expected bands*rows = {expected}")]
    BandingMismatch {
        doc: usize,
        len: usize,
        expected: usize,
    },
}
