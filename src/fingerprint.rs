//! Per-document similarity artifacts.
//!
//! The fingerprint schema is part of the public contract: callers may store
//! or ship these values, and two fingerprints are only comparable when their
//! metadata matches.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// Everything the pipeline derives from one document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentFingerprint {
    /// Hashed shingle set, input to the exact Jaccard scorer.
    pub shingles: HashSet<u64>,
    /// Fixed-length MinHash signature, input to banding and the agreement
    /// scorer. Length is `bands * rows` for the producing configuration.
    pub signature: Vec<u64>,
    /// Parameters the fingerprint was produced with.
    pub meta: FingerprintMeta,
}

/// Metadata for traceability and determinism audits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct FingerprintMeta {
    /// Shingle length in characters.
    pub k: usize,
    /// Signature length (`bands * rows`).
    pub signature_len: usize,
    /// Number of LSH bands.
    pub bands: usize,
    /// Rows per band.
    pub rows: usize,
    /// Hash-family modulus.
    pub modulus: u64,
    /// Seed used for shingle hashing and family generation.
    pub seed: u64,
}
