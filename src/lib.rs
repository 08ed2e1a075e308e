//! # neardup
//!
//! Near-duplicate detection core for text corpora: k-shingling, MinHash
//! signatures, and LSH candidate discovery, with exact Jaccard and
//! signature-agreement scorers.
//!
//! ## Pipeline
//!
//! - **Shingling**: normalized text is cut into overlapping `k`-character
//!   substrings, deduplicated into a set, and hashed to `u64` with a seeded
//!   xxh3 ([`extract_shingles`], [`hash_shingles`]).
//! - **MinHash**: a seeded family of affine hash functions
//!   ([`HashFamily`]) compresses each shingle set into a fixed-length
//!   signature ([`compute_signature`]).
//! - **LSH**: signatures are split into bands and bucketed; documents that
//!   collide in any band become candidate pairs in sub-quadratic time
//!   ([`find_candidate_pairs`]).
//! - **Scoring**: [`jaccard_similarity`] is the exact ground truth over
//!   shingle sets; [`signature_similarity`] is the fast estimate over
//!   signatures.
//!
//! Everything is a pure function of the input texts and a
//! [`SimilarityConfig`]; a fixed seed reproduces signatures and candidate
//! sets bit-for-bit across runs and processes. Document acquisition,
//! persistence, and reporting are the caller's concern.
//!
//! ## Example
//!
//! ```
//! use neardup::{analyze_corpus, score_candidates, SimilarityConfig};
//!
//! let texts = [
//!     "the cat sat on the mat",
//!     "the cat sat on the hat",
//!     "completely different text here",
//! ];
//! let cfg = SimilarityConfig {
//!     k: 5,
//!     bands: 20,
//!     rows: 5,
//!     ..Default::default()
//! };
//!
//! let analysis = analyze_corpus(&texts, &cfg).expect("corpus analysis");
//! assert!(analysis.candidates.contains(&(0, 1)));
//!
//! let scores = score_candidates(&analysis).expect("scoring");
//! assert!(scores[0].jaccard > 0.5);
//! ```

mod config;
mod fingerprint;
mod hash_family;
mod lsh;
mod minhash;
mod shingle;
mod similarity;

pub use config::{SimilarityConfig, SimilarityError, MERSENNE_PRIME_61};
pub use fingerprint::{DocumentFingerprint, FingerprintMeta};
pub use hash_family::{AffineHash, HashFamily};
pub use lsh::{banding_threshold, find_candidate_pairs};
pub use minhash::{compute_signature, compute_signatures};
pub use shingle::{extract_shingles, hash_shingles};
pub use similarity::{jaccard_similarity, signature_similarity};

use std::collections::BTreeSet;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, Level};

/// Fingerprint a single document against a pre-generated hash family.
///
/// The family is shared read-only across the corpus; its size must equal
/// `cfg.num_hashes()` so the signature can be banded later.
///
/// # Errors
/// Configuration errors from [`SimilarityConfig::validate`],
/// [`SimilarityError::EmptyShingleSet`] when the normalized text is shorter
/// than `k`.
pub fn fingerprint_document(
    text: &str,
    family: &HashFamily,
    cfg: &SimilarityConfig,
) -> Result<DocumentFingerprint, SimilarityError> {
    cfg.validate()?;
    fingerprint_validated(text, family, cfg)
}

// Stage sequence shared by the single-document and corpus entry points;
// config validation already happened at the boundary.
fn fingerprint_validated(
    text: &str,
    family: &HashFamily,
    cfg: &SimilarityConfig,
) -> Result<DocumentFingerprint, SimilarityError> {
    let shingles = extract_shingles(text, cfg.k)?;
    let hashed = hash_shingles(&shingles, cfg.seed);
    let signature = compute_signature(&hashed, family)?;

    Ok(DocumentFingerprint {
        shingles: hashed,
        signature,
        meta: FingerprintMeta {
            k: cfg.k,
            signature_len: family.len(),
            bands: cfg.bands,
            rows: cfg.rows,
            modulus: family.modulus(),
            seed: cfg.seed,
        },
    })
}

/// Output of a full corpus run: one fingerprint per input document plus the
/// deduplicated candidate-pair set.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CorpusAnalysis {
    /// Fingerprints in input order; index positions are the document ids
    /// used in `candidates`.
    pub fingerprints: Vec<DocumentFingerprint>,
    /// Unordered `(i, j)` pairs with `i < j` that share at least one LSH
    /// bucket. Superset, with high probability, of the truly similar pairs
    /// above the banding threshold; may contain false positives.
    pub candidates: BTreeSet<(usize, usize)>,
}

/// Run the full pipeline over a corpus of raw texts.
///
/// Generates the hash family once from `cfg`, fingerprints every document
/// (in parallel across documents when `cfg.use_parallel`), then buckets the
/// signatures with banded LSH. The entire run is deterministic for a fixed
/// config.
///
/// # Errors
/// Configuration errors, or [`SimilarityError::EmptyShingleSet`] when any
/// document normalizes to fewer than `k` characters.
pub fn analyze_corpus<S: AsRef<str> + Sync>(
    texts: &[S],
    cfg: &SimilarityConfig,
) -> Result<CorpusAnalysis, SimilarityError> {
    cfg.validate()?;

    let span = tracing::span!(
        Level::INFO,
        "analyze_corpus",
        documents = texts.len(),
        bands = cfg.bands,
        rows = cfg.rows,
    );
    let _guard = span.enter();

    let family = HashFamily::generate(cfg.num_hashes(), cfg.modulus, cfg.seed)?;
    debug!(num_hashes = family.len(), modulus = family.modulus(), "hash family generated");

    let fingerprints: Vec<DocumentFingerprint> = if cfg.use_parallel {
        texts
            .par_iter()
            .map(|text| fingerprint_validated(text.as_ref(), &family, cfg))
            .collect::<Result<_, _>>()?
    } else {
        texts
            .iter()
            .map(|text| fingerprint_validated(text.as_ref(), &family, cfg))
            .collect::<Result<_, _>>()?
    };

    let signatures: Vec<Vec<u64>> = fingerprints
        .iter()
        .map(|fp| fp.signature.clone())
        .collect();
    let candidates = find_candidate_pairs(&signatures, cfg.bands, cfg.rows)?;

    info!(
        documents = fingerprints.len(),
        candidates = candidates.len(),
        threshold = banding_threshold(cfg.bands, cfg.rows),
        "corpus analysis complete"
    );

    Ok(CorpusAnalysis {
        fingerprints,
        candidates,
    })
}

/// Exact and estimated similarity for one candidate pair.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct CandidateScore {
    /// Document-index pair, `pair.0 < pair.1`.
    pub pair: (usize, usize),
    /// Exact Jaccard similarity over the hashed shingle sets.
    pub jaccard: f64,
    /// Fraction of agreeing MinHash signature positions.
    pub signature_agreement: f64,
}

/// Verify every candidate pair with both scorers.
///
/// Returns one score per candidate, sorted by exact Jaccard descending, so
/// callers can cut at their own similarity threshold to drop LSH false
/// positives.
///
/// # Errors
/// [`SimilarityError::SignatureLengthMismatch`] only if the analysis was
/// assembled by hand from mismatched fingerprints; pipeline output always
/// scores cleanly.
pub fn score_candidates(
    analysis: &CorpusAnalysis,
) -> Result<Vec<CandidateScore>, SimilarityError> {
    let mut scores = Vec::with_capacity(analysis.candidates.len());
    for &(i, j) in &analysis.candidates {
        let left = &analysis.fingerprints[i];
        let right = &analysis.fingerprints[j];
        scores.push(CandidateScore {
            pair: (i, j),
            jaccard: jaccard_similarity(&left.shingles, &right.shingles),
            signature_agreement: signature_similarity(&left.signature, &right.signature)?,
        });
    }
    scores.sort_by(|a, b| b.jaccard.total_cmp(&a.jaccard));
    Ok(scores)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fingerprint_document_errors_on_short_text() {
        let cfg = SimilarityConfig {
            k: 5,
            ..Default::default()
        };
        let family = HashFamily::generate(cfg.num_hashes(), cfg.modulus, cfg.seed).unwrap();
        assert_eq!(
            fingerprint_document("ab", &family, &cfg),
            Err(SimilarityError::EmptyShingleSet)
        );
    }

    #[test]
    fn fingerprint_meta_records_configuration() {
        let cfg = SimilarityConfig {
            k: 4,
            bands: 8,
            rows: 4,
            ..Default::default()
        };
        let family = HashFamily::generate(cfg.num_hashes(), cfg.modulus, cfg.seed).unwrap();
        let fp = fingerprint_document("some longer input text", &family, &cfg).unwrap();
        assert_eq!(fp.meta.k, 4);
        assert_eq!(fp.meta.signature_len, 32);
        assert_eq!(fp.signature.len(), 32);
        assert_eq!(fp.meta.seed, cfg.seed);
    }

    #[test]
    fn analyze_corpus_parallel_matches_sequential() {
        let texts = [
            "the cat sat on the mat",
            "the cat sat on the hat",
            "completely different text here",
            "the dog sat on the mat",
        ];
        let cfg = SimilarityConfig {
            k: 5,
            bands: 20,
            rows: 5,
            ..Default::default()
        };
        let seq = analyze_corpus(&texts, &cfg).unwrap();
        let par = analyze_corpus(
            &texts,
            &SimilarityConfig {
                use_parallel: true,
                ..cfg
            },
        )
        .unwrap();
        assert_eq!(seq, par);
    }

    #[test]
    fn score_candidates_sorts_by_jaccard() {
        let texts = [
            "the cat sat on the mat",
            "the cat sat on the hat",
            "the cat sat on the mat today",
        ];
        let cfg = SimilarityConfig {
            k: 5,
            bands: 32,
            rows: 2,
            ..Default::default()
        };
        let analysis = analyze_corpus(&texts, &cfg).unwrap();
        let scores = score_candidates(&analysis).unwrap();
        for pair in scores.windows(2) {
            assert!(pair[0].jaccard >= pair[1].jaccard);
        }
        for score in &scores {
            assert!(score.jaccard >= 0.0 && score.jaccard <= 1.0);
            assert!(score.signature_agreement >= 0.0 && score.signature_agreement <= 1.0);
        }
    }
}
