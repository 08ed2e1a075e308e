//! MinHash signature computation.
//!
//! A signature compresses a hashed shingle set into a fixed-length vector:
//! one minimum per hash function, in family order. The probability that two
//! documents agree at any one position equals their true Jaccard similarity,
//! which is what makes signature agreement an unbiased similarity estimate.

use std::collections::HashSet;

use rayon::prelude::*;

use crate::config::SimilarityError;
use crate::hash_family::HashFamily;

/// Compute the MinHash signature of a hashed shingle set.
///
/// For each function in the family, in order, the result holds the minimum
/// of `(a*x + b) mod p` over all shingle hashes `x`. Same set, same family
/// ⇒ bit-identical signature.
///
/// # Errors
/// [`SimilarityError::EmptyShingleSet`] when `hashed_shingles` is empty: the
/// minimum over an empty set is undefined, and a sentinel value would make
/// all empty documents collide in every LSH band.
pub fn compute_signature(
    hashed_shingles: &HashSet<u64>,
    family: &HashFamily,
) -> Result<Vec<u64>, SimilarityError> {
    if hashed_shingles.is_empty() {
        return Err(SimilarityError::EmptyShingleSet);
    }

    let signature = family
        .functions()
        .iter()
        .map(|h| {
            hashed_shingles
                .iter()
                .map(|&x| family.evaluate(h, x))
                .min()
                .unwrap_or(0)
        })
        .collect();
    Ok(signature)
}

/// Compute signatures for a whole corpus, optionally in parallel.
///
/// Each document's signature depends only on its own shingle set and the
/// shared read-only family, so the documents fan out across rayon workers
/// with no shared mutable state. The output order matches the input order
/// either way.
pub fn compute_signatures(
    corpus: &[HashSet<u64>],
    family: &HashFamily,
    parallel: bool,
) -> Result<Vec<Vec<u64>>, SimilarityError> {
    if parallel {
        corpus
            .par_iter()
            .map(|shingles| compute_signature(shingles, family))
            .collect()
    } else {
        corpus
            .iter()
            .map(|shingles| compute_signature(shingles, family))
            .collect()
    }
}
