//! Similarity scorers: exact Jaccard over shingle sets and agreement over
//! MinHash signatures.
//!
//! The two scorers are independent consumers of the pipeline's artifacts.
//! Jaccard is the expensive ground truth; signature agreement is the fast
//! estimate whose expectation equals the true Jaccard similarity.

use std::collections::HashSet;
use std::hash::Hash;

use crate::config::SimilarityError;

/// Exact Jaccard similarity `|A ∩ B| / |A ∪ B|`, in `[0, 1]`.
///
/// Two empty sets score `0.0`: the union is empty and the ratio is taken to
/// be zero rather than undefined.
pub fn jaccard_similarity<T: Eq + Hash>(a: &HashSet<T>, b: &HashSet<T>) -> f64 {
    // Iterate the smaller set when counting the intersection.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|item| large.contains(*item)).count();
    let union = a.len() + b.len() - intersection;
    if union == 0 {
        return 0.0;
    }
    intersection as f64 / union as f64
}

/// Fraction of positions at which two MinHash signatures agree, in `[0, 1]`.
///
/// # Errors
/// [`SimilarityError::SignatureLengthMismatch`] when the lengths differ;
/// signatures are only comparable when they come from the same hash family
/// and configuration, so this is a caller precondition, not a soft case.
pub fn signature_similarity(a: &[u64], b: &[u64]) -> Result<f64, SimilarityError> {
    if a.len() != b.len() {
        return Err(SimilarityError::SignatureLengthMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    if a.is_empty() {
        return Ok(0.0);
    }
    let agree = a.iter().zip(b.iter()).filter(|(x, y)| x == y).count();
    Ok(agree as f64 / a.len() as f64)
}
