//! LSH banding and candidate-pair discovery.
//!
//! Signatures are split into `bands` consecutive slices of `rows` values
//! each. Documents whose slice hashes collide within the same band land in
//! the same bucket; every unordered pair sharing a bucket becomes a
//! candidate. Cost is O(n · bands) hashing plus pair emission per bucket,
//! which stays far below the O(n²) full comparison as long as buckets are
//! small.
//!
//! Each band owns its own bucket map, so logically distinct bands can never
//! share a bucket even when their slice hashes are numerically equal. The
//! bands are independent and run across rayon workers; only the final pair
//! sets are merged.

use std::collections::{BTreeSet, HashMap};

use rayon::prelude::*;
use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::config::SimilarityError;

/// Hash one band slice, seeded with the band index.
#[inline]
fn band_key(rows: &[u64], band: usize) -> u64 {
    let mut bytes = Vec::with_capacity(rows.len() * 8);
    for value in rows {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
    xxh3_64_with_seed(&bytes, band as u64)
}

/// Candidate pairs emitted by a single band.
fn band_candidates(signatures: &[Vec<u64>], band: usize, rows: usize) -> BTreeSet<(usize, usize)> {
    let start = band * rows;
    let mut buckets: HashMap<u64, Vec<usize>> = HashMap::new();
    for (doc, signature) in signatures.iter().enumerate() {
        let key = band_key(&signature[start..start + rows], band);
        buckets.entry(key).or_default().push(doc);
    }

    let mut pairs = BTreeSet::new();
    for members in buckets.values() {
        for (i, &left) in members.iter().enumerate() {
            for &right in &members[i + 1..] {
                // Documents were scanned in order, so left < right holds.
                pairs.insert((left, right));
            }
        }
    }
    pairs
}

/// Find all candidate near-duplicate pairs via banded LSH.
///
/// Every signature must have length exactly `bands * rows`. The result is a
/// deduplicated, ordered set of `(i, j)` document-index pairs with `i < j`;
/// a pair colliding in several bands appears once.
///
/// The caller tunes `bands` and `rows`: more bands with fewer rows lowers
/// the similarity threshold at which a pair is likely to collide, and vice
/// versa (see [`banding_threshold`]).
///
/// # Errors
/// [`SimilarityError::InvalidBands`] / [`SimilarityError::InvalidRows`] for
/// zero parameters, [`SimilarityError::BandingMismatch`] for any signature
/// whose length is not `bands * rows`.
pub fn find_candidate_pairs(
    signatures: &[Vec<u64>],
    bands: usize,
    rows: usize,
) -> Result<BTreeSet<(usize, usize)>, SimilarityError> {
    if bands == 0 {
        return Err(SimilarityError::InvalidBands { bands });
    }
    if rows == 0 {
        return Err(SimilarityError::InvalidRows { rows });
    }
    let expected = bands * rows;
    for (doc, signature) in signatures.iter().enumerate() {
        if signature.len() != expected {
            return Err(SimilarityError::BandingMismatch {
                doc,
                len: signature.len(),
                expected,
            });
        }
    }

    let pairs = (0..bands)
        .into_par_iter()
        .map(|band| band_candidates(signatures, band, rows))
        .reduce(BTreeSet::new, |mut acc, band_pairs| {
            acc.extend(band_pairs);
            acc
        });
    Ok(pairs)
}

/// Approximate Jaccard threshold of the banding S-curve: `(1/b)^(1/r)`.
///
/// Pairs above this similarity are very likely to share at least one band;
/// pairs well below it very likely share none.
pub fn banding_threshold(bands: usize, rows: usize) -> f64 {
    (1.0 / bands as f64).powf(1.0 / rows as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MERSENNE_PRIME_61;
    use crate::hash_family::HashFamily;
    use crate::minhash::compute_signature;
    use std::collections::HashSet;

    #[test]
    fn rejects_zero_banding_parameters() {
        let sigs = vec![vec![1, 2, 3, 4]];
        assert_eq!(
            find_candidate_pairs(&sigs, 0, 4),
            Err(SimilarityError::InvalidBands { bands: 0 })
        );
        assert_eq!(
            find_candidate_pairs(&sigs, 4, 0),
            Err(SimilarityError::InvalidRows { rows: 0 })
        );
    }

    #[test]
    fn rejects_signature_length_mismatch() {
        let sigs = vec![vec![1, 2, 3, 4], vec![1, 2, 3]];
        assert_eq!(
            find_candidate_pairs(&sigs, 2, 2),
            Err(SimilarityError::BandingMismatch {
                doc: 1,
                len: 3,
                expected: 4,
            })
        );
    }

    #[test]
    fn empty_corpus_has_no_candidates() {
        let pairs = find_candidate_pairs(&[], 4, 2).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn identical_signatures_always_pair() {
        let sig = vec![7u64; 8];
        let sigs = vec![sig.clone(), vec![1, 2, 3, 4, 5, 6, 7, 8], sig];
        let pairs = find_candidate_pairs(&sigs, 4, 2).unwrap();
        assert!(pairs.contains(&(0, 2)));
    }

    #[test]
    fn no_self_pairs_and_ordered_orientation() {
        let sig = vec![7u64; 8];
        let sigs = vec![sig.clone(), sig.clone(), sig];
        let pairs = find_candidate_pairs(&sigs, 2, 4).unwrap();
        for &(i, j) in &pairs {
            assert!(i < j);
        }
        assert_eq!(
            pairs,
            [(0, 1), (0, 2), (1, 2)].into_iter().collect::<BTreeSet<_>>()
        );
    }

    #[test]
    fn multi_band_collisions_deduplicate() {
        // Both bands of both signatures match, yet the pair appears once.
        let sigs = vec![vec![1, 2, 3, 4], vec![1, 2, 3, 4]];
        let pairs = find_candidate_pairs(&sigs, 2, 2).unwrap();
        assert_eq!(pairs.len(), 1);
        assert!(pairs.contains(&(0, 1)));
    }

    #[test]
    fn single_band_match_is_enough() {
        // First band equal, second band different.
        let sigs = vec![vec![1, 2, 30, 40], vec![1, 2, 31, 41]];
        let pairs = find_candidate_pairs(&sigs, 2, 2).unwrap();
        assert!(pairs.contains(&(0, 1)));
    }

    #[test]
    fn equal_rows_in_different_bands_do_not_collide() {
        // Doc 0's band 0 equals doc 1's band 1 value-wise; no band shares
        // the same slice at the same position, so no candidates.
        let sigs = vec![vec![1, 2, 9, 9], vec![8, 8, 1, 2]];
        let pairs = find_candidate_pairs(&sigs, 2, 2).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn dissimilar_real_signatures_rarely_pair() {
        let family = HashFamily::generate(100, MERSENNE_PRIME_61, 99).unwrap();
        let a: HashSet<u64> = (0..200).collect();
        let b: HashSet<u64> = (10_000..10_200).collect();
        let sigs = vec![
            compute_signature(&a, &family).unwrap(),
            compute_signature(&b, &family).unwrap(),
        ];
        let pairs = find_candidate_pairs(&sigs, 20, 5).unwrap();
        assert!(pairs.is_empty());
    }

    #[test]
    fn threshold_matches_known_configuration() {
        // 20 bands x 5 rows is the classic ~0.55 threshold setup.
        let t = banding_threshold(20, 5);
        assert!((t - 0.549).abs() < 0.01, "t={t}");
    }
}
