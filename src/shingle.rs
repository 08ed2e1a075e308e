//! k-shingling of raw document text.
//!
//! A shingle is a fixed-length substring of the normalized text; the set of
//! shingles acts as the document's fingerprint unit set. Shingles are hashed
//! to `u64` with a seeded xxh3 so that results are reproducible across runs
//! and processes.

use std::collections::HashSet;

use xxhash_rust::xxh3::xxh3_64_with_seed;

use crate::config::SimilarityError;

/// Normalize raw text for shingling: case-fold and turn line breaks into
/// single spaces. Other whitespace is preserved as-is so that character
/// offsets inside a line keep their local structure.
fn normalize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\r' => {
                // CRLF counts as one line break.
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push(' ');
            }
            '\n' => out.push(' '),
            _ => out.extend(ch.to_lowercase()),
        }
    }
    out
}

/// Extract the set of unique `k`-character shingles from `text`.
///
/// The text is normalized first (lowercased, line breaks become spaces) and
/// the window slides over characters, not bytes, so multi-byte input is
/// handled correctly.
///
/// Text shorter than `k` yields an empty set rather than an error; the empty
/// set is a valid degenerate input for the Jaccard scorer, and the MinHash
/// stage rejects it explicitly where an undefined minimum would otherwise
/// corrupt banding.
///
/// # Errors
/// Returns [`SimilarityError::InvalidShingleLength`] when `k == 0`.
pub fn extract_shingles(text: &str, k: usize) -> Result<HashSet<String>, SimilarityError> {
    if k == 0 {
        return Err(SimilarityError::InvalidShingleLength { k });
    }

    let normalized = normalize(text);
    let chars: Vec<char> = normalized.chars().collect();
    if chars.len() < k {
        return Ok(HashSet::new());
    }

    let mut shingles = HashSet::with_capacity(chars.len() - k + 1);
    for window in chars.windows(k) {
        shingles.insert(window.iter().collect::<String>());
    }
    Ok(shingles)
}

/// Hash each shingle to a 64-bit integer with a seeded xxh3.
///
/// The seed replaces any process-randomized default hash: the same shingle
/// set and seed produce the same integer set on every run, which is what
/// makes signatures and bucket keys comparable across processes.
pub fn hash_shingles(shingles: &HashSet<String>, seed: u64) -> HashSet<u64> {
    shingles
        .iter()
        .map(|s| xxh3_64_with_seed(s.as_bytes(), seed))
        .collect()
}
