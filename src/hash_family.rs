//! Seeded affine hash family for MinHash.
//!
//! Each member is `h(x) = (a*x + b) mod p` with `a` non-zero so it stays
//! invertible modulo a prime `p`. The family order is significant: band
//! membership downstream depends on each function's position.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::config::SimilarityError;

/// One affine hash function `h(x) = (a*x + b) mod p`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AffineHash {
    /// Multiplier, non-zero modulo `p`.
    pub a: u64,
    /// Offset in `[0, p)`.
    pub b: u64,
}

/// An ordered family of independent affine hash functions sharing one
/// modulus, generated once per run and shared read-only across documents.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HashFamily {
    functions: Vec<AffineHash>,
    modulus: u64,
}

impl HashFamily {
    /// Generate `num_hashes` functions from a seeded RNG.
    ///
    /// `a` is drawn uniformly from `[1, modulus)` and `b` from
    /// `[0, modulus)`. The same `(num_hashes, modulus, seed)` triple yields
    /// an identical family on every run.
    ///
    /// # Errors
    /// [`SimilarityError::InvalidHashCount`] when `num_hashes == 0`;
    /// [`SimilarityError::InvalidModulus`] when `modulus < 2`.
    pub fn generate(num_hashes: usize, modulus: u64, seed: u64) -> Result<Self, SimilarityError> {
        if num_hashes == 0 {
            return Err(SimilarityError::InvalidHashCount);
        }
        if modulus < 2 {
            return Err(SimilarityError::InvalidModulus { modulus });
        }

        let mut rng = StdRng::seed_from_u64(seed);
        let functions = (0..num_hashes)
            .map(|_| AffineHash {
                a: rng.random_range(1..modulus),
                b: rng.random_range(0..modulus),
            })
            .collect();

        Ok(Self { functions, modulus })
    }

    /// Number of hash functions (and therefore signature length).
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    /// `true` only for a family that cannot exist via [`Self::generate`].
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    /// The shared prime modulus.
    pub fn modulus(&self) -> u64 {
        self.modulus
    }

    /// The functions in generation order.
    pub fn functions(&self) -> &[AffineHash] {
        &self.functions
    }

    /// Evaluate function `h` at `x`.
    ///
    /// `x` is reduced into `[0, modulus)` first, and the multiply runs in
    /// `u128`, so the result is exact for any `u64` input.
    #[inline]
    pub fn evaluate(&self, h: &AffineHash, x: u64) -> u64 {
        let p = self.modulus as u128;
        let x = (x as u128) % p;
        ((h.a as u128 * x + h.b as u128) % p) as u64
    }
}
