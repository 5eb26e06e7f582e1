//! Deterministic RNG utilities for reproducible tests.

use nalgebra::DVector;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use rand_distr::StandardNormal;

/// Create a deterministic `ChaCha8Rng` from a seed.
///
/// All test randomization should go through this to ensure reproducibility.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Deterministic standard-normal state vector of length `dim`.
pub fn random_state(dim: usize, seed: u64) -> DVector<f64> {
    let mut rng = seeded_rng(seed);
    DVector::from_fn(dim, |_, _| rng.sample(StandardNormal))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
