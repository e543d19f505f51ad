//! Randomness source injected into the stochastic generators.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

/// Source of random draws consumed by the generators.
///
/// Every [`Rng`] implements this, so callers pass either a seeded generator
/// (reproducible traces) or `rand::thread_rng()`.
pub trait RandomSource {
    /// Uniform real in `[0, 1)`.
    fn uniform(&mut self) -> f64;

    /// Uniform integer in `[lo, hi]` (inclusive). Requires `lo <= hi`.
    fn uniform_int(&mut self, lo: u64, hi: u64) -> u64;

    /// Normal sample with the given mean and standard deviation.
    fn gauss(&mut self, mean: f64, sigma: f64) -> f64;

    /// True with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.uniform() < p
    }
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn uniform(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn uniform_int(&mut self, lo: u64, hi: u64) -> u64 {
        self.gen_range(lo..=hi)
    }

    fn gauss(&mut self, mean: f64, sigma: f64) -> f64 {
        let z: f64 = self.sample(StandardNormal);
        mean + sigma * z
    }
}

/// Deterministic source for reproducible traces.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
