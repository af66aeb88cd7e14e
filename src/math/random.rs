//! Seedable source of the stochastic choices made during placement

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Random selector used for spawn trials, jitter offsets and retry positions
///
/// A fixed seed makes a layout pass reproducible; without one the selector
/// draws from OS entropy and every pass differs.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a selector, deterministic when `seed` is given
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self { rng }
    }

    /// Create a deterministic selector
    pub fn seeded(seed: u64) -> Self {
        Self::new(Some(seed))
    }

    /// Uniform sample in `[0, 1)`
    pub fn unit(&mut self) -> f64 {
        self.rng.random::<f64>()
    }

    /// Uniform sample in `[-1, 1)`
    pub fn signed_unit(&mut self) -> f64 {
        self.unit().mul_add(2.0, -1.0)
    }

    /// Bernoulli trial succeeding with `probability`
    ///
    /// Probabilities at or below zero never succeed, at or above one always do.
    pub fn spawns(&mut self, probability: f64) -> bool {
        self.unit() < probability
    }

    /// Integer drawn uniformly from `[0, limit)`; `limit` below one acts as one
    pub fn below(&mut self, limit: i32) -> i32 {
        let span = f64::from(limit.max(1));
        (self.unit() * span).floor() as i32
    }

    /// Offset drawn uniformly from `[-radius, radius)`, floored to whole pixels
    pub fn jitter(&mut self, radius: f64) -> i32 {
        (self.signed_unit() * radius).floor() as i32
    }
}

/// Jitter radius multiplier for a candidate sample
///
/// Shrinks linearly from 1 at the first sample to `1 - falloff` at the last
/// of `samples` samples.
pub fn jitter_factor(sample: usize, samples: usize, falloff: f64) -> f64 {
    if samples < 2 {
        return 1.0;
    }
    let progress = sample.min(samples - 1) as f64 / (samples - 1) as f64;
    progress.mul_add(-falloff, 1.0)
}
