//! Seeded random helpers
//!
//! Every random decision in the simulation (lane choice, color choice, particle
//! spread) goes through this wrapper so a run is reproducible from its seed.

use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform range/int/choice helpers over a seeded PCG stream
#[derive(Debug, Clone)]
pub struct RandomSource {
    seed: u64,
    rng: Pcg32,
}

impl RandomSource {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this source was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in `[min, max)`. Returns `min` for an empty range.
    pub fn range(&mut self, min: f32, max: f32) -> f32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }

    /// Uniform integer in `[min, max)`. Returns `min` for an empty range.
    pub fn int(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..max)
    }

    /// Uniformly chosen element, `None` for an empty slice
    pub fn choice<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}
