//! Seeded random stream shared by every generation stage
//!
//! One `SeededRng` is created per generation and passed by `&mut` through the
//! pipeline. The order in which stages draw from it is fixed, so the same seed
//! always yields the same planet.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic random stream
#[derive(Debug, Clone)]
pub struct SeededRng {
    seed: u64,
    rng: ChaCha8Rng,
}

impl SeededRng {
    /// Create a stream from a seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Uniform float in `[0, 1)`
    #[inline]
    pub fn next_float(&mut self) -> f64 {
        self.rng.gen::<f64>()
    }

    /// Uniform float in `[min, max)`
    #[inline]
    pub fn next_range(&mut self, min: f64, max: f64) -> f64 {
        min + (max - min) * self.next_float()
    }

    /// Uniform integer in `[min, max]` (both inclusive)
    ///
    /// Returns `min` when `max <= min`.
    #[inline]
    pub fn next_int(&mut self, min: usize, max: usize) -> usize {
        if max <= min {
            return min;
        }
        self.rng.gen_range(min..=max)
    }

    /// Shuffle a slice in place (Fisher–Yates)
    #[inline]
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Seed this stream was created from
    #[inline]
    pub fn current_seed(&self) -> u64 {
        self.seed
    }
}
