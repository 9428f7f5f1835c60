//! Randomness port.
//!
//! Bonus rolls, question sampling, and secret drawing all go through this
//! trait so tests can script outcomes deterministically.

use rand::Rng;

/// An abstract source of randomness.
pub trait RandomSource: Send + Sync {
    /// One Bernoulli roll. `probability` must be within `[0, 1]`.
    fn chance(&self, probability: f64) -> bool;

    /// Uniform index into a collection of `len` elements. `len` must be
    /// non-zero.
    fn pick(&self, len: usize) -> usize;

    /// Uniform integer in `min..=max`.
    fn int_between(&self, min: i64, max: i64) -> i64;
}

/// Production randomness backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn chance(&self, probability: f64) -> bool {
        rand::thread_rng().gen_bool(probability.clamp(0.0, 1.0))
    }

    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }

    fn int_between(&self, min: i64, max: i64) -> i64 {
        rand::thread_rng().gen_range(min..=max)
    }
}
