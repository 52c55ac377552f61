//! Pluggable randomness for target selection.
//!
//! The engine never calls `rand` directly. It asks a [`RandomSource`]
//! two questions - "does this press multiply?" and "which candidates get
//! tagged?" - so tests can substitute a scripted source and assert exact
//! target selection instead of relying on statistical convergence.

use rand::Rng;

/// The randomness the game engine consumes.
pub trait RandomSource: Send {
    /// Returns `true` with the given probability.
    ///
    /// `probability` must be in `[0.0, 1.0]`; the engine's validated
    /// config guarantees this.
    fn chance(&mut self, probability: f64) -> bool;

    /// Picks `amount` distinct indices in `0..length`, uniformly at
    /// random without replacement.
    ///
    /// Callers must pass `amount <= length`.
    fn sample(&mut self, length: usize, amount: usize) -> Vec<usize>;
}

/// The production [`RandomSource`], backed by the thread-local generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn chance(&mut self, probability: f64) -> bool {
        rand::rng().random_bool(probability)
    }

    fn sample(&mut self, length: usize, amount: usize) -> Vec<usize> {
        rand::seq::index::sample(&mut rand::rng(), length, amount).into_vec()
    }
}
