//! Source of the random draws made while resolving moves.

use rand::Rng;

/// Anything that can produce uniform values in `[0, 1)`.
///
/// Every [`rand::Rng`] is a random source, so a seeded `SmallRng` makes a
/// battle reproducible.
pub trait BattleRandom {
    fn next_f64(&mut self) -> f64;

    /// `true` with probability `p`.
    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    /// Uniform value between `low` and `high`, inclusive.
    fn range(&mut self, low: f64, high: f64) -> f64 {
        (low + self.next_f64() * (high - low)).min(high)
    }

    /// Uniform value in `[0, 100)`.
    fn roll(&mut self) -> f64 {
        self.next_f64() * 100.0
    }
}

impl<R: Rng + ?Sized> BattleRandom for R {
    fn next_f64(&mut self) -> f64 {
        self.gen()
    }
}
