//! Weighted random choice over catalog counts

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Index selected by walking cumulative weights until they reach `draw`
///
/// `draw` is expected in `[0, total)`. Zero weights are never picked unless
/// the draw runs past every weight, in which case floating point slack falls
/// back to the final index. Returns `None` for an empty slice.
pub fn cumulative_pick(weights: &[u64], draw: f64) -> Option<usize> {
    let mut accumulated = 0.0;
    for (index, &weight) in weights.iter().enumerate() {
        accumulated += weight as f64;
        if weight > 0 && accumulated >= draw {
            return Some(index);
        }
    }
    weights.len().checked_sub(1)
}

/// Seeded random selector for reproducible weighted choices
///
/// The only source of nondeterminism in a run. Two selectors built from the
/// same seed produce the same sequence of choices.
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform value in `[0, total)`
    pub fn draw(&mut self, total: u64) -> f64 {
        self.rng.random::<f64>() * total as f64
    }

    /// Weighted random selection of an index
    ///
    /// Probability of each index is proportional to its weight. Returns
    /// `None` when there is nothing to choose from or every weight is zero.
    pub fn weighted_choice(&mut self, weights: &[u64]) -> Option<usize> {
        let total: u64 = weights.iter().sum();
        if total == 0 {
            return None;
        }
        let draw = self.draw(total);
        cumulative_pick(weights, draw)
    }
}
