//! Epsilon-greedy action selection over a Q-table.

use crate::table::{ActionId, QTable, StateId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Epsilon-greedy exploration with multiplicative decay.
///
/// With probability `rate` a uniformly random action is chosen, otherwise the
/// greedy action (lowest index among equal maxima).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpsilonGreedy {
    rate: f64,
    decay_factor: f64,
}

impl EpsilonGreedy {
    pub fn new(rate: f64, decay_factor: f64) -> Self {
        Self { rate, decay_factor }
    }

    /// The current random-action probability.
    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn decay_factor(&self) -> f64 {
        self.decay_factor
    }

    /// Multiplies the rate by the decay factor once.
    pub fn decay(&mut self) {
        self.rate *= self.decay_factor;
    }

    /// Picks an action for `state`.
    pub fn select<R: Rng + ?Sized>(&self, table: &QTable, state: StateId, rng: &mut R) -> ActionId {
        if rng.random::<f64>() < self.rate {
            rng.random_range(0..table.num_actions())
        } else {
            table.best_action(state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_greedy_when_rate_zero() {
        let mut table = QTable::new(2, 3);
        table.set(1, 2, 1.0);
        let policy = EpsilonGreedy::new(0.0, 1.0);
        let mut rng = StdRng::seed_from_u64(1);

        for _ in 0..100 {
            assert_eq!(policy.select(&table, 1, &mut rng), 2);
            assert_eq!(policy.select(&table, 0, &mut rng), 0);
        }
    }

    #[test]
    fn test_random_when_rate_one() {
        let mut table = QTable::new(1, 4);
        table.set(0, 0, 100.0);
        let policy = EpsilonGreedy::new(1.0, 1.0);
        let mut rng = StdRng::seed_from_u64(3);

        let mut counts = [0usize; 4];
        for _ in 0..4000 {
            counts[policy.select(&table, 0, &mut rng)] += 1;
        }
        for count in counts {
            assert!((800..1200).contains(&count), "counts: {:?}", counts);
        }
    }

    #[test]
    fn test_decay() {
        let mut policy = EpsilonGreedy::new(0.5, 0.5);
        policy.decay();
        assert_eq!(policy.rate(), 0.25);
        policy.decay();
        assert_eq!(policy.rate(), 0.125);
        assert_eq!(policy.decay_factor(), 0.5);
    }
}
