//! Append-only log of real transitions, used as the sampling pool for planning.

use crate::table::{ActionId, StateId};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A single observed `(state, action, next_state, reward)` transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Experience {
    pub state: StateId,
    pub action: ActionId,
    pub next_state: StateId,
    pub reward: f64,
}

impl Experience {
    pub fn new(state: StateId, action: ActionId, next_state: StateId, reward: f64) -> Self {
        Self {
            state,
            action,
            next_state,
            reward,
        }
    }
}

/// Chronological record of every real transition. Never pruned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExperienceLog {
    entries: Vec<Experience>,
}

impl ExperienceLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, experience: Experience) {
        self.entries.push(experience);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Experience> {
        self.entries.get(index)
    }

    /// Iterates oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &Experience> {
        self.entries.iter()
    }

    /// Draws one entry uniformly at random. `None` when the log is empty.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Experience> {
        if self.entries.is_empty() {
            return None;
        }
        let index = rng.random_range(0..self.entries.len());
        self.entries.get(index)
    }
}
