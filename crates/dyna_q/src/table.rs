//! Dense state-action value table.

use serde::{Deserialize, Serialize};

/// Index of a discrete state, in `[0, num_states)`.
pub type StateId = usize;
/// Index of a discrete action, in `[0, num_actions)`.
pub type ActionId = usize;

/// A row-major `num_states × num_actions` matrix of Q-values.
///
/// Dimensions are fixed at construction. All entries start at zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QTable {
    values: Vec<f64>,
    num_states: usize,
    num_actions: usize,
}

impl QTable {
    /// Creates a zero-filled table.
    pub fn new(num_states: usize, num_actions: usize) -> Self {
        Self {
            values: vec![0.0; num_states * num_actions],
            num_states,
            num_actions,
        }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn num_actions(&self) -> usize {
        self.num_actions
    }

    #[inline]
    fn index(&self, state: StateId, action: ActionId) -> usize {
        assert!(state < self.num_states, "state {} out of range", state);
        assert!(action < self.num_actions, "action {} out of range", action);
        state * self.num_actions + action
    }

    /// Returns the value at `(state, action)`, or `None` when either index is out of range.
    pub fn get(&self, state: StateId, action: ActionId) -> Option<f64> {
        if state < self.num_states && action < self.num_actions {
            Some(self.values[state * self.num_actions + action])
        } else {
            None
        }
    }

    /// Returns the value at `(state, action)`. Panics on out-of-range indices.
    pub fn value(&self, state: StateId, action: ActionId) -> f64 {
        self.values[self.index(state, action)]
    }

    /// Overwrites the value at `(state, action)`. Panics on out-of-range indices.
    pub fn set(&mut self, state: StateId, action: ActionId, value: f64) {
        let idx = self.index(state, action);
        self.values[idx] = value;
    }

    /// Returns all action values of a state.
    pub fn row(&self, state: StateId) -> &[f64] {
        let start = self.index(state, 0);
        &self.values[start..start + self.num_actions]
    }

    /// Returns `max_a Q[state, a]`, computed from the current contents.
    pub fn max_value(&self, state: StateId) -> f64 {
        self.row(state)
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Returns `argmax_a Q[state, a]`. Ties go to the lowest action index.
    pub fn best_action(&self, state: StateId) -> ActionId {
        let row = self.row(state);
        let mut best = 0;
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }
        best
    }

    /// Returns the underlying row-major storage.
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }
}
