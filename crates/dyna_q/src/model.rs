//! Learned environment model used by Dyna planning.
//!
//! Two pieces, both fed only by real transitions:
//! - [`RewardModel`]: an exponentially smoothed reward estimate per state-action pair.
//! - [`TransitionModel`]: visit counts of each observed next state per state-action pair.

use crate::error::{Error, Result};
use crate::table::{ActionId, QTable, StateId};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Smoothed immediate-reward estimate `R[s, a]`, same shape as the Q-table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RewardModel {
    rewards: QTable,
}

impl RewardModel {
    pub fn new(num_states: usize, num_actions: usize) -> Self {
        Self {
            rewards: QTable::new(num_states, num_actions),
        }
    }

    /// Folds an observed reward in: `R ← (1-α)·R + α·reward`.
    pub fn observe(&mut self, state: StateId, action: ActionId, reward: f64, alpha: f64) {
        let current = self.rewards.value(state, action);
        self.rewards
            .set(state, action, (1.0 - alpha) * current + alpha * reward);
    }

    /// Returns the current reward estimate for `(state, action)`.
    pub fn estimate(&self, state: StateId, action: ActionId) -> f64 {
        self.rewards.value(state, action)
    }

    /// Returns the estimates as a table.
    pub fn as_table(&self) -> &QTable {
        &self.rewards
    }
}

/// Next-state visit counts for a single state-action pair.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransitionStats {
    /// Observed next states and how often each occurred. Ordered by state index.
    pub next_states: BTreeMap<StateId, u64>,
    /// Total number of observations of this pair.
    pub total_count: u64,
}

impl TransitionStats {
    /// The most frequently observed next state. Ties go to the lowest state index.
    pub fn mode(&self) -> Option<StateId> {
        let mut best: Option<(StateId, u64)> = None;
        for (&next, &count) in &self.next_states {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((next, count)),
            }
        }
        best.map(|(next, _)| next)
    }
}

/// Sparse count model `T[(s, a)][s']`. Entries are created on first observation
/// and only ever accumulate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransitionModel {
    transitions: HashMap<(StateId, ActionId), TransitionStats>,
}

impl TransitionModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observed transition.
    pub fn record(&mut self, state: StateId, action: ActionId, next_state: StateId) {
        let stats = self.transitions.entry((state, action)).or_default();
        *stats.next_states.entry(next_state).or_insert(0) += 1;
        stats.total_count += 1;
    }

    /// Returns the most frequently observed next state for `(state, action)`.
    pub fn most_likely_next_state(&self, state: StateId, action: ActionId) -> Result<StateId> {
        self.transitions
            .get(&(state, action))
            .and_then(TransitionStats::mode)
            .ok_or_else(|| {
                Error::Model(format!(
                    "no transitions recorded for state {} action {}",
                    state, action
                ))
            })
    }

    /// Returns how often `(state, action)` led to `next_state`.
    pub fn count(&self, state: StateId, action: ActionId, next_state: StateId) -> u64 {
        self.transitions
            .get(&(state, action))
            .and_then(|stats| stats.next_states.get(&next_state).copied())
            .unwrap_or(0)
    }

    /// Returns how often `(state, action)` has been observed at all.
    pub fn total_count(&self, state: StateId, action: ActionId) -> u64 {
        self.transitions
            .get(&(state, action))
            .map(|stats| stats.total_count)
            .unwrap_or(0)
    }

    /// Returns the statistics for `(state, action)`, if it has been observed.
    pub fn stats(&self, state: StateId, action: ActionId) -> Option<&TransitionStats> {
        self.transitions.get(&(state, action))
    }

    /// Returns the empirical next-state distribution for `(state, action)`.
    pub fn probabilities(&self, state: StateId, action: ActionId) -> BTreeMap<StateId, f64> {
        self.transitions
            .get(&(state, action))
            .map(|stats| {
                stats
                    .next_states
                    .iter()
                    .map(|(&next, &count)| (next, count as f64 / stats.total_count as f64))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Number of distinct state-action pairs observed.
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }
}

/// The reward and transition models together, as maintained in planning mode.
#[derive(Debug, Clone, PartialEq)]
pub struct DynaModel {
    pub rewards: RewardModel,
    pub transitions: TransitionModel,
}

impl DynaModel {
    pub fn new(num_states: usize, num_actions: usize) -> Self {
        Self {
            rewards: RewardModel::new(num_states, num_actions),
            transitions: TransitionModel::new(),
        }
    }

    /// Updates both models from one real transition.
    pub fn observe(
        &mut self,
        state: StateId,
        action: ActionId,
        next_state: StateId,
        reward: f64,
        alpha: f64,
    ) {
        self.rewards.observe(state, action, reward, alpha);
        self.transitions.record(state, action, next_state);
    }

    /// Predicts `(next_state, reward)` for a pair that has been observed before.
    pub fn simulate(&self, state: StateId, action: ActionId) -> Result<(StateId, f64)> {
        let next_state = self.transitions.most_likely_next_state(state, action)?;
        Ok((next_state, self.rewards.estimate(state, action)))
    }
}
