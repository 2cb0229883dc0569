//! The Q-learning agent with optional Dyna planning.
//!
//! Each real step applies the off-policy update
//!
//! ```text
//! Q[s,a] ← (1-α)·Q[s,a] + α·(r + γ·max_a' Q[s',a'])
//! ```
//!
//! to the pending `(s, a)` pair, logs the transition, and in planning mode
//! replays `planning_steps` simulated transitions drawn from the experience
//! log and the learned model before choosing the next action.

use crate::config::LearnerConfig;
use crate::error::Result;
use crate::experience::{Experience, ExperienceLog};
use crate::model::{DynaModel, RewardModel, TransitionModel};
use crate::policy::EpsilonGreedy;
use crate::table::{ActionId, QTable, StateId};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

/// A `(state, action)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct StateActionPair {
    pub state: StateId,
    pub action: ActionId,
}

impl StateActionPair {
    pub fn new(state: StateId, action: ActionId) -> Self {
        Self { state, action }
    }
}

/// Counters over the lifetime of a learner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearnerStats {
    /// Real updates performed (calls to [`QLearner::update`]).
    pub steps: u64,
    /// Simulated Dyna updates performed.
    pub planning_updates: u64,
    /// Q-table writes, real and simulated.
    pub table_writes: u64,
}

/// A tabular Q-learning agent.
///
/// The agent owns its random source so a fixed seed and a fixed input
/// sequence always produce the same table. Instances share nothing.
///
/// # Example
///
/// ```
/// use dyna_q::{LearnerConfig, QLearner};
///
/// let config = LearnerConfig::greedy(4, 2).with_learning_rate(0.5);
/// let mut learner = QLearner::with_seed(config, 7).unwrap();
///
/// let action = learner.query_state_only(0);
/// learner.update(1, 10.0);
/// assert_eq!(learner.q_value(0, action), 5.0);
/// ```
#[derive(Debug, Clone)]
pub struct QLearner<R = StdRng> {
    config: LearnerConfig,
    q_table: QTable,
    policy: EpsilonGreedy,
    current: StateActionPair,
    experience: ExperienceLog,
    model: Option<DynaModel>,
    stats: LearnerStats,
    rng: R,
}

impl QLearner<StdRng> {
    /// Creates a learner seeded from the thread-local generator.
    pub fn new(config: LearnerConfig) -> Result<Self> {
        let rng = StdRng::from_rng(&mut rand::rng());
        Self::with_rng(config, rng)
    }

    /// Creates a learner with a reproducible random source.
    pub fn with_seed(config: LearnerConfig, seed: u64) -> Result<Self> {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QLearner<R> {
    /// Creates a learner drawing all randomness from `rng`.
    ///
    /// Fails with [`Error::Config`](crate::Error::Config) for an empty table or
    /// any rate outside [0, 1].
    pub fn with_rng(config: LearnerConfig, rng: R) -> Result<Self> {
        config.validate()?;

        let model = config
            .planning_enabled()
            .then(|| DynaModel::new(config.num_states, config.num_actions));

        log::info!(
            "Created Q-learner: {} states x {} actions, planning steps: {}",
            config.num_states,
            config.num_actions,
            config.planning_steps
        );

        Ok(Self {
            q_table: QTable::new(config.num_states, config.num_actions),
            policy: EpsilonGreedy::new(config.exploration_rate, config.exploration_decay),
            current: StateActionPair::default(),
            experience: ExperienceLog::new(),
            model,
            stats: LearnerStats::default(),
            rng,
            config,
        })
    }

    /// Chooses an action for `state` and makes `(state, action)` the pending pair.
    pub fn select_action(&mut self, state: StateId) -> ActionId {
        let action = self.policy.select(&self.q_table, state, &mut self.rng);
        self.current = StateActionPair::new(state, action);
        action
    }

    /// Sets the state without learning and returns the action to take from it.
    /// Used to start an episode.
    pub fn query_state_only(&mut self, state: StateId) -> ActionId {
        let action = self.select_action(state);
        if self.config.verbose {
            log::debug!("s = {}, a = {}", state, action);
        }
        action
    }

    /// Learns from the outcome of the pending action and returns the next action.
    ///
    /// `next_state` is where the pending action led and `reward` the immediate
    /// reward received for it. The exploration rate decays once per call.
    pub fn update(&mut self, next_state: StateId, reward: f64) -> ActionId {
        let StateActionPair { state, action } = self.current;

        self.apply_update(state, action, reward, next_state);

        // Log and model must move together: planning only samples logged pairs.
        self.experience
            .push(Experience::new(state, action, next_state, reward));
        if let Some(model) = self.model.as_mut() {
            model.observe(state, action, next_state, reward, self.config.learning_rate);
        }

        self.plan();

        let next_action = self.select_action(next_state);
        self.policy.decay();
        self.stats.steps += 1;

        if self.config.verbose {
            log::debug!("s = {}, a = {}, r = {}", next_state, next_action, reward);
        }
        next_action
    }

    fn apply_update(&mut self, state: StateId, action: ActionId, reward: f64, next_state: StateId) {
        let alpha = self.config.learning_rate;
        let target = reward + self.config.discount_factor * self.q_table.max_value(next_state);
        let updated = (1.0 - alpha) * self.q_table.value(state, action) + alpha * target;
        self.q_table.set(state, action, updated);
        self.stats.table_writes += 1;
    }

    /// Replays `planning_steps` simulated transitions through the update rule.
    fn plan(&mut self) {
        for _ in 0..self.config.planning_steps {
            let (state, action) = match self.experience.sample(&mut self.rng) {
                Some(exp) => (exp.state, exp.action),
                None => panic!("planning with an empty experience log"),
            };
            let simulated = match &self.model {
                Some(model) => model.simulate(state, action),
                None => panic!("planning enabled without a learned model"),
            };
            let (next_state, reward) = match simulated {
                Ok(outcome) => outcome,
                Err(e) => panic!("experience log and model out of sync: {}", e),
            };

            log::trace!(
                "planning: s = {}, a = {}, s' = {}, r = {}",
                state,
                action,
                next_state,
                reward
            );
            self.apply_update(state, action, reward, next_state);
            self.stats.planning_updates += 1;
        }
    }

    pub fn config(&self) -> &LearnerConfig {
        &self.config
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Returns `Q[state, action]`.
    pub fn q_value(&self, state: StateId, action: ActionId) -> f64 {
        self.q_table.value(state, action)
    }

    /// The current random-action probability.
    pub fn exploration_rate(&self) -> f64 {
        self.policy.rate()
    }

    /// The pair the next [`update`](Self::update) will learn about.
    pub fn current(&self) -> StateActionPair {
        self.current
    }

    pub fn experience(&self) -> &ExperienceLog {
        &self.experience
    }

    /// The learned reward model. `None` unless planning is enabled.
    pub fn reward_model(&self) -> Option<&RewardModel> {
        self.model.as_ref().map(|m| &m.rewards)
    }

    /// The learned transition counts. `None` unless planning is enabled.
    pub fn transition_model(&self) -> Option<&TransitionModel> {
        self.model.as_ref().map(|m| &m.transitions)
    }

    pub fn stats(&self) -> LearnerStats {
        self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn greedy(num_states: usize, num_actions: usize) -> LearnerConfig {
        LearnerConfig::greedy(num_states, num_actions)
            .with_learning_rate(0.5)
            .with_discount_factor(0.9)
    }

    #[test]
    fn test_learner_creation() {
        let learner = QLearner::with_seed(LearnerConfig::default(), 1).unwrap();
        assert_eq!(learner.q_table().num_states(), 100);
        assert_eq!(learner.q_table().num_actions(), 4);
        assert!(learner.experience().is_empty());
        assert!(learner.reward_model().is_none());
        assert!(learner.transition_model().is_none());
        assert_eq!(learner.stats(), LearnerStats::default());
    }

    #[test]
    fn test_rejects_invalid_config() {
        let err = QLearner::with_seed(LearnerConfig::new(0, 2), 1).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_planning_mode_allocates_model() {
        let learner = QLearner::with_seed(LearnerConfig::dyna(5, 2), 1).unwrap();
        assert!(learner.reward_model().is_some());
        assert!(learner.transition_model().unwrap().is_empty());
    }

    #[test]
    fn test_query_state_only_does_not_learn() {
        let mut learner = QLearner::with_seed(greedy(4, 2), 1).unwrap();
        let action = learner.query_state_only(3);
        assert_eq!(learner.current(), StateActionPair::new(3, action));
        assert!(learner.q_table().as_slice().iter().all(|&v| v == 0.0));
        assert!(learner.experience().is_empty());
        assert_eq!(learner.stats().steps, 0);
    }

    #[test]
    fn test_update_without_prime_anchors_at_origin() {
        let mut learner = QLearner::with_seed(greedy(4, 2), 1).unwrap();
        learner.update(2, 1.0);
        assert_eq!(learner.q_value(0, 0), 0.5);
        assert_eq!(learner.current().state, 2);
    }

    #[test]
    fn test_update_bootstraps_from_next_state_max() {
        let mut learner = QLearner::with_seed(greedy(3, 2), 1).unwrap();
        learner.q_table.set(2, 1, 4.0);

        learner.query_state_only(0);
        learner.update(2, 1.0);

        // 0.5 * 0 + 0.5 * (1 + 0.9 * 4)
        assert!((learner.q_value(0, 0) - 2.3).abs() < 1e-12);
        assert_eq!(learner.current(), StateActionPair::new(2, 1));
    }

    #[test]
    fn test_update_records_model() {
        let config = greedy(4, 2).with_planning_steps(3);
        let mut learner = QLearner::with_seed(config, 9).unwrap();

        learner.query_state_only(1);
        learner.update(2, 4.0);

        let exp = learner.experience().get(0).unwrap();
        assert_eq!((exp.state, exp.action, exp.next_state, exp.reward), (1, 0, 2, 4.0));
        assert_eq!(learner.transition_model().unwrap().count(1, 0, 2), 1);
        assert_eq!(learner.reward_model().unwrap().estimate(1, 0), 2.0);
    }

    #[test]
    fn test_planning_counts() {
        let config = greedy(4, 2).with_planning_steps(5);
        let mut learner = QLearner::with_seed(config, 9).unwrap();

        learner.query_state_only(0);
        for step in 0..10 {
            learner.update(step % 4, 1.0);
        }

        let stats = learner.stats();
        assert_eq!(stats.steps, 10);
        assert_eq!(stats.planning_updates, 50);
        assert_eq!(stats.table_writes, 60);
    }

    #[test]
    fn test_planning_uses_model_not_logged_transition() {
        let config = greedy(4, 2).with_planning_steps(1);
        let mut learner = QLearner::with_seed(config, 5).unwrap();
        learner.q_table.set(1, 0, 4.0);
        learner.q_table.set(2, 0, 20.0);

        // Priming state 0 each time keeps (0, 0) the only logged pair,
        // so every planning replay samples it.
        let update =
            |q: f64, reward: f64, next_max: f64| 0.5 * q + 0.5 * (reward + 0.9 * next_max);

        assert_eq!(learner.query_state_only(0), 0);
        learner.update(1, 2.0);
        let mut q = update(0.0, 2.0, 4.0);
        q = update(q, 1.0, 4.0); // R = 1
        assert!((learner.q_value(0, 0) - q).abs() < 1e-12);

        assert_eq!(learner.query_state_only(0), 0);
        learner.update(1, 4.0);
        q = update(q, 4.0, 4.0);
        q = update(q, 2.5, 4.0); // R = 2.5
        assert!((learner.q_value(0, 0) - q).abs() < 1e-12);

        // Logged next state 2 and reward 8; the model still says 1 and R = 5.25.
        assert_eq!(learner.query_state_only(0), 0);
        learner.update(2, 8.0);
        let real = update(q, 8.0, 20.0);
        let expected = update(real, 5.25, 4.0);

        let model = learner.transition_model().unwrap();
        assert_eq!(model.most_likely_next_state(0, 0).unwrap(), 1);
        assert_eq!(learner.reward_model().unwrap().estimate(0, 0), 5.25);
        assert!((learner.q_value(0, 0) - expected).abs() < 1e-12);
        assert!((expected - 12.39375).abs() < 1e-12);

        // Replaying the logged transition instead would have given these.
        assert!((learner.q_value(0, 0) - update(real, 8.0, 20.0)).abs() > 1.0);
        assert!((learner.q_value(0, 0) - update(real, 8.0, 4.0)).abs() > 1.0);
        assert!((learner.q_value(0, 0) - update(real, 5.25, 20.0)).abs() > 1.0);
    }

    #[test]
    #[should_panic(expected = "planning enabled without a learned model")]
    fn test_planning_without_model_is_fatal() {
        let mut learner = QLearner::with_seed(greedy(4, 2), 1).unwrap();
        learner.config.planning_steps = 1;
        learner.query_state_only(0);
        learner.update(1, 1.0);
    }

    #[test]
    #[should_panic(expected = "planning with an empty experience log")]
    fn test_planning_with_empty_log_is_fatal() {
        let mut learner = QLearner::with_seed(greedy(4, 2).with_planning_steps(1), 1).unwrap();
        learner.plan();
    }
}
