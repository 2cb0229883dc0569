//! Configuration for the Dyna-Q learner.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Parameters fixed at construction of a [`QLearner`](crate::QLearner).
///
/// Every field may be omitted from a JSON document; missing fields take the
/// values from [`LearnerConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LearnerConfig {
    /// Number of discrete states. Rows of the Q-table.
    pub num_states: usize,
    /// Number of discrete actions. Columns of the Q-table.
    pub num_actions: usize,
    /// The learning rate (alpha), in [0, 1]. Typically 0.2.
    pub learning_rate: f64,
    /// The discount factor (gamma), in [0, 1]. Typically 0.9.
    pub discount_factor: f64,
    /// Initial probability of taking a random action, in [0, 1].
    pub exploration_rate: f64,
    /// Multiplier applied to the exploration rate after every real update, in [0, 1].
    /// 1.0 disables decay, 0.0 stops exploring after the first update.
    pub exploration_decay: f64,
    /// Number of simulated Dyna updates per real update. 0 disables planning.
    pub planning_steps: usize,
    /// Log every prime and step at debug level.
    pub verbose: bool,
}

impl Default for LearnerConfig {
    fn default() -> Self {
        Self {
            num_states: 100,
            num_actions: 4,
            learning_rate: 0.2,
            discount_factor: 0.9,
            exploration_rate: 0.5,
            exploration_decay: 0.99,
            planning_steps: 0,
            verbose: false,
        }
    }
}

impl LearnerConfig {
    /// Creates a configuration for a table of the given size, other fields at defaults.
    pub fn new(num_states: usize, num_actions: usize) -> Self {
        Self {
            num_states,
            num_actions,
            ..Default::default()
        }
    }

    /// Returns a configuration with Dyna planning enabled at the usual 200 replays per step.
    pub fn dyna(num_states: usize, num_actions: usize) -> Self {
        Self {
            planning_steps: 200,
            ..Self::new(num_states, num_actions)
        }
    }

    /// Returns a configuration that never explores: always the greedy action, no decay.
    pub fn greedy(num_states: usize, num_actions: usize) -> Self {
        Self {
            exploration_rate: 0.0,
            exploration_decay: 1.0,
            ..Self::new(num_states, num_actions)
        }
    }

    pub fn with_learning_rate(mut self, alpha: f64) -> Self {
        self.learning_rate = alpha;
        self
    }

    pub fn with_discount_factor(mut self, gamma: f64) -> Self {
        self.discount_factor = gamma;
        self
    }

    /// Sets the initial random-action rate.
    pub fn with_exploration(mut self, rate: f64) -> Self {
        self.exploration_rate = rate;
        self
    }

    pub fn with_exploration_decay(mut self, decay: f64) -> Self {
        self.exploration_decay = decay;
        self
    }

    /// Sets the number of Dyna replays per real update.
    pub fn with_planning_steps(mut self, steps: usize) -> Self {
        self.planning_steps = steps;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Returns `true` when Dyna planning is enabled.
    pub fn planning_enabled(&self) -> bool {
        self.planning_steps > 0
    }

    /// Checks table dimensions and that every rate lies in [0, 1].
    pub fn validate(&self) -> Result<()> {
        if self.num_states == 0 {
            return Err(Error::Config("num_states must be greater than 0".into()));
        }
        if self.num_actions == 0 {
            return Err(Error::Config("num_actions must be greater than 0".into()));
        }

        let rates = [
            ("learning_rate", self.learning_rate),
            ("discount_factor", self.discount_factor),
            ("exploration_rate", self.exploration_rate),
            ("exploration_decay", self.exploration_decay),
        ];
        for (name, value) in rates {
            if !(0.0..=1.0).contains(&value) {
                return Err(Error::Config(format!(
                    "{} must be within [0, 1], got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }

    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
