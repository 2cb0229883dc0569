#![doc = include_str!("../README.md")]
//! # Dyna-Q
//!
//! Tabular Q-learning for discrete Markov decision processes, with optional
//! model-based planning.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        QLearner                          │
//! ├──────────────────────────────────────────────────────────┤
//! │                                                          │
//! │  update(s', r)                                           │
//! │      │                                                   │
//! │      ▼                                                   │
//! │  ┌──────────┐   ┌──────────────┐   ┌──────────────────┐  │
//! │  │ Q-update │──►│  Experience  │──►│   Dyna model     │  │
//! │  │          │   │     log      │   │ • rewards R      │  │
//! │  └──────────┘   └──────┬───────┘   │ • transitions T  │  │
//! │                        │ sample    └────────┬─────────┘  │
//! │                        ▼                    │            │
//! │                 ┌──────────────┐            │            │
//! │                 │   Planning   │◄───────────┘            │
//! │                 │   replay ×P  │                         │
//! │                 └──────┬───────┘                         │
//! │                        ▼                                 │
//! │                 ┌──────────────┐                         │
//! │                 │ ε-greedy     │──► action               │
//! │                 └──────────────┘                         │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! The caller owns the environment: it primes the learner with a start state,
//! then repeatedly reports where the last action led and the reward it earned.
//!
//! ```
//! use dyna_q::{LearnerConfig, QLearner};
//!
//! let config = LearnerConfig::new(10, 4).with_planning_steps(20);
//! let mut learner = QLearner::with_seed(config, 42).unwrap();
//!
//! let mut action = learner.query_state_only(0);
//! for step in 0..100 {
//!     let next_state = (step + action) % 10;
//!     let reward = if next_state == 9 { 1.0 } else { -0.01 };
//!     action = learner.update(next_state, reward);
//! }
//! assert_eq!(learner.stats().planning_updates, 2000);
//! ```

pub mod config;
pub mod error;
pub mod experience;
pub mod learner;
pub mod model;
pub mod policy;
pub mod table;

pub use config::LearnerConfig;
pub use error::{Error, Result};
pub use experience::{Experience, ExperienceLog};
pub use learner::{LearnerStats, QLearner, StateActionPair};
pub use model::{DynaModel, RewardModel, TransitionModel, TransitionStats};
pub use policy::EpsilonGreedy;
pub use table::{ActionId, QTable, StateId};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Creates a plain Q-learner (no planning) with default rates.
///
/// # Examples
///
/// ```
/// use dyna_q::create_learner;
///
/// let learner = create_learner(16, 4).unwrap();
/// assert_eq!(learner.q_table().num_states(), 16);
/// ```
pub fn create_learner(num_states: usize, num_actions: usize) -> Result<QLearner> {
    QLearner::new(LearnerConfig::new(num_states, num_actions))
}

/// Creates a Dyna-Q learner that replays `planning_steps` simulated
/// transitions after every real one.
///
/// # Examples
///
/// ```
/// use dyna_q::create_dyna_learner;
///
/// let learner = create_dyna_learner(16, 4, 200).unwrap();
/// assert!(learner.transition_model().is_some());
/// ```
pub fn create_dyna_learner(
    num_states: usize,
    num_actions: usize,
    planning_steps: usize,
) -> Result<QLearner> {
    QLearner::new(LearnerConfig::new(num_states, num_actions).with_planning_steps(planning_steps))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_learner() {
        let learner = create_learner(8, 2).unwrap();
        assert_eq!(learner.q_table().num_actions(), 2);
        assert!(learner.reward_model().is_none());
    }

    #[test]
    fn test_create_dyna_learner() {
        let learner = create_dyna_learner(8, 2, 10).unwrap();
        assert_eq!(learner.config().planning_steps, 10);
        assert!(learner.reward_model().is_some());
    }

    #[test]
    fn test_create_learner_rejects_empty_table() {
        assert!(create_learner(0, 2).is_err());
        assert!(create_dyna_learner(8, 0, 10).is_err());
    }
}
