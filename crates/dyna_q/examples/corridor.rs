//! Dyna-Q on a one-dimensional corridor.
//!
//! The agent starts at cell 0 and is rewarded for reaching the last cell.
//! Action 0 moves left, action 1 moves right; every move costs a little.
//! Compares how many real steps plain Q-learning and Dyna-Q need per episode.
//!
//! Run with: cargo run -p dyna_q --example corridor

use dyna_q::{LearnerConfig, QLearner};

const CELLS: usize = 12;
const EPISODES: usize = 30;

fn step(state: usize, action: usize) -> (usize, f64) {
    let next = match action {
        0 => state.saturating_sub(1),
        _ => (state + 1).min(CELLS - 1),
    };
    let reward = if next == CELLS - 1 { 1.0 } else { -0.01 };
    (next, reward)
}

fn run(planning_steps: usize) -> dyna_q::Result<Vec<usize>> {
    let config = LearnerConfig::new(CELLS, 2)
        .with_exploration(0.3)
        .with_exploration_decay(0.98)
        .with_planning_steps(planning_steps);
    let mut learner = QLearner::with_seed(config, 2024)?;

    let mut lengths = Vec::with_capacity(EPISODES);
    for _ in 0..EPISODES {
        let mut state = 0;
        let mut action = learner.query_state_only(state);
        let mut steps = 0;
        while state != CELLS - 1 && steps < 10_000 {
            let (next, reward) = step(state, action);
            action = learner.update(next, reward);
            state = next;
            steps += 1;
        }
        lengths.push(steps);
    }
    Ok(lengths)
}

fn main() -> dyna_q::Result<()> {
    let plain = run(0)?;
    let dyna = run(50)?;

    println!("episode  q-learning  dyna-q(50)");
    for (episode, (p, d)) in plain.iter().zip(dyna.iter()).enumerate() {
        println!("{:>7}  {:>10}  {:>10}", episode + 1, p, d);
    }
    Ok(())
}
