//! Environment.
use crate::StateRecord;
use anyhow::Result;

/// An environment, typically an Atari game, seen from an agent.
pub trait Environment {
    /// Action accepted by the environment.
    type Act;

    /// The current state.
    fn state(&self) -> &StateRecord;

    /// Starts a new episode and returns its first state.
    fn reset(&mut self) -> Result<&StateRecord>;

    /// Applies an action and returns the next state.
    fn step(&mut self, act: &Self::Act) -> Result<&StateRecord>;

    /// The number of remaining lives, `None` if the environment has no notion of lives.
    fn lives(&self) -> Option<i64> {
        None
    }

    /// Human readable names of the actions, like `"NOOP"` or `"FIRE"`.
    fn action_meanings(&self) -> Vec<String> {
        vec![]
    }
}
