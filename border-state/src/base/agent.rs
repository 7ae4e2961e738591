//! Agent.
use crate::{StateBatch, StateRecord};

/// An agent interacting with a single environment, episode by episode.
///
/// For each episode, [`Agent::initial`] is called at the first step, [`Agent::act`]
/// at the following steps and [`Agent::terminal`] once when the episode ends.
pub trait Agent {
    /// Action returned by the agent.
    type Act: Clone;

    /// Returns an action for the first state of an episode.
    fn initial(&mut self, state: &StateRecord) -> Self::Act;

    /// Returns an action for a state in the middle of an episode.
    ///
    /// `reward` is the reward received since the previous call.
    fn act(&mut self, state: &StateRecord, reward: f32) -> Self::Act;

    /// Receives the last reward of an episode.
    fn terminal(&mut self, reward: f32);
}

/// An agent interacting with a vectorized environment.
///
/// The end of an episode in a slot of the batch is notified by `done` and `mask`
/// of the slot. The following state of the slot belongs to a new episode.
pub trait ParallelAgent {
    /// Action for a slot.
    type Act: Clone;

    /// Returns actions, one for each slot of the batch.
    fn act(&mut self, state: &StateBatch) -> Vec<Self::Act>;
}
