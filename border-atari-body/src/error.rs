//! Errors in the library.
use border_state::StateError;
use thiserror::Error;

/// Errors raised by the preprocessing body.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BodyError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The episode of the slot has ended and the body has not been reset.
    #[error("Episode of slot {0} has ended, reset the body before the next step")]
    AwaitingReset(usize),

    /// A raw frame is neither `(channels, height, width)` nor `(height, width)`.
    #[error("Frame must have shape (channels, height, width) or (height, width), got {0:?}")]
    FrameShape(Vec<usize>),

    /// The shape of raw frames changed within an episode.
    #[error("Frame shape changed from {prev:?} to {found:?} within an episode")]
    FrameMismatch {
        /// Shape of the previous frame.
        prev: Vec<usize>,
        /// Shape of the current frame.
        found: Vec<usize>,
    },

    /// The batch does not have one state for each slot.
    #[error("Expected a batch of {expected} slots, got shape {found:?}")]
    SlotCount {
        /// The number of slots of the body.
        expected: usize,
        /// Shape of the given batch.
        found: Vec<usize>,
    },

    /// The agent did not return one action for each slot.
    #[error("Agent returned {found} actions for {expected} slots")]
    ActionCount {
        /// The number of slots of the body.
        expected: usize,
        /// The number of actions.
        found: usize,
    },

    /// Error in constructing a state.
    #[error(transparent)]
    State(#[from] StateError),
}
