#![warn(missing_docs)]
//! States of environments for reinforcement learning agents.
//!
//! A [`StateRecord`] holds the observation, reward, done flag and mask of an
//! environment at a step, together with side-channel values. A [`StateBatch`] does
//! the same for a vectorized environment. Both are immutable: updates return new states.
//!
//! The traits [`Agent`], [`ParallelAgent`] and [`Environment`] describe the
//! collaborators which produce and consume states.
pub mod error;
pub mod record;
pub mod state;

mod base;
pub use base::{Agent, Environment, ParallelAgent};
pub use error::{RecordError, StateError};
pub use state::{BatchIndex, StateBatch, StateBatchBuilder, StateRecord, StateRecordBuilder};

mod value;
pub use value::{Column, Value};
