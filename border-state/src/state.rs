//! States of environments, consumed by agents.
//!
//! [`StateRecord`] is the state of a single environment and [`StateBatch`] is
//! the states of a vectorized environment, having leading batch dimensions.
//! Both have the four core fields, `observation`, `reward`, `done` and `mask`,
//! and arbitrary side-channel values like the number of lives in Atari games.
mod aggregate;
mod batch;
pub(crate) mod ops;
mod record;
pub use batch::{BatchIndex, StateBatch, StateBatchBuilder};
pub use record::{StateRecord, StateRecordBuilder};

/// Name of the observation field.
pub const OBSERVATION: &str = "observation";

/// Name of the reward field.
pub const REWARD: &str = "reward";

/// Name of the done field.
pub const DONE: &str = "done";

/// Name of the mask field.
pub const MASK: &str = "mask";
