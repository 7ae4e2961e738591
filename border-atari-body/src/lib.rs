#![warn(missing_docs)]
//! Atari preprocessing body for reinforcement learning agents.
//!
//! [`AtariBody`] wraps an [`Agent`](border_state::Agent) and applies the
//! preprocessing commonly used for Atari games to the states the agent receives:
//!
//! * deflickering by the elementwise maximum with the previous raw frame,
//! * averaging color channels and resizing frames, to 105x80 by default,
//! * stacking the latest frames, 4 by default,
//! * random no-op actions at the start of each life,
//! * the fire sequence at the start of each life in games which need it,
//! * clipping rewards to their sign,
//! * ending the episode seen by the agent when a life is lost.
//!
//! [`VecAtariBody`] does the same for a [`ParallelAgent`](border_state::ParallelAgent)
//! in a vectorized environment, with independent pipelines for its slots.
//!
//! ```
//! use anyhow::Result;
//! use border_atari_body::{
//!     util::test::{raw_state, MockAgent, INITIAL_ACTION},
//!     AtariAct, AtariBody, AtariBodyConfig,
//! };
//!
//! fn main() -> Result<()> {
//!     let config = AtariBodyConfig::default().noop_max(0);
//!     let mut body = AtariBody::new(MockAgent::default(), config)?;
//!
//!     let state = raw_state(210, 160, 1.0, 0.0, false, Some(3));
//!     let act = body.act(&state)?;
//!     assert_eq!(act, AtariAct::new(INITIAL_ACTION));
//!
//!     let obs = body.agent().last_observation().unwrap();
//!     assert_eq!(obs.shape(), &[4, 105, 80]);
//!     Ok(())
//! }
//! ```
mod act;
mod body;
mod config;
mod controller;
mod error;
mod evaluator;
mod frame_stack;
mod preprocess;
mod slot;
pub mod util;
pub use act::AtariAct;
pub use body::{AtariBody, VecAtariBody};
pub use config::AtariBodyConfig;
pub use controller::{clip_reward, needs_fire_reset, Boundary, EpisodeController, Phase};
pub use error::BodyError;
pub use evaluator::Evaluator;
pub use frame_stack::{FrameStack, LazyFrames};
pub use preprocess::FramePreprocessor;
pub use slot::{SlotContext, SlotStep, LIVES};
