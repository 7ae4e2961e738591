//! Configuration of [`AtariBody`](crate::AtariBody).
use crate::BodyError;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::Path,
};

/// Configuration of [`AtariBody`](crate::AtariBody) and
/// [`VecAtariBody`](crate::VecAtariBody).
#[derive(Debug, Deserialize, Serialize, PartialEq, Clone)]
#[serde(default)]
pub struct AtariBodyConfig {
    /// The maximum number of no-op actions at the start of a life.
    pub noop_max: usize,

    /// The action emitted as a no-op.
    pub noop_action: u8,

    /// The number of stacked frames.
    pub frame_stack: usize,

    /// Height of preprocessed frames.
    pub height: usize,

    /// Width of preprocessed frames.
    pub width: usize,

    /// If true, losing a life ends the episode seen by the agent.
    pub episodic_life: bool,

    /// If true, the fire sequence is emitted at the start of a life in games
    /// which need it.
    pub fire_reset: bool,

    /// Seed of the no-op sampling. Slot `i` uses `seed + i`.
    pub seed: u64,
}

impl Default for AtariBodyConfig {
    fn default() -> Self {
        Self {
            noop_max: 30,
            noop_action: 0,
            frame_stack: 4,
            height: 105,
            width: 80,
            episodic_life: true,
            fire_reset: true,
            seed: 42,
        }
    }
}

impl AtariBodyConfig {
    /// Sets the maximum number of no-op actions.
    pub fn noop_max(mut self, v: usize) -> Self {
        self.noop_max = v;
        self
    }

    /// Sets the no-op action.
    pub fn noop_action(mut self, v: u8) -> Self {
        self.noop_action = v;
        self
    }

    /// Sets the number of stacked frames.
    pub fn frame_stack(mut self, v: usize) -> Self {
        self.frame_stack = v;
        self
    }

    /// Sets the resolution of preprocessed frames.
    pub fn resolution(mut self, height: usize, width: usize) -> Self {
        self.height = height;
        self.width = width;
        self
    }

    /// Enables or disables life-loss segmentation.
    pub fn episodic_life(mut self, v: bool) -> Self {
        self.episodic_life = v;
        self
    }

    /// Enables or disables the fire sequence at the start of a life.
    pub fn fire_reset(mut self, v: bool) -> Self {
        self.fire_reset = v;
        self
    }

    /// Sets the seed.
    pub fn seed(mut self, v: u64) -> Self {
        self.seed = v;
        self
    }

    /// Checks the values of the configuration.
    pub fn validate(&self) -> Result<(), BodyError> {
        if self.frame_stack == 0 {
            return Err(BodyError::Config("frame_stack must be positive".into()));
        }
        if self.height == 0 || self.width == 0 {
            return Err(BodyError::Config(format!(
                "resolution must be positive, got {}x{}",
                self.height, self.width
            )));
        }
        Ok(())
    }

    /// Constructs [`AtariBodyConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b: Self = serde_yaml::from_reader(rdr)?;
        b.validate()?;
        Ok(b)
    }

    /// Saves [`AtariBodyConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
