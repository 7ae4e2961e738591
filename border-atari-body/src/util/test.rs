//! Utilities for test.
use crate::{slot::LIVES, AtariAct};
use anyhow::Result;
use border_state::{Agent, Environment, ParallelAgent, StateBatch, StateRecord, Value};
use ndarray::ArrayD;
use std::collections::HashMap;

/// Action returned by [`MockAgent::initial`].
pub const INITIAL_ACTION: u8 = 3;

/// Action returned by [`MockAgent::act`].
pub const ACT_ACTION: u8 = 4;

/// A call received by [`MockAgent`].
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    /// `initial` with the observation.
    Initial(ArrayD<f32>),

    /// `act` with the observation and the reward.
    Act(ArrayD<f32>, f32),

    /// `terminal` with the reward.
    Terminal(f32),
}

impl Call {
    /// The observation passed to the agent, if any.
    pub fn observation(&self) -> Option<&ArrayD<f32>> {
        match self {
            Call::Initial(obs) | Call::Act(obs, _) => Some(obs),
            Call::Terminal(_) => None,
        }
    }
}

/// An agent recording the calls it receives.
///
/// Returns [`INITIAL_ACTION`] from `initial` and [`ACT_ACTION`] from `act`.
#[derive(Debug, Default)]
pub struct MockAgent {
    /// Calls received, the oldest first.
    pub calls: Vec<Call>,

    /// The last state passed to `initial` or `act`.
    pub last_state: Option<StateRecord>,
}

impl MockAgent {
    /// The last observation passed to the agent.
    pub fn last_observation(&self) -> Option<&ArrayD<f32>> {
        self.calls.iter().rev().find_map(|c| c.observation())
    }

    /// The last reward passed to `act` or `terminal`.
    pub fn last_reward(&self) -> Option<f32> {
        self.calls.iter().rev().find_map(|c| match c {
            Call::Act(_, r) | Call::Terminal(r) => Some(*r),
            Call::Initial(_) => None,
        })
    }
}

impl Agent for MockAgent {
    type Act = AtariAct;

    fn initial(&mut self, state: &StateRecord) -> AtariAct {
        self.calls.push(Call::Initial(state.observation().clone()));
        self.last_state = Some(state.clone());
        INITIAL_ACTION.into()
    }

    fn act(&mut self, state: &StateRecord, reward: f32) -> AtariAct {
        self.calls.push(Call::Act(state.observation().clone(), reward));
        self.last_state = Some(state.clone());
        ACT_ACTION.into()
    }

    fn terminal(&mut self, reward: f32) {
        self.calls.push(Call::Terminal(reward));
    }
}

/// A parallel agent recording the batches it receives.
///
/// Returns [`ACT_ACTION`] for every slot.
#[derive(Debug, Default)]
pub struct MockParallelAgent {
    /// Batches received, the oldest first.
    pub batches: Vec<StateBatch>,
}

impl ParallelAgent for MockParallelAgent {
    type Act = AtariAct;

    fn act(&mut self, state: &StateBatch) -> Vec<AtariAct> {
        self.batches.push(state.clone());
        vec![ACT_ACTION.into(); state.len()]
    }
}

/// Builds a raw state whose frame of shape `(3, height, width)` is filled with `v`.
pub fn raw_state(
    height: usize,
    width: usize,
    v: f32,
    reward: f32,
    done: bool,
    lives: Option<i64>,
) -> StateRecord {
    let obs = ArrayD::from_elem(vec![3, height, width], v);
    let info = lives.map(|l| {
        vec![(LIVES.to_string(), Value::Int(l))]
            .into_iter()
            .collect::<HashMap<_, _>>()
    });
    StateRecord::from_transition(obs, reward, done, info)
}

/// A scripted environment.
///
/// Each episode lasts `episode_len` steps. Every step yields `reward`, and a life
/// is lost every `life_len` steps. Frames are filled with the step count of the
/// episode.
#[derive(Debug)]
pub struct MockEnv {
    /// Height of frames.
    pub height: usize,

    /// Width of frames.
    pub width: usize,

    /// The number of steps of an episode.
    pub episode_len: usize,

    /// The number of steps of a life.
    pub life_len: Option<usize>,

    /// Lives at the start of an episode.
    pub initial_lives: i64,

    /// Reward of each step.
    pub reward: f32,

    /// Action meanings.
    pub meanings: Vec<String>,

    /// Actions received, the oldest first.
    pub actions: Vec<u8>,

    t: usize,
    state: StateRecord,
}

impl MockEnv {
    /// Constructs an environment with episodes of `episode_len` steps.
    pub fn new(height: usize, width: usize, episode_len: usize) -> Self {
        Self {
            height,
            width,
            episode_len,
            life_len: None,
            initial_lives: 1,
            reward: 1.0,
            meanings: vec![],
            actions: vec![],
            t: 0,
            state: raw_state(height, width, 0.0, 0.0, false, None),
        }
    }

    /// Loses a life every `life_len` steps, starting from `lives` lives.
    pub fn with_lives(mut self, lives: i64, life_len: usize) -> Self {
        self.initial_lives = lives;
        self.life_len = Some(life_len);
        self
    }

    /// Sets the reward of each step.
    pub fn reward(mut self, v: f32) -> Self {
        self.reward = v;
        self
    }

    /// Sets the action meanings.
    pub fn meanings(mut self, meanings: &[&str]) -> Self {
        self.meanings = meanings.iter().map(|s| s.to_string()).collect();
        self
    }

    fn current_lives(&self) -> i64 {
        match self.life_len {
            Some(len) => self.initial_lives - (self.t / len) as i64,
            None => self.initial_lives,
        }
    }
}

impl Environment for MockEnv {
    type Act = AtariAct;

    fn state(&self) -> &StateRecord {
        &self.state
    }

    fn reset(&mut self) -> Result<&StateRecord> {
        self.t = 0;
        self.state = raw_state(self.height, self.width, 0.0, 0.0, false, None);
        Ok(&self.state)
    }

    fn step(&mut self, act: &AtariAct) -> Result<&StateRecord> {
        self.actions.push(act.act);
        self.t += 1;
        let done = self.t >= self.episode_len || self.current_lives() <= 0;
        self.state = raw_state(
            self.height,
            self.width,
            self.t as f32,
            self.reward,
            done,
            None,
        );
        Ok(&self.state)
    }

    fn lives(&self) -> Option<i64> {
        self.life_len.map(|_| self.current_lives())
    }

    fn action_meanings(&self) -> Vec<String> {
        self.meanings.clone()
    }
}
