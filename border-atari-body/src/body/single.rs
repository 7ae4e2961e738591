//! Body for a single environment.
use super::{processed_state, slot_record};
use crate::{AtariBodyConfig, BodyError, Boundary, LazyFrames, Phase, SlotContext};
use border_state::{record::Record, Agent, StateRecord};
use log::{debug, info, trace};

/// Wraps an [`Agent`] with the Atari preprocessing pipeline.
///
/// At every step, the body receives the raw state of the environment, deflickers,
/// averages the channels of and resizes the frame, stacks it with the previous
/// frames and clips the reward to its sign. The agent receives the processed state:
///
/// * [`Agent::initial`] at the first step of an episode and of each life,
/// * [`Agent::terminal`] with the clipped reward when a life is lost or the episode ends,
/// * [`Agent::act`] with the clipped reward otherwise.
///
/// During the fire sequence and the no-op actions at the start of a life, the
/// action of the agent is replaced. After the episode has ended, the body returns
/// the no-op action and [`AtariBody::reset`] must be called before the next episode.
///
/// The number of lives is read from the side-channel value `lives` of raw states.
pub struct AtariBody<A: Agent> {
    agent: A,
    config: AtariBodyConfig,
    slot: SlotContext,
}

impl<A> AtariBody<A>
where
    A: Agent,
    A::Act: From<u8>,
{
    /// Constructs a body wrapping `agent`.
    pub fn new(agent: A, config: AtariBodyConfig) -> Result<Self, BodyError> {
        config.validate()?;
        info!("Create AtariBody with {:?}", config);
        let slot = SlotContext::new(&config, 0);
        Ok(Self {
            agent,
            config,
            slot,
        })
    }

    /// Enables the fire sequence if the game needs it.
    ///
    /// Has no effect if `fire_reset` is disabled in the configuration.
    pub fn with_action_meanings(mut self, action_meanings: &[String]) -> Self {
        self.set_action_meanings(action_meanings);
        self
    }

    /// Enables the fire sequence if the game needs it.
    pub fn set_action_meanings(&mut self, action_meanings: &[String]) {
        if self.config.fire_reset {
            self.slot.set_action_meanings(action_meanings);
        }
    }

    /// Starts a new episode. The next state is its first state.
    pub fn reset(&mut self) {
        debug!("Reset AtariBody");
        self.slot.reset();
    }

    /// Returns the action for the raw state of the environment.
    pub fn act(&mut self, state: &StateRecord) -> Result<A::Act, BodyError> {
        self.act_with_record(state).map(|(act, _)| act)
    }

    /// Returns the action for the raw state of the environment and diagnostic values.
    pub fn act_with_record(&mut self, state: &StateRecord) -> Result<(A::Act, Record), BodyError> {
        let step = self.slot.step(state)?;
        let record = slot_record(&self.slot, &step);
        trace!("Phase: {}, reward: {}", self.slot.phase(), step.reward);

        let act = match step.boundary {
            Boundary::EpisodeEnd => {
                self.agent.terminal(step.reward);
                None
            }
            Boundary::LifeLost => {
                self.agent.terminal(step.reward);
                Some(self.agent.initial(&processed_state(state, &step)?))
            }
            Boundary::Continue if step.start => {
                Some(self.agent.initial(&processed_state(state, &step)?))
            }
            Boundary::Continue => {
                Some(self.agent.act(&processed_state(state, &step)?, step.reward))
            }
        };

        let act = match (self.slot.forced_action(), act) {
            (Some(forced), _) => A::Act::from(forced),
            (None, Some(act)) => act,
            (None, None) => A::Act::from(self.config.noop_action),
        };
        Ok((act, record))
    }

    /// The current phase of the episode.
    pub fn phase(&self) -> Phase {
        self.slot.phase()
    }

    /// The frames of the last observation, without copying them.
    ///
    /// Frames are shared between the snapshots of consecutive steps.
    pub fn frames(&self) -> LazyFrames {
        self.slot.frames()
    }

    /// Configuration of the body.
    pub fn config(&self) -> &AtariBodyConfig {
        &self.config
    }

    /// The wrapped agent.
    pub fn agent(&self) -> &A {
        &self.agent
    }

    /// The wrapped agent.
    pub fn agent_mut(&mut self) -> &mut A {
        &mut self.agent
    }

    /// Returns the wrapped agent.
    pub fn into_agent(self) -> A {
        self.agent
    }
}
