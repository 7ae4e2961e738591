//! Body for a vectorized environment.
use super::{mark_done, processed_state, slot_record};
use crate::{AtariBodyConfig, BodyError, Boundary, LazyFrames, Phase, SlotContext};
use border_state::{
    record::{Record, RecordValue},
    ParallelAgent, StateBatch,
};
use log::{debug, info};

/// Wraps a [`ParallelAgent`] with the Atari preprocessing pipeline.
///
/// Each slot of the vectorized environment has its own preprocessor, frame stack
/// and episode controller. The agent receives a batch of shape `[n_slots]` whose
/// observation has shape `(n_slots, frame_stack, height, width)`.
///
/// The end of an episode or a life in a slot is marked by `done = true` and
/// `mask = 0` in the batch; the following state of the slot starts a new episode.
/// Vectorized environments reset their slots themselves, so a slot whose episode
/// has ended is restarted with its next state.
pub struct VecAtariBody<A: ParallelAgent> {
    agent: A,
    config: AtariBodyConfig,
    slots: Vec<SlotContext>,
}

impl<A> VecAtariBody<A>
where
    A: ParallelAgent,
    A::Act: From<u8>,
{
    /// Constructs a body wrapping `agent` for `n_slots` slots.
    pub fn new(agent: A, config: AtariBodyConfig, n_slots: usize) -> Result<Self, BodyError> {
        config.validate()?;
        if n_slots == 0 {
            return Err(BodyError::Config("the number of slots must be positive".into()));
        }
        info!("Create VecAtariBody of {} slots with {:?}", n_slots, config);
        let slots = (0..n_slots)
            .map(|i| SlotContext::new(&config, i).defer_life_start())
            .collect();
        Ok(Self {
            agent,
            config,
            slots,
        })
    }

    /// Enables the fire sequence if the game needs it.
    ///
    /// Has no effect if `fire_reset` is disabled in the configuration.
    pub fn with_action_meanings(mut self, action_meanings: &[String]) -> Self {
        if self.config.fire_reset {
            for slot in self.slots.iter_mut() {
                slot.set_action_meanings(action_meanings);
            }
        }
        self
    }

    /// The number of slots.
    pub fn n_slots(&self) -> usize {
        self.slots.len()
    }

    /// Phases of the slots.
    pub fn phases(&self) -> Vec<Phase> {
        self.slots.iter().map(|s| s.phase()).collect()
    }

    /// The frames of the last observation of each slot, without copying them.
    pub fn frames(&self) -> Vec<LazyFrames> {
        self.slots.iter().map(|s| s.frames()).collect()
    }

    /// Starts new episodes in all slots.
    pub fn reset(&mut self) {
        debug!("Reset VecAtariBody");
        for slot in self.slots.iter_mut() {
            slot.reset();
        }
    }

    /// Returns the actions for the raw states of the slots.
    pub fn act(&mut self, batch: &StateBatch) -> Result<Vec<A::Act>, BodyError> {
        self.act_with_record(batch).map(|(acts, _)| acts)
    }

    /// Returns the actions for the raw states of the slots and diagnostic values.
    ///
    /// Keys of the diagnostic values of slot `i` are prefixed with `slot_i/`.
    /// `reward` holds the clipped rewards of all slots.
    pub fn act_with_record(
        &mut self,
        batch: &StateBatch,
    ) -> Result<(Vec<A::Act>, Record), BodyError> {
        if batch.shape() != [self.slots.len()] {
            return Err(BodyError::SlotCount {
                expected: self.slots.len(),
                found: batch.shape().to_vec(),
            });
        }

        // Slots are advanced on copies, committed once the step has succeeded.
        let mut slots = self.slots.clone();
        let mut states = Vec::with_capacity(slots.len());
        let mut record = Record::empty();
        let mut rewards = Vec::with_capacity(slots.len());
        for (i, slot) in slots.iter_mut().enumerate() {
            if slot.phase() == Phase::Terminal {
                debug!("Slot {}: restart episode", i);
                slot.reset();
            }
            let raw = batch.index(i)?;
            let step = slot.step(&raw)?;
            let state = processed_state(&raw, &step)?;
            let state = match step.boundary {
                Boundary::Continue => state,
                Boundary::LifeLost | Boundary::EpisodeEnd => mark_done(state)?,
            };
            for (k, v) in slot_record(slot, &step).iter() {
                record.insert(format!("slot_{}/{}", i, k), v.clone());
            }
            rewards.push(step.reward);
            states.push(state);
        }
        record.insert("reward", RecordValue::Array1(rewards));

        let acts = self.agent.act(&StateBatch::from_records(&states)?);
        if acts.len() != slots.len() {
            return Err(BodyError::ActionCount {
                expected: slots.len(),
                found: acts.len(),
            });
        }

        let acts = acts
            .into_iter()
            .zip(slots.iter_mut())
            .map(|(act, slot)| match slot.forced_action() {
                Some(forced) => A::Act::from(forced),
                None => act,
            })
            .collect();
        self.slots = slots;
        Ok((acts, record))
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
