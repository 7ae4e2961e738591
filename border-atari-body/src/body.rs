//! Bodies wrapping agents with the Atari preprocessing pipeline.
mod single;
mod vec;
use border_state::{
    record::{Record, RecordValue},
    state::{DONE, MASK, OBSERVATION, REWARD},
    StateRecord,
};
pub use single::AtariBody;
pub use vec::VecAtariBody;

use crate::{BodyError, SlotContext, SlotStep};

/// Replaces the observation and the reward of a raw state with the outcome of a step.
///
/// The first state of an episode or a life has no reward.
fn processed_state(state: &StateRecord, step: &SlotStep) -> Result<StateRecord, BodyError> {
    let reward = if step.start { 0.0 } else { step.reward };
    Ok(state
        .update(OBSERVATION, step.observation.clone())?
        .update(REWARD, reward)?)
}

/// Marks the end of an episode, or a life, seen by the agent.
fn mark_done(state: StateRecord) -> Result<StateRecord, BodyError> {
    Ok(state.update(DONE, true)?.update(MASK, 0f32)?)
}

/// Diagnostic values of a slot after a step.
fn slot_record(slot: &SlotContext, step: &SlotStep) -> Record {
    let controller = slot.controller();
    let mut record = Record::from_slice(&[
        ("phase", RecordValue::String(controller.phase().to_string())),
        ("reward", RecordValue::Scalar(step.reward)),
        (
            "forced_steps",
            RecordValue::Scalar(controller.forced_left() as f32),
        ),
    ]);
    if let Some(lives) = controller.lives() {
        record.insert("lives", RecordValue::Scalar(lives as f32));
    }
    record
}
