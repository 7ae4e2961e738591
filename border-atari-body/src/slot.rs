//! Per-slot state of the preprocessing pipeline.
use crate::{
    controller::needs_fire_reset, AtariBodyConfig, BodyError, Boundary, EpisodeController,
    FramePreprocessor, FrameStack, LazyFrames, Phase,
};
use border_state::StateRecord;
use log::debug;
use ndarray::ArrayD;

/// Key of the side-channel value holding the number of lives.
pub const LIVES: &str = "lives";

/// Outcome of a step of a slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotStep {
    /// Stacked frames, `(frame_stack, height, width)`.
    pub observation: ArrayD<f32>,

    /// Clipped reward of the step.
    pub reward: f32,

    /// Boundary detected at the step.
    pub boundary: Boundary,

    /// True if the step is the first of an episode or a life.
    pub start: bool,
}

/// Preprocessor, frame stack and episode controller of a slot.
#[derive(Debug, Clone)]
pub struct SlotContext {
    index: usize,
    preprocessor: FramePreprocessor,
    stack: FrameStack,
    controller: EpisodeController,
    defer_life_start: bool,
}

impl SlotContext {
    /// Constructs the context of slot `index`.
    ///
    /// No-op sampling of the slot is seeded with `config.seed + index`.
    pub fn new(config: &AtariBodyConfig, index: usize) -> Self {
        let controller = EpisodeController::new(
            config.noop_max,
            config.noop_action,
            config.episodic_life,
            config.seed.wrapping_add(index as u64),
        );
        Self {
            index,
            preprocessor: FramePreprocessor::new(config.height, config.width),
            stack: FrameStack::new(config.frame_stack),
            controller,
            defer_life_start: false,
        }
    }

    /// Starts a new life at the frame following a life loss, not at the frame
    /// where the loss is detected.
    pub fn defer_life_start(mut self) -> Self {
        self.defer_life_start = true;
        self
    }

    /// Enables the fire sequence if `action_meanings` show that the game needs it.
    pub fn set_action_meanings(&mut self, action_meanings: &[String]) {
        self.controller
            .set_fire_reset(needs_fire_reset(action_meanings));
    }

    /// Index of the slot.
    pub fn index(&self) -> usize {
        self.index
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.controller.phase()
    }

    /// Episode controller of the slot.
    pub fn controller(&self) -> &EpisodeController {
        &self.controller
    }

    /// The stacked frames of the last step, shared with the frame stack.
    pub fn frames(&self) -> LazyFrames {
        self.stack.lazy()
    }

    /// Starts a new episode.
    pub fn reset(&mut self) {
        self.preprocessor.reset();
        self.stack.reset();
        self.controller.begin();
    }

    /// Processes the raw state of the slot.
    pub fn step(&mut self, state: &StateRecord) -> Result<SlotStep, BodyError> {
        let lives = state.info(LIVES).and_then(|v| v.as_int());

        match self.controller.phase() {
            Phase::Terminal => Err(BodyError::AwaitingReset(self.index)),
            Phase::Pending => {
                let observation = self.start_life(state.observation(), lives)?;
                Ok(SlotStep {
                    observation,
                    reward: 0.0,
                    boundary: Boundary::Continue,
                    start: true,
                })
            }
            _ => {
                let (reward, boundary) =
                    self.controller
                        .observe(state.reward(), state.done(), lives);
                let (observation, start) = match boundary {
                    Boundary::LifeLost if !self.defer_life_start => {
                        debug!("Slot {}: life lost, {:?} left", self.index, lives);
                        (self.start_life(state.observation(), lives)?, true)
                    }
                    Boundary::LifeLost => {
                        debug!("Slot {}: life lost, {:?} left", self.index, lives);
                        self.controller.end_life();
                        (self.push(state.observation())?, false)
                    }
                    Boundary::EpisodeEnd => {
                        debug!("Slot {}: episode end", self.index);
                        (self.push(state.observation())?, false)
                    }
                    Boundary::Continue => (self.push(state.observation())?, false),
                };
                Ok(SlotStep {
                    observation,
                    reward,
                    boundary,
                    start,
                })
            }
        }
    }

    /// Returns the action to be emitted instead of the agent's, if any.
    pub fn forced_action(&mut self) -> Option<u8> {
        self.controller.forced_action()
    }

    fn start_life(
        &mut self,
        frame: &ArrayD<f32>,
        lives: Option<i64>,
    ) -> Result<ArrayD<f32>, BodyError> {
        self.preprocessor.reset();
        self.stack.reset();
        self.controller.start_life(lives);
        self.push(frame)
    }

    fn push(&mut self, frame: &ArrayD<f32>) -> Result<ArrayD<f32>, BodyError> {
        let frame = self.preprocessor.process(frame)?;
        self.stack.push(frame)
    }
}
