//! Episode bookkeeping of a slot.
use log::trace;
use rand::{rngs::SmallRng, Rng, SeedableRng};
use std::fmt;

/// Action pressing the fire button.
const FIRE: u8 = 1;

/// Action following [`FIRE`] in the fire sequence.
const FIRE_FOLLOWUP: u8 = 2;

/// Phase of a slot in an episode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The episode has begun but no frame has been seen yet.
    Pending,

    /// Emitting the fire sequence at the start of a life.
    FireReset,

    /// Emitting no-op actions at the start of a life.
    Noop,

    /// The agent is in control.
    Active,

    /// The episode has ended; the slot awaits a reset.
    Terminal,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Phase::Pending => "pending",
            Phase::FireReset => "fire_reset",
            Phase::Noop => "noop",
            Phase::Active => "active",
            Phase::Terminal => "terminal",
        };
        write!(f, "{}", s)
    }
}

/// Boundary detected at a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The life continues.
    Continue,

    /// A life was lost while the episode of the environment continues.
    LifeLost,

    /// The episode of the environment has ended.
    EpisodeEnd,
}

/// Tracks the phase, the forced actions and the life count of a slot.
///
/// At the start of each life, the controller samples the number of no-op actions
/// uniformly from `0..=noop_max`. If the fire sequence is enabled, actions `1` and
/// `2` are forced before the no-op actions.
#[derive(Debug, Clone)]
pub struct EpisodeController {
    noop_max: usize,
    noop_action: u8,
    episodic_life: bool,
    fire_reset: bool,
    rng: SmallRng,
    phase: Phase,
    fire_left: usize,
    noops_left: usize,
    lives: Option<i64>,
}

impl EpisodeController {
    /// Constructs a controller in [`Phase::Pending`].
    pub fn new(noop_max: usize, noop_action: u8, episodic_life: bool, seed: u64) -> Self {
        Self {
            noop_max,
            noop_action,
            episodic_life,
            fire_reset: false,
            rng: SmallRng::seed_from_u64(seed),
            phase: Phase::Pending,
            fire_left: 0,
            noops_left: 0,
            lives: None,
        }
    }

    /// Enables or disables the fire sequence at the start of a life.
    pub fn set_fire_reset(&mut self, v: bool) {
        self.fire_reset = v;
    }

    /// Returns true if the fire sequence is enabled.
    pub fn fire_reset(&self) -> bool {
        self.fire_reset
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The last reported number of lives.
    pub fn lives(&self) -> Option<i64> {
        self.lives
    }

    /// The number of actions to be forced before the agent takes control.
    pub fn forced_left(&self) -> usize {
        self.fire_left + self.noops_left
    }

    /// Starts a new episode. The next frame starts the first life.
    pub fn begin(&mut self) {
        self.phase = Phase::Pending;
        self.fire_left = 0;
        self.noops_left = 0;
        self.lives = None;
    }

    /// Ends the current life. The next frame starts a new life.
    pub fn end_life(&mut self) {
        self.phase = Phase::Pending;
        self.fire_left = 0;
        self.noops_left = 0;
    }

    /// Starts a life with `lives` remaining.
    pub fn start_life(&mut self, lives: Option<i64>) {
        self.lives = lives;
        self.fire_left = if self.fire_reset { 2 } else { 0 };
        self.noops_left = self.rng.gen_range(0..=self.noop_max);
        self.phase = if self.fire_left > 0 {
            Phase::FireReset
        } else if self.noops_left > 0 {
            Phase::Noop
        } else {
            Phase::Active
        };
        trace!(
            "Start life: lives={:?}, fire={}, noops={}",
            lives,
            self.fire_left,
            self.noops_left
        );
    }

    /// Observes the outcome of a step of the current life.
    ///
    /// Returns the clipped reward and the detected boundary. [`Boundary::EpisodeEnd`]
    /// moves the controller to [`Phase::Terminal`]. On [`Boundary::LifeLost`] the
    /// caller starts the next life, either at once or through
    /// [`EpisodeController::end_life`].
    pub fn observe(&mut self, reward: f32, done: bool, lives: Option<i64>) -> (f32, Boundary) {
        let reward = clip_reward(reward);

        if done {
            self.phase = Phase::Terminal;
            self.fire_left = 0;
            self.noops_left = 0;
            return (reward, Boundary::EpisodeEnd);
        }

        let lost = match (self.lives, lives) {
            (Some(prev), Some(now)) => self.episodic_life && now < prev,
            _ => false,
        };
        if lives.is_some() {
            self.lives = lives;
        }

        if lost {
            (reward, Boundary::LifeLost)
        } else {
            (reward, Boundary::Continue)
        }
    }

    /// Returns the action to be emitted instead of the agent's, if any.
    ///
    /// Called once per step, after the agent has been invoked.
    pub fn forced_action(&mut self) -> Option<u8> {
        match self.phase {
            Phase::Pending | Phase::Terminal => Some(self.noop_action),
            Phase::FireReset => {
                let act = if self.fire_left == 2 {
                    FIRE
                } else {
                    FIRE_FOLLOWUP
                };
                self.fire_left -= 1;
                if self.fire_left == 0 {
                    self.phase = if self.noops_left > 0 {
                        Phase::Noop
                    } else {
                        Phase::Active
                    };
                }
                Some(act)
            }
            Phase::Noop => {
                self.noops_left -= 1;
                if self.noops_left == 0 {
                    self.phase = Phase::Active;
                }
                Some(self.noop_action)
            }
            Phase::Active => None,
        }
    }
}

/// Clips a reward to its sign, `-1`, `0` or `1`.
pub fn clip_reward(r: f32) -> f32 {
    if r > 0.0 {
        1.0
    } else if r < 0.0 {
        -1.0
    } else {
        0.0
    }
}

/// Returns true if the game needs the fire sequence to start a life.
///
/// That is the case when the second action is `FIRE` and there are at least
/// three actions.
pub fn needs_fire_reset(action_meanings: &[String]) -> bool {
    action_meanings.len() >= 3 && action_meanings[FIRE as usize] == "FIRE"
}

#[cfg(test)]
mod tests {
    use super::*;

    fn forced(c: &mut EpisodeController, n: usize) -> Vec<Option<u8>> {
        (0..n).map(|_| c.forced_action()).collect()
    }

    #[test]
    fn test_clip_reward() {
        assert_eq!(clip_reward(-5.0), -1.0);
        assert_eq!(clip_reward(0.0), 0.0);
        assert_eq!(clip_reward(0.1), 1.0);
        assert_eq!(clip_reward(21.0), 1.0);
    }

    #[test]
    fn test_noop_count_is_deterministic() {
        let expected = SmallRng::seed_from_u64(3).gen_range(0..=10usize);
        let mut c = EpisodeController::new(10, 0, true, 3);
        c.start_life(None);
        assert_eq!(c.forced_left(), expected);

        let mut acts = forced(&mut c, expected);
        assert!(acts.iter().all(|a| *a == Some(0)));
        acts = forced(&mut c, 3);
        assert_eq!(acts, vec![None; 3]);
        assert_eq!(c.phase(), Phase::Active);
    }

    #[test]
    fn test_zero_noop_max_starts_active() {
        let mut c = EpisodeController::new(0, 0, true, 0);
        assert_eq!(c.phase(), Phase::Pending);
        assert_eq!(c.forced_action(), Some(0));
        c.start_life(Some(3));
        assert_eq!(c.phase(), Phase::Active);
        assert_eq!(c.forced_action(), None);
    }

    #[test]
    fn test_fire_sequence_precedes_noops() {
        let mut c = EpisodeController::new(0, 0, true, 0);
        c.set_fire_reset(true);
        c.start_life(None);
        assert_eq!(c.phase(), Phase::FireReset);
        assert_eq!(forced(&mut c, 3), vec![Some(1), Some(2), None]);
    }

    #[test]
    fn test_boundaries() {
        let mut c = EpisodeController::new(0, 0, true, 0);
        c.start_life(Some(3));
        assert_eq!(c.observe(2.0, false, Some(3)), (1.0, Boundary::Continue));
        assert_eq!(c.observe(-3.0, false, Some(2)), (-1.0, Boundary::LifeLost));
        assert_eq!(c.lives(), Some(2));
        assert_eq!(c.observe(0.0, true, Some(2)), (0.0, Boundary::EpisodeEnd));
        assert_eq!(c.phase(), Phase::Terminal);
        assert_eq!(c.forced_action(), Some(0));

        let mut c = EpisodeController::new(0, 0, false, 0);
        c.start_life(Some(3));
        assert_eq!(c.observe(0.0, false, Some(2)), (0.0, Boundary::Continue));
    }

    #[test]
    fn test_needs_fire_reset() {
        let meanings = |v: &[&str]| v.iter().map(|s| s.to_string()).collect::<Vec<_>>();
        assert!(needs_fire_reset(&meanings(&["NOOP", "FIRE", "RIGHT"])));
        assert!(!needs_fire_reset(&meanings(&["NOOP", "FIRE"])));
        assert!(!needs_fire_reset(&meanings(&["TEST", "ACTIONS"])));
        assert!(!needs_fire_reset(&meanings(&["NOOP", "RIGHT", "FIRE"])));
    }
}
