//! Evaluation of agents wrapped by [`AtariBody`].
use crate::{slot::LIVES, AtariBody};
use anyhow::Result;
use border_state::{record::Record, Agent, Environment, StateRecord};
use log::info;

/// Runs episodes of an environment with an agent wrapped by [`AtariBody`].
///
/// The number of lives of the environment is attached to each state under the
/// key `lives`, so that the body can segment episodes by lives.
///
/// ```ignore
/// let mut evaluator = Evaluator::new(env, 10);
/// let record = evaluator.evaluate(&mut body)?;
/// println!("Average return: {}", record.get_scalar("Episode return")?);
/// ```
pub struct Evaluator<E: Environment> {
    /// The number of episodes to run during evaluation.
    n_episodes: usize,

    /// The maximum number of steps of an episode.
    max_steps: Option<usize>,

    /// The environment instance used for evaluation.
    env: E,
}

impl<E: Environment> Evaluator<E> {
    /// Constructs a new [`Evaluator`].
    pub fn new(env: E, n_episodes: usize) -> Self {
        Self {
            n_episodes,
            max_steps: None,
            env,
        }
    }

    /// Truncates episodes at `v` steps.
    pub fn max_steps(mut self, v: usize) -> Self {
        self.max_steps = Some(v);
        self
    }

    /// The environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Runs the episodes and returns the average of raw, unclipped, episode returns
    /// and the average episode length.
    pub fn evaluate<A>(&mut self, body: &mut AtariBody<A>) -> Result<Record>
    where
        A: Agent<Act = E::Act>,
        A::Act: From<u8>,
    {
        body.set_action_meanings(&self.env.action_meanings());
        let mut r_total = 0f32;
        let mut steps_total = 0usize;

        for ix in 0..self.n_episodes {
            body.reset();
            let first = self.env.reset()?.clone();
            let mut state = self.with_lives(first)?;
            let mut steps = 0;
            let mut r_episode = 0f32;

            loop {
                let act = body.act(&state)?;
                if state.done() || self.max_steps.map_or(false, |m| steps >= m) {
                    break;
                }
                let next = self.env.step(&act)?.clone();
                state = self.with_lives(next)?;
                r_episode += state.reward();
                steps += 1;
            }

            info!("Episode {}: return = {}, steps = {}", ix, r_episode, steps);
            r_total += r_episode;
            steps_total += steps;
        }

        let n = self.n_episodes.max(1) as f32;
        let record = Record::from_scalar("Episode return", r_total / n)
            .merge(Record::from_scalar("Episode length", steps_total as f32 / n));
        Ok(record)
    }

    fn with_lives(&self, state: StateRecord) -> Result<StateRecord> {
        match self.env.lives() {
            Some(lives) => Ok(state.update(LIVES, lives)?),
            None => Ok(state),
        }
    }
}
