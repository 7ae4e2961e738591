//! State of a single environment.
use super::{DONE, MASK, OBSERVATION, REWARD};
use crate::{StateError, Value};
use ndarray::{ArrayD, Axis};
use std::collections::HashMap;

pub(crate) fn expect_tensor(key: &str, value: Value) -> Result<ArrayD<f32>, StateError> {
    match value {
        Value::Tensor(t) => Ok(t),
        v => v.to_tensor().ok_or_else(|| StateError::FieldType {
            key: key.to_string(),
            expected: "tensor",
            found: v.type_name(),
        }),
    }
}

pub(crate) fn expect_float(key: &str, value: Value) -> Result<f32, StateError> {
    match value {
        Value::Float(v) => Ok(v),
        Value::Int(v) => Ok(v as f32),
        v => Err(StateError::FieldType {
            key: key.to_string(),
            expected: "float",
            found: v.type_name(),
        }),
    }
}

pub(crate) fn expect_bool(key: &str, value: Value) -> Result<bool, StateError> {
    match value {
        Value::Bool(v) => Ok(v),
        v => Err(StateError::FieldType {
            key: key.to_string(),
            expected: "bool",
            found: v.type_name(),
        }),
    }
}

/// State of a single environment at a step.
///
/// The four core fields, `observation`, `reward`, `done` and `mask`, always exist.
/// Any other named value returned by the environment (`info`) is kept in a side channel.
/// `mask` is `1 - done` unless given explicitly.
///
/// The state is immutable: [`StateRecord::update`] returns a new state.
///
/// ```
/// use border_state::{StateRecord, Value};
/// use ndarray::{ArrayD, IxDyn};
///
/// let state = StateRecord::builder()
///     .observation(ArrayD::zeros(IxDyn(&[3, 4, 4])))
///     .reward(1.0)
///     .done(true)
///     .build()
///     .unwrap();
/// assert_eq!(state.mask(), 0.0);
///
/// let state = state.update("lives", Value::Int(3)).unwrap();
/// assert_eq!(state.info("lives"), Some(&Value::Int(3)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StateRecord {
    observation: ArrayD<f32>,
    reward: f32,
    done: bool,
    mask: f32,
    info: HashMap<String, Value>,
}

impl StateRecord {
    /// Creates a state of an observation with zero reward, alive.
    pub fn new(observation: ArrayD<f32>) -> Self {
        Self {
            observation,
            reward: 0.0,
            done: false,
            mask: 1.0,
            info: HashMap::new(),
        }
    }

    /// Returns a builder of [`StateRecord`].
    pub fn builder() -> StateRecordBuilder {
        StateRecordBuilder::default()
    }

    /// Creates a state from named values.
    ///
    /// `observation` is required, the other core fields take their default values
    /// if missing. Keys other than the core fields are stored as side-channel values.
    pub fn from_fields(fields: HashMap<String, Value>) -> Result<Self, StateError> {
        let mut builder = Self::builder();
        for (k, v) in fields.into_iter() {
            builder = builder.field(k, v)?;
        }
        builder.build()
    }

    /// Creates a state from a transition of an environment, `(observation, reward, done, info)`.
    ///
    /// Entries in `info` become side-channel values.
    pub fn from_transition(
        observation: ArrayD<f32>,
        reward: f32,
        done: bool,
        info: Option<HashMap<String, Value>>,
    ) -> Self {
        Self {
            observation,
            reward,
            done,
            mask: if done { 0.0 } else { 1.0 },
            info: info.unwrap_or_default(),
        }
    }

    /// Observation.
    pub fn observation(&self) -> &ArrayD<f32> {
        &self.observation
    }

    /// Reward.
    pub fn reward(&self) -> f32 {
        self.reward
    }

    /// If the episode has ended.
    pub fn done(&self) -> bool {
        self.done
    }

    /// `1` while the episode continues, `0` at its end.
    pub fn mask(&self) -> f32 {
        self.mask
    }

    /// A side-channel value.
    pub fn info(&self, key: &str) -> Option<&Value> {
        self.info.get(key)
    }

    pub(crate) fn info_keys(&self) -> Vec<String> {
        let mut keys: Vec<_> = self.info.keys().cloned().collect();
        keys.sort();
        keys
    }

    /// Names of all fields, the core fields first.
    pub fn keys(&self) -> Vec<String> {
        [OBSERVATION, REWARD, DONE, MASK]
            .iter()
            .map(|k| k.to_string())
            .chain(self.info_keys())
            .collect()
    }

    /// Returns the value of a field, or `None` if the field does not exist.
    pub fn get(&self, key: &str) -> Option<Value> {
        match key {
            OBSERVATION => Some(Value::Tensor(self.observation.clone())),
            REWARD => Some(Value::Float(self.reward)),
            DONE => Some(Value::Bool(self.done)),
            MASK => Some(Value::Float(self.mask)),
            _ => self.info.get(key).cloned(),
        }
    }

    /// Returns a new state with the field `key` replaced by `value`.
    ///
    /// Other fields, `mask` included, are kept as they are.
    pub fn update(&self, key: &str, value: impl Into<Value>) -> Result<Self, StateError> {
        let mut state = self.clone();
        let value = value.into();
        match key {
            OBSERVATION => state.observation = expect_tensor(key, value)?,
            REWARD => state.reward = expect_float(key, value)?,
            DONE => state.done = expect_bool(key, value)?,
            MASK => state.mask = expect_float(key, value)?,
            _ => {
                state.info.insert(key.to_string(), value);
            }
        }
        Ok(state)
    }

    /// Returns the field as an input of a model, with a batch dimension of size 1.
    pub fn as_input(&self, key: &str) -> Result<ArrayD<f32>, StateError> {
        let value = self
            .get(key)
            .ok_or_else(|| StateError::UnknownField(key.to_string()))?;
        Ok(expect_tensor(key, value)?.insert_axis(Axis(0)))
    }

    /// Removes the batch dimension of size 1 from an output of a model.
    pub fn as_output(&self, tensor: ArrayD<f32>) -> Result<ArrayD<f32>, StateError> {
        if tensor.ndim() == 0 || tensor.shape()[0] != 1 {
            let from = tensor.shape().to_vec();
            let to = from.iter().skip(1).cloned().collect();
            return Err(StateError::ShapeMismatch { from, to });
        }
        Ok(tensor.index_axis_move(Axis(0), 0))
    }

    /// Multiplies `tensor` by `mask`.
    pub fn apply_mask(&self, tensor: ArrayD<f32>) -> ArrayD<f32> {
        tensor * self.mask
    }

    /// Applies `model` to the fields of `keys`, then masks its output.
    ///
    /// The model receives the fields as returned by [`StateRecord::as_input`].
    pub fn apply<F>(&self, model: F, keys: &[&str]) -> Result<ArrayD<f32>, StateError>
    where
        F: FnOnce(&[ArrayD<f32>]) -> ArrayD<f32>,
    {
        let inputs = keys
            .iter()
            .map(|k| self.as_input(k))
            .collect::<Result<Vec<_>, _>>()?;
        let output = self.as_output(model(&inputs))?;
        Ok(self.apply_mask(output))
    }
}

/// Builder of [`StateRecord`].
#[derive(Debug, Default, Clone)]
pub struct StateRecordBuilder {
    observation: Option<ArrayD<f32>>,
    reward: Option<f32>,
    done: Option<bool>,
    mask: Option<f32>,
    info: HashMap<String, Value>,
}

impl StateRecordBuilder {
    /// Sets the observation.
    pub fn observation(mut self, v: ArrayD<f32>) -> Self {
        self.observation = Some(v);
        self
    }

    /// Sets the reward.
    pub fn reward(mut self, v: f32) -> Self {
        self.reward = Some(v);
        self
    }

    /// Sets the done flag.
    pub fn done(mut self, v: bool) -> Self {
        self.done = Some(v);
        self
    }

    /// Sets the mask explicitly.
    pub fn mask(mut self, v: f32) -> Self {
        self.mask = Some(v);
        self
    }

    /// Adds a side-channel value.
    pub fn info(mut self, key: impl Into<String>, v: impl Into<Value>) -> Self {
        self.info.insert(key.into(), v.into());
        self
    }

    /// Sets a field by name, core fields included.
    pub fn field(self, key: impl Into<String>, v: Value) -> Result<Self, StateError> {
        let key = key.into();
        Ok(match key.as_str() {
            OBSERVATION => self.observation(expect_tensor(&key, v)?),
            REWARD => self.reward(expect_float(&key, v)?),
            DONE => self.done(expect_bool(&key, v)?),
            MASK => self.mask(expect_float(&key, v)?),
            _ => self.info(key, v),
        })
    }

    /// Builds the state. Fails if no observation was given.
    pub fn build(self) -> Result<StateRecord, StateError> {
        let observation = self.observation.ok_or(StateError::MissingObservation)?;
        let done = self.done.unwrap_or(false);
        let mask = self.mask.unwrap_or(if done { 0.0 } else { 1.0 });
        Ok(StateRecord {
            observation,
            reward: self.reward.unwrap_or(0.0),
            done,
            mask,
            info: self.info,
        })
    }
}
