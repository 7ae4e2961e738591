//! States of vectorized environments.
use super::{
    aggregate::aggregate_info,
    ops::{self, has_batch_shape},
    StateRecord, DONE, MASK, OBSERVATION, REWARD,
};
use crate::{Column, StateError};
use log::trace;
use ndarray::{Array1, ArrayD, IxDyn};
use std::{collections::HashMap, ops::Range};

/// Selects a part of a [`StateBatch`] with [`StateBatch::select`].
#[derive(Debug, Clone, PartialEq)]
pub enum BatchIndex {
    /// Elements where the mask is `true`.
    ///
    /// The shape of the mask must be a prefix of the batch shape.
    /// The masked dimensions are collapsed into one.
    Mask(ArrayD<bool>),

    /// Elements at the given positions of the first batch dimension.
    Indices(Vec<usize>),
}

fn check_shape(key: &str, shape: &[usize], batch_shape: &[usize]) -> Result<(), StateError> {
    if has_batch_shape(shape, batch_shape) {
        Ok(())
    } else {
        Err(StateError::BatchShape {
            key: key.to_string(),
            expected: batch_shape.to_vec(),
            found: shape.to_vec(),
        })
    }
}

fn mask_of(done: &ArrayD<bool>) -> ArrayD<f32> {
    done.mapv(|d| if d { 0.0 } else { 1.0 })
}

/// States of a vectorized environment.
///
/// Every field has the batch shape, [`StateBatch::shape`], as its leading dimensions.
/// The batch shape may have more than one dimension, for example `[time, process]`.
/// `mask` is `1 - done` unless given explicitly.
///
/// Like [`StateRecord`], a batch is immutable: every operation returns a new batch.
///
/// ```
/// use border_state::{StateBatch, StateRecord};
/// use ndarray::{ArrayD, IxDyn};
///
/// let records = (0..4)
///     .map(|i| StateRecord::from_transition(ArrayD::zeros(IxDyn(&[2])), i as f32, i == 3, None))
///     .collect::<Vec<_>>();
/// let batch = StateBatch::from_records(&records).unwrap();
/// assert_eq!(batch.shape(), &[4]);
/// assert_eq!(batch.index(3).unwrap().mask(), 0.0);
///
/// let batch = batch.view(&[2, 2]).unwrap();
/// assert_eq!(batch.as_input("observation").unwrap().shape(), &[4, 2]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StateBatch {
    shape: Vec<usize>,
    observation: ArrayD<f32>,
    reward: ArrayD<f32>,
    done: ArrayD<bool>,
    mask: ArrayD<f32>,
    info: HashMap<String, Column>,
}

impl StateBatch {
    /// Creates a batch of observations with zero rewards, all alive.
    pub fn new(observation: ArrayD<f32>, shape: &[usize]) -> Result<Self, StateError> {
        Self::builder(shape).observation(observation).build()
    }

    /// Returns a builder of a batch with the given batch shape.
    pub fn builder(shape: &[usize]) -> StateBatchBuilder {
        StateBatchBuilder::new(shape)
    }

    /// Stacks states into a batch of shape `[records.len()]`.
    ///
    /// The core fields must be stackable, otherwise an error is returned.
    /// Side-channel values are combined on a best-effort basis: a value missing in
    /// some of the states, having a different type or shape across the states,
    /// or being text is left out of the batch.
    pub fn from_records(records: &[StateRecord]) -> Result<Self, StateError> {
        if records.is_empty() {
            return Err(StateError::Empty);
        }
        let n = records.len();
        let observations = records
            .iter()
            .map(|r| r.observation().clone())
            .collect::<Vec<_>>();
        let observation = ops::stack_first(&observations)
            .ok_or_else(|| StateError::Stack(OBSERVATION.to_string()))?;
        let reward = Array1::from_iter(records.iter().map(|r| r.reward())).into_dyn();
        let done = Array1::from_iter(records.iter().map(|r| r.done())).into_dyn();
        let mask = Array1::from_iter(records.iter().map(|r| r.mask())).into_dyn();

        let aggregation = aggregate_info(records);
        for key in aggregation.dropped.iter() {
            trace!("Field {} was not batched", key);
        }

        let mut builder = Self::builder(&[n])
            .observation(observation)
            .reward(reward)
            .done(done)
            .mask(mask);
        for (k, v) in aggregation.columns.into_iter() {
            builder = builder.info(k, v);
        }
        builder.build()
    }

    /// Batch shape.
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Size of the first batch dimension.
    pub fn len(&self) -> usize {
        self.shape.first().cloned().unwrap_or(1)
    }

    /// Returns `true` if the batch has no element.
    pub fn is_empty(&self) -> bool {
        self.numel() == 0
    }

    /// The number of states in the batch.
    pub fn numel(&self) -> usize {
        self.shape.iter().product()
    }

    /// Observations.
    pub fn observation(&self) -> &ArrayD<f32> {
        &self.observation
    }

    /// Rewards.
    pub fn reward(&self) -> &ArrayD<f32> {
        &self.reward
    }

    /// Done flags.
    pub fn done(&self) -> &ArrayD<bool> {
        &self.done
    }

    /// Masks.
    pub fn mask(&self) -> &ArrayD<f32> {
        &self.mask
    }

    /// A side-channel column.
    pub fn info(&self, key: &str) -> Option<&Column> {
        self.info.get(key)
    }

    /// Names of all fields, the core fields first.
    pub fn keys(&self) -> Vec<String> {
        let mut side: Vec<_> = self.info.keys().cloned().collect();
        side.sort();
        [OBSERVATION, REWARD, DONE, MASK]
            .iter()
            .map(|k| k.to_string())
            .chain(side)
            .collect()
    }

    /// Returns a field, or `None` if the field does not exist.
    pub fn get(&self, key: &str) -> Option<Column> {
        match key {
            OBSERVATION => Some(Column::Float(self.observation.clone())),
            REWARD => Some(Column::Float(self.reward.clone())),
            DONE => Some(Column::Bool(self.done.clone())),
            MASK => Some(Column::Float(self.mask.clone())),
            _ => self.info.get(key).cloned(),
        }
    }

    fn to_builder(&self) -> StateBatchBuilder {
        StateBatchBuilder {
            shape: self.shape.clone(),
            observation: Some(self.observation.clone()),
            reward: Some(self.reward.clone()),
            done: Some(self.done.clone()),
            mask: Some(self.mask.clone()),
            info: self.info.clone(),
        }
    }

    /// Returns a new batch with the field `key` replaced by `value`.
    ///
    /// `value` must have the batch shape as its leading dimensions.
    pub fn update(&self, key: &str, value: impl Into<Column>) -> Result<Self, StateError> {
        self.to_builder().field(key, value.into())?.build()
    }

    /// Returns the state at index `i` of a one-dimensional batch.
    pub fn index(&self, i: usize) -> Result<StateRecord, StateError> {
        if self.shape.len() != 1 {
            return Err(StateError::NotOneDimensional(self.shape.clone()));
        }
        if i >= self.shape[0] {
            return Err(StateError::IndexOutOfBounds {
                index: i,
                len: self.shape[0],
            });
        }
        let ix: &[usize] = &[i];
        let mut builder = StateRecord::builder()
            .observation(ops::index_first(&self.observation, i))
            .reward(self.reward[ix])
            .done(self.done[ix])
            .mask(self.mask[ix]);
        for (k, c) in self.info.iter() {
            if let Some(v) = c.index(i) {
                builder = builder.info(k.clone(), v);
            }
        }
        builder.build()
    }

    /// Splits a one-dimensional batch into states.
    pub fn to_records(&self) -> Result<Vec<StateRecord>, StateError> {
        (0..self.len()).map(|i| self.index(i)).collect()
    }

    /// Returns the states in `range` of the first batch dimension.
    pub fn slice(&self, range: Range<usize>) -> Result<Self, StateError> {
        let len = match self.shape.first() {
            Some(&len) => len,
            None => return Err(StateError::NotOneDimensional(self.shape.clone())),
        };
        if range.start > range.end || range.end > len {
            return Err(StateError::IndexOutOfBounds {
                index: range.end,
                len,
            });
        }
        let (start, end) = (range.start, range.end);
        let mut shape = self.shape.clone();
        shape[0] = end - start;
        Ok(Self {
            shape,
            observation: ops::slice_first(&self.observation, start, end),
            reward: ops::slice_first(&self.reward, start, end),
            done: ops::slice_first(&self.done, start, end),
            mask: ops::slice_first(&self.mask, start, end),
            info: self
                .info
                .iter()
                .map(|(k, c)| (k.clone(), c.slice(start, end)))
                .collect(),
        })
    }

    /// Returns the states picked by `index`.
    ///
    /// Side-channel columns which cannot be gathered with the index are left out.
    pub fn select(&self, index: &BatchIndex) -> Result<Self, StateError> {
        let (shape, gathered_observation, gathered_reward, gathered_done, gathered_mask, info) =
            match index {
                BatchIndex::Mask(m) => {
                    check_shape("index", &self.shape, m.shape())?;
                    let mut shape = vec![m.iter().filter(|&&b| b).count()];
                    shape.extend_from_slice(&self.shape[m.ndim()..]);
                    (
                        shape,
                        ops::gather_mask(&self.observation, m),
                        ops::gather_mask(&self.reward, m),
                        ops::gather_mask(&self.done, m),
                        ops::gather_mask(&self.mask, m),
                        self.gather_info(|c| c.gather_mask(m)),
                    )
                }
                BatchIndex::Indices(ixs) => {
                    let len = match self.shape.first() {
                        Some(&len) => len,
                        None => return Err(StateError::NotOneDimensional(self.shape.clone())),
                    };
                    if let Some(&i) = ixs.iter().find(|&&i| i >= len) {
                        return Err(StateError::IndexOutOfBounds { index: i, len });
                    }
                    let mut shape = vec![ixs.len()];
                    shape.extend_from_slice(&self.shape[1..]);
                    (
                        shape,
                        ops::gather_indices(&self.observation, ixs),
                        ops::gather_indices(&self.reward, ixs),
                        ops::gather_indices(&self.done, ixs),
                        ops::gather_indices(&self.mask, ixs),
                        self.gather_info(|c| c.gather_indices(ixs)),
                    )
                }
            };

        let core = |key: &str| StateError::BatchShape {
            key: key.to_string(),
            expected: self.shape.clone(),
            found: shape.clone(),
        };
        Ok(Self {
            observation: gathered_observation.ok_or_else(|| core(OBSERVATION))?,
            reward: gathered_reward.ok_or_else(|| core(REWARD))?,
            done: gathered_done.ok_or_else(|| core(DONE))?,
            mask: gathered_mask.ok_or_else(|| core(MASK))?,
            shape,
            info,
        })
    }

    fn gather_info<F>(&self, f: F) -> HashMap<String, Column>
    where
        F: Fn(&Column) -> Option<Column>,
    {
        self.info
            .iter()
            .filter_map(|(k, c)| match f(c) {
                Some(c) => Some((k.clone(), c)),
                None => {
                    trace!("Field {} was not gathered", k);
                    None
                }
            })
            .collect()
    }

    /// Collapses the batch dimensions into one.
    pub fn flatten(&self) -> Result<Self, StateError> {
        self.view(&[self.numel()])
    }

    /// Reshapes the batch dimensions, keeping the trailing dimensions of each field.
    ///
    /// The number of states must not change.
    pub fn view(&self, shape: &[usize]) -> Result<Self, StateError> {
        if shape.iter().product::<usize>() != self.numel() {
            return Err(StateError::ShapeMismatch {
                from: self.shape.clone(),
                to: shape.to_vec(),
            });
        }
        let n = self.shape.len();
        Ok(Self {
            shape: shape.to_vec(),
            observation: ops::reshape_batch(&self.observation, n, shape)?,
            reward: ops::reshape_batch(&self.reward, n, shape)?,
            done: ops::reshape_batch(&self.done, n, shape)?,
            mask: ops::reshape_batch(&self.mask, n, shape)?,
            info: self
                .info
                .iter()
                .map(|(k, c)| Ok((k.clone(), c.reshape_batch(n, shape)?)))
                .collect::<Result<_, StateError>>()?,
        })
    }

    /// Returns the field as an input of a model.
    ///
    /// The batch dimensions are collapsed into one and the values are cast to `f32`.
    pub fn as_input(&self, key: &str) -> Result<ArrayD<f32>, StateError> {
        let column = self
            .get(key)
            .ok_or_else(|| StateError::UnknownField(key.to_string()))?;
        ops::reshape_batch(&column.to_float(), self.shape.len(), &[self.numel()])
    }

    /// Restores the batch dimensions of an output of a model.
    pub fn as_output(&self, tensor: ArrayD<f32>) -> Result<ArrayD<f32>, StateError> {
        if tensor.ndim() == 0 || tensor.shape()[0] != self.numel() {
            let mut to = self.shape.clone();
            to.extend_from_slice(tensor.shape().get(1..).unwrap_or(&[]));
            return Err(StateError::ShapeMismatch {
                from: tensor.shape().to_vec(),
                to,
            });
        }
        ops::reshape_batch(&tensor, 1, &self.shape)
    }

    /// Multiplies `tensor` by `mask`, broadcasting over its trailing dimensions.
    pub fn apply_mask(&self, tensor: ArrayD<f32>) -> Result<ArrayD<f32>, StateError> {
        check_shape("tensor", tensor.shape(), &self.shape)?;
        let mut shape = self.shape.clone();
        shape.resize(tensor.ndim(), 1);
        let mask = ops::reshape_batch(&self.mask, self.shape.len(), &shape)?;
        let mask = mask
            .broadcast(tensor.raw_dim())
            .ok_or_else(|| StateError::BatchShape {
                key: MASK.to_string(),
                expected: tensor.shape().to_vec(),
                found: shape.clone(),
            })?;
        Ok(tensor * &mask)
    }

    /// Applies `model` to the fields of `keys`, then restores the batch shape and masks its output.
    pub fn apply<F>(&self, model: F, keys: &[&str]) -> Result<ArrayD<f32>, StateError>
    where
        F: FnOnce(&[ArrayD<f32>]) -> ArrayD<f32>,
    {
        let inputs = keys
            .iter()
            .map(|k| self.as_input(k))
            .collect::<Result<Vec<_>, _>>()?;
        let output = self.as_output(model(&inputs))?;
        self.apply_mask(output)
    }
}

/// Builder of [`StateBatch`].
#[derive(Debug, Clone)]
pub struct StateBatchBuilder {
    shape: Vec<usize>,
    observation: Option<ArrayD<f32>>,
    reward: Option<ArrayD<f32>>,
    done: Option<ArrayD<bool>>,
    mask: Option<ArrayD<f32>>,
    info: HashMap<String, Column>,
}

impl StateBatchBuilder {
    fn new(shape: &[usize]) -> Self {
        Self {
            shape: shape.to_vec(),
            observation: None,
            reward: None,
            done: None,
            mask: None,
            info: HashMap::new(),
        }
    }

    /// Sets observations.
    pub fn observation(mut self, v: ArrayD<f32>) -> Self {
        self.observation = Some(v);
        self
    }

    /// Sets rewards.
    pub fn reward(mut self, v: ArrayD<f32>) -> Self {
        self.reward = Some(v);
        self
    }

    /// Sets done flags.
    pub fn done(mut self, v: ArrayD<bool>) -> Self {
        self.done = Some(v);
        self
    }

    /// Sets masks explicitly.
    pub fn mask(mut self, v: ArrayD<f32>) -> Self {
        self.mask = Some(v);
        self
    }

    /// Adds a side-channel column.
    pub fn info(mut self, key: impl Into<String>, v: impl Into<Column>) -> Self {
        self.info.insert(key.into(), v.into());
        self
    }

    /// Sets a field by name, core fields included.
    pub fn field(self, key: &str, v: Column) -> Result<Self, StateError> {
        let type_error = |v: &Column, expected| StateError::FieldType {
            key: key.to_string(),
            expected,
            found: v.type_name(),
        };
        Ok(match key {
            OBSERVATION => self.observation(v.to_float()),
            REWARD => match v {
                Column::Bool(_) => return Err(type_error(&v, "float column")),
                v => self.reward(v.to_float()),
            },
            DONE => match v {
                Column::Bool(a) => self.done(a),
                v => return Err(type_error(&v, "bool column")),
            },
            MASK => match v {
                Column::Float(a) => self.mask(a),
                v => return Err(type_error(&v, "float column")),
            },
            _ => self.info(key, v),
        })
    }

    /// Builds the batch.
    ///
    /// Fails if no observation was given or a field does not have the batch shape
    /// as its leading dimensions.
    pub fn build(self) -> Result<StateBatch, StateError> {
        let shape = self.shape;
        let observation = self.observation.ok_or(StateError::MissingObservation)?;
        check_shape(OBSERVATION, observation.shape(), &shape)?;

        let reward = self
            .reward
            .unwrap_or_else(|| ArrayD::zeros(IxDyn(&shape)));
        check_shape(REWARD, reward.shape(), &shape)?;

        let done = self
            .done
            .unwrap_or_else(|| ArrayD::from_elem(IxDyn(&shape), false));
        check_shape(DONE, done.shape(), &shape)?;

        let mask = self.mask.unwrap_or_else(|| mask_of(&done));
        check_shape(MASK, mask.shape(), &shape)?;

        for (k, c) in self.info.iter() {
            check_shape(k, c.shape(), &shape)?;
        }

        Ok(StateBatch {
            shape,
            observation,
            reward,
            done,
            mask,
            info: self.info,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Value;
    use ndarray::{arr1, arr2, Array, Axis, IxDyn};

    fn observations(shape: &[usize]) -> ArrayD<f32> {
        let n = shape.iter().product::<usize>();
        Array::range(0.0, n as f32, 1.0)
            .into_shape(IxDyn(shape))
            .unwrap()
    }

    fn batch4() -> StateBatch {
        StateBatch::builder(&[4])
            .observation(observations(&[4, 2]))
            .reward(arr1(&[0f32, 1.0, 2.0, 3.0]).into_dyn())
            .done(arr1(&[false, false, true, false]).into_dyn())
            .info("lives", arr1(&[3i64, 2, 1, 0]).into_dyn())
            .build()
            .unwrap()
    }

    #[test]
    fn test_defaults_and_mask() {
        let batch = StateBatch::new(observations(&[3, 2]), &[3]).unwrap();
        assert_eq!(batch.reward(), &ArrayD::<f32>::zeros(IxDyn(&[3])));
        assert_eq!(batch.mask(), &ArrayD::<f32>::ones(IxDyn(&[3])));
        assert_eq!(batch4().mask(), &arr1(&[1f32, 1.0, 0.0, 1.0]).into_dyn());
    }

    #[test]
    fn test_build_rejects_wrong_leading_dims() {
        let err = StateBatch::builder(&[4])
            .observation(observations(&[4, 2]))
            .reward(arr1(&[0f32, 1.0]).into_dyn())
            .build()
            .unwrap_err();
        assert!(matches!(err, StateError::BatchShape { .. }));
        assert_eq!(
            StateBatch::builder(&[4]).build().unwrap_err(),
            StateError::MissingObservation
        );
    }

    #[test]
    fn test_index_matches_manual_reconstruction() {
        let batch = batch4();
        let state = batch.index(2).unwrap();
        let expected = StateRecord::builder()
            .observation(arr1(&[4f32, 5.0]).into_dyn())
            .reward(2.0)
            .done(true)
            .info("lives", Value::Int(1))
            .build()
            .unwrap();
        assert_eq!(state, expected);
        assert!(matches!(
            batch.index(4),
            Err(StateError::IndexOutOfBounds { index: 4, len: 4 })
        ));
    }

    #[test]
    fn test_slice_updates_shape() {
        let batch = batch4().slice(1..3).unwrap();
        assert_eq!(batch.shape(), &[2]);
        assert_eq!(batch.reward(), &arr1(&[1f32, 2.0]).into_dyn());
        assert_eq!(
            batch.info("lives"),
            Some(&Column::Int(arr1(&[2i64, 1]).into_dyn()))
        );
        assert!(batch4().slice(2..5).is_err());
    }

    #[test]
    fn test_select_with_mask_and_indices() {
        let batch = batch4();
        let m = arr1(&[true, false, true, true]).into_dyn();
        let selected = batch.select(&BatchIndex::Mask(m)).unwrap();
        assert_eq!(selected.shape(), &[3]);
        assert_eq!(selected.reward(), &arr1(&[0f32, 2.0, 3.0]).into_dyn());
        assert_eq!(selected.observation().shape(), &[3, 2]);

        let selected = batch.select(&BatchIndex::Indices(vec![3, 0])).unwrap();
        assert_eq!(selected.reward(), &arr1(&[3f32, 0.0]).into_dyn());
        assert_eq!(selected.mask(), &arr1(&[1f32, 1.0]).into_dyn());
        assert!(batch.select(&BatchIndex::Indices(vec![7])).is_err());
    }

    #[test]
    fn test_select_mask_over_time_and_process() {
        let batch = StateBatch::new(observations(&[2, 3, 5]), &[2, 3]).unwrap();
        let m = arr2(&[[true, false, false], [false, true, true]]).into_dyn();
        let selected = batch.select(&BatchIndex::Mask(m)).unwrap();
        assert_eq!(selected.shape(), &[3]);
        assert_eq!(selected.observation().shape(), &[3, 5]);

        let m = arr1(&[false, true]).into_dyn();
        let selected = batch.select(&BatchIndex::Mask(m)).unwrap();
        assert_eq!(selected.shape(), &[1, 3]);
    }

    #[test]
    fn test_flatten_view_round_trip() {
        let batch = StateBatch::builder(&[2, 3])
            .observation(observations(&[2, 3, 4]))
            .done(arr2(&[[false, true, false], [true, false, false]]).into_dyn())
            .build()
            .unwrap();
        let flat = batch.flatten().unwrap();
        assert_eq!(flat.shape(), &[6]);
        assert_eq!(flat.observation().shape(), &[6, 4]);
        assert_eq!(flat.view(&[2, 3]).unwrap(), batch);
        assert!(matches!(
            batch.view(&[4]),
            Err(StateError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_update_round_trip() {
        let batch = batch4();
        let original = batch.get("reward").unwrap();
        let updated = batch
            .update("reward", ArrayD::<f32>::zeros(IxDyn(&[4])))
            .unwrap();
        assert_eq!(updated.reward(), &ArrayD::<f32>::zeros(IxDyn(&[4])));
        assert_eq!(updated.update("reward", original).unwrap(), batch);
        assert!(batch
            .update("reward", ArrayD::<f32>::zeros(IxDyn(&[3])))
            .is_err());
    }

    #[test]
    fn test_input_output_and_mask() {
        let batch = StateBatch::builder(&[2, 2])
            .observation(observations(&[2, 2, 3]))
            .done(arr2(&[[false, true], [false, false]]).into_dyn())
            .build()
            .unwrap();
        let input = batch.as_input("observation").unwrap();
        assert_eq!(input.shape(), &[4, 3]);
        assert_eq!(batch.as_input("done").unwrap(), arr1(&[0f32, 1.0, 0.0, 0.0]).into_dyn());

        let output = batch.as_output(ArrayD::ones(IxDyn(&[4, 5]))).unwrap();
        assert_eq!(output.shape(), &[2, 2, 5]);
        assert!(batch.as_output(ArrayD::ones(IxDyn(&[3, 5]))).is_err());

        let masked = batch.apply_mask(output).unwrap();
        assert_eq!(masked.sum(), 15.0);
        let terminal = masked.index_axis(Axis(0), 0).index_axis(Axis(0), 1).to_owned();
        assert!(terminal.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_apply() {
        let batch = batch4();
        let out = batch
            .apply(|xs| xs[0].sum_axis(Axis(1)), &["observation"])
            .unwrap();
        assert_eq!(out, arr1(&[1f32, 5.0, 0.0, 13.0]).into_dyn());
    }

    #[test]
    fn test_from_records_drops_incoherent_info() {
        let record = |lives: i64, label: &str| {
            StateRecord::builder()
                .observation(ArrayD::zeros(IxDyn(&[2])))
                .info("lives", lives)
                .info("label", label)
                .build()
                .unwrap()
        };
        let batch = StateBatch::from_records(&[record(3, "a"), record(2, "b")]).unwrap();
        assert_eq!(batch.keys(), vec!["observation", "reward", "done", "mask", "lives"]);
        assert_eq!(batch.index(1).unwrap().info("lives"), Some(&Value::Int(2)));
    }

    #[test]
    fn test_from_records_requires_uniform_observations() {
        let a = StateRecord::new(ArrayD::zeros(IxDyn(&[2])));
        let b = StateRecord::new(ArrayD::zeros(IxDyn(&[3])));
        assert_eq!(
            StateBatch::from_records(&[a, b]).unwrap_err(),
            StateError::Stack("observation".to_string())
        );
        assert_eq!(StateBatch::from_records(&[]).unwrap_err(), StateError::Empty);
    }

    #[test]
    fn test_select_indices_requires_batch_dims() {
        let batch = StateBatch::new(observations(&[2]), &[]).unwrap();
        let expected = StateError::NotOneDimensional(vec![]);
        assert_eq!(
            batch.select(&BatchIndex::Indices(vec![])).unwrap_err(),
            expected
        );
        assert_eq!(
            batch.select(&BatchIndex::Indices(vec![0])).unwrap_err(),
            expected
        );
        assert_eq!(batch.slice(0..0).unwrap_err(), expected);
    }
}
