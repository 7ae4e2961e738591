//! Values of state fields.
//!
//! [`Value`] is a field of a single state ([`StateRecord`](crate::StateRecord)),
//! [`Column`] is a field of a batch of states ([`StateBatch`](crate::StateBatch)),
//! having the batch shape as its leading dimensions.
use crate::state::ops;
use ndarray::{ArrayD, IxDyn};

/// A field of [`StateRecord`](crate::StateRecord).
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// A floating point tensor of arbitrary shape.
    Tensor(ArrayD<f32>),

    /// A floating point scalar.
    Float(f32),

    /// An integer scalar, like the number of lives in Atari games.
    Int(i64),

    /// A boolean flag.
    Bool(bool),

    /// A text value. It cannot be batched.
    Text(String),
}

impl Value {
    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Tensor(_) => "tensor",
            Self::Float(_) => "float",
            Self::Int(_) => "int",
            Self::Bool(_) => "bool",
            Self::Text(_) => "text",
        }
    }

    /// Converts the value into a floating point tensor.
    ///
    /// Scalars become zero-dimensional tensors, `true` becomes `1.0`.
    /// Returns `None` for [`Value::Text`].
    pub fn to_tensor(&self) -> Option<ArrayD<f32>> {
        let scalar = |v: f32| ArrayD::from_elem(IxDyn(&[]), v);
        match self {
            Self::Tensor(t) => Some(t.clone()),
            Self::Float(v) => Some(scalar(*v)),
            Self::Int(v) => Some(scalar(*v as f32)),
            Self::Bool(v) => Some(scalar(if *v { 1.0 } else { 0.0 })),
            Self::Text(_) => None,
        }
    }

    /// Returns the integer if the value is [`Value::Int`].
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<ArrayD<f32>> for Value {
    fn from(v: ArrayD<f32>) -> Self {
        Self::Tensor(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Self::Float(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// A field of [`StateBatch`](crate::StateBatch).
///
/// The leading dimensions of the array are the batch shape.
#[derive(Debug, Clone, PartialEq)]
pub enum Column {
    /// Floating point values.
    Float(ArrayD<f32>),

    /// Integer values.
    Int(ArrayD<i64>),

    /// Boolean values.
    Bool(ArrayD<bool>),
}

macro_rules! map_column {
    ($column:expr, $a:ident => $body:expr) => {
        match $column {
            Column::Float($a) => $body.map(Column::Float),
            Column::Int($a) => $body.map(Column::Int),
            Column::Bool($a) => $body.map(Column::Bool),
        }
    };
}

impl Column {
    /// Shape of the underlying array, including the batch dimensions.
    pub fn shape(&self) -> &[usize] {
        match self {
            Self::Float(a) => a.shape(),
            Self::Int(a) => a.shape(),
            Self::Bool(a) => a.shape(),
        }
    }

    /// Name of the variant, used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Float(_) => "float column",
            Self::Int(_) => "int column",
            Self::Bool(_) => "bool column",
        }
    }

    /// Casts the values to `f32`, `true` becomes `1.0`.
    pub fn to_float(&self) -> ArrayD<f32> {
        match self {
            Self::Float(a) => a.clone(),
            Self::Int(a) => a.mapv(|v| v as f32),
            Self::Bool(a) => a.mapv(|v| if v { 1.0 } else { 0.0 }),
        }
    }

    /// Takes the `i`-th element along the first axis as a [`Value`].
    ///
    /// Zero-dimensional results become scalars, others become tensors.
    pub(crate) fn index(&self, i: usize) -> Option<Value> {
        if self.shape().is_empty() || i >= self.shape()[0] {
            return None;
        }
        let value = match self {
            Self::Float(a) => {
                let a = ops::index_first(a, i);
                match a.ndim() {
                    0 => Value::Float(ops::scalar(&a)?),
                    _ => Value::Tensor(a),
                }
            }
            Self::Int(a) => {
                let a = ops::index_first(a, i);
                match a.ndim() {
                    0 => Value::Int(ops::scalar(&a)?),
                    _ => Value::Tensor(a.mapv(|v| v as f32)),
                }
            }
            Self::Bool(a) => {
                let a = ops::index_first(a, i);
                match a.ndim() {
                    0 => Value::Bool(ops::scalar(&a)?),
                    _ => Value::Tensor(a.mapv(|v| if v { 1.0 } else { 0.0 })),
                }
            }
        };
        Some(value)
    }

    pub(crate) fn slice(&self, start: usize, end: usize) -> Column {
        match self {
            Self::Float(a) => Self::Float(ops::slice_first(a, start, end)),
            Self::Int(a) => Self::Int(ops::slice_first(a, start, end)),
            Self::Bool(a) => Self::Bool(ops::slice_first(a, start, end)),
        }
    }

    pub(crate) fn gather_mask(&self, mask: &ArrayD<bool>) -> Option<Column> {
        map_column!(self, a => ops::gather_mask(a, mask))
    }

    pub(crate) fn gather_indices(&self, ixs: &[usize]) -> Option<Column> {
        map_column!(self, a => ops::gather_indices(a, ixs))
    }

    pub(crate) fn reshape_batch(
        &self,
        n_batch_dims: usize,
        shape: &[usize],
    ) -> Result<Column, crate::StateError> {
        map_column!(self, a => ops::reshape_batch(a, n_batch_dims, shape))
    }
}

impl From<ArrayD<f32>> for Column {
    fn from(a: ArrayD<f32>) -> Self {
        Self::Float(a)
    }
}

impl From<ArrayD<i64>> for Column {
    fn from(a: ArrayD<i64>) -> Self {
        Self::Int(a)
    }
}

impl From<ArrayD<bool>> for Column {
    fn from(a: ArrayD<bool>) -> Self {
        Self::Bool(a)
    }
}
