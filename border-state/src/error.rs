//! Errors in the library.
use thiserror::Error;

/// Errors raised while constructing or reshaping states.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StateError {
    /// A state was constructed without an observation.
    #[error("State must contain an observation")]
    MissingObservation,

    /// A core field was given a value of the wrong type.
    #[error("Field `{key}` expects {expected}, got {found}")]
    FieldType {
        /// Name of the field.
        key: String,
        /// Expected type.
        expected: &'static str,
        /// Type of the given value.
        found: &'static str,
    },

    /// The leading dimensions of a field do not match the batch shape.
    #[error("Field `{key}` has shape {found:?}, which does not start with batch shape {expected:?}")]
    BatchShape {
        /// Name of the field.
        key: String,
        /// Batch shape of the state.
        expected: Vec<usize>,
        /// Shape of the field.
        found: Vec<usize>,
    },

    /// Reshaping changes the number of elements.
    #[error("Cannot view shape {from:?} as {to:?}")]
    ShapeMismatch {
        /// Source shape.
        from: Vec<usize>,
        /// Target shape.
        to: Vec<usize>,
    },

    /// Index out of the batch range.
    #[error("Index {index} is out of bounds for batch of length {len}")]
    IndexOutOfBounds {
        /// The index.
        index: usize,
        /// Length of the first batch dimension.
        len: usize,
    },

    /// Integer indexing of a batch with more than one batch dimension.
    #[error("Integer indexing requires a one-dimensional batch, got shape {0:?}")]
    NotOneDimensional(Vec<usize>),

    /// The state has no field of the given name.
    #[error("Unknown field `{0}`")]
    UnknownField(String),

    /// Observations of the states to be stacked have different shapes.
    #[error("Cannot stack field `{0}` of states with different shapes")]
    Stack(String),

    /// Stacking an empty list of states.
    #[error("Cannot build a batch from an empty list of states")]
    Empty,
}

/// Errors in accessing a [`Record`](crate::record::Record).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RecordError {
    /// Record key error.
    #[error("Record key error: {0}")]
    RecordKeyError(String),

    /// Record value type error.
    #[error("Record value type error: {0}")]
    RecordValueTypeError(String),
}
