//! Array manipulations shared by records and batches.
use crate::StateError;
use ndarray::{stack, ArrayD, ArrayView, Axis, IxDyn, Slice};

/// Returns `true` if `shape` starts with `batch_shape`.
pub(crate) fn has_batch_shape(shape: &[usize], batch_shape: &[usize]) -> bool {
    shape.len() >= batch_shape.len() && &shape[..batch_shape.len()] == batch_shape
}

pub(crate) fn scalar<T: Clone>(a: &ArrayD<T>) -> Option<T> {
    a.iter().next().cloned()
}

pub(crate) fn index_first<T: Clone>(a: &ArrayD<T>, i: usize) -> ArrayD<T> {
    a.index_axis(Axis(0), i).to_owned()
}

pub(crate) fn slice_first<T: Clone>(a: &ArrayD<T>, start: usize, end: usize) -> ArrayD<T> {
    a.slice_axis(Axis(0), Slice::from(start..end)).to_owned()
}

/// Replaces the first `n_batch_dims` dimensions of `a` with `shape`.
pub(crate) fn reshape_batch<T: Clone>(
    a: &ArrayD<T>,
    n_batch_dims: usize,
    shape: &[usize],
) -> Result<ArrayD<T>, StateError> {
    let mut new_shape = shape.to_vec();
    new_shape.extend_from_slice(&a.shape()[n_batch_dims.min(a.ndim())..]);
    a.as_standard_layout()
        .into_owned()
        .into_shape(IxDyn(&new_shape))
        .map_err(|_| StateError::ShapeMismatch {
            from: a.shape().to_vec(),
            to: new_shape,
        })
}

/// Picks the elements where `mask` is `true`.
///
/// The dimensions covered by `mask` are collapsed into one.
/// Returns `None` if the shape of `a` does not start with the shape of `mask`.
pub(crate) fn gather_mask<T: Clone>(a: &ArrayD<T>, mask: &ArrayD<bool>) -> Option<ArrayD<T>> {
    if mask.ndim() == 0 || !has_batch_shape(a.shape(), mask.shape()) {
        return None;
    }
    let flat = reshape_batch(a, mask.ndim(), &[mask.len()]).ok()?;
    let ixs = mask
        .iter()
        .enumerate()
        .filter_map(|(i, &m)| if m { Some(i) } else { None })
        .collect::<Vec<_>>();
    Some(flat.select(Axis(0), &ixs))
}

/// Picks the elements along the first axis.
///
/// Returns `None` for zero-dimensional arrays or out of range indices.
pub(crate) fn gather_indices<T: Clone>(a: &ArrayD<T>, ixs: &[usize]) -> Option<ArrayD<T>> {
    if a.ndim() == 0 || ixs.iter().any(|&i| i >= a.shape()[0]) {
        return None;
    }
    Some(a.select(Axis(0), ixs))
}

/// Stacks arrays along a new first axis.
///
/// Returns `None` if the arrays differ in shape or the slice is empty.
pub(crate) fn stack_first<T: Clone>(arrays: &[ArrayD<T>]) -> Option<ArrayD<T>> {
    let views: Vec<ArrayView<T, IxDyn>> = arrays.iter().map(|a| a.view()).collect();
    stack(Axis(0), &views).ok()
}
