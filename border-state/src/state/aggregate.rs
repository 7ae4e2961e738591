//! Best-effort combination of side-channel values into columns.
use super::{ops, StateRecord};
use crate::{Column, Value};
use ndarray::{Array1, ArrayD};
use std::collections::HashMap;

/// Result of combining side-channel values of states.
#[derive(Debug, Default)]
pub(crate) struct Aggregation {
    /// Columns successfully combined.
    pub columns: HashMap<String, Column>,

    /// Names of the values left out, sorted.
    pub dropped: Vec<String>,
}

/// Combines values of the same kind into a column.
fn combine(values: &[&Value]) -> Option<Column> {
    match values.first()? {
        Value::Float(_) => {
            let vs = values
                .iter()
                .map(|v| match v {
                    Value::Float(x) => Some(*x),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()?;
            Some(Column::Float(Array1::from(vs).into_dyn()))
        }
        Value::Int(_) => {
            let vs = values
                .iter()
                .map(|v| v.as_int())
                .collect::<Option<Vec<_>>>()?;
            Some(Column::Int(Array1::from(vs).into_dyn()))
        }
        Value::Bool(_) => {
            let vs = values
                .iter()
                .map(|v| match v {
                    Value::Bool(x) => Some(*x),
                    _ => None,
                })
                .collect::<Option<Vec<_>>>()?;
            Some(Column::Bool(Array1::from(vs).into_dyn()))
        }
        Value::Tensor(_) => {
            let ts = values
                .iter()
                .map(|v| match v {
                    Value::Tensor(t) => Some(t.clone()),
                    _ => None,
                })
                .collect::<Option<Vec<ArrayD<f32>>>>()?;
            ops::stack_first(&ts).map(Column::Float)
        }
        Value::Text(_) => None,
    }
}

/// Combines the side-channel values of `records`.
///
/// Keys are taken from the first record. A key is dropped when it is missing in
/// another record or its values cannot be combined into a single column.
pub(crate) fn aggregate_info(records: &[StateRecord]) -> Aggregation {
    let mut aggregation = Aggregation::default();
    let first = match records.first() {
        Some(r) => r,
        None => return aggregation,
    };

    for key in first.info_keys() {
        let values = records
            .iter()
            .map(|r| r.info(&key))
            .collect::<Option<Vec<_>>>();
        match values.and_then(|vs| combine(&vs)) {
            Some(c) => {
                aggregation.columns.insert(key, c);
            }
            None => aggregation.dropped.push(key),
        }
    }
    aggregation.dropped.sort();
    aggregation
}
