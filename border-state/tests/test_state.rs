use anyhow::Result;
use border_state::{BatchIndex, Column, StateBatch, StateRecord, Value};
use ndarray::{Array, ArrayD, IxDyn};

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn observations(shape: &[usize]) -> ArrayD<f32> {
    let n = shape.iter().product::<usize>();
    Array::range(0.0, n as f32, 1.0).into_shape(IxDyn(shape)).unwrap()
}

fn dones(shape: &[usize]) -> ArrayD<bool> {
    let n = shape.iter().product::<usize>();
    Array::from_iter((0..n).map(|i| i % 3 == 1))
        .into_shape(IxDyn(shape))
        .unwrap()
}

#[test]
fn test_mask_is_one_minus_done() -> Result<()> {
    init();
    for shape in [vec![4], vec![2, 3], vec![3, 1, 2]].iter() {
        let mut obs_shape = shape.clone();
        obs_shape.push(5);
        let batch = StateBatch::builder(shape)
            .observation(observations(&obs_shape))
            .done(dones(shape))
            .build()?;
        let expected = batch.done().mapv(|d| 1.0 - (d as i32 as f32));
        assert_eq!(batch.mask(), &expected);
    }

    for &done in [false, true].iter() {
        let state = StateRecord::from_transition(observations(&[2]), 1.0, done, None);
        assert_eq!(state.mask(), 1.0 - (done as i32 as f32));
    }
    Ok(())
}

#[test]
fn test_flatten_then_view_restores_fields() -> Result<()> {
    init();
    for shape in [vec![6], vec![2, 3], vec![3, 1, 2]].iter() {
        let mut obs_shape = shape.clone();
        obs_shape.extend_from_slice(&[2, 2]);
        let batch = StateBatch::builder(shape)
            .observation(observations(&obs_shape))
            .done(dones(shape))
            .info("lives", Column::Int(ArrayD::from_elem(IxDyn(shape), 3)))
            .build()?;
        let flat = batch.flatten()?;
        assert_eq!(flat.shape(), &[6]);
        assert_eq!(flat.view(shape)?, batch);
    }
    Ok(())
}

#[test]
fn test_index_equals_single_state() -> Result<()> {
    init();
    let records = (0..5)
        .map(|i| {
            StateRecord::builder()
                .observation(observations(&[3]) * i as f32)
                .reward(i as f32 - 2.0)
                .done(i == 4)
                .info("lives", Value::Int(5 - i))
                .build()
        })
        .collect::<Result<Vec<_>, _>>()?;
    let batch = StateBatch::from_records(&records)?;
    for (i, record) in records.iter().enumerate() {
        assert_eq!(&batch.index(i)?, record);
    }
    assert_eq!(batch.to_records()?, records);
    Ok(())
}

#[test]
fn test_filtering_keeps_core_fields() -> Result<()> {
    init();
    let batch = StateBatch::builder(&[4])
        .observation(observations(&[4, 2]))
        .done(dones(&[4]))
        .build()?;
    let alive = batch.mask().mapv(|m| m > 0.5);
    let alive = batch.select(&BatchIndex::Mask(alive))?;
    assert_eq!(alive.shape(), &[3]);
    assert!(alive.done().iter().all(|&d| !d));
    assert_eq!(
        alive.keys(),
        vec!["observation", "reward", "done", "mask"]
    );
    Ok(())
}
