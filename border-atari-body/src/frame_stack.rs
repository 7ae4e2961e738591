//! Stack of the latest preprocessed frames.
use crate::BodyError;
use ndarray::{stack, Array2, ArrayD, Axis};
use std::{collections::VecDeque, rc::Rc};

/// Frames of a [`FrameStack`] at a step, concatenated on demand.
///
/// Snapshots taken at consecutive steps share their common frames.
#[derive(Debug, Clone, PartialEq)]
pub struct LazyFrames {
    frames: Vec<Rc<Array2<f32>>>,
}

impl LazyFrames {
    /// The number of frames.
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if there is no frame.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// The `i`-th frame, the oldest first.
    pub fn frame(&self, i: usize) -> Option<&Rc<Array2<f32>>> {
        self.frames.get(i)
    }

    /// Concatenates the frames, `(depth, height, width)`.
    pub fn stack(&self) -> Result<ArrayD<f32>, BodyError> {
        let views = self.frames.iter().map(|f| f.view()).collect::<Vec<_>>();
        stack(Axis(0), &views)
            .map(|a| a.into_dyn())
            .map_err(|_| BodyError::FrameShape(self.frames.iter().map(|f| f.len()).collect()))
    }
}

/// Keeps the last `depth` frames of a slot, the oldest first.
///
/// The first frame pushed after [`FrameStack::reset`] fills the whole stack.
#[derive(Debug, Clone)]
pub struct FrameStack {
    depth: usize,
    frames: VecDeque<Rc<Array2<f32>>>,
}

impl FrameStack {
    /// Constructs an empty stack of `depth` frames.
    pub fn new(depth: usize) -> Self {
        Self {
            depth,
            frames: VecDeque::with_capacity(depth),
        }
    }

    /// The number of stacked frames.
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns true if no frame has been pushed since the last reset.
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Drops all frames.
    pub fn reset(&mut self) {
        self.frames.clear();
    }

    /// Pushes a frame and returns the stacked frames, `(depth, height, width)`.
    pub fn push(&mut self, frame: Array2<f32>) -> Result<ArrayD<f32>, BodyError> {
        let frame = Rc::new(frame);
        if self.frames.is_empty() {
            self.fill_buffer(frame);
        } else {
            self.update_buffer(frame);
        }
        self.stacked()
    }

    /// The current frames, without copying them.
    pub fn lazy(&self) -> LazyFrames {
        LazyFrames {
            frames: self.frames.iter().cloned().collect(),
        }
    }

    /// The stacked frames, `(depth, height, width)`.
    pub fn stacked(&self) -> Result<ArrayD<f32>, BodyError> {
        self.lazy().stack()
    }

    fn fill_buffer(&mut self, frame: Rc<Array2<f32>>) {
        for _ in 0..self.depth {
            self.frames.push_back(frame.clone());
        }
    }

    fn update_buffer(&mut self, frame: Rc<Array2<f32>>) {
        if self.frames.len() == self.depth {
            self.frames.pop_front();
        }
        self.frames.push_back(frame);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::Array;

    fn frame(v: f32) -> Array2<f32> {
        Array2::from_elem((2, 3), v)
    }

    fn values(stacked: &ArrayD<f32>) -> Vec<f32> {
        stacked
            .outer_iter()
            .map(|f| f.iter().cloned().next().unwrap())
            .collect()
    }

    #[test]
    fn test_first_frame_fills_stack() -> Result<(), BodyError> {
        let mut s = FrameStack::new(4);
        assert!(s.is_empty());
        let stacked = s.push(frame(1.0))?;
        assert_eq!(stacked.shape(), &[4, 2, 3]);
        assert_eq!(values(&stacked), vec![1.0; 4]);
        Ok(())
    }

    #[test]
    fn test_fifo() -> Result<(), BodyError> {
        let mut s = FrameStack::new(3);
        s.push(frame(0.0))?;
        s.push(frame(1.0))?;
        s.push(frame(2.0))?;
        let stacked = s.push(frame(3.0))?;
        assert_eq!(values(&stacked), vec![1.0, 2.0, 3.0]);

        s.reset();
        let stacked = s.push(frame(9.0))?;
        assert_eq!(values(&stacked), vec![9.0; 3]);
        Ok(())
    }

    #[test]
    fn test_single_frame() -> Result<(), BodyError> {
        let mut s = FrameStack::new(1);
        s.push(frame(1.0))?;
        let f = Array::range(0.0, 6.0, 1.0).into_shape((2, 3)).unwrap();
        let stacked = s.push(f.clone())?;
        assert_eq!(stacked, f.insert_axis(Axis(0)).into_dyn());
        Ok(())
    }

    #[test]
    fn test_lazy_frames_share_frames() -> Result<(), BodyError> {
        let mut s = FrameStack::new(4);
        s.push(frame(1.0))?;
        let first = s.lazy();
        assert!(Rc::ptr_eq(first.frame(0).unwrap(), first.frame(3).unwrap()));

        let stacked = s.push(frame(2.0))?;
        let second = s.lazy();
        assert_eq!(second.len(), 4);
        assert!(Rc::ptr_eq(first.frame(1).unwrap(), second.frame(0).unwrap()));
        assert_eq!(second.stack()?, stacked);

        // Earlier snapshots are not affected by later pushes.
        assert_eq!(values(&first.stack()?), vec![1.0; 4]);
        Ok(())
    }
}
