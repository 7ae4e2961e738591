//! Per-frame preprocessing.
use crate::BodyError;
use image::{
    imageops::{resize, FilterType::Triangle},
    ImageBuffer, Luma,
};
use ndarray::{Array2, Array3, ArrayD, Axis, Ix3};

/// Converts raw frames into single-channel frames of a fixed resolution.
///
/// A raw frame is an array of pixel intensities in `[0, 255]` with shape
/// `(channels, height, width)`, or `(height, width)` for a single channel.
/// Preprocessing takes the elementwise maximum of the frame and the previous raw
/// frame of the episode (deflicker), averages the channels and resizes the result
/// with a triangle filter.
///
/// Frames are resized as 8-bit images: when the resolution of a frame differs
/// from the target, its intensities are rounded and clamped to `[0, 255]` before
/// resizing. Frames already at the target resolution keep their values.
#[derive(Debug, Clone)]
pub struct FramePreprocessor {
    height: usize,
    width: usize,
    prev: Option<Array3<f32>>,
}

impl FramePreprocessor {
    /// Constructs a preprocessor producing frames of `height` x `width`.
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            prev: None,
        }
    }

    /// Resolution of preprocessed frames, `(height, width)`.
    pub fn resolution(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Forgets the previous frame. Called at the start of an episode or a life.
    pub fn reset(&mut self) {
        self.prev = None;
    }

    /// Preprocesses a raw frame.
    pub fn process(&mut self, frame: &ArrayD<f32>) -> Result<Array2<f32>, BodyError> {
        let frame = to_channels_first(frame)?;

        let mut maxed = frame.clone();
        if let Some(prev) = &self.prev {
            if prev.shape() != frame.shape() {
                return Err(BodyError::FrameMismatch {
                    prev: prev.shape().to_vec(),
                    found: frame.shape().to_vec(),
                });
            }
            maxed.zip_mut_with(prev, |a, &b| *a = a.max(b));
        }
        self.prev = Some(frame);

        let luminance = maxed
            .mean_axis(Axis(0))
            .ok_or_else(|| BodyError::FrameShape(maxed.shape().to_vec()))?;

        self.resize(luminance)
    }

    fn resize(&self, frame: Array2<f32>) -> Result<Array2<f32>, BodyError> {
        let (h, w) = frame.dim();
        if (h, w) == (self.height, self.width) {
            return Ok(frame);
        }

        let buf = frame
            .iter()
            .map(|v| v.round().max(0.0).min(255.0) as u8)
            .collect::<Vec<_>>();
        let img = ImageBuffer::<Luma<u8>, _>::from_raw(w as u32, h as u32, buf)
            .ok_or_else(|| BodyError::FrameShape(vec![h, w]))?;
        let img = resize(&img, self.width as u32, self.height as u32, Triangle);
        let buf = img.into_raw().into_iter().map(f32::from).collect::<Vec<_>>();

        Array2::from_shape_vec((self.height, self.width), buf)
            .map_err(|_| BodyError::FrameShape(vec![self.height, self.width]))
    }
}

fn to_channels_first(frame: &ArrayD<f32>) -> Result<Array3<f32>, BodyError> {
    let shape = frame.shape().to_vec();
    let frame = match frame.ndim() {
        2 => frame.clone().insert_axis(Axis(0)),
        3 => frame.clone(),
        _ => return Err(BodyError::FrameShape(shape)),
    };
    if frame.is_empty() {
        return Err(BodyError::FrameShape(shape));
    }
    frame
        .into_dimensionality::<Ix3>()
        .map_err(|_| BodyError::FrameShape(shape))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{arr2, Array};

    fn frame(shape: &[usize], v: f32) -> ArrayD<f32> {
        ArrayD::from_elem(shape, v)
    }

    #[test]
    fn test_channels_are_averaged() -> Result<(), BodyError> {
        let mut p = FramePreprocessor::new(2, 2);
        let rgb = Array::from_shape_vec(
            (3, 2, 2),
            vec![0., 30., 60., 90., 30., 60., 90., 120., 60., 90., 120., 150.],
        )
        .unwrap()
        .into_dyn();
        assert_eq!(p.process(&rgb)?, arr2(&[[30., 60.], [90., 120.]]));
        Ok(())
    }

    #[test]
    fn test_deflicker_uses_previous_raw_frame() -> Result<(), BodyError> {
        let mut p = FramePreprocessor::new(2, 2);
        assert_eq!(p.process(&frame(&[1, 2, 2], 5.0))?, arr2(&[[5., 5.], [5., 5.]]));
        assert_eq!(p.process(&frame(&[1, 2, 2], 1.0))?, arr2(&[[5., 5.], [5., 5.]]));
        assert_eq!(p.process(&frame(&[1, 2, 2], 3.0))?, arr2(&[[3., 3.], [3., 3.]]));

        p.reset();
        assert_eq!(p.process(&frame(&[2, 2], 1.0))?, arr2(&[[1., 1.], [1., 1.]]));
        Ok(())
    }

    #[test]
    fn test_resize_keeps_uniform_frames() -> Result<(), BodyError> {
        let mut p = FramePreprocessor::new(105, 80);
        let out = p.process(&frame(&[3, 210, 160], 100.0))?;
        assert_eq!(out.dim(), (105, 80));
        assert!(out.iter().all(|&v| v == 100.0));
        Ok(())
    }

    #[test]
    fn test_resize_quantizes_intensities() -> Result<(), BodyError> {
        let mut p = FramePreprocessor::new(2, 2);
        assert_eq!(p.process(&frame(&[1, 4, 4], 1.4))?, Array2::from_elem((2, 2), 1.0));
        p.reset();
        assert_eq!(p.process(&frame(&[1, 4, 4], 300.0))?, Array2::from_elem((2, 2), 255.0));
        p.reset();
        assert_eq!(p.process(&frame(&[1, 2, 2], 1.4))?, Array2::from_elem((2, 2), 1.4));
        Ok(())
    }

    #[test]
    fn test_invalid_frames() {
        let mut p = FramePreprocessor::new(2, 2);
        assert!(matches!(
            p.process(&frame(&[4], 1.0)),
            Err(BodyError::FrameShape(_))
        ));
        assert!(p.process(&frame(&[1, 4, 4], 1.0)).is_ok());
        assert!(matches!(
            p.process(&frame(&[1, 2, 2], 1.0)),
            Err(BodyError::FrameMismatch { .. })
        ));
    }
}
