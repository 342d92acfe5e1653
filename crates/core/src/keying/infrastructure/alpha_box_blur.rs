use ndarray::{s, Array2, ArrayViewMut3};

use crate::keying::domain::frame_effect::FrameEffect;
use crate::keying::domain::keying_error::KeyingError;
use crate::shared::frame::Frame;

const ALPHA: usize = 3;

/// Replaces every alpha sample of an RGBA buffer with the mean alpha of its
/// `(2 * radius + 1)²` neighborhood.
///
/// Neighbors outside the image on any side are skipped, so edge pixels average
/// fewer samples. All means are taken over the alpha values as they were before
/// the pass. Color channels are untouched and `radius == 0` is a no-op.
///
/// This is a naive `O(width * height * radius²)` scan. It is fine for small
/// radii on small frames and far too slow for realtime video at larger ones.
pub fn blur_alpha(
    data: &mut [u8],
    width: usize,
    height: usize,
    radius: usize,
) -> Result<(), KeyingError> {
    let expected = width * height * 4;
    if data.len() != expected {
        return Err(KeyingError::Shape {
            width,
            height,
            expected,
            actual: data.len(),
        });
    }
    if radius == 0 || expected == 0 {
        return Ok(());
    }

    let mut pixels = ArrayViewMut3::from_shape((height, width, 4), data).map_err(|_| {
        KeyingError::Shape {
            width,
            height,
            expected,
            actual: expected,
        }
    })?;
    let source: Array2<u8> = pixels.slice(s![.., .., ALPHA]).to_owned();

    for y in 0..height {
        let top = y.saturating_sub(radius);
        let bottom = y.saturating_add(radius).min(height - 1);
        for x in 0..width {
            let left = x.saturating_sub(radius);
            let right = x.saturating_add(radius).min(width - 1);

            let window = source.slice(s![top..=bottom, left..=right]);
            let sum: u64 = window.iter().map(|&a| u64::from(a)).sum();
            let count = window.len() as u64;
            pixels[[y, x, ALPHA]] = ((sum + count / 2) / count) as u8;
        }
    }

    Ok(())
}

/// Optional post-process that feathers the keyed edge by box-blurring alpha.
pub struct AlphaBoxBlur {
    radius: usize,
}

impl AlphaBoxBlur {
    pub fn new(radius: usize) -> Self {
        Self { radius }
    }

    pub fn radius(&self) -> usize {
        self.radius
    }

    pub fn process(&self, frame: &mut Frame) -> Result<(), KeyingError> {
        if !frame.is_rgba() {
            return Err(KeyingError::UnsupportedChannels(frame.channels()));
        }
        let width = frame.width() as usize;
        let height = frame.height() as usize;
        blur_alpha(frame.data_mut(), width, height, self.radius)
    }
}

impl FrameEffect for AlphaBoxBlur {
    fn apply(&self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.process(frame)?;
        Ok(())
    }
}
