use crate::keying::domain::frame_effect::FrameEffect;
use crate::keying::domain::hsv::rgb_to_hue;
use crate::keying::domain::hue_band::HueBand;
use crate::keying::domain::keying_error::KeyingError;
use crate::shared::frame::Frame;

const TRANSPARENT: u8 = 0;
const OPAQUE: u8 = 255;

/// Sets alpha per pixel of an interleaved RGBA buffer: 0 inside `band`, 255 outside.
///
/// Color channels are never written, so keying the same buffer twice gives
/// the same result as keying it once. A trailing partial pixel (length not a
/// multiple of 4) is left untouched.
pub fn key_pixels(data: &mut [u8], band: &HueBand) {
    for px in data.chunks_exact_mut(4) {
        let hue = rgb_to_hue(px[0], px[1], px[2]);
        px[3] = if band.contains(hue) { TRANSPARENT } else { OPAQUE };
    }
}

/// CPU chroma keyer for RGBA frames.
pub struct HueKeyer {
    band: HueBand,
}

impl HueKeyer {
    pub fn new(band: HueBand) -> Self {
        Self { band }
    }

    pub fn band(&self) -> &HueBand {
        &self.band
    }

    /// Keys `frame` in place.
    pub fn process(&self, frame: &mut Frame) -> Result<(), KeyingError> {
        if !frame.is_rgba() {
            return Err(KeyingError::UnsupportedChannels(frame.channels()));
        }
        key_pixels(frame.data_mut(), &self.band);
        Ok(())
    }
}

impl FrameEffect for HueKeyer {
    fn apply(&self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.process(frame)?;
        Ok(())
    }
}
