use crate::keying::domain::frame_effect::FrameEffect;
use crate::keying::domain::hue_band::HueBand;
use crate::shared::frame::Frame;

use super::alpha_box_blur::AlphaBoxBlur;
use super::hue_keyer::HueKeyer;

/// Full per-frame chroma key: hue keying, then alpha smoothing when a blur
/// radius was configured.
pub struct ChromaKeyEffect {
    keyer: HueKeyer,
    blur: Option<AlphaBoxBlur>,
}

impl ChromaKeyEffect {
    pub fn new(band: HueBand, blur_radius: usize) -> Self {
        Self {
            keyer: HueKeyer::new(band),
            blur: (blur_radius > 0).then(|| AlphaBoxBlur::new(blur_radius)),
        }
    }

    pub fn band(&self) -> &HueBand {
        self.keyer.band()
    }

    pub fn blur_radius(&self) -> usize {
        self.blur.as_ref().map_or(0, AlphaBoxBlur::radius)
    }
}

impl FrameEffect for ChromaKeyEffect {
    fn apply(&self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>> {
        self.keyer.process(frame)?;
        if let Some(blur) = &self.blur {
            blur.process(frame)?;
        }
        Ok(())
    }
}
