use crate::keying::domain::frame_effect::FrameEffect;
use crate::keying::domain::hue_band::HueBand;

use super::chroma_key_effect::ChromaKeyEffect;

/// Builds the chroma key effect for a hue band and blur radius.
///
/// Logs the chosen configuration and warns when the blur radius is large
/// enough that the naive alpha blur will not keep up with realtime playback.
pub fn create_effect(band: HueBand, blur_radius: usize) -> Box<dyn FrameEffect> {
    log::info!(
        "Keying hues in ({:.1}°, {:.1}°), alpha blur radius {}",
        band.lower(),
        band.upper(),
        blur_radius
    );
    if blur_radius > SLOW_BLUR_RADIUS {
        log::warn!(
            "Alpha blur radius {blur_radius} scans {} samples per pixel; expect slow frames",
            window_samples(blur_radius)
        );
    }
    Box::new(ChromaKeyEffect::new(band, blur_radius))
}

/// Radius above which the per-pixel neighborhood gets expensive.
const SLOW_BLUR_RADIUS: usize = 2;

/// `(2r + 1)²`, saturating at `usize::MAX`.
fn window_samples(radius: usize) -> usize {
    let side = radius.saturating_mul(2).saturating_add(1);
    side.saturating_mul(side)
}
