pub mod frame_effect;
pub mod hsv;
pub mod hue_band;
pub mod keying_error;
