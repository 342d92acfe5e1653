use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum KeyingError {
    #[error("hue center must be in [0, 360), got {0}")]
    InvalidHue(f64),
    #[error("hue variance must be a non-negative finite number, got {0}")]
    InvalidVariance(f64),
    #[error("keying requires 4-channel RGBA frames, got {0} channels")]
    UnsupportedChannels(u8),
    #[error("buffer holds {actual} bytes but {width}x{height} RGBA needs {expected}")]
    Shape {
        width: usize,
        height: usize,
        expected: usize,
        actual: usize,
    },
}
