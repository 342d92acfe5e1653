use crate::shared::frame::Frame;

/// Presents a keyed frame (a display surface, an image sequence, ...).
pub trait FrameSink {
    fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>>;
}
