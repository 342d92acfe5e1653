use crate::shared::frame::Frame;

/// Domain interface for a per-frame pixel effect.
///
/// Implementations modify the frame in place (`&mut Frame`) and keep no
/// state between calls, so applying one instance to consecutive frames is
/// equivalent to applying fresh instances.
pub trait FrameEffect: Send {
    fn apply(&self, frame: &mut Frame) -> Result<(), Box<dyn std::error::Error>>;
}
