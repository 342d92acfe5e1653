use crate::shared::frame::Frame;

/// Produces a snapshot of whatever the video surface currently shows.
pub trait FrameSource {
    /// Returns `Ok(None)` once the source has nothing more to show.
    fn capture(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>>;
}
