/// Lifecycle signals emitted by a video source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackEvent {
    Play,
    Pause,
    Ended,
    Abort,
    Error,
}

impl PlaybackEvent {
    /// True for every signal that halts the capture cycle. None of them is
    /// final: a later `Play` starts it again.
    pub fn stops(self) -> bool {
        !matches!(self, PlaybackEvent::Play)
    }
}

/// Whether the driver is currently ticking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
}
