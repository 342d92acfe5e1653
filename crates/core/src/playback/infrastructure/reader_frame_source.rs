use crate::playback::domain::frame_source::FrameSource;
use crate::shared::frame::Frame;
use crate::video::domain::video_reader::VideoReader;

type FrameIter<'a> = Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + 'a>;

/// Serves the frames of an opened [`VideoReader`] one capture at a time.
pub struct ReaderFrameSource<'a> {
    frames: FrameIter<'a>,
}

impl<'a> ReaderFrameSource<'a> {
    /// `reader` must already be opened.
    pub fn new(reader: &'a mut dyn VideoReader) -> Self {
        Self {
            frames: reader.frames(),
        }
    }
}

impl FrameSource for ReaderFrameSource<'_> {
    fn capture(&mut self) -> Result<Option<Frame>, Box<dyn std::error::Error>> {
        self.frames.next().transpose()
    }
}
