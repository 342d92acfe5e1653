use std::path::{Path, PathBuf};

use crate::playback::domain::frame_sink::FrameSink;
use crate::shared::frame::Frame;
use crate::video::domain::image_writer::ImageWriter;

/// Presents frames by writing them as `frame_000000.png`, `frame_000001.png`, ...
///
/// Files are numbered by presentation order, not by the frame's decode index,
/// so a sequence never has gaps.
pub struct ImageSequenceSink {
    writer: Box<dyn ImageWriter>,
    dir: PathBuf,
    written: usize,
}

impl ImageSequenceSink {
    pub fn new(writer: Box<dyn ImageWriter>, dir: &Path) -> Self {
        Self {
            writer,
            dir: dir.to_path_buf(),
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }

    pub fn frame_path(&self, n: usize) -> PathBuf {
        self.dir.join(format!("frame_{n:06}.png"))
    }
}

impl FrameSink for ImageSequenceSink {
    fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
        let path = self.frame_path(self.written);
        self.writer.write(&path, frame)?;
        self.written += 1;
        Ok(())
    }
}
