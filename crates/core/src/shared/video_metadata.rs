use std::path::PathBuf;

/// Stream-level facts reported by a [`VideoReader`](crate::video::domain::video_reader::VideoReader).
///
/// Still images are represented as a single-frame video with `fps = 0`.
#[derive(Clone, Debug, PartialEq)]
pub struct VideoMetadata {
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub total_frames: usize,
    pub codec: String,
    pub source_path: Option<PathBuf>,
}
