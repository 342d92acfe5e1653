use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

use crate::keying::domain::frame_effect::FrameEffect;
use crate::playback::domain::frame_sink::FrameSink;
use crate::shared::video_metadata::VideoMetadata;
use crate::video::domain::video_reader::VideoReader;

use super::pipeline_logger::{NullPipelineLogger, PipelineLogger};

/// Progress callback: `(frames_done, total_frames)`. Returning `false` aborts
/// the run with an error.
pub type ProgressFn = Box<dyn Fn(usize, usize) -> bool + Send>;

/// Keys every frame of an opened video as fast as decoding allows.
///
/// Unlike the realtime [`KeyingDriver`](crate::playback::keying_driver::KeyingDriver)
/// there is no timer: frames flow decode → key → present back to back.
/// Setting `cancelled` stops the run after the current frame.
pub struct KeyVideoUseCase {
    reader: Box<dyn VideoReader>,
    sink: Box<dyn FrameSink>,
    effect: Box<dyn FrameEffect>,
    logger: Box<dyn PipelineLogger>,
    on_progress: Option<ProgressFn>,
    cancelled: Arc<AtomicBool>,
}

impl KeyVideoUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        sink: Box<dyn FrameSink>,
        effect: Box<dyn FrameEffect>,
        logger: Option<Box<dyn PipelineLogger>>,
        on_progress: Option<ProgressFn>,
        cancelled: Option<Arc<AtomicBool>>,
    ) -> Self {
        Self {
            reader,
            sink,
            effect,
            logger: logger.unwrap_or_else(|| Box::new(NullPipelineLogger)),
            on_progress,
            cancelled: cancelled.unwrap_or_else(|| Arc::new(AtomicBool::new(false))),
        }
    }

    /// Runs the pipeline on the already-opened reader. Returns the number of
    /// frames presented.
    pub fn execute(&mut self, metadata: &VideoMetadata) -> Result<usize, Box<dyn std::error::Error>> {
        let total = metadata.total_frames;
        let mut done = 0;
        self.logger.info(&format!(
            "Keying {}x{} video ({} frames)",
            metadata.width, metadata.height, total
        ));

        let mut frames = self.reader.frames();
        loop {
            if self.cancelled.load(Ordering::Relaxed) {
                self.logger.info(&format!("Cancelled after {done} frames"));
                break;
            }

            let decode_start = Instant::now();
            let Some(next) = frames.next() else {
                break;
            };
            let mut frame = next?;
            self.logger.timing("decode", elapsed_ms(decode_start));

            let key_start = Instant::now();
            self.effect.apply(&mut frame)?;
            self.logger.timing("key", elapsed_ms(key_start));

            let write_start = Instant::now();
            self.sink.present(&frame)?;
            self.logger.timing("write", elapsed_ms(write_start));

            done += 1;
            self.logger.progress(done, total);
            if let Some(cb) = &self.on_progress {
                if !cb(done, total) {
                    return Err("Cancelled".into());
                }
            }
        }
        drop(frames);

        self.reader.close();
        self.logger.summary();
        Ok(done)
    }
}

fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keying::domain::hue_band::HueBand;
    use crate::keying::infrastructure::chroma_key_effect::ChromaKeyEffect;
    use crate::shared::frame::Frame;
    use std::path::Path;
    use std::sync::Mutex;

    struct StubReader {
        frames: Vec<Frame>,
        closed: Arc<AtomicBool>,
    }

    impl VideoReader for StubReader {
        fn open(&mut self, _path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            Ok(meta(self.frames.len()))
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(std::mem::take(&mut self.frames).into_iter().map(Ok))
        }

        fn close(&mut self) {
            self.closed.store(true, Ordering::Relaxed);
        }
    }

    struct StubSink {
        presented: Arc<Mutex<Vec<Frame>>>,
    }

    impl FrameSink for StubSink {
        fn present(&mut self, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.presented.lock().unwrap().push(frame.clone());
            Ok(())
        }
    }

    fn meta(total_frames: usize) -> VideoMetadata {
        VideoMetadata {
            width: 2,
            height: 1,
            fps: 30.0,
            total_frames,
            codec: "h264".into(),
            source_path: None,
        }
    }

    fn frames(n: usize) -> Vec<Frame> {
        (0..n)
            .map(|i| Frame::rgba(vec![0, 255, 0, 255, 0, 0, 255, 0], 2, 1, i))
            .collect()
    }

    struct Harness {
        uc: KeyVideoUseCase,
        presented: Arc<Mutex<Vec<Frame>>>,
        closed: Arc<AtomicBool>,
    }

    fn harness(n: usize, on_progress: Option<ProgressFn>, cancelled: Option<Arc<AtomicBool>>) -> Harness {
        let presented = Arc::new(Mutex::new(Vec::new()));
        let closed = Arc::new(AtomicBool::new(false));
        let uc = KeyVideoUseCase::new(
            Box::new(StubReader {
                frames: frames(n),
                closed: closed.clone(),
            }),
            Box::new(StubSink {
                presented: presented.clone(),
            }),
            Box::new(ChromaKeyEffect::new(HueBand::new(120.0, 35.0).unwrap(), 0)),
            None,
            on_progress,
            cancelled,
        );
        Harness {
            uc,
            presented,
            closed,
        }
    }

    #[test]
    fn test_keys_every_frame_in_order() {
        let mut h = harness(4, None, None);
        assert_eq!(h.uc.execute(&meta(4)).unwrap(), 4);

        let presented = h.presented.lock().unwrap();
        let indices: Vec<usize> = presented.iter().map(Frame::index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3]);
        for frame in presented.iter() {
            assert_eq!(frame.data()[3], 0, "green keyed out");
            assert_eq!(frame.data()[7], 255, "blue made opaque");
        }
        assert!(h.closed.load(Ordering::Relaxed));
    }

    #[test]
    fn test_empty_video() {
        let mut h = harness(0, None, None);
        assert_eq!(h.uc.execute(&meta(0)).unwrap(), 0);
        assert!(h.presented.lock().unwrap().is_empty());
    }

    #[test]
    fn test_progress_reports_each_frame() {
        let calls = Arc::new(Mutex::new(Vec::new()));
        let calls_clone = calls.clone();
        let mut h = harness(
            3,
            Some(Box::new(move |current, total| {
                calls_clone.lock().unwrap().push((current, total));
                true
            })),
            None,
        );
        h.uc.execute(&meta(3)).unwrap();
        assert_eq!(*calls.lock().unwrap(), vec![(1, 3), (2, 3), (3, 3)]);
    }

    #[test]
    fn test_cancel_via_on_progress() {
        let mut h = harness(10, Some(Box::new(|current, _| current < 3)), None);
        assert!(h.uc.execute(&meta(10)).is_err());
        assert_eq!(h.presented.lock().unwrap().len(), 3);
    }

    #[test]
    fn test_cancellation_via_atomic_bool() {
        let cancelled = Arc::new(AtomicBool::new(false));
        let flag = cancelled.clone();
        let mut h = harness(
            10,
            Some(Box::new(move |current, _| {
                if current == 2 {
                    flag.store(true, Ordering::Relaxed);
                }
                true
            })),
            Some(cancelled),
        );
        assert_eq!(h.uc.execute(&meta(10)).unwrap(), 2);
        assert_eq!(h.presented.lock().unwrap().len(), 2);
    }
}
