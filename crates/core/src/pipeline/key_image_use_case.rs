use std::path::Path;

use crate::keying::domain::frame_effect::FrameEffect;
use crate::video::domain::image_writer::ImageWriter;
use crate::video::domain::video_reader::VideoReader;

/// Single-image keying: read → key → write.
pub struct KeyImageUseCase {
    reader: Box<dyn VideoReader>,
    image_writer: Box<dyn ImageWriter>,
    effect: Box<dyn FrameEffect>,
}

impl KeyImageUseCase {
    pub fn new(
        reader: Box<dyn VideoReader>,
        image_writer: Box<dyn ImageWriter>,
        effect: Box<dyn FrameEffect>,
    ) -> Self {
        Self {
            reader,
            image_writer,
            effect,
        }
    }

    pub fn execute(
        &mut self,
        input_path: &Path,
        output_path: &Path,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let _metadata = self.reader.open(input_path)?;

        let mut frame = self.reader.frames().next().ok_or("No frames in image")??;
        self.reader.close();

        self.effect.apply(&mut frame)?;
        self.image_writer.write(output_path, &frame)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keying::domain::hue_band::HueBand;
    use crate::keying::infrastructure::chroma_key_effect::ChromaKeyEffect;
    use crate::shared::frame::Frame;
    use crate::shared::video_metadata::VideoMetadata;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    struct StubImageReader {
        frame: Option<Frame>,
    }

    impl VideoReader for StubImageReader {
        fn open(&mut self, _path: &Path) -> Result<VideoMetadata, Box<dyn std::error::Error>> {
            let (width, height) = self
                .frame
                .as_ref()
                .map(|f| (f.width(), f.height()))
                .unwrap_or_default();
            Ok(VideoMetadata {
                width,
                height,
                fps: 0.0,
                total_frames: 1,
                codec: String::new(),
                source_path: None,
            })
        }

        fn frames(
            &mut self,
        ) -> Box<dyn Iterator<Item = Result<Frame, Box<dyn std::error::Error>>> + '_> {
            Box::new(self.frame.take().into_iter().map(Ok))
        }

        fn close(&mut self) {
            self.frame = None;
        }
    }

    type Written = Arc<Mutex<Vec<(PathBuf, Frame)>>>;

    struct StubImageWriter {
        written: Written,
    }

    impl ImageWriter for StubImageWriter {
        fn write(&self, path: &Path, frame: &Frame) -> Result<(), Box<dyn std::error::Error>> {
            self.written
                .lock()
                .unwrap()
                .push((path.to_path_buf(), frame.clone()));
            Ok(())
        }
    }

    fn use_case(frame: Option<Frame>) -> (KeyImageUseCase, Written) {
        let written: Written = Arc::new(Mutex::new(Vec::new()));
        let uc = KeyImageUseCase::new(
            Box::new(StubImageReader { frame }),
            Box::new(StubImageWriter {
                written: written.clone(),
            }),
            Box::new(ChromaKeyEffect::new(HueBand::new(120.0, 35.0).unwrap(), 0)),
        );
        (uc, written)
    }

    #[test]
    fn test_writes_keyed_frame() {
        let frame = Frame::rgba(vec![0, 255, 0, 255, 255, 0, 0, 0], 2, 1, 0);
        let (mut uc, written) = use_case(Some(frame));

        uc.execute(Path::new("in.png"), Path::new("out.png")).unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written.len(), 1);
        assert_eq!(written[0].0, PathBuf::from("out.png"));
        assert_eq!(written[0].1.data(), &[0, 255, 0, 0, 255, 0, 0, 255]);
    }

    #[test]
    fn test_dimensions_preserved() {
        let frame = Frame::rgba(vec![10; 200 * 150 * 4], 200, 150, 0);
        let (mut uc, written) = use_case(Some(frame));
        uc.execute(Path::new("in.png"), Path::new("out.png")).unwrap();

        let written = written.lock().unwrap();
        assert_eq!(written[0].1.width(), 200);
        assert_eq!(written[0].1.height(), 150);
    }

    #[test]
    fn test_empty_reader_is_error() {
        let (mut uc, written) = use_case(None);
        assert!(uc.execute(Path::new("in.png"), Path::new("out.png")).is_err());
        assert!(written.lock().unwrap().is_empty());
    }

    #[test]
    fn test_end_to_end_with_real_files() {
        use crate::video::infrastructure::image_file_reader::ImageFileReader;
        use crate::video::infrastructure::image_file_writer::ImageFileWriter;

        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.png");
        let output = dir.path().join("out.png");
        let mut img = image::RgbImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgb([0, 255, 0]));
        img.put_pixel(1, 0, image::Rgb([255, 0, 255]));
        img.save(&input).unwrap();

        let mut uc = KeyImageUseCase::new(
            Box::new(ImageFileReader::new()),
            Box::new(ImageFileWriter::new()),
            Box::new(ChromaKeyEffect::new(HueBand::new(120.0, 35.0).unwrap(), 0)),
        );
        uc.execute(&input, &output).unwrap();

        let keyed = image::open(&output).unwrap().to_rgba8();
        assert_eq!(keyed.get_pixel(0, 0).0, [0, 255, 0, 0]);
        assert_eq!(keyed.get_pixel(1, 0).0, [255, 0, 255, 255]);
    }
}
