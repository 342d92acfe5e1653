use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

use clap::Parser;

use chromakey_core::keying::domain::frame_effect::FrameEffect;
use chromakey_core::keying::infrastructure::effect_factory::create_effect;
use chromakey_core::pipeline::key_image_use_case::KeyImageUseCase;
use chromakey_core::pipeline::key_video_use_case::KeyVideoUseCase;
use chromakey_core::pipeline::pipeline_logger::StdoutPipelineLogger;
use chromakey_core::playback::domain::playback_event::PlaybackEvent;
use chromakey_core::playback::infrastructure::image_sequence_sink::ImageSequenceSink;
use chromakey_core::playback::infrastructure::reader_frame_source::ReaderFrameSource;
use chromakey_core::playback::keying_driver::{event_channel, KeyingDriver};
use chromakey_core::shared::constants::{ALPHA_IMAGE_EXTENSIONS, IMAGE_EXTENSIONS};
use chromakey_core::shared::settings::KeyerSettings;
use chromakey_core::video::domain::video_reader::VideoReader;
use chromakey_core::video::infrastructure::ffmpeg_reader::FfmpegReader;
use chromakey_core::video::infrastructure::image_file_reader::ImageFileReader;
use chromakey_core::video::infrastructure::image_file_writer::ImageFileWriter;

/// Hue-band chroma keying for videos and images.
///
/// Images are written as a single PNG; videos as a directory of PNG frames.
#[derive(Parser)]
#[command(name = "chromakey")]
struct Cli {
    /// Input video or image file.
    input: PathBuf,

    /// Output PNG (image input) or output directory (video input).
    output: PathBuf,

    /// Key color hue in degrees [0, 360). Overrides the settings file.
    #[arg(long)]
    hue: Option<f64>,

    /// Half-width of the keyed hue band in degrees. Overrides the settings file.
    #[arg(long)]
    variance: Option<f64>,

    /// Alpha box blur radius in pixels (0 = off). Slow for large radii.
    #[arg(long)]
    blur_radius: Option<usize>,

    /// Settings JSON file (defaults to the user config directory).
    #[arg(long)]
    config: Option<PathBuf>,

    /// Pace video frames on a fixed timer instead of keying as fast as possible.
    #[arg(long)]
    realtime: bool,

    /// Timer interval in milliseconds for --realtime. Overrides the settings file.
    #[arg(long)]
    interval_ms: Option<u64>,
}

fn main() {
    env_logger::init();

    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    validate(&cli)?;

    let settings = resolve_settings(&cli)?;
    let effect = create_effect(settings.hue_band()?, settings.blur_radius);

    if is_image(&cli.input) {
        run_image_key(&cli.input, &cli.output, effect)
    } else if cli.realtime {
        run_realtime_key(&cli.input, &cli.output, effect.as_ref(), settings.interval())
    } else {
        run_video_key(&cli.input, &cli.output, effect)
    }
}

fn resolve_settings(cli: &Cli) -> Result<KeyerSettings, Box<dyn std::error::Error>> {
    let mut settings = match &cli.config {
        Some(path) => KeyerSettings::load_from(path)?,
        None => KeyerSettings::load(),
    };
    if let Some(hue) = cli.hue {
        settings.hue = hue;
    }
    if let Some(variance) = cli.variance {
        settings.variance = variance;
    }
    if let Some(radius) = cli.blur_radius {
        settings.blur_radius = radius;
    }
    if let Some(interval_ms) = cli.interval_ms {
        settings.interval_ms = interval_ms;
    }
    settings.validate()?;
    log::debug!("Effective settings: {settings:?}");
    Ok(settings)
}

fn run_image_key(
    input: &Path,
    output: &Path,
    effect: Box<dyn FrameEffect>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut use_case = KeyImageUseCase::new(
        Box::new(ImageFileReader::new()),
        Box::new(ImageFileWriter::new()),
        effect,
    );
    use_case.execute(input, output)?;
    log::info!("Output written to {}", output.display());
    Ok(())
}

fn run_video_key(
    input: &Path,
    output_dir: &Path,
    effect: Box<dyn FrameEffect>,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader: Box<dyn VideoReader> = Box::new(FfmpegReader::new());
    let metadata = reader.open(input)?;
    let sink = ImageSequenceSink::new(Box::new(ImageFileWriter::new()), output_dir);

    let total = metadata.total_frames;
    let progress: Box<dyn Fn(usize, usize) -> bool + Send> = Box::new(move |current, _| {
        eprint!("\rKeying frame {current}/{total}");
        true
    });

    let mut use_case = KeyVideoUseCase::new(
        reader,
        Box::new(sink),
        effect,
        Some(Box::new(StdoutPipelineLogger::default())),
        Some(progress),
        None,
    );
    let frames = use_case.execute(&metadata)?;
    eprintln!();
    log::info!("{frames} frames written to {}", output_dir.display());
    Ok(())
}

fn run_realtime_key(
    input: &Path,
    output_dir: &Path,
    effect: &dyn FrameEffect,
    interval: Duration,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut reader = FfmpegReader::new();
    reader.open(input)?;
    let mut source = ReaderFrameSource::new(&mut reader);
    let mut sink = ImageSequenceSink::new(Box::new(ImageFileWriter::new()), output_dir);

    let (events_tx, events_rx) = event_channel();
    events_tx.send(PlaybackEvent::Play)?;
    drop(events_tx);

    let mut driver = KeyingDriver::new(effect, interval);
    let frames = driver.run(&mut source, &mut sink, &events_rx)?;
    log::info!("{frames} frames written to {}", output_dir.display());
    Ok(())
}

fn validate(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    if !cli.input.exists() {
        return Err(format!("Input file not found: {}", cli.input.display()).into());
    }
    if is_image(&cli.input) {
        if !has_extension(&cli.output, ALPHA_IMAGE_EXTENSIONS) {
            return Err(format!(
                "Image output must be a .png file to keep transparency, got {}",
                cli.output.display()
            )
            .into());
        }
        if cli.realtime {
            return Err("--realtime only applies to video input".into());
        }
    } else if cli.output.is_file() {
        return Err(format!(
            "Video output must be a directory, got existing file {}",
            cli.output.display()
        )
        .into());
    }
    if let Some(hue) = cli.hue {
        if !(0.0..360.0).contains(&hue) {
            return Err(format!("Hue must be in [0, 360), got {hue}").into());
        }
    }
    if let Some(variance) = cli.variance {
        if !(variance >= 0.0 && variance.is_finite()) {
            return Err(format!("Variance must be a non-negative number, got {variance}").into());
        }
    }
    if cli.interval_ms == Some(0) {
        return Err("Interval must be at least 1 ms".into());
    }
    Ok(())
}

fn is_image(path: &Path) -> bool {
    has_extension(path, IMAGE_EXTENSIONS)
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| extensions.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_image_case_insensitive() {
        assert!(is_image(Path::new("clip.PNG")));
        assert!(is_image(Path::new("shot.jpeg")));
        assert!(!is_image(Path::new("green.mp4")));
        assert!(!is_image(Path::new("no_extension")));
    }

    #[test]
    fn test_png_is_only_alpha_output() {
        assert!(has_extension(Path::new("out.png"), ALPHA_IMAGE_EXTENSIONS));
        assert!(!has_extension(Path::new("out.jpg"), ALPHA_IMAGE_EXTENSIONS));
    }

    #[test]
    fn test_explicit_missing_config_is_error() {
        let cli = Cli::parse_from([
            "chromakey",
            "in.mp4",
            "out",
            "--hue",
            "240",
            "--blur-radius",
            "2",
            "--config",
            "/nonexistent/settings.json",
        ]);
        assert_eq!(cli.hue, Some(240.0));
        assert_eq!(cli.blur_radius, Some(2));
        // an explicit config path must exist; only the default path falls back
        assert!(resolve_settings(&cli).is_err());
    }

    #[test]
    fn test_optional_flags_default_to_none() {
        let cli = Cli::parse_from(["chromakey", "in.mp4", "out", "--variance", "12"]);
        assert_eq!(cli.variance, Some(12.0));
        assert_eq!(cli.hue, None);
        assert_eq!(cli.interval_ms, None);
        assert!(!cli.realtime);
    }
}
