/// Default key color: green, the hue used by the classic green screen.
pub const DEFAULT_KEY_HUE: f64 = 120.0;

/// Default half-width of the keyed hue band, in degrees.
pub const DEFAULT_HUE_VARIANCE: f64 = 35.0;

/// Capture → key → present cadence of the realtime driver (~33 fps).
pub const DEFAULT_FRAME_INTERVAL_MS: u64 = 30;

pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "tif", "webp"];

/// Output formats that keep the alpha channel intact.
pub const ALPHA_IMAGE_EXTENSIONS: &[&str] = &["png"];

pub const SETTINGS_DIR_NAME: &str = "ChromaKey";
pub const SETTINGS_FILE_NAME: &str = "settings.json";
