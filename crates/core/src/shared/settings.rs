use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keying::domain::hue_band::HueBand;
use crate::keying::domain::keying_error::KeyingError;
use crate::shared::constants::{
    DEFAULT_FRAME_INTERVAL_MS, DEFAULT_HUE_VARIANCE, DEFAULT_KEY_HUE, SETTINGS_DIR_NAME,
    SETTINGS_FILE_NAME,
};

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("failed to read settings from {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write settings to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings: {0}")]
    Invalid(#[from] KeyingError),
    #[error("frame interval must be at least 1 ms")]
    ZeroInterval,
}

/// Keying parameters, persisted as JSON.
///
/// Missing fields fall back to their defaults so older files keep loading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyerSettings {
    /// Center of the keyed hue band, degrees in `[0, 360)`.
    pub hue: f64,
    /// Half-width of the keyed hue band, degrees.
    pub variance: f64,
    /// Alpha box blur radius in pixels; 0 disables it.
    pub blur_radius: usize,
    /// Realtime driver tick interval.
    pub interval_ms: u64,
}

impl Default for KeyerSettings {
    fn default() -> Self {
        Self {
            hue: DEFAULT_KEY_HUE,
            variance: DEFAULT_HUE_VARIANCE,
            blur_radius: 0,
            interval_ms: DEFAULT_FRAME_INTERVAL_MS,
        }
    }
}

impl KeyerSettings {
    /// `<config dir>/ChromaKey/settings.json`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(SETTINGS_DIR_NAME).join(SETTINGS_FILE_NAME))
    }

    /// Loads the user's settings file, falling back to defaults when it is
    /// missing or unreadable.
    pub fn load() -> Self {
        let Some(path) = Self::default_path() else {
            return Self::default();
        };
        if !path.exists() {
            return Self::default();
        }
        match Self::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Ignoring settings file: {e}");
                Self::default()
            }
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path).map_err(|e| SettingsError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;
        let settings: Self = serde_json::from_str(&json).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        let write_err = |e: std::io::Error| SettingsError::Write {
            path: path.to_path_buf(),
            source: e,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_err)?;
        }
        let json = serde_json::to_string_pretty(self).map_err(|e| SettingsError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;
        fs::write(path, json).map_err(write_err)
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        self.hue_band()?;
        if self.interval_ms == 0 {
            return Err(SettingsError::ZeroInterval);
        }
        Ok(())
    }

    pub fn hue_band(&self) -> Result<HueBand, KeyingError> {
        HueBand::new(self.hue, self.variance)
    }

    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}
