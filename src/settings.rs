use serde::{Deserialize, Serialize};

#[cfg(target_arch = "wasm32")]
use gloo_storage::{errors::StorageError, LocalStorage, Storage};
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};
#[cfg(not(target_arch = "wasm32"))]
use thiserror::Error;

pub const DEFAULT_VOLUME: f64 = 0.8;

#[cfg(target_arch = "wasm32")]
const SETTINGS_KEY: &str = "podplayer.app_settings";

/// Error type for settings storage on native platforms
#[cfg(not(target_arch = "wasm32"))]
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("no configuration directory on this platform")]
    NoConfigDir,
    #[error("settings file error: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings are not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// User preferences kept between sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_volume")]
    pub volume: f64,
}

fn default_volume() -> f64 {
    DEFAULT_VOLUME
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            volume: DEFAULT_VOLUME,
        }
    }
}

/// Clamp a stored volume into `0.0..=1.0`, scaling down percent-style values.
pub fn normalize_volume(mut value: f64) -> f64 {
    if !value.is_finite() {
        return DEFAULT_VOLUME;
    }
    let mut passes = 0;
    while value > 1.0 && passes < 4 {
        value /= 100.0;
        passes += 1;
    }
    value.clamp(0.0, 1.0)
}

#[cfg(not(target_arch = "wasm32"))]
fn settings_path() -> Result<PathBuf, SettingsError> {
    let dir = dirs::config_dir().ok_or(SettingsError::NoConfigDir)?;
    Ok(dir.join("podplayer").join("settings.json"))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_settings() -> Result<AppSettings, SettingsError> {
    load_settings_from(&settings_path()?)
}

#[cfg(not(target_arch = "wasm32"))]
pub fn save_settings(settings: &AppSettings) -> Result<(), SettingsError> {
    save_settings_to(&settings_path()?, settings)
}

/// A missing file yields the defaults.
#[cfg(not(target_arch = "wasm32"))]
fn load_settings_from(path: &Path) -> Result<AppSettings, SettingsError> {
    let json = match std::fs::read_to_string(path) {
        Ok(json) => json,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            return Ok(AppSettings::default())
        }
        Err(err) => return Err(err.into()),
    };
    let mut settings: AppSettings = serde_json::from_str(&json)?;
    settings.volume = normalize_volume(settings.volume);
    Ok(settings)
}

#[cfg(not(target_arch = "wasm32"))]
fn save_settings_to(path: &Path, settings: &AppSettings) -> Result<(), SettingsError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(target_arch = "wasm32")]
pub fn load_settings() -> Result<AppSettings, StorageError> {
    match LocalStorage::get::<AppSettings>(SETTINGS_KEY) {
        Ok(mut settings) => {
            settings.volume = normalize_volume(settings.volume);
            Ok(settings)
        }
        Err(StorageError::KeyNotFound(_)) => Ok(AppSettings::default()),
        Err(err) => Err(err),
    }
}

#[cfg(target_arch = "wasm32")]
pub fn save_settings(settings: &AppSettings) -> Result<(), StorageError> {
    LocalStorage::set(SETTINGS_KEY, settings)
}
