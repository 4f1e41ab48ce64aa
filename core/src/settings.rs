//! Startup settings (config.toml)
//!
//! Read once at startup from the platform-specific config directory, or
//! from the path in `TESSELLAB_CONFIG`. Every field has a default, so a
//! partial file is fine and a missing one means defaults. Runtime changes
//! made in the settings panel are never written back.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use glam::Vec3;
use hashbrown::HashSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::camera::{FlyCamera, PITCH_LIMIT};
use crate::config::Configuration;
use crate::geometry::Primitive;
use crate::input::KeyBindings;
use crate::input::keycode_serde::keycode_to_string;

/// Environment variable overriding the settings file location
pub const CONFIG_ENV_VAR: &str = "TESSELLAB_CONFIG";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Field of view accepted from the settings file, in degrees
pub const FOV_RANGE: RangeInclusive<f32> = 1.0..=179.0;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// All startup settings, one section per concern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub window: WindowSettings,
    #[serde(default)]
    pub camera: CameraSettings,
    #[serde(default)]
    pub input: KeyBindings,
    #[serde(default)]
    pub scene: SceneSettings,
}

/// Window configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WindowSettings {
    /// Initial width in logical pixels (default: 1200)
    #[serde(default = "default_width")]
    pub width: u32,
    /// Initial height in logical pixels (default: 800)
    #[serde(default = "default_height")]
    pub height: u32,
    /// Whether to enable vertical sync (default: true)
    #[serde(default = "default_true")]
    pub vsync: bool,
}

/// Initial camera placement and feel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSettings {
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    /// Degrees; -90 looks down -Z
    #[serde(default = "default_yaw")]
    pub yaw: f32,
    #[serde(default)]
    pub pitch: f32,
    /// Units per second (default: 2.5)
    #[serde(default = "default_speed")]
    pub speed: f32,
    /// Degrees per pixel (default: 0.1)
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
    /// Vertical field of view in degrees (default: 45)
    #[serde(default = "default_fov")]
    pub fov: f32,
}

/// What is drawn and how it starts out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSettings {
    #[serde(default)]
    pub primitive: Primitive,
    /// Background color, linear RGBA
    #[serde(default = "default_clear_color")]
    pub clear_color: [f64; 4],
    /// Configuration in effect before the panel is touched
    #[serde(default)]
    pub initial: Configuration,
}

fn default_width() -> u32 {
    1200
}
fn default_height() -> u32 {
    800
}
fn default_true() -> bool {
    true
}
fn default_camera_position() -> [f32; 3] {
    FlyCamera::default().position.to_array()
}
fn default_yaw() -> f32 {
    FlyCamera::default().yaw
}
fn default_speed() -> f32 {
    FlyCamera::default().speed
}
fn default_sensitivity() -> f32 {
    FlyCamera::default().sensitivity
}
fn default_fov() -> f32 {
    FlyCamera::default().fov
}
fn default_clear_color() -> [f64; 4] {
    [0.3, 0.3, 0.3, 1.0]
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            vsync: default_true(),
        }
    }
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: default_camera_position(),
            yaw: default_yaw(),
            pitch: 0.0,
            speed: default_speed(),
            sensitivity: default_sensitivity(),
            fov: default_fov(),
        }
    }
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            primitive: Primitive::default(),
            clear_color: default_clear_color(),
            initial: Configuration::default(),
        }
    }
}

impl CameraSettings {
    /// Build the camera these settings describe.
    ///
    /// Pitch and field of view are clamped; negative speed and sensitivity
    /// become zero. NaN falls back to the default value.
    pub fn to_camera(&self) -> FlyCamera {
        let defaults = FlyCamera::default();
        let or_default = |value: f32, default: f32| if value.is_nan() { default } else { value };
        FlyCamera {
            position: Vec3::from_array(self.position),
            yaw: or_default(self.yaw, defaults.yaw),
            pitch: or_default(self.pitch, defaults.pitch).clamp(-PITCH_LIMIT, PITCH_LIMIT),
            speed: or_default(self.speed, defaults.speed).max(0.0),
            sensitivity: or_default(self.sensitivity, defaults.sensitivity).max(0.0),
            fov: or_default(self.fov, defaults.fov).clamp(*FOV_RANGE.start(), *FOV_RANGE.end()),
            ..defaults
        }
    }
}

/// Returns the platform-specific configuration directory.
///
/// Returns `None` if the home directory cannot be determined.
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.tessellab", "", "Tessellab")
        .map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path the settings are read from: `TESSELLAB_CONFIG` if set, otherwise
/// `config.toml` in the config directory.
pub fn settings_path() -> Option<PathBuf> {
    match std::env::var_os(CONFIG_ENV_VAR) {
        Some(path) if !path.is_empty() => Some(PathBuf::from(path)),
        _ => config_dir().map(|dir| dir.join(CONFIG_FILE_NAME)),
    }
}

/// Read and parse a settings file.
///
/// # Errors
///
/// Returns an error if the file cannot be read or is not valid settings TOML.
pub fn load_from(path: &Path) -> Result<Settings, SettingsError> {
    let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let mut settings: Settings =
        toml::from_str(&content).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    settings.scene.initial = settings.scene.initial.clamped();
    Ok(settings)
}

/// Loads the settings from disk.
///
/// Returns default values if the file doesn't exist. A file that exists but
/// cannot be read or parsed is logged and replaced with defaults.
pub fn load() -> Settings {
    let Some(path) = settings_path() else {
        tracing::debug!("No config directory, using default settings");
        return Settings::default();
    };
    if !path.exists() {
        tracing::debug!("No settings file at {}, using defaults", path.display());
        return Settings::default();
    }

    match load_from(&path) {
        Ok(settings) => {
            tracing::info!("Loaded settings from {}", path.display());
            for warning in validate_bindings(&settings.input) {
                tracing::warn!("{}", warning);
            }
            settings
        }
        Err(e) => {
            tracing::warn!("{}; using default settings", e);
            Settings::default()
        }
    }
}

/// Check that no key is bound to more than one action.
///
/// Returns a warning message for each conflict found.
pub fn validate_bindings(bindings: &KeyBindings) -> Vec<String> {
    let mut warnings = Vec::new();
    let mut used_keys = HashSet::new();

    let actions = [
        ("input.quit", std::slice::from_ref(&bindings.quit)),
        ("input.pause", std::slice::from_ref(&bindings.pause)),
        ("input.forward", bindings.forward.as_slice()),
        ("input.backward", bindings.backward.as_slice()),
        ("input.left", bindings.left.as_slice()),
        ("input.right", bindings.right.as_slice()),
    ];
    for (name, keys) in actions {
        for key in keys {
            if !used_keys.insert(*key) {
                warnings.push(format!(
                    "{} key '{}' conflicts with another binding",
                    name,
                    keycode_to_string(key)
                ));
            }
        }
    }

    warnings
}
