//! Configuration file handling for copter-tracker.
//!
//! Loads configuration from `<config_dir>/copter-tracker/config.toml` or a
//! custom path. Command-line flags override file values, which override the
//! built-in defaults.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::camera::{CameraSettings, Resolution};
use crate::cli::{Args, CharacterSet, LogLevel, ViewMode};
use crate::terminal::GuideLines;
use crate::vision::{HsvRange, MorphSettings, Tracker, TrackingLimits};

/// Configuration file structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub camera: CameraConfig,
    /// Initial trackbar values
    pub filter: HsvRange,
    pub tracking: TrackingConfig,
    pub morphology: MorphologyConfig,
    pub guides: GuideLines,
    pub display: DisplayConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub device: u32,
    pub width: u32,
    pub height: u32,
    pub fps: u32,
    pub mirror: bool,
}

impl Default for CameraConfig {
    fn default() -> Self {
        let settings = CameraSettings::default();
        Self {
            device: settings.device_index,
            width: settings.resolution.width,
            height: settings.resolution.height,
            fps: settings.fps,
            mirror: settings.mirror,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackingConfig {
    pub max_objects: usize,
    pub min_area: u32,
    /// Defaults to two thirds of the frame area
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_area: Option<u32>,
}

impl Default for TrackingConfig {
    fn default() -> Self {
        Self {
            max_objects: TrackingLimits::DEFAULT_MAX_OBJECTS,
            min_area: TrackingLimits::DEFAULT_MIN_AREA,
            max_area: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MorphologyConfig {
    pub enabled: bool,
    #[serde(flatten)]
    pub settings: MorphSettings,
}

impl Default for MorphologyConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            settings: MorphSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub view: ViewMode,
    pub charset: CharacterSet,
    pub invert: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    pub level: LogLevel,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load configuration.
    ///
    /// With `None` the default path is used and a missing file yields the
    /// defaults. An explicit path must exist. A file that exists but cannot
    /// be read or parsed is always an error.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, explicit) = match path {
            Some(p) => (p.to_path_buf(), true),
            None => (default_path(), false),
        };

        if !path.exists() {
            if explicit {
                return Err(ConfigError::NotFound { path });
            }
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        let content = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        let config = Self::parse(&content).map_err(|source| ConfigError::Parse {
            path: path.clone(),
            source,
        })?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Override file values with whatever was given on the command line.
    pub fn apply_args(&mut self, args: &Args) {
        let cam = &mut self.camera;
        if let Some(device) = args.camera {
            cam.device = device;
        }
        if let Some(width) = args.width {
            cam.width = width;
        }
        if let Some(height) = args.height {
            cam.height = height;
        }
        if let Some(fps) = args.fps {
            cam.fps = fps;
        }
        cam.mirror |= args.mirror;

        let range = &mut self.filter;
        for (arg, slot) in [
            (args.h_min, &mut range.h_min),
            (args.h_max, &mut range.h_max),
            (args.s_min, &mut range.s_min),
            (args.s_max, &mut range.s_max),
            (args.v_min, &mut range.v_min),
            (args.v_max, &mut range.v_max),
        ] {
            if let Some(value) = arg {
                *slot = value;
            }
        }

        if args.no_morph {
            self.morphology.enabled = false;
        }
        if args.no_guides {
            self.guides.enabled = false;
        }
        if let Some(view) = args.view {
            self.display.view = view;
        }
        if let Some(charset) = args.charset {
            self.display.charset = charset;
        }
        self.display.invert |= args.invert;
        if let Some(level) = args.log_level {
            self.log.level = level;
        }
        if args.log_file.is_some() {
            self.log.file = args.log_file.clone();
        }
    }

    pub fn resolution(&self) -> Resolution {
        Resolution {
            width: self.camera.width,
            height: self.camera.height,
        }
    }

    pub fn camera_settings(&self) -> CameraSettings {
        CameraSettings {
            device_index: self.camera.device,
            resolution: self.resolution(),
            fps: self.camera.fps,
            mirror: self.camera.mirror,
        }
    }

    /// Tracker for frames of size `frame`; the area cap scales with it
    /// unless `max_area` is set.
    pub fn tracker(&self, frame: Resolution) -> Tracker {
        let limits = TrackingLimits {
            max_objects: self.tracking.max_objects,
            min_area: self.tracking.min_area,
            max_area: self
                .tracking
                .max_area
                .unwrap_or_else(|| TrackingLimits::for_resolution(frame).max_area),
        };
        let mut tracker = Tracker::new(self.filter, self.morphology.settings, limits);
        tracker.morph_enabled = self.morphology.enabled;
        tracker
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config file '{}' not found", .path.display())]
    NotFound { path: PathBuf },

    #[error("Failed to read config file '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] toml::ser::Error),

    #[error("Config file already exists: {}", .path.display())]
    AlreadyExists { path: PathBuf },
}

/// Get the default config file path.
pub fn default_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("copter-tracker")
        .join("config.toml")
}

/// Write the commented default config to `path`, creating parent
/// directories. Refuses to overwrite an existing file.
pub fn write_default(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    let io_err = |source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    std::fs::write(path, DEFAULT_CONFIG).map_err(io_err)
}

/// Template written by `config init`.
pub const DEFAULT_CONFIG: &str = r#"# copter-tracker configuration

[camera]
# Device index (see `copter-tracker list-cameras`)
device = 0
width = 640
height = 480
fps = 30
mirror = false

[filter]
# Initial trackbar values. Hue is 0-179, saturation and value 0-255.
# Pixels pass when every channel lies within [min, max].
h_min = 0
h_max = 255
s_min = 0
s_max = 255
v_min = 0
v_max = 255

[tracking]
# At or above this many blobs the filter is too noisy to track
max_objects = 50
# Objects must be strictly larger than min_area and smaller than max_area
min_area = 400
# max_area defaults to two thirds of the frame
# max_area = 204800

[morphology]
enabled = true
erode_size = 12
erode_passes = 2
dilate_size = 8
dilate_passes = 2

[guides]
enabled = true
delta_x = 120
delta_y = 100

[display]
# original | hsv | threshold | morphed
view = "original"
# standard | blocks | minimal
charset = "blocks"
invert = false

[log]
# off | error | warn | info | debug | trace
level = "info"
# file = "/tmp/copter-tracker.log"
"#;
