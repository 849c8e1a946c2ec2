//! Configuration structs with defaults and RON persistence.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.ron";

/// Per-user config directory (`<config_dir>/viewshed`), if the platform has one.
pub fn default_config_dir() -> Result<PathBuf, ConfigError> {
    dirs::config_dir()
        .map(|dir| dir.join("viewshed"))
        .ok_or(ConfigError::NoConfigDir)
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Observer, aim and field of view.
    pub scene: SceneConfig,
    /// Mesh and wireframe subdivision.
    pub grid: GridConfig,
    /// Colors handed to the renderer.
    pub style: StyleConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// A position given as longitude/latitude in degrees and height in meters.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeodeticPoint {
    pub longitude_deg: f64,
    pub latitude_deg: f64,
    pub height_m: f64,
}

impl GeodeticPoint {
    pub fn new(longitude_deg: f64, latitude_deg: f64, height_m: f64) -> Self {
        Self {
            longitude_deg,
            latitude_deg,
            height_m,
        }
    }
}

/// Where the observer stands and what it looks at.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SceneConfig {
    pub observer: GeodeticPoint,
    pub aim: GeodeticPoint,
    /// Cap radius in meters. `None` uses the observer-to-aim distance.
    pub radius_m: Option<f64>,
    /// Horizontal field of view in degrees, below 180.
    pub h_angle_deg: f64,
    /// Vertical field of view in degrees, below 180.
    pub v_angle_deg: f64,
}

/// Grid subdivision counts. Fixed for the lifetime of a viewshed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    pub h_mesh: u32,
    pub v_mesh: u32,
    pub h_line: u32,
    pub v_line: u32,
}

/// RGBA colors and overlay opacity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StyleConfig {
    pub visible_color: [f32; 4],
    pub invisible_color: [f32; 4],
    pub line_color: [f32; 4],
    pub alpha: f32,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log filter (e.g., "debug", "info,viewshed_frustum=trace").
    pub log_level: String,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            observer: GeodeticPoint::new(116.391, 39.907, 120.0),
            aim: GeodeticPoint::new(116.395, 39.909, 40.0),
            radius_m: None,
            h_angle_deg: 120.0,
            v_angle_deg: 120.0,
        }
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            h_mesh: 23,
            v_mesh: 23,
            h_line: 10,
            v_line: 10,
        }
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            visible_color: [0.0, 1.0, 0.0, 1.0],
            invisible_color: [1.0, 0.0, 0.0, 1.0],
            line_color: [0.0, 1.0, 0.0, 1.0],
            alpha: 0.8,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load `config.ron` from `config_dir`, writing the defaults there first if it is missing.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let path = config_dir.join(CONFIG_FILE_NAME);

        if path.exists() {
            let config = Self::read(&path)?;
            log::info!("Loaded config from {}", path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", path.display());
            Ok(config)
        }
    }

    fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Save to `config_dir/config.ron`, creating the directory if needed.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: config_dir.join(CONFIG_FILE_NAME),
            source,
        };

        std::fs::create_dir_all(config_dir).map_err(write_err)?;

        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);
        let serialized = ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::Serialize)?;

        std::fs::write(config_dir.join(CONFIG_FILE_NAME), serialized).map_err(write_err)
    }

    /// Re-read the file; `Some` only if it differs from `self`.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let new_config = Self::read(&config_dir.join(CONFIG_FILE_NAME))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}
