//! Runtime configuration.
//!
//! Every field falls back to the built-in scene defaults, so a config file only needs to
//! mention what it changes.

use std::path::{Path, PathBuf};

use serde::Deserialize;

const LOCAL_CONFIG: &str = "still-life.json";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Still Life".to_string(),
            width: 1000,
            height: 800,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub position: [f32; 3],
    pub front: [f32; 3],
    pub up: [f32; 3],
    /// Perspective field of view in degrees.
    pub zoom: f32,
    pub movement_speed: f32,
    /// Degrees of yaw/pitch per pixel of mouse travel, also the scroll-to-zoom factor.
    pub mouse_sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 5.0, 20.0],
            front: [0.0, -0.5, -2.0],
            up: [0.0, 1.0, 0.0],
            zoom: 80.0,
            movement_speed: 10.0,
            mouse_sensitivity: 0.1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub window: WindowConfig,
    pub camera: CameraConfig,
    /// Directory the scene textures are read from.
    pub texture_dir: PathBuf,
    /// One of `off`, `error`, `warn`, `info`, `debug`, `trace`.
    pub log_level: String,
    /// Also write the log to a file in the platform data directory.
    pub log_to_file: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            camera: CameraConfig::default(),
            texture_dir: PathBuf::from("textures"),
            log_level: "info".to_string(),
            log_to_file: true,
        }
    }
}

impl Config {
    /// Parses a JSON config document.
    pub fn from_json(s: &str) -> Result<Self, String> {
        let config: Config = serde_json::from_str(s).map_err(|e| e.to_string())?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON config file.
    pub fn from_file(path: &Path) -> Result<Self, String> {
        let s = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        Self::from_json(&s).map_err(|e| format!("{}: {e}", path.display()))
    }

    /// Loads the configuration from `explicit` if given, else from the first existing
    /// candidate location, else the defaults. Also returns the path that was used.
    pub fn load(explicit: Option<&Path>) -> Result<(Self, Option<PathBuf>), String> {
        if let Some(path) = explicit {
            return Ok((Self::from_file(path)?, Some(path.to_path_buf())));
        }
        for path in Self::candidate_paths() {
            if path.is_file() {
                let config = Self::from_file(&path)?;
                return Ok((config, Some(path)));
            }
        }
        Ok((Self::default(), None))
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("still-life").join("config.json"));
        }
        paths
    }

    fn validate(&self) -> Result<(), String> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err("window size must be non-zero".to_string());
        }
        if !(1.0..=90.0).contains(&self.camera.zoom) {
            return Err(format!(
                "camera zoom {} is outside [1, 90]",
                self.camera.zoom
            ));
        }
        let camera = &self.camera;
        for (name, value) in [
            ("movement_speed", camera.movement_speed),
            ("mouse_sensitivity", camera.mouse_sensitivity),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("camera {name} must be a positive number, got {value}"));
            }
        }
        self.log_level
            .parse::<log::LevelFilter>()
            .map_err(|_| format!("unknown log level '{}'", self.log_level))?;
        Ok(())
    }
}
