//! Game configuration resource.
//!
//! Manages settings loaded from an INI configuration file. Provides defaults
//! for safe startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 1280
//! height = 720
//! vsync = true
//! target_fps = 120
//!
//! [camera]
//! min_pan_speed = 2.5
//! max_pan_speed = 8.0
//! smooth_factor = 0.1
//! padding = 1.1
//! time_scaled_smoothing = false
//!
//! [spawner]
//! spawn_duration = 0.1
//!
//! [grid]
//! width = 9
//! height = 9
//!
//! [input]
//! touch_device = false
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

use crate::components::spawner::SPAWN_DURATION;
use crate::resources::camerarig::{
    CameraTuning, DEFAULT_MAX_PAN_SPEED, DEFAULT_MIN_PAN_SPEED, DEFAULT_SMOOTH_FACTOR,
    DEFAULT_ZOOM_PADDING, Smoothing,
};

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 1280;
const DEFAULT_WINDOW_HEIGHT: u32 = 720;
const DEFAULT_TARGET_FPS: u32 = 120;
const DEFAULT_VSYNC: bool = true;
const DEFAULT_GRID_WIDTH: u32 = 9;
const DEFAULT_GRID_HEIGHT: u32 = 9;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";
/// Frame rate at which time-scaled smoothing matches per-frame smoothing.
const SMOOTHING_REFERENCE_FPS: f32 = 60.0;

/// Game configuration resource.
///
/// Changes to it are pushed into the camera rig and the spawners by
/// [`apply_gameconfig_changes`].
///
/// [`apply_gameconfig_changes`]: crate::systems::gameconfig::apply_gameconfig_changes
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Enable vertical sync.
    pub vsync: bool,
    pub min_pan_speed: f32,
    pub max_pan_speed: f32,
    pub smooth_factor: f32,
    pub zoom_padding: f32,
    /// Rescale camera smoothing by frame time instead of applying it per frame.
    pub time_scaled_smoothing: bool,
    /// Seconds a spawned item takes to reach its cell.
    pub spawn_duration: f32,
    /// Board size used when no layout file is given.
    pub grid_width: u32,
    pub grid_height: u32,
    /// Pointer deltas come from a touch screen.
    pub touch_device: bool,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl GameConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,
            target_fps: DEFAULT_TARGET_FPS,
            vsync: DEFAULT_VSYNC,
            min_pan_speed: DEFAULT_MIN_PAN_SPEED,
            max_pan_speed: DEFAULT_MAX_PAN_SPEED,
            smooth_factor: DEFAULT_SMOOTH_FACTOR,
            zoom_padding: DEFAULT_ZOOM_PADDING,
            time_scaled_smoothing: false,
            spawn_duration: SPAWN_DURATION,
            grid_width: DEFAULT_GRID_WIDTH,
            grid_height: DEFAULT_GRID_HEIGHT,
            touch_device: false,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    /// Same as [`GameConfig::load_from_file`] but from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [window] section
        if let Some(width) = config.getuint("window", "width").ok().flatten() {
            self.window_width = width as u32;
        }
        if let Some(height) = config.getuint("window", "height").ok().flatten() {
            self.window_height = height as u32;
        }
        if let Some(fps) = config.getuint("window", "target_fps").ok().flatten() {
            self.target_fps = fps as u32;
        }
        if let Some(vsync) = config.getbool("window", "vsync").ok().flatten() {
            self.vsync = vsync;
        }

        // [camera] section
        if let Some(v) = config.getfloat("camera", "min_pan_speed").ok().flatten() {
            self.min_pan_speed = v as f32;
        }
        if let Some(v) = config.getfloat("camera", "max_pan_speed").ok().flatten() {
            self.max_pan_speed = v as f32;
        }
        if let Some(v) = config.getfloat("camera", "smooth_factor").ok().flatten() {
            self.smooth_factor = v as f32;
        }
        if let Some(v) = config.getfloat("camera", "padding").ok().flatten() {
            self.zoom_padding = v as f32;
        }
        if let Some(v) = config
            .getbool("camera", "time_scaled_smoothing")
            .ok()
            .flatten()
        {
            self.time_scaled_smoothing = v;
        }

        // [spawner] section
        if let Some(v) = config.getfloat("spawner", "spawn_duration").ok().flatten() {
            self.spawn_duration = v as f32;
        }

        // [grid] section
        if let Some(width) = config.getuint("grid", "width").ok().flatten() {
            self.grid_width = width as u32;
        }
        if let Some(height) = config.getuint("grid", "height").ok().flatten() {
            self.grid_height = height as u32;
        }

        // [input] section
        if let Some(touch) = config.getbool("input", "touch_device").ok().flatten() {
            self.touch_device = touch;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, vsync={}, grid {}x{}, touch={}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.vsync,
            self.grid_width,
            self.grid_height,
            self.touch_device
        );
    }

    fn to_ini(&self) -> Ini {
        let mut config = Ini::new();

        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));
        config.set("window", "vsync", Some(self.vsync.to_string()));

        config.set("camera", "min_pan_speed", Some(self.min_pan_speed.to_string()));
        config.set("camera", "max_pan_speed", Some(self.max_pan_speed.to_string()));
        config.set("camera", "smooth_factor", Some(self.smooth_factor.to_string()));
        config.set("camera", "padding", Some(self.zoom_padding.to_string()));
        config.set(
            "camera",
            "time_scaled_smoothing",
            Some(self.time_scaled_smoothing.to_string()),
        );

        config.set(
            "spawner",
            "spawn_duration",
            Some(self.spawn_duration.to_string()),
        );

        config.set("grid", "width", Some(self.grid_width.to_string()));
        config.set("grid", "height", Some(self.grid_height.to_string()));

        config.set("input", "touch_device", Some(self.touch_device.to_string()));
        config
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        self.to_ini()
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }

    /// Camera tuning derived from the `[camera]` section.
    pub fn camera_tuning(&self) -> CameraTuning {
        CameraTuning {
            min_pan_speed: self.min_pan_speed,
            max_pan_speed: self.max_pan_speed,
            smooth_factor: self.smooth_factor,
            padding: self.zoom_padding,
            smoothing: if self.time_scaled_smoothing {
                Smoothing::TimeScaled {
                    reference_fps: SMOOTHING_REFERENCE_FPS,
                }
            } else {
                Smoothing::PerFrame
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = GameConfig::new();
        assert_eq!(config.window_size(), (1280, 720));
        assert_eq!(config.target_fps, 120);
        assert_eq!(config.camera_tuning(), CameraTuning::default());
        assert_eq!(config.spawn_duration, SPAWN_DURATION);
        assert!(!config.touch_device);
    }

    #[test]
    fn test_load_from_str_overrides_present_keys_only() {
        let mut config = GameConfig::new();
        config
            .load_from_str(
                "[window]\nwidth = 800\n\n[camera]\nmax_pan_speed = 12.5\n\
                 time_scaled_smoothing = true\n\n[grid]\nwidth = 4\n\n\
                 [input]\ntouch_device = true\n",
            )
            .unwrap();
        assert_eq!(config.window_width, 800);
        assert_eq!(config.window_height, 720);
        assert_eq!(config.max_pan_speed, 12.5);
        assert_eq!(config.min_pan_speed, DEFAULT_MIN_PAN_SPEED);
        assert_eq!(config.grid_width, 4);
        assert_eq!(config.grid_height, DEFAULT_GRID_HEIGHT);
        assert!(config.touch_device);
        assert_eq!(
            config.camera_tuning().smoothing,
            Smoothing::TimeScaled {
                reference_fps: SMOOTHING_REFERENCE_FPS
            }
        );
    }

    #[test]
    fn test_malformed_values_keep_defaults() {
        let mut config = GameConfig::new();
        config
            .load_from_str("[spawner]\nspawn_duration = soon\n")
            .unwrap();
        assert_eq!(config.spawn_duration, SPAWN_DURATION);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let mut config = GameConfig::with_path("./does/not/exist/config.ini");
        assert!(config.load_from_file().is_err());
    }

    #[test]
    fn test_saved_file_loads_back() {
        let path = std::env::temp_dir().join(format!("gridrig_config_{}.ini", std::process::id()));
        let mut config = GameConfig::with_path(&path);
        config.smooth_factor = 0.25;
        config.spawn_duration = 0.5;
        config.grid_height = 3;
        config.save_to_file().unwrap();

        let mut loaded = GameConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        let _ = std::fs::remove_file(&path);
        assert_eq!(loaded.smooth_factor, 0.25);
        assert_eq!(loaded.spawn_duration, 0.5);
        assert_eq!(loaded.grid_height, 3);
    }
}
