//! Demo configuration resource.
//!
//! Settings loaded from an INI configuration file. Provides defaults for safe
//! startup and methods to load/save configuration.
//!
//! # Configuration File Format
//!
//! ```ini
//! [window]
//! width = 800
//! height = 600
//! target_fps = 60
//!
//! [camera]
//! shake_strength = 8.0
//! shake_duration = 0.3
//!
//! [assets]
//! clips = ./assets/clips.json
//! explosion = ./assets/explosion_%d.png
//! explosion_frames = 8
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::info;
use std::path::PathBuf;

/// Default safe values for startup
const DEFAULT_WINDOW_WIDTH: u32 = 800;
const DEFAULT_WINDOW_HEIGHT: u32 = 600;
const DEFAULT_TARGET_FPS: u32 = 60;
const DEFAULT_SHAKE_STRENGTH: f32 = 8.0;
const DEFAULT_SHAKE_DURATION: f32 = 0.3;
const DEFAULT_CLIPS_PATH: &str = "./assets/clips.json";
const DEFAULT_EXPLOSION_TEMPLATE: &str = "./assets/explosion_%d.png";
const DEFAULT_EXPLOSION_FRAMES: u32 = 8;
const DEFAULT_CONFIG_PATH: &str = "./config.ini";

/// Demo configuration resource.
#[derive(Resource, Debug, Clone)]
pub struct GameConfig {
    /// Window width in pixels.
    pub window_width: u32,
    /// Window height in pixels.
    pub window_height: u32,
    /// Target frames per second.
    pub target_fps: u32,
    /// Amplitude in pixels of a camera shake.
    pub shake_strength: f32,
    /// Duration in seconds of a camera shake.
    pub shake_duration: f32,
    /// JSON file with animation clip definitions.
    pub clips_path: PathBuf,
    /// Numbered file template for the explosion atlas.
    pub explosion_template: String,
    /// Number of explosion frames to load.
    pub explosion_frames: u32,
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
            shake_strength: DEFAULT_SHAKE_STRENGTH,
            shake_duration: DEFAULT_SHAKE_DURATION,
            clips_path: PathBuf::from(DEFAULT_CLIPS_PATH),
            explosion_template: DEFAULT_EXPLOSION_TEMPLATE.to_string(),
            explosion_frames: DEFAULT_EXPLOSION_FRAMES,
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

        // [camera] section
        if let Some(strength) = config.getfloat("camera", "shake_strength").ok().flatten() {
            self.shake_strength = strength as f32;
        }
        if let Some(duration) = config.getfloat("camera", "shake_duration").ok().flatten() {
            self.shake_duration = duration as f32;
        }

        // [assets] section
        if let Some(clips) = config.get("assets", "clips") {
            self.clips_path = PathBuf::from(clips);
        }
        if let Some(template) = config.get("assets", "explosion") {
            self.explosion_template = template;
        }
        if let Some(frames) = config.getuint("assets", "explosion_frames").ok().flatten() {
            self.explosion_frames = frames as u32;
        }

        info!(
            "Loaded config: {}x{} window, fps={}, shake={}px/{}s, clips={:?}",
            self.window_width,
            self.window_height,
            self.target_fps,
            self.shake_strength,
            self.shake_duration,
            self.clips_path
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        // [window] section
        config.set("window", "width", Some(self.window_width.to_string()));
        config.set("window", "height", Some(self.window_height.to_string()));
        config.set("window", "target_fps", Some(self.target_fps.to_string()));

        // [camera] section
        config.set(
            "camera",
            "shake_strength",
            Some(self.shake_strength.to_string()),
        );
        config.set(
            "camera",
            "shake_duration",
            Some(self.shake_duration.to_string()),
        );

        // [assets] section
        config.set(
            "assets",
            "clips",
            Some(self.clips_path.display().to_string()),
        );
        config.set(
            "assets",
            "explosion",
            Some(self.explosion_template.clone()),
        );
        config.set(
            "assets",
            "explosion_frames",
            Some(self.explosion_frames.to_string()),
        );

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// Get the window size.
    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}
