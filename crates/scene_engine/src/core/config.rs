//! Unified application configuration
//!
//! One TOML file configures the window, the simulation rate, and scene
//! generation. Every field has a default so a missing file or a partial
//! file still yields a runnable configuration.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced while loading configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The file could not be read
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// The file is not valid TOML for this schema
    #[error("Config parse error: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Window width in pixels
    pub window_width: u32,
    /// Window height in pixels
    pub window_height: u32,
    /// Fixed simulation rate in Hz
    pub frame_rate: f32,
    /// Seed for the scene's random generator
    pub seed: u32,
    /// Number of objects generated at scene load
    pub spawn_count: usize,
    /// Directory mesh assets are loaded from
    pub asset_root: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
            frame_rate: 60.0,
            seed: 0,
            spawn_count: 5,
            asset_root: "resources/models".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&text)?)
    }

    /// Load configuration, falling back to defaults when the file is
    /// missing. Parse errors still fail: a present-but-broken file should
    /// not be silently ignored.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        match Self::load(&path) {
            Ok(config) => Ok(config),
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::warn!(
                    "config {:?} not found, using defaults",
                    path.as_ref()
                );
                Ok(Self::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Aspect ratio of the configured window
    pub fn aspect(&self) -> f32 {
        self.window_width as f32 / self.window_height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = AppConfig::default();
        assert!(config.frame_rate > 0.0);
        assert!(config.window_width > 0 && config.window_height > 0);
        assert!(config.aspect() > 1.0);
    }

    #[test]
    fn partial_files_fill_in_defaults() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("app.toml");
        let mut file = std::fs::File::create(&path).expect("create config");
        writeln!(file, "seed = 42\nspawn_count = 9").expect("write config");

        let config = AppConfig::load(&path).expect("valid config");
        assert_eq!(config.seed, 42);
        assert_eq!(config.spawn_count, 9);
        assert_eq!(config.window_width, AppConfig::default().window_width);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::load_or_default("no/such/config.toml").expect("defaults");
        assert_eq!(config.seed, AppConfig::default().seed);
    }

    #[test]
    fn broken_files_still_fail() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("app.toml");
        std::fs::write(&path, "seed = \"not a number\"").expect("write config");
        assert!(matches!(
            AppConfig::load_or_default(&path),
            Err(ConfigError::Parse(_))
        ));
    }
}
