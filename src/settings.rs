//! Session settings
//!
//! Stored as JSON next to the binary (or wherever the driver points).

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Seed for the spawn RNG
    pub seed: u64,
    /// Level the session begins on (1-based)
    pub starting_level: u32,

    // === Debug ===
    /// Stroke every collision box after the board renders
    pub show_collision_boxes: bool,

    // === Driver ===
    /// Clamp on the raw frame delta, in seconds
    pub max_frame_dt: f32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            starting_level: 1,
            show_collision_boxes: false,
            max_frame_dt: 0.1,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load settings from `path`, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                return Self::default();
            }
        };
        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring settings in {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn save(&self, path: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{"seed": 9, "show_collision_boxes": true}"#).unwrap();
        assert_eq!(settings.seed, 9);
        assert!(settings.show_collision_boxes);
        assert_eq!(settings.starting_level, 1);
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            Settings::from_json("{seed: }"),
            Err(ConfigError::Malformed(_))
        ));
    }

    #[test]
    fn test_load_missing_file_uses_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/trick-or-treat.json"));
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("trick-or-treat-settings-{}.json", std::process::id()));
        let settings = Settings {
            seed: 77,
            starting_level: 3,
            ..Settings::default()
        };
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        let _ = std::fs::remove_file(&path);
    }
}
