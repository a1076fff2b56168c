//! Session settings
//!
//! Loaded once when a session starts. Every field is optional in the JSON
//! form; missing fields take the reference defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::consts::*;

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Period between simulation steps (ms)
    pub tick_interval_ms: u64,
    /// Period between enemy spawns (ms)
    pub spawn_interval_ms: u64,
    /// Accelerometer reading -> pixels of paddle displacement
    pub tilt_scale: f32,
    /// Lives at the start of every run
    pub starting_lives: u8,
    /// Put the paddle back in the middle on restart
    pub recenter_on_restart: bool,
    /// Fixed RNG seed for reproducible runs; `None` seeds from the OS
    pub seed: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            spawn_interval_ms: SPAWN_INTERVAL_MS,
            tilt_scale: TILT_SCALE,
            starting_lives: STARTING_LIVES,
            recenter_on_restart: true,
            seed: None,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not read settings {}: {}, using defaults", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings.sanitized()
            }
            Err(e) => {
                log::warn!("Invalid settings {}: {}, using defaults", path.display(), e);
                Self::default()
            }
        }
    }

    /// Clamp values that would stall or break a session
    pub fn sanitized(mut self) -> Self {
        if self.starting_lives == 0 {
            log::warn!("starting_lives must be at least 1, using {}", STARTING_LIVES);
            self.starting_lives = STARTING_LIVES;
        }
        if !self.tilt_scale.is_finite() {
            self.tilt_scale = TILT_SCALE;
        }
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms.max(1))
    }

    pub fn spawn_interval(&self) -> Duration {
        Duration::from_millis(self.spawn_interval_ms.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "spawn_interval_ms": 500, "seed": 7 }"#).unwrap();
        assert_eq!(settings.spawn_interval_ms, 500);
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.tick_interval_ms, TICK_INTERVAL_MS);
        assert_eq!(settings.tilt_scale, TILT_SCALE);
        assert_eq!(settings.starting_lives, STARTING_LIVES);
        assert!(settings.recenter_on_restart);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(Settings::from_json("{ not json").is_err());
        assert!(Settings::from_json(r#"{ "starting_lives": -1 }"#).is_err());
    }

    #[test]
    fn test_json_round_trip() {
        let settings = Settings {
            seed: Some(1234),
            recenter_on_restart: false,
            ..Default::default()
        };
        let json = settings.to_json().unwrap();
        assert_eq!(Settings::from_json(&json).unwrap(), settings);
    }

    #[test]
    fn test_zero_intervals_clamped() {
        let settings = Settings {
            tick_interval_ms: 0,
            spawn_interval_ms: 0,
            ..Default::default()
        };
        assert_eq!(settings.tick_interval(), Duration::from_millis(1));
        assert_eq!(settings.spawn_interval(), Duration::from_millis(1));
    }

    #[test]
    fn test_sanitized_fixes_zero_lives() {
        let settings = Settings {
            starting_lives: 0,
            tilt_scale: f32::INFINITY,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(settings.starting_lives, STARTING_LIVES);
        assert_eq!(settings.tilt_scale, TILT_SCALE);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let settings = Settings::load("/nonexistent/tilt-shooter/settings.json");
        assert_eq!(settings, Settings::default());
    }
}
