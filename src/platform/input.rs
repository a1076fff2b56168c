//! Input mapping
//!
//! Raw host events (accelerometer samples, screen taps) become simulation
//! commands here. Hosts deliver tilt at up to ~60 Hz and taps whenever.

use serde::{Deserialize, Serialize};

use crate::Settings;

/// Raw event from the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// Horizontal accelerometer axis, roughly -1.0..=1.0
    Tilt { x: f32 },
    /// Screen tap: fire, or restart after game over
    Tap,
}

/// What the simulation should do about an input event
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Move the paddle by this many pixels
    Displace(f32),
    Fire,
}

/// Converts raw input into commands
#[derive(Debug, Clone, Copy)]
pub struct InputMap {
    pub tilt_scale: f32,
}

impl InputMap {
    pub fn new(tilt_scale: f32) -> Self {
        Self { tilt_scale }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tilt_scale)
    }

    pub fn map(&self, event: InputEvent) -> Command {
        match event {
            InputEvent::Tilt { x } => Command::Displace(x * self.tilt_scale),
            InputEvent::Tap => Command::Fire,
        }
    }
}

impl Default for InputMap {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tilt_scaled_by_reference_factor() {
        let map = InputMap::default();
        assert_eq!(map.map(InputEvent::Tilt { x: 0.5 }), Command::Displace(10.0));
        assert_eq!(map.map(InputEvent::Tilt { x: -1.0 }), Command::Displace(-20.0));
    }

    #[test]
    fn test_tap_is_fire() {
        assert_eq!(InputMap::new(3.0).map(InputEvent::Tap), Command::Fire);
    }

    #[test]
    fn test_event_json_shape() {
        let tilt: InputEvent = serde_json::from_str(r#"{"type":"tilt","x":0.25}"#).unwrap();
        assert_eq!(tilt, InputEvent::Tilt { x: 0.25 });
        let tap: InputEvent = serde_json::from_str(r#"{"type":"tap"}"#).unwrap();
        assert_eq!(tap, InputEvent::Tap);
    }
}
