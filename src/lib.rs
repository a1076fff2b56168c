//! Tilt Shooter - a tilt-controlled arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (motion, spawning, collisions, lives/score)
//! - `session`: Single owner that serializes clock triggers and input onto the sim
//! - `platform`: Host collaborators (fixed-period clock, tilt/tap input)
//! - `settings`: Session configuration

pub mod platform;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::Session;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Player paddle dimensions
    pub const PLAYER_WIDTH: f32 = 50.0;
    pub const PLAYER_HEIGHT: f32 = 50.0;

    /// Bullet dimensions
    pub const BULLET_WIDTH: f32 = 10.0;
    pub const BULLET_HEIGHT: f32 = 20.0;

    /// Falling block dimensions
    pub const ENEMY_WIDTH: f32 = 40.0;
    pub const ENEMY_HEIGHT: f32 = 40.0;

    /// Upward bullet travel per tick (pixels)
    pub const BULLET_SPEED: f32 = 10.0;
    /// Downward enemy travel per tick (pixels). Kept below bullet speed.
    pub const ENEMY_SPEED: f32 = 4.0;

    /// Player lane reserved under the floor boundary
    pub const FLOOR_MARGIN: f32 = 20.0;
    /// Gap between the top of the paddle and a freshly fired bullet
    pub const BULLET_LAUNCH_GAP: f32 = 40.0;

    pub const STARTING_LIVES: u8 = 3;

    /// Accelerometer axis -> pixels of displacement
    pub const TILT_SCALE: f32 = 20.0;

    /// Reference clock periods (milliseconds)
    pub const TICK_INTERVAL_MS: u64 = 16;
    pub const SPAWN_INTERVAL_MS: u64 = 1000;

    /// Maximum simulation steps per host frame to prevent spiral of death
    pub const MAX_CATCHUP_STEPS: u32 = 8;
}
