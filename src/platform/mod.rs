//! Platform abstraction layer
//!
//! Host-side collaborators that feed the simulation:
//! - Time: fixed-period step and spawn triggers
//! - Input: tilt samples and taps

pub mod input;
pub mod time;

pub use input::{Command, InputEvent, InputMap};
pub use time::{ClockEvent, FixedClock};
