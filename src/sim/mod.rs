//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One `step` per tick, no wall-clock reads
//! - Injected, seedable RNG only
//! - Stable iteration order (insertion order, ids ascending)
//! - No rendering or platform dependencies

pub mod collision;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use collision::{Rect, rects_overlap};
pub use snapshot::{EntityView, Snapshot};
pub use state::{Arena, Bullet, Enemy, GamePhase, GameState, Player};
pub use tick::{
    LifeLossCause, StepOutcome, apply_displacement, fire, restart, spawn_enemy, step,
};
