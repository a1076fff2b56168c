//! Read-only view of the game for render hosts
//!
//! A `Snapshot` is taken after each step and owns its data, so a renderer can
//! hold on to it (or serialize it across a boundary) without touching the
//! live `GameState`.

use serde::{Deserialize, Serialize};

use super::state::{Arena, Bullet, Enemy, GamePhase, GameState};

/// Position of one bullet or enemy, keyed by its stable id
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EntityView {
    pub id: u64,
    pub x: f32,
    pub y: f32,
}

impl From<&Bullet> for EntityView {
    fn from(b: &Bullet) -> Self {
        Self {
            id: b.id,
            x: b.pos.x,
            y: b.pos.y,
        }
    }
}

impl From<&Enemy> for EntityView {
    fn from(e: &Enemy) -> Self {
        Self {
            id: e.id,
            x: e.pos.x,
            y: e.pos.y,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub arena: Arena,
    pub player_x: f32,
    pub bullets: Vec<EntityView>,
    pub enemies: Vec<EntityView>,
    pub score: u64,
    pub lives: u8,
    pub phase: GamePhase,
    pub time_ticks: u64,
}

impl Snapshot {
    pub fn capture(state: &GameState) -> Self {
        Self {
            arena: state.arena,
            player_x: state.player.pos.x,
            bullets: state.bullets.iter().map(EntityView::from).collect(),
            enemies: state.enemies.iter().map(EntityView::from).collect(),
            score: state.score,
            lives: state.lives,
            phase: state.phase,
            time_ticks: state.time_ticks,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl From<&GameState> for Snapshot {
    fn from(state: &GameState) -> Self {
        Self::capture(state)
    }
}
