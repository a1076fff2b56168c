//! Game state and core simulation types
//!
//! `GameState` is the single canonical owner of every entity, the score, the
//! lives counter and the phase. Hosts read it through `Snapshot`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Lives exhausted; only a restart is accepted
    GameOver,
}

/// Fixed-size play area, supplied by the host once per session
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Arena {
    pub width: f32,
    pub height: f32,
}

impl Arena {
    pub fn new(width: f32, height: f32) -> Self {
        assert!(
            width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0,
            "arena dimensions must be positive and finite, got {width}x{height}"
        );
        Self { width, height }
    }

    /// Enemies whose bottom edge reaches this line have breached
    #[inline]
    pub fn floor(&self) -> f32 {
        self.height - FLOOR_MARGIN
    }

    /// Rightmost legal x for the paddle
    #[inline]
    pub fn player_max_x(&self) -> f32 {
        (self.width - PLAYER_WIDTH).max(0.0)
    }

    /// Rightmost legal spawn x for an enemy
    #[inline]
    pub fn enemy_max_x(&self) -> f32 {
        (self.width - ENEMY_WIDTH).max(0.0)
    }

    /// Top edge of the paddle
    #[inline]
    pub fn player_y(&self) -> f32 {
        self.height - PLAYER_HEIGHT - FLOOR_MARGIN
    }

    /// Paddle x that centers it horizontally
    #[inline]
    pub fn centered_player_x(&self) -> f32 {
        self.player_max_x() / 2.0
    }
}

/// The player's paddle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Player {
    /// Top-left corner; y stays anchored for the whole session
    pub pos: Vec2,
}

impl Player {
    pub fn centered(arena: &Arena) -> Self {
        Self {
            pos: Vec2::new(arena.centered_player_x(), arena.player_y()),
        }
    }

    pub fn hitbox(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT))
    }

    /// Where a bullet fired right now would appear
    pub fn muzzle(&self, arena: &Arena) -> Vec2 {
        Vec2::new(
            self.pos.x + (PLAYER_WIDTH - BULLET_WIDTH) / 2.0,
            arena.height - PLAYER_HEIGHT - BULLET_LAUNCH_GAP,
        )
    }
}

/// A projectile travelling upward
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bullet {
    pub id: u64,
    pub pos: Vec2,
}

impl Bullet {
    pub fn hitbox(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(BULLET_WIDTH, BULLET_HEIGHT))
    }

    /// True once the bullet has fully left the top of the arena
    #[inline]
    pub fn is_off_screen(&self) -> bool {
        self.pos.y <= -BULLET_HEIGHT
    }
}

/// A falling block
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Enemy {
    pub id: u64,
    pub pos: Vec2,
}

impl Enemy {
    pub fn hitbox(&self) -> Rect {
        Rect::from_pos(self.pos, Vec2::new(ENEMY_WIDTH, ENEMY_HEIGHT))
    }

    /// Leading (bottom) edge has reached the floor boundary
    #[inline]
    pub fn has_breached(&self, arena: &Arena) -> bool {
        self.pos.y + ENEMY_HEIGHT >= arena.floor()
    }
}

/// Complete game state for one session
#[derive(Debug, Clone)]
pub struct GameState {
    /// Play area, immutable for the session
    pub arena: Arena,
    /// Player paddle
    pub player: Player,
    /// Live bullets (insertion order = firing order)
    pub bullets: Vec<Bullet>,
    /// Live enemies (insertion order = spawn order)
    pub enemies: Vec<Enemy>,
    /// Enemies destroyed this run
    pub score: u64,
    /// Remaining lives
    pub lives: u8,
    /// Current phase
    pub phase: GamePhase,
    /// Steps simulated this run
    pub time_ticks: u64,
    /// Lives granted by `restart`
    pub starting_lives: u8,
    /// Whether `restart` puts the paddle back in the middle
    pub recenter_on_restart: bool,
    /// Next entity ID, never reset within a session
    next_id: u64,
}

impl GameState {
    /// Create a new game state with reference lives
    pub fn new(arena: Arena) -> Self {
        Self::with_lives(arena, STARTING_LIVES)
    }

    pub fn with_lives(arena: Arena, starting_lives: u8) -> Self {
        assert!(starting_lives > 0, "a session needs at least one life");
        Self {
            arena,
            player: Player::centered(&arena),
            bullets: Vec::new(),
            enemies: Vec::new(),
            score: 0,
            lives: starting_lives,
            phase: GamePhase::Playing,
            time_ticks: 0,
            starting_lives,
            recenter_on_restart: true,
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Place a bullet directly (hosts replaying a recorded run, tests)
    pub fn push_bullet(&mut self, pos: Vec2) -> u64 {
        let id = self.next_entity_id();
        self.bullets.push(Bullet { id, pos });
        id
    }

    /// Place an enemy directly (hosts replaying a recorded run, tests)
    pub fn push_enemy(&mut self, pos: Vec2) -> u64 {
        let id = self.next_entity_id();
        self.enemies.push(Enemy { id, pos });
        id
    }

    /// Check that bullet and enemy ids are unique. Debug builds only.
    pub(crate) fn debug_check_ids(&self) {
        if cfg!(debug_assertions) {
            let mut ids: Vec<u64> = self
                .bullets
                .iter()
                .map(|b| b.id)
                .chain(self.enemies.iter().map(|e| e.id))
                .collect();
            let total = ids.len();
            ids.sort_unstable();
            ids.dedup();
            assert_eq!(ids.len(), total, "duplicate entity id in game state");
        }
    }
}
