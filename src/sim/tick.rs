//! Fixed timestep simulation tick
//!
//! `step` advances the game by one tick. The remaining operations are the
//! discrete triggers a host can fire between ticks (tilt, tap, spawn timer).

use glam::Vec2;
use rand::Rng;

use super::state::{Bullet, Enemy, GamePhase, GameState, Player};
use crate::consts::*;

/// Why a life was lost
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLossCause {
    /// An enemy reached the floor boundary
    Breach,
    /// An enemy touched the paddle
    PlayerHit,
}

/// What a single `step` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Game over; nothing moved
    Halted,
    /// Entities advanced and `hits` enemies were shot down
    Advanced { hits: u32 },
    /// A life was lost and the field was cleared
    LifeLost { cause: LifeLossCause, game_over: bool },
}

/// Bullets and enemies left standing after bullet/enemy resolution
struct Resolved {
    bullets: Vec<Bullet>,
    enemies: Vec<Enemy>,
    hits: u32,
}

/// Advance the game state by one tick
///
/// Runs the pipeline advance -> breach check -> bullet/enemy resolution ->
/// player check -> commit. A life loss in either check short-circuits the
/// rest, so breach handling and hit scoring never happen in the same tick.
pub fn step(state: &mut GameState) -> StepOutcome {
    if !state.is_playing() {
        return StepOutcome::Halted;
    }

    state.time_ticks += 1;

    match run_pipeline(state) {
        Ok(resolved) => commit(state, resolved),
        Err(cause) => lose_life(state, cause),
    }
}

fn run_pipeline(state: &GameState) -> Result<Resolved, LifeLossCause> {
    let bullets = advance_bullets(&state.bullets);
    let enemies = advance_enemies(&state.enemies);

    check_breach(&enemies, state)?;
    let resolved = resolve_bullet_hits(bullets, enemies);
    check_player_hit(&resolved.enemies, &state.player)?;

    Ok(resolved)
}

fn advance_bullets(bullets: &[Bullet]) -> Vec<Bullet> {
    bullets
        .iter()
        .map(|b| Bullet {
            pos: b.pos - Vec2::new(0.0, BULLET_SPEED),
            ..*b
        })
        .filter(|b| !b.is_off_screen())
        .collect()
}

fn advance_enemies(enemies: &[Enemy]) -> Vec<Enemy> {
    enemies
        .iter()
        .map(|e| Enemy {
            pos: e.pos + Vec2::new(0.0, ENEMY_SPEED),
            ..*e
        })
        .collect()
}

fn check_breach(enemies: &[Enemy], state: &GameState) -> Result<(), LifeLossCause> {
    match enemies.iter().find(|e| e.has_breached(&state.arena)) {
        Some(enemy) => {
            log::trace!("Enemy {} breached at y={}", enemy.id, enemy.pos.y);
            Err(LifeLossCause::Breach)
        }
        None => Ok(()),
    }
}

/// Each bullet, in firing order, takes out the first enemy (in spawn order)
/// it overlaps. A spent bullet and its enemy are gone before the next bullet
/// is checked, so no enemy is credited twice.
fn resolve_bullet_hits(bullets: Vec<Bullet>, mut enemies: Vec<Enemy>) -> Resolved {
    let mut survivors = Vec::with_capacity(bullets.len());
    let mut hits = 0;

    for bullet in bullets {
        let hitbox = bullet.hitbox();
        match enemies.iter().position(|e| e.hitbox().overlaps(&hitbox)) {
            Some(index) => {
                let enemy = enemies.remove(index);
                log::trace!("Bullet {} destroyed enemy {}", bullet.id, enemy.id);
                hits += 1;
            }
            None => survivors.push(bullet),
        }
    }

    Resolved {
        bullets: survivors,
        enemies,
        hits,
    }
}

fn check_player_hit(enemies: &[Enemy], player: &Player) -> Result<(), LifeLossCause> {
    let hitbox = player.hitbox();
    if enemies.iter().any(|e| e.hitbox().overlaps(&hitbox)) {
        Err(LifeLossCause::PlayerHit)
    } else {
        Ok(())
    }
}

fn commit(state: &mut GameState, resolved: Resolved) -> StepOutcome {
    state.bullets = resolved.bullets;
    state.enemies = resolved.enemies;
    state.score += u64::from(resolved.hits);
    state.debug_check_ids();

    StepOutcome::Advanced {
        hits: resolved.hits,
    }
}

/// Lose one life and clear the field. Hits resolved earlier in the same tick
/// are discarded along with the entities.
fn lose_life(state: &mut GameState, cause: LifeLossCause) -> StepOutcome {
    state.bullets.clear();
    state.enemies.clear();
    state.lives = state.lives.saturating_sub(1);

    let game_over = state.lives == 0;
    if game_over {
        state.phase = GamePhase::GameOver;
    }

    log::debug!("Life lost ({:?}), {} remaining", cause, state.lives);

    StepOutcome::LifeLost { cause, game_over }
}

/// Move the paddle horizontally, clamped to the arena
///
/// Non-finite input is dropped rather than poisoning the position.
pub fn apply_displacement(state: &mut GameState, dx: f32) {
    if !state.is_playing() || !dx.is_finite() {
        return;
    }
    let max_x = state.arena.player_max_x();
    state.player.pos.x = (state.player.pos.x + dx).clamp(0.0, max_x);
}

/// Drop a new enemy in just above the arena at a random column
///
/// Returns the new enemy's id, or `None` while the game is over.
pub fn spawn_enemy(state: &mut GameState, rng: &mut impl Rng) -> Option<u64> {
    if !state.is_playing() {
        return None;
    }
    let x = rng.random_range(0.0..=state.arena.enemy_max_x());
    let id = state.push_enemy(Vec2::new(x, -ENEMY_HEIGHT));
    log::trace!("Spawned enemy {} at x={:.1}", id, x);
    Some(id)
}

/// Fire a bullet from the paddle, or restart if the game is over
///
/// Returns the new bullet's id, or `None` when the tap was used to restart.
pub fn fire(state: &mut GameState) -> Option<u64> {
    if state.phase == GamePhase::GameOver {
        restart(state);
        return None;
    }
    let muzzle = state.player.muzzle(&state.arena);
    Some(state.push_bullet(muzzle))
}

/// Start a fresh run in the same arena
pub fn restart(state: &mut GameState) {
    state.bullets.clear();
    state.enemies.clear();
    state.score = 0;
    state.lives = state.starting_lives;
    state.phase = GamePhase::Playing;
    state.time_ticks = 0;
    if state.recenter_on_restart {
        state.player.pos.x = state.arena.centered_player_x();
    }
}
