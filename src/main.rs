//! Tilt Shooter headless runner
//!
//! Drives a session with a scripted autopilot in place of a real tilt sensor
//! and renderer, logging progress and printing the final frame as JSON.
//!
//! Usage: `tilt-shooter [settings.json] [seconds]`

use std::time::Duration;

use tilt_shooter::consts::*;
use tilt_shooter::platform::InputEvent;
use tilt_shooter::sim::{Arena, GamePhase, Snapshot};
use tilt_shooter::{Session, Settings};

/// Reference portrait phone screen
const ARENA_WIDTH: f32 = 390.0;
const ARENA_HEIGHT: f32 = 844.0;

/// Host frame time (~60 Hz)
const FRAME: Duration = Duration::from_millis(16);

/// Frames between autopilot taps
const TAP_EVERY: u64 = 12;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => Settings::load(path),
        None => Settings::default(),
    };
    let seconds: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(30);

    log::info!("Tilt Shooter (headless) running for {}s", seconds);

    let mut session = Session::new(Arena::new(ARENA_WIDTH, ARENA_HEIGHT), &settings);
    let mut snapshot = session.snapshot();
    let total_frames = seconds * 1000 / FRAME.as_millis() as u64;
    let frames_per_second = 1000 / FRAME.as_millis() as u64;
    let mut runs = 1;

    for frame in 0..total_frames {
        if snapshot.phase == GamePhase::GameOver {
            log::info!("Run {} finished with score {}", runs, snapshot.score);
            runs += 1;
        }

        if let Some(tilt) = autopilot_tilt(&snapshot, settings.tilt_scale) {
            session.handle_input(InputEvent::Tilt { x: tilt });
        }
        if frame % TAP_EVERY == 0 || snapshot.phase == GamePhase::GameOver {
            session.handle_input(InputEvent::Tap);
        }

        snapshot = session.advance(FRAME);

        if frame % frames_per_second == 0 {
            log::debug!(
                "t={}s score={} lives={} bullets={} enemies={}",
                frame / frames_per_second,
                snapshot.score,
                snapshot.lives,
                snapshot.bullets.len(),
                snapshot.enemies.len()
            );
        }
    }

    match snapshot.to_json() {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize final frame: {}", e),
    }
}

/// Tilt toward the lowest enemy, as a player holding the phone would
fn autopilot_tilt(snapshot: &Snapshot, tilt_scale: f32) -> Option<f32> {
    let target = snapshot
        .enemies
        .iter()
        .max_by(|a, b| a.y.total_cmp(&b.y))?;

    let paddle_center = snapshot.player_x + PLAYER_WIDTH / 2.0;
    let enemy_center = target.x + ENEMY_WIDTH / 2.0;
    let dx = enemy_center - paddle_center;
    if dx.abs() < 1.0 || tilt_scale == 0.0 {
        return None;
    }
    Some((dx / tilt_scale).clamp(-1.0, 1.0))
}
