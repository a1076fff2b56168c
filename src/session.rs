//! Game session
//!
//! The one logical owner of a run. Clock triggers and input events are all
//! funnelled through `Session`, so no caller ever observes a half-finished
//! step and the renderer only ever sees `Snapshot`s.

use std::time::Duration;

use rand::SeedableRng;
use rand_pcg::Pcg32;

use crate::Settings;
use crate::platform::{ClockEvent, Command, FixedClock, InputEvent, InputMap};
use crate::sim::{self, Arena, GamePhase, GameState, Snapshot, StepOutcome};

pub struct Session {
    state: GameState,
    rng: Pcg32,
    seed: u64,
    clock: FixedClock,
    input: InputMap,
    /// Phase at the end of the last mutation, for transition logging
    last_phase: GamePhase,
}

impl Session {
    /// Start a session in `arena`, which stays fixed until the session ends
    pub fn new(arena: Arena, settings: &Settings) -> Self {
        let settings = settings.clone().sanitized();
        let seed = settings.seed.unwrap_or_else(rand::random);

        let mut state = GameState::with_lives(arena, settings.starting_lives);
        state.recenter_on_restart = settings.recenter_on_restart;

        log::info!(
            "Session started: arena {}x{}, seed {}, {} lives",
            arena.width,
            arena.height,
            seed,
            settings.starting_lives
        );

        Self {
            state,
            rng: Pcg32::seed_from_u64(seed),
            seed,
            clock: FixedClock::from_settings(&settings),
            input: InputMap::from_settings(&settings),
            last_phase: GamePhase::Playing,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(&self.state)
    }

    /// Apply a host input event immediately
    pub fn handle_input(&mut self, event: InputEvent) {
        match self.input.map(event) {
            Command::Displace(dx) => sim::apply_displacement(&mut self.state, dx),
            Command::Fire => {
                sim::fire(&mut self.state);
            }
        }
        self.track_phase();
    }

    /// Feed host frame time, run every trigger that came due, and return the
    /// resulting frame
    pub fn advance(&mut self, elapsed: Duration) -> Snapshot {
        for event in self.clock.advance(elapsed) {
            match event {
                ClockEvent::Step => {
                    self.step();
                }
                ClockEvent::Spawn => {
                    self.spawn();
                }
            }
        }
        self.snapshot()
    }

    /// Run one simulation step outside the clock
    pub fn step(&mut self) -> StepOutcome {
        let outcome = sim::step(&mut self.state);
        self.track_phase();
        outcome
    }

    /// Spawn one enemy outside the clock
    pub fn spawn(&mut self) -> Option<u64> {
        sim::spawn_enemy(&mut self.state, &mut self.rng)
    }

    pub fn restart(&mut self) {
        sim::restart(&mut self.state);
        self.track_phase();
    }

    fn track_phase(&mut self) {
        let phase = self.state.phase;
        if phase == self.last_phase {
            return;
        }
        match phase {
            GamePhase::GameOver => {
                log::info!(
                    "Game over: score {} after {} ticks",
                    self.state.score,
                    self.state.time_ticks
                );
            }
            GamePhase::Playing => log::info!("Run restarted"),
        }
        self.last_phase = phase;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::*;

    fn seeded(seed: u64) -> Settings {
        Settings {
            seed: Some(seed),
            ..Default::default()
        }
    }

    fn arena() -> Arena {
        Arena::new(400.0, 800.0)
    }

    #[test]
    fn test_tilt_moves_player() {
        let mut session = Session::new(arena(), &seeded(1));
        let start = session.snapshot().player_x;
        session.handle_input(InputEvent::Tilt { x: 0.5 });
        assert_eq!(session.snapshot().player_x, start + 0.5 * TILT_SCALE);
    }

    #[test]
    fn test_tap_fires() {
        let mut session = Session::new(arena(), &seeded(1));
        session.handle_input(InputEvent::Tap);
        session.handle_input(InputEvent::Tap);
        assert_eq!(session.snapshot().bullets.len(), 2);
    }

    #[test]
    fn test_advance_spawns_on_schedule() {
        let mut session = Session::new(arena(), &seeded(3));
        let snap = session.advance(Duration::from_millis(999));
        assert!(snap.enemies.is_empty());
        let snap = session.advance(Duration::from_millis(1));
        assert_eq!(snap.enemies.len(), 1);
        // Spawned this instant, not yet stepped
        assert_eq!(snap.enemies[0].y, -ENEMY_HEIGHT);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Session::new(arena(), &seeded(42));
        let mut b = Session::new(arena(), &seeded(42));
        for frame in 0..600 {
            let tilt = InputEvent::Tilt {
                x: ((frame as f32) * 0.05).sin(),
            };
            a.handle_input(tilt);
            b.handle_input(tilt);
            if frame % 20 == 0 {
                a.handle_input(InputEvent::Tap);
                b.handle_input(InputEvent::Tap);
            }
            assert_eq!(
                a.advance(Duration::from_millis(16)),
                b.advance(Duration::from_millis(16))
            );
        }
    }

    #[test]
    fn test_idle_player_loses_then_tap_restarts() {
        let settings = Settings {
            seed: Some(5),
            starting_lives: 1,
            ..Default::default()
        };
        let mut session = Session::new(arena(), &settings);

        // Nobody shoots; the first enemy eventually breaches or lands on the paddle
        for _ in 0..2000 {
            session.advance(Duration::from_millis(16));
            if session.phase() == GamePhase::GameOver {
                break;
            }
        }
        assert_eq!(session.phase(), GamePhase::GameOver);
        let frozen = session.advance(Duration::from_millis(5000));
        assert_eq!(frozen.lives, 0);
        assert!(frozen.enemies.is_empty());

        session.handle_input(InputEvent::Tap);
        let snap = session.snapshot();
        assert_eq!(snap.phase, GamePhase::Playing);
        assert_eq!(snap.lives, 1);
        assert_eq!(snap.score, 0);
        assert!(snap.bullets.is_empty());
    }
}
