//! Fixed-period clock
//!
//! Turns variable host frame times into an ordered stream of step and spawn
//! triggers. Backlog beyond the catch-up cap is dropped, never queued.

use std::time::Duration;

use crate::Settings;
use crate::consts::MAX_CATCHUP_STEPS;

/// A trigger due on the simulation timeline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    Step,
    Spawn,
}

#[derive(Debug, Clone)]
pub struct FixedClock {
    tick_interval: Duration,
    spawn_interval: Duration,
    /// Total host time fed in so far
    now: Duration,
    next_step: Duration,
    next_spawn: Duration,
}

impl FixedClock {
    pub fn new(tick_interval: Duration, spawn_interval: Duration) -> Self {
        assert!(!tick_interval.is_zero() && !spawn_interval.is_zero());
        Self {
            tick_interval,
            spawn_interval,
            now: Duration::ZERO,
            next_step: tick_interval,
            next_spawn: spawn_interval,
        }
    }

    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.tick_interval(), settings.spawn_interval())
    }

    pub fn now(&self) -> Duration {
        self.now
    }

    /// Move the clock forward and return every trigger that came due, in
    /// timeline order. A step and a spawn due at the same instant yield the
    /// step first.
    pub fn advance(&mut self, elapsed: Duration) -> Vec<ClockEvent> {
        self.now += elapsed;

        let mut events = Vec::new();
        let mut steps = 0;

        loop {
            let step_due = self.next_step <= self.now;
            let spawn_due = self.next_spawn <= self.now;

            if step_due && (!spawn_due || self.next_step <= self.next_spawn) {
                if steps == MAX_CATCHUP_STEPS {
                    self.drop_backlog();
                    break;
                }
                events.push(ClockEvent::Step);
                self.next_step += self.tick_interval;
                steps += 1;
            } else if spawn_due {
                events.push(ClockEvent::Spawn);
                self.next_spawn += self.spawn_interval;
            } else {
                break;
            }
        }

        events
    }

    /// Skip every trigger already due so a stalled host resumes on schedule
    fn drop_backlog(&mut self) {
        let steps = skip_past(&mut self.next_step, self.tick_interval, self.now);
        let spawns = skip_past(&mut self.next_spawn, self.spawn_interval, self.now);
        log::debug!("Clock fell behind, dropped {} steps and {} spawns", steps, spawns);
    }
}

/// Advance `next` past `now` in whole intervals, returning how many were skipped
fn skip_past(next: &mut Duration, interval: Duration, now: Duration) -> u128 {
    if *next > now {
        return 0;
    }
    let interval_ns = interval.as_nanos();
    let missed = (now - *next).as_nanos() / interval_ns + 1;
    let skip_ns = u64::try_from(interval_ns * missed).unwrap_or(u64::MAX);
    *next += Duration::from_nanos(skip_ns);
    missed
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn count(events: &[ClockEvent], kind: ClockEvent) -> usize {
        events.iter().filter(|e| **e == kind).count()
    }

    #[test]
    fn test_nothing_due_before_first_period() {
        let mut clock = FixedClock::new(ms(16), ms(1000));
        assert!(clock.advance(ms(15)).is_empty());
        assert_eq!(clock.advance(ms(1)), vec![ClockEvent::Step]);
    }

    #[test]
    fn test_steps_and_spawns_interleave_in_order() {
        let mut clock = FixedClock::new(ms(10), ms(25));
        let events = clock.advance(ms(50));
        use ClockEvent::*;
        // Steps at 10,20,30,40,50; spawns at 25,50 (step wins the tie)
        assert_eq!(events, vec![Step, Step, Spawn, Step, Step, Step, Spawn]);
    }

    #[test]
    fn test_reference_rates_over_one_second() {
        let mut clock = FixedClock::from_settings(&Settings::default());
        let mut events = Vec::new();
        for _ in 0..100 {
            events.extend(clock.advance(ms(10)));
        }
        assert_eq!(count(&events, ClockEvent::Step), 1000 / 16);
        assert_eq!(count(&events, ClockEvent::Spawn), 1);
    }

    #[test]
    fn test_stall_is_capped_and_backlog_dropped() {
        let mut clock = FixedClock::new(ms(16), ms(1000));
        let events = clock.advance(ms(5000));
        assert_eq!(count(&events, ClockEvent::Step), MAX_CATCHUP_STEPS as usize);

        // Back on schedule: the next frame sees at most one step
        let events = clock.advance(ms(16));
        assert_eq!(count(&events, ClockEvent::Step), 1);
        assert_eq!(count(&events, ClockEvent::Spawn), 0);
    }

    #[test]
    fn test_skip_past_lands_after_now() {
        let mut next = ms(16);
        let skipped = skip_past(&mut next, ms(16), ms(100));
        assert_eq!(skipped, 6);
        assert_eq!(next, ms(112));
    }
}
