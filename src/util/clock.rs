//! Monotonic animation clock shared by the frame driver.

use web_time::Instant;

/// Elapsed/delta time source, advanced exactly once per tick.
///
/// One instance exists for the whole application; whichever view is active
/// reads it during `update`.
pub struct AnimationClock {
    start: Instant,
    last_tick: Instant,
    elapsed: f32,
    delta: f32,
}

impl AnimationClock {
    /// Start the clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        let now = Instant::now();
        Self {
            start: now,
            last_tick: now,
            elapsed: 0.0,
            delta: 0.0,
        }
    }

    /// Advance the clock by one tick, returning the delta in seconds since
    /// the previous tick.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_tick).as_secs_f32();
        self.elapsed = now.duration_since(self.start).as_secs_f32();
        self.last_tick = now;
        self.delta
    }

    /// Seconds since the clock was created, as of the last tick.
    #[must_use]
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Seconds between the two most recent ticks.
    #[must_use]
    pub fn delta(&self) -> f32 {
        self.delta
    }
}

impl Default for AnimationClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic_across_ticks() {
        let mut clock = AnimationClock::new();
        let mut previous = clock.elapsed();
        for _ in 0..5 {
            let delta = clock.tick();
            assert!(delta >= 0.0);
            assert!(clock.elapsed() >= previous);
            previous = clock.elapsed();
        }
    }

    #[test]
    fn starts_at_zero() {
        let clock = AnimationClock::new();
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.delta(), 0.0);
    }
}
