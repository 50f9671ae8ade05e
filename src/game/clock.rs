//! Fixed-timestep accumulator driving simulation ticks

use std::time::Duration;

/// Accumulates frame time and releases at most one tick per frame.
///
/// Leftover time is carried over instead of discarded so the render fraction
/// stays continuous across ticks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickClock {
    interval: Duration,
    accumulated: Duration,
}

impl TickClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            accumulated: Duration::ZERO,
        }
    }

    /// Clock for a snake moving `speed` cells per second
    pub fn from_speed(speed: u32) -> Self {
        Self::new(Duration::from_secs_f64(1.0 / speed.max(1) as f64))
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Add frame time. Returns true when a tick is due.
    pub fn accumulate(&mut self, dt: Duration) -> bool {
        self.accumulated += dt;
        if self.accumulated >= self.interval {
            self.accumulated -= self.interval;
            true
        } else {
            false
        }
    }

    /// Drop any accumulated time, used while the snake waits for its first turn
    pub fn hold(&mut self) {
        self.accumulated = Duration::ZERO;
    }

    /// Progress toward the next tick, in [0, 1)
    pub fn fraction(&self) -> f32 {
        let fraction = self.accumulated.as_secs_f64() / self.interval.as_secs_f64();
        fraction.clamp(0.0, 1.0 - f64::from(f32::EPSILON)) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticks_once_interval_is_reached() {
        let mut clock = TickClock::new(Duration::from_millis(100));
        assert!(!clock.accumulate(Duration::from_millis(60)));
        assert!(clock.accumulate(Duration::from_millis(60)));
        // 20ms carried over
        assert!((clock.fraction() - 0.2).abs() < 1e-4);
    }

    #[test]
    fn test_at_most_one_tick_per_frame() {
        let mut clock = TickClock::new(Duration::from_millis(100));
        assert!(clock.accumulate(Duration::from_millis(350)));
        // Backlog drains one tick per frame
        assert!(clock.accumulate(Duration::ZERO));
        assert!(clock.accumulate(Duration::ZERO));
        assert!(!clock.accumulate(Duration::ZERO));
    }

    #[test]
    fn test_fraction_stays_below_one() {
        let mut clock = TickClock::new(Duration::from_millis(100));
        clock.accumulate(Duration::from_millis(450));
        assert!(clock.fraction() < 1.0);
        assert!(clock.fraction() >= 0.0);
    }

    #[test]
    fn test_hold_resets_progress() {
        let mut clock = TickClock::new(Duration::from_millis(100));
        clock.accumulate(Duration::from_millis(70));
        clock.hold();
        assert_eq!(clock.fraction(), 0.0);
        assert!(!clock.accumulate(Duration::from_millis(70)));
    }

    #[test]
    fn test_from_speed() {
        let clock = TickClock::from_speed(10);
        assert_eq!(clock.interval(), Duration::from_millis(100));
    }
}
