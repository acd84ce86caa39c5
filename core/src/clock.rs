//! Wall-clock tick source for the countdown timers.
//!
//! Timer decrements happen at a fixed real-time cadence no matter how many
//! instructions execute per second, so the tick source is driven by a
//! monotonic clock rather than by cycle counting.

use std::time::{Duration, Instant};

use crate::constants::TIMER_FREQUENCY;

/// Tracks the instant of the last tick and reports when a period has passed.
///
/// `check` collapses any number of elapsed periods into a single tick: under
/// heavy slowdown the timers under-decrement relative to the wall clock
/// instead of catching up in a burst.
pub struct Clock {
    last_tick: Instant,
    period: Duration,
}

impl Clock {
    /// A clock ticking at the standard timer frequency (60Hz).
    pub fn new() -> Self {
        Self::with_period(Duration::from_micros(
            1_000_000 / u64::from(TIMER_FREQUENCY),
        ))
    }

    /// A clock with an arbitrary tick period.
    pub fn with_period(period: Duration) -> Self {
        Clock {
            last_tick: Instant::now(),
            period,
        }
    }

    /// Restart the current period from now.
    pub fn reset(&mut self) {
        self.last_tick = Instant::now();
    }

    /// True when at least one period has elapsed since the last tick;
    /// resets the period when it fires.
    pub fn check(&mut self) -> bool {
        if self.last_tick.elapsed() < self.period {
            return false;
        }
        self.reset();
        true
    }
}

impl Default for Clock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_doesnt_tick_within_a_period() {
        let mut clock = Clock::with_period(Duration::from_millis(50));
        assert!(!clock.check());
        sleep(Duration::from_millis(5));
        assert!(!clock.check());
    }

    #[test]
    fn test_ticks_once_period_elapses() {
        let mut clock = Clock::with_period(Duration::from_millis(10));
        sleep(Duration::from_millis(12));
        assert!(clock.check());
        // the period restarted when the tick fired
        assert!(!clock.check());
    }

    #[test]
    fn test_multiple_elapsed_periods_collapse_into_one_tick() {
        let mut clock = Clock::with_period(Duration::from_millis(5));
        sleep(Duration::from_millis(25));
        assert!(clock.check());
        assert!(!clock.check());
    }
}
