/// Fixed-step tick clock
///
/// Turns wall-clock time into a whole number of simulation ticks. Each tick
/// is one shortcut poll, one simulated frame and one input update, so the
/// double-press window and stick edges are measured in ticks, not in
/// rendered frames.
use std::time::{Duration, Instant};

/// Simulation rate (60 ticks per second)
pub const TICK_RATE: u32 = 60;
const TICK_DURATION: Duration = Duration::from_micros(16_667); // ~1/60 second

/// Most ticks run for one wake-up; time beyond that is dropped
pub const MAX_TICKS_PER_WAKE: u32 = 5;

pub struct TickClock {
    accumulator: Duration,
    last_wake: Instant,
    paused: bool,
    tick_count: u64,
}

impl TickClock {
    pub fn new() -> Self {
        Self {
            accumulator: Duration::ZERO,
            last_wake: Instant::now(),
            paused: false,
            tick_count: 0,
        }
    }

    /// Number of ticks due since the last call
    pub fn begin_wake(&mut self) -> u32 {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_wake);
        self.last_wake = now;
        self.accumulate(elapsed)
    }

    /// Add `elapsed` to the clock and return how many ticks it completes
    pub fn accumulate(&mut self, elapsed: Duration) -> u32 {
        if self.paused {
            return 0;
        }

        self.accumulator += elapsed;

        let mut ticks = 0;
        while self.accumulator >= TICK_DURATION && ticks < MAX_TICKS_PER_WAKE {
            self.accumulator -= TICK_DURATION;
            ticks += 1;
        }

        // A stall longer than the cap would otherwise replay as a burst
        if ticks == MAX_TICKS_PER_WAKE && self.accumulator >= TICK_DURATION {
            log::debug!(
                "Clock fell behind by {:?}, dropping it",
                self.accumulator
            );
            self.accumulator = Duration::ZERO;
        }

        self.tick_count += ticks as u64;
        ticks
    }

    pub fn tick_duration(&self) -> Duration {
        TICK_DURATION
    }

    /// Total ticks handed out
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            log::info!("Simulation paused");
        }
    }

    pub fn resume(&mut self) {
        if self.paused {
            self.paused = false;
            // Don't replay the paused interval
            self.accumulator = Duration::ZERO;
            self.last_wake = Instant::now();
            log::info!("Simulation resumed");
        }
    }

    pub fn toggle_pause(&mut self) {
        if self.paused {
            self.resume();
        } else {
            self.pause();
        }
    }
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_creation() {
        let clock = TickClock::new();
        assert_eq!(clock.tick_count(), 0);
        assert!(!clock.is_paused());
        assert_eq!(clock.tick_duration(), TICK_DURATION);
    }

    #[test]
    fn test_tick_rate_matches_duration() {
        let second = TICK_DURATION * TICK_RATE;
        assert!(second >= Duration::from_secs(1));
        assert!(second < Duration::from_secs(1) + TICK_DURATION);
    }

    #[test]
    fn test_partial_ticks_carry_over() {
        let mut clock = TickClock::new();
        assert_eq!(clock.accumulate(Duration::from_millis(10)), 0);
        assert_eq!(clock.accumulate(Duration::from_millis(10)), 1);
        assert_eq!(clock.accumulate(Duration::from_millis(31)), 2);
        assert_eq!(clock.tick_count(), 3);
    }

    #[test]
    fn test_stall_is_capped_and_dropped() {
        let mut clock = TickClock::new();
        assert_eq!(clock.accumulate(Duration::from_millis(300)), MAX_TICKS_PER_WAKE);
        // The rest of the stall is not replayed
        assert_eq!(clock.accumulate(Duration::ZERO), 0);
    }

    #[test]
    fn test_paused_clock_yields_no_ticks() {
        let mut clock = TickClock::new();
        clock.pause();
        assert_eq!(clock.accumulate(Duration::from_millis(50)), 0);

        clock.resume();
        assert_eq!(clock.accumulate(Duration::from_millis(17)), 1);
    }

    #[test]
    fn test_toggle_pause() {
        let mut clock = TickClock::new();
        clock.toggle_pause();
        assert!(clock.is_paused());
        clock.toggle_pause();
        assert!(!clock.is_paused());
    }

    #[test]
    fn test_resume_discards_partial_tick() {
        let mut clock = TickClock::new();
        clock.accumulate(Duration::from_millis(15));
        clock.pause();
        clock.resume();
        assert_eq!(clock.accumulate(Duration::from_millis(5)), 0);
    }
}
