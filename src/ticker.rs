use std::time::{Duration, Instant};

/// Default UI poll interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 250;

/// Get UI poll duration
pub fn tick_duration() -> Duration {
    Duration::from_millis(DEFAULT_TICK_MS)
}

/// Turns wall-clock progress into whole seconds due.
///
/// The event loop polls several times a second; the timer must advance
/// exactly once per elapsed second, carrying the remainder forward.
#[derive(Debug, Clone, Copy)]
pub struct SecondTicker {
    last: Instant,
}

impl SecondTicker {
    pub fn new(now: Instant) -> Self {
        Self { last: now }
    }

    /// Restart the cadence so the next second is due one second after `now`
    pub fn reset(&mut self, now: Instant) {
        self.last = now;
    }

    /// Number of whole seconds elapsed since the last call
    pub fn due(&mut self, now: Instant) -> u64 {
        let elapsed = now.saturating_duration_since(self.last);
        let seconds = elapsed.as_secs();
        self.last += Duration::from_secs(seconds);
        seconds
    }
}
