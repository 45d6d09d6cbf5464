//! Cross-frame detector state
//!
//! The analyzers are stateless; this value is the single synchronization
//! point between the live feed, the rate limiter, and capture suspension.

use crate::types::LiveIndicatorState;
use std::time::{Duration, Instant};

/// Rate-limiting and suspension state for the live detection path
///
/// Frames are dropped (never queued) while a detection is in flight,
/// while the cooldown since the last completed detection is running, or
/// while the feed is suspended for a capture. The most recent indicator
/// state is retained so dropped and failed frames leave the UI unchanged.
#[derive(Debug, Clone)]
pub struct DetectorState {
    in_flight: bool,
    suspended: bool,
    last_completed: Option<Instant>,
    last: LiveIndicatorState,
}

impl DetectorState {
    pub fn new() -> Self {
        Self {
            in_flight: false,
            suspended: false,
            last_completed: None,
            last: LiveIndicatorState::default(),
        }
    }

    /// Whether a frame arriving at `now` should be analyzed
    pub fn should_process(&self, now: Instant, cooldown: Duration) -> bool {
        if self.suspended || self.in_flight {
            return false;
        }
        match self.last_completed {
            Some(t) => now.duration_since(t) >= cooldown,
            None => true,
        }
    }

    /// Mark a detection as in flight
    pub fn begin(&mut self) {
        self.in_flight = true;
    }

    /// Record a completed detection and start the cooldown
    pub fn complete(&mut self, result: LiveIndicatorState, now: Instant) {
        self.in_flight = false;
        self.last_completed = Some(now);
        self.last = result;
    }

    /// Record a failed detection; the previous indicator state is kept
    pub fn fail(&mut self) {
        self.in_flight = false;
    }

    /// Stop frame delivery for the duration of a capture
    pub fn suspend(&mut self) {
        self.suspended = true;
    }

    /// Resume frame delivery after a capture, successful or not
    pub fn resume(&mut self) {
        self.suspended = false;
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    /// Most recent indicator state, retained across drops and failures
    pub fn last(&self) -> LiveIndicatorState {
        self.last
    }

    /// Clear all state, returning the indicators to their defaults
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for DetectorState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const COOLDOWN: Duration = Duration::from_millis(500);

    #[test]
    fn test_first_frame_processes() {
        let state = DetectorState::new();
        assert!(state.should_process(Instant::now(), COOLDOWN));
    }

    #[test]
    fn test_in_flight_drops() {
        let mut state = DetectorState::new();
        state.begin();
        assert!(!state.should_process(Instant::now(), COOLDOWN));
        state.fail();
        assert!(state.should_process(Instant::now(), COOLDOWN));
    }

    #[test]
    fn test_cooldown_drops_then_admits() {
        let mut state = DetectorState::new();
        let t0 = Instant::now();
        state.begin();
        state.complete(LiveIndicatorState::new(true, true), t0);

        assert!(!state.should_process(t0 + Duration::from_millis(100), COOLDOWN));
        assert!(state.should_process(t0 + Duration::from_millis(500), COOLDOWN));
    }

    #[test]
    fn test_suspension_drops_until_resume() {
        let mut state = DetectorState::new();
        state.suspend();
        assert!(state.is_suspended());
        assert!(!state.should_process(Instant::now(), COOLDOWN));
        state.resume();
        assert!(state.should_process(Instant::now(), COOLDOWN));
    }

    #[test]
    fn test_failure_retains_last_state() {
        let mut state = DetectorState::new();
        let good = LiveIndicatorState::new(true, true);
        state.begin();
        state.complete(good, Instant::now());

        state.begin();
        state.fail();
        assert_eq!(state.last(), good);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut state = DetectorState::new();
        state.begin();
        state.complete(LiveIndicatorState::new(true, true), Instant::now());
        state.suspend();
        state.reset();
        assert!(!state.is_suspended());
        assert_eq!(state.last(), LiveIndicatorState::default());
        assert!(state.should_process(Instant::now(), COOLDOWN));
    }
}
