//! Cosmetic progress for an outstanding generation.
//!
//! The service reports no progress, so the bar creeps from 0 toward 90 in
//! fixed steps and only reaches 100 once the response settles. The value is
//! derived from the start time rather than a running timer, so there is
//! nothing to cancel when loading stops or the owner is dropped.

use std::time::{Duration, Instant};

pub const STEP_INTERVAL: Duration = Duration::from_millis(400);
pub const STEP_PERCENT: u8 = 10;
pub const CAP_PERCENT: u8 = 90;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    Running { started_at: Instant },
    Settled,
}

#[derive(Debug, Clone, Copy)]
pub struct ProgressSimulator {
    phase: Phase,
}

impl Default for ProgressSimulator {
    fn default() -> Self {
        Self { phase: Phase::Idle }
    }
}

impl ProgressSimulator {
    /// Restart at 0.
    pub fn start(&mut self, now: Instant) {
        self.phase = Phase::Running { started_at: now };
    }

    /// Jump to 100.
    pub fn finish(&mut self) {
        self.phase = Phase::Settled;
    }

    pub fn percent(&self, now: Instant) -> u8 {
        match self.phase {
            Phase::Idle => 0,
            Phase::Settled => 100,
            Phase::Running { started_at } => {
                let elapsed = now.saturating_duration_since(started_at);
                let steps = elapsed.as_millis() / STEP_INTERVAL.as_millis();
                let percent = steps.saturating_mul(STEP_PERCENT as u128);
                percent.min(CAP_PERCENT as u128) as u8
            }
        }
    }

    /// Time until the displayed value next changes, for scheduling a repaint.
    pub fn next_tick(&self, now: Instant) -> Option<Duration> {
        let Phase::Running { started_at } = self.phase else {
            return None;
        };
        if self.percent(now) >= CAP_PERCENT {
            return None;
        }
        let elapsed = now.saturating_duration_since(started_at).as_millis();
        let interval = STEP_INTERVAL.as_millis();
        let remaining = interval - (elapsed % interval);
        Some(Duration::from_millis(remaining as u64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_zero_and_steps() {
        let t0 = Instant::now();
        let mut progress = ProgressSimulator::default();
        progress.start(t0);

        assert_eq!(progress.percent(t0), 0);
        assert_eq!(progress.percent(t0 + Duration::from_millis(399)), 0);
        assert_eq!(progress.percent(t0 + Duration::from_millis(400)), 10);
        assert_eq!(progress.percent(t0 + Duration::from_millis(1250)), 30);
    }

    #[test]
    fn test_monotonic_and_capped_below_100_while_running() {
        let t0 = Instant::now();
        let mut progress = ProgressSimulator::default();
        progress.start(t0);

        let mut last = 0;
        for ms in (0..60_000).step_by(50) {
            let value = progress.percent(t0 + Duration::from_millis(ms));
            assert!(value >= last);
            assert!(value <= CAP_PERCENT);
            last = value;
        }
        assert_eq!(last, CAP_PERCENT);
    }

    #[test]
    fn test_finish_is_exactly_100() {
        let t0 = Instant::now();
        let mut progress = ProgressSimulator::default();
        progress.start(t0);
        progress.finish();

        assert_eq!(progress.percent(t0 + Duration::from_secs(1)), 100);
        assert_eq!(progress.next_tick(t0), None);
    }

    #[test]
    fn test_restart_resets_to_zero() {
        let t0 = Instant::now();
        let mut progress = ProgressSimulator::default();
        progress.start(t0);
        progress.finish();

        let t1 = t0 + Duration::from_secs(5);
        progress.start(t1);
        assert_eq!(progress.percent(t1), 0);
    }

    #[test]
    fn test_next_tick_stops_at_cap() {
        let t0 = Instant::now();
        let mut progress = ProgressSimulator::default();
        progress.start(t0);

        assert_eq!(
            progress.next_tick(t0 + Duration::from_millis(100)),
            Some(Duration::from_millis(300))
        );
        assert_eq!(progress.next_tick(t0 + Duration::from_secs(10)), None);
    }
}
