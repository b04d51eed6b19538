//! Repeating timer driven by frame deltas
//!
//! Stands in for the engine's looped timer event. Stopping is idempotent and
//! a stopped timer never fires, so a reset session cannot receive orphaned
//! row ticks.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepeatingTimer {
    period_ms: u32,
    elapsed_ms: f32,
    active: bool,
}

impl RepeatingTimer {
    /// Create a running timer
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms: period_ms.max(1),
            elapsed_ms: 0.0,
            active: true,
        }
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Advance by `dt_ms` and return how many periods elapsed
    pub fn advance(&mut self, dt_ms: f32) -> u32 {
        if !self.active {
            return 0;
        }
        self.elapsed_ms += dt_ms.max(0.0);
        let period = self.period_ms as f32;
        let fires = (self.elapsed_ms / period).floor() as u32;
        self.elapsed_ms -= fires as f32 * period;
        fires
    }

    pub fn stop(&mut self) {
        self.active = false;
    }

    /// Start again from zero
    pub fn restart(&mut self) {
        self.elapsed_ms = 0.0;
        self.active = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_fires_once_per_period() {
        let mut timer = RepeatingTimer::new(1500);
        assert_eq!(timer.advance(1000.0), 0);
        assert_eq!(timer.advance(500.0), 1);
        assert_eq!(timer.advance(1499.0), 0);
        assert_eq!(timer.advance(1.0), 1);
    }

    #[test]
    fn test_stop_is_idempotent() {
        let mut timer = RepeatingTimer::new(100);
        timer.stop();
        timer.stop();
        assert!(!timer.is_active());
        assert_eq!(timer.advance(10_000.0), 0);
    }

    #[test]
    fn test_restart_discards_elapsed() {
        let mut timer = RepeatingTimer::new(100);
        timer.advance(90.0);
        timer.stop();
        timer.restart();
        assert_eq!(timer.advance(50.0), 0);
        assert_eq!(timer.advance(50.0), 1);
    }

    proptest! {
        #[test]
        fn prop_fire_count_matches_total_time(frames in 1usize..2000) {
            let mut timer = RepeatingTimer::new(1500);
            let mut fires = 0;
            for _ in 0..frames {
                fires += timer.advance(16.0);
            }
            prop_assert_eq!(fires as usize, frames * 16 / 1500);
        }
    }
}
