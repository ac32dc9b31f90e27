//! Native frame pacing

use std::thread;
use std::time::{Duration, Instant};

/// Sleeps out the remainder of each frame's time budget.
///
/// A late frame is not made up for: the next frame starts from whenever the
/// wait returned.
#[derive(Debug)]
pub struct FixedRateClock {
    last: Instant,
}

impl Default for FixedRateClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedRateClock {
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Time budget of one frame
    pub fn budget(target_fps: u32) -> Duration {
        Duration::from_secs_f64(1.0 / target_fps.max(1) as f64)
    }

    pub fn wait(&mut self, target_fps: u32) {
        let budget = Self::budget(target_fps);
        let elapsed = self.last.elapsed();
        if elapsed < budget {
            thread::sleep(budget - elapsed);
        }
        self.last = Instant::now();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_budget() {
        assert_eq!(FixedRateClock::budget(50), Duration::from_millis(20));
    }

    #[test]
    fn test_wait_blocks_for_remaining_budget() {
        let mut clock = FixedRateClock::new();
        let start = Instant::now();
        clock.wait(100);
        assert!(start.elapsed() >= Duration::from_millis(9));
    }
}
