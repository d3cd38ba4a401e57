// src/pipeline/pacing.rs

use rand::Rng;
use std::time::Duration;

/// Random wait inserted between outbound requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PacingPolicy {
    pub min: Duration,
    pub max: Duration,
}

impl PacingPolicy {
    /// Swaps the bounds if given in the wrong order.
    pub fn new(min: Duration, max: Duration) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn from_secs(min: u64, max: u64) -> Self {
        Self::new(Duration::from_secs(min), Duration::from_secs(max))
    }

    /// Uniform in `[min, max]`, millisecond resolution.
    pub fn next_delay<G: Rng + ?Sized>(&self, rng: &mut G) -> Duration {
        let lo = self.min.as_millis() as u64;
        let hi = self.max.as_millis() as u64;
        Duration::from_millis(rng.gen_range(lo..=hi))
    }
}

impl Default for PacingPolicy {
    fn default() -> Self {
        Self::from_secs(5, 15)
    }
}

pub trait Sleeper {
    fn sleep(&mut self, duration: Duration);
}

#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
