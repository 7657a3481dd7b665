//! Round countdown: owns the seconds-left value and restart policy.

use crate::types::Seconds;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Countdown {
    pub duration:  Seconds,
    pub remaining: Seconds,
}

impl Countdown {
    pub fn new(duration: Seconds) -> Self {
        Self { duration, remaining: duration }
    }

    /// Count down one second. Returns true when this tick reached zero.
    /// Ticking an expired countdown is a no-op and returns false.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }

    pub fn restart(&mut self) {
        self.remaining = self.duration;
    }

    pub fn expired(&self) -> bool {
        self.remaining == 0
    }

    /// Fraction of time left in [0, 1], for progress bars.
    pub fn fraction_left(&self) -> f64 {
        if self.duration == 0 {
            return 0.0;
        }
        self.remaining as f64 / self.duration as f64
    }
}

/// When a game puts the countdown back to full.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Every freshly drawn scenario gets the full duration.
    EveryRound,
    /// Only a level-up refills the clock.
    OnLevelUp,
}
