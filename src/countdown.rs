//! Countdown timer driven by a one-second tick.

use core::ops::RangeInclusive;

use log::info;

use crate::error::{Error, Result};

/// Accepted countdown lengths in minutes.
pub const MINUTES_RANGE: RangeInclusive<u32> = 1..=60;

/// Outcome of one [`CountdownTimer::tick_second`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// Not running.
    Idle,
    /// Still counting; seconds left after this tick.
    Running { remaining_secs: u32 },
    /// The countdown just expired.  Reported once.
    Finished,
}

#[derive(Debug, Default)]
pub struct CountdownTimer {
    remaining_secs: u32,
    running: bool,
}

impl CountdownTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start (or restart) a countdown of `minutes`.
    pub fn start(&mut self, minutes: u32) -> Result<()> {
        if !MINUTES_RANGE.contains(&minutes) {
            return Err(Error::Config("countdown minutes"));
        }
        self.remaining_secs = minutes * 60;
        self.running = true;
        info!("Countdown started: {} min", minutes);
        Ok(())
    }

    /// Stop and reset to `00:00`.
    pub fn cancel(&mut self) {
        self.remaining_secs = 0;
        self.running = false;
    }

    /// Advance by one second.
    pub fn tick_second(&mut self) -> CountdownTick {
        if !self.running {
            return CountdownTick::Idle;
        }
        if self.remaining_secs > 0 {
            self.remaining_secs -= 1;
            return CountdownTick::Running {
                remaining_secs: self.remaining_secs,
            };
        }
        self.running = false;
        info!("Countdown finished");
        CountdownTick::Finished
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn remaining_secs(&self) -> u32 {
        self.remaining_secs
    }

    /// Remaining time as `mm:ss`.
    pub fn display(&self) -> String {
        format!("{:02}:{:02}", self.remaining_secs / 60, self.remaining_secs % 60)
    }
}
