//! System clock adapter.
//!
//! Wall-clock time comes from the local timezone, matching how reminder
//! times are entered.  Uptime is monotonic from adapter creation.

use std::time::Instant;

use chrono::{Local, NaiveDateTime};

use crate::app::ports::Clock;

pub struct SystemClock {
    start: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }

    fn uptime_ms(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }
}
