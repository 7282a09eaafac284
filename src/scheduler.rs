//! Tick scheduler.
//!
//! Turns elapsed wall time into the periodic callbacks the pet core needs.
//! The scheduler notifies a [`SchedulerDelegate`] when a schedule fires;
//! the host loop implements the delegate and calls into
//! [`AppService`](crate::app::service::AppService).
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     Schedules                                │
//! │                                                              │
//! │  ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌──────────┐   │
//! │  │ Motion    │  │ Pointer   │  │ Reminder  │  │Countdown │   │
//! │  │ 50 ms     │  │ 100 ms    │  │ 60 s +    │  │ 1 s      │   │
//! │  │           │  │           │  │ at start  │  │          │   │
//! │  └─────┬─────┘  └─────┬─────┘  └─────┬─────┘  └─────┬────┘   │
//! │        ▼              ▼              ▼              ▼        │
//! │  ┌────────────────────────────────────────────────────────┐  │
//! │  │              SchedulerDelegate                         │  │
//! │  └───────────────────────┬────────────────────────────────┘  │
//! │                          ▼                                   │
//! │        AppService.motion_tick() / reminder_tick() / ...      │
//! └──────────────────────────────────────────────────────────────┘
//! ```

use crate::app::ports::{ScheduleFiredKind, SchedulerDelegate, TickKind};
use crate::config::PetConfig;
use log::info;

// ═══════════════════════════════════════════════════════════════
//  Schedule types
// ═══════════════════════════════════════════════════════════════

/// A single schedule entry.
#[derive(Debug, Clone)]
pub struct Schedule {
    /// Which callback this schedule drives.
    pub tick: TickKind,
    pub kind: ScheduleKind,
    pub enabled: bool,
}

/// How and when a schedule fires.
#[derive(Debug, Clone, Copy)]
pub enum ScheduleKind {
    /// Fire every `interval_ms` milliseconds.
    Periodic { interval_ms: u32 },
    /// Fire once after `delay_ms`, then auto-disable.
    OneShot { delay_ms: u32 },
}

// ═══════════════════════════════════════════════════════════════
//  Scheduler engine
// ═══════════════════════════════════════════════════════════════

/// Maximum number of concurrent schedules (stack-allocated).
pub const MAX_SCHEDULES: usize = 8;

pub struct Scheduler {
    schedules: heapless::Vec<ScheduleEntry, MAX_SCHEDULES>,
    /// Global enable flag.  Stopping the scheduler cancels every tick.
    enabled: bool,
}

#[derive(Debug, Clone)]
struct ScheduleEntry {
    schedule: Schedule,
    /// Milliseconds accumulated since the last fire.
    elapsed_ms: u64,
    /// Whether a one-shot has fired.
    fired: bool,
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl Scheduler {
    pub fn new() -> Self {
        Self {
            schedules: heapless::Vec::new(),
            enabled: true,
        }
    }

    /// The four periodic callbacks of the pet, timed from `config`, plus a
    /// one-shot reminder check on the first tick so reminders that fell due
    /// while the pet was not running fire straight away.
    pub fn for_pet(config: &PetConfig) -> Self {
        let mut sched = Self::new();
        for (tick, interval_ms) in pet_intervals(config) {
            sched.add(Schedule {
                tick,
                kind: ScheduleKind::Periodic { interval_ms },
                enabled: true,
            });
        }
        sched.add(Schedule {
            tick: TickKind::ReminderCheck,
            kind: ScheduleKind::OneShot { delay_ms: 0 },
            enabled: true,
        });
        sched
    }

    /// Apply new tick intervals from `config` to the periodic schedules.
    /// Re-timed schedules restart their interval from zero.
    pub fn retime(&mut self, config: &PetConfig) {
        for (tick, interval_ms) in pet_intervals(config) {
            for entry in &mut self.schedules {
                if entry.schedule.tick != tick {
                    continue;
                }
                if let ScheduleKind::Periodic { interval_ms: old } = &mut entry.schedule.kind {
                    if *old != interval_ms {
                        info!("Scheduler: {:?} re-timed {}ms -> {}ms", tick, old, interval_ms);
                        *old = interval_ms;
                        entry.elapsed_ms = 0;
                    }
                }
            }
        }
    }

    /// Add a schedule.  Returns the slot index, or `None` if full.
    pub fn add(&mut self, schedule: Schedule) -> Option<usize> {
        let tick = schedule.tick;
        let entry = ScheduleEntry {
            schedule,
            elapsed_ms: 0,
            fired: false,
        };
        if self.schedules.push(entry).is_err() {
            return None;
        }
        let slot = self.schedules.len() - 1;
        info!("Scheduler: added {:?} at slot {}", tick, slot);
        Some(slot)
    }

    /// Remove every schedule driving `tick`.
    pub fn remove(&mut self, tick: TickKind) {
        self.schedules.retain(|e| e.schedule.tick != tick);
    }

    /// Enable or disable the entire scheduler.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Account for `elapsed_ms` of wall time and fire what is due.
    ///
    /// Each schedule fires at most once per call; a backlog longer than one
    /// interval is dropped rather than replayed.
    pub fn tick(&mut self, elapsed_ms: u64, delegate: &mut dyn SchedulerDelegate) {
        if !self.enabled {
            return;
        }

        for entry in &mut self.schedules {
            if !entry.schedule.enabled {
                continue;
            }
            entry.elapsed_ms = entry.elapsed_ms.saturating_add(elapsed_ms);

            match entry.schedule.kind {
                ScheduleKind::Periodic { interval_ms } => {
                    let interval = u64::from(interval_ms.max(1));
                    if entry.elapsed_ms >= interval {
                        delegate.on_schedule_fired(entry.schedule.tick, ScheduleFiredKind::Periodic);
                        entry.elapsed_ms %= interval;
                    }
                }

                ScheduleKind::OneShot { delay_ms } => {
                    if !entry.fired && entry.elapsed_ms >= u64::from(delay_ms) {
                        info!(
                            "Scheduler: {:?} one-shot fired (after {}ms)",
                            entry.schedule.tick, delay_ms
                        );
                        delegate.on_schedule_fired(entry.schedule.tick, ScheduleFiredKind::OneShot);
                        entry.fired = true;
                        entry.schedule.enabled = false;
                    }
                }
            }
        }
    }

    /// Number of active (enabled) schedules.
    pub fn active_count(&self) -> usize {
        self.schedules.iter().filter(|e| e.schedule.enabled).count()
    }
}

fn pet_intervals(config: &PetConfig) -> [(TickKind, u32); 4] {
    [
        (TickKind::Motion, config.motion_tick_ms),
        (TickKind::PointerPoll, config.pointer_poll_ms),
        (TickKind::ReminderCheck, config.reminder_check_secs.saturating_mul(1000)),
        (TickKind::Countdown, 1000),
    ]
}

// ═══════════════════════════════════════════════════════════════
//  Tests
// ═══════════════════════════════════════════════════════════════
