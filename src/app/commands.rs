//! Inbound commands to the application service.
//!
//! These are the actions the host's menus and dialogs request (notes,
//! period tracking, reminders, timer, settings) that the
//! [`AppService`](super::service::AppService) interprets and acts upon.

use chrono::{NaiveDate, NaiveDateTime};

use crate::config::PetConfig;

#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Turn pointer following on or off.
    SetFollow(bool),

    /// Change travel speed (pixels per motion tick).
    SetSpeed(f64),

    /// Hot-reload configuration (e.g. from the settings dialog).  Changed
    /// tick intervals are picked up by the host through
    /// [`AppService::take_timing_change`](super::service::AppService::take_timing_change).
    UpdateConfig(PetConfig),

    /// Add a note stamped with the current time.
    AddNote(String),

    /// Delete the note at this index.
    DeleteNote(usize),

    /// Record one period day from the calendar.
    RecordPeriodDate(NaiveDate),

    /// Record a period spanning several days.
    AddPeriod { start: NaiveDate, end: NaiveDate },

    /// Delete the period record at this index.
    DeletePeriod(usize),

    /// Schedule a reminder.
    AddReminder { text: String, at: NaiveDateTime },

    /// Delete the reminder at this index.
    DeleteReminder(usize),

    /// Start the countdown timer.  `None` uses the configured default.
    StartCountdown { minutes: Option<u32> },

    /// Stop the countdown timer (e.g. its dialog was closed).
    CancelCountdown,

    /// Persist the document immediately.
    Save,
}
