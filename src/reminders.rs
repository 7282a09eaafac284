//! Reminder due-check.
//!
//! [`check_due`] is a pure read over the reminder list; the caller marks
//! entries fired and persists.  [`fire_due`] and [`prune_fired`] are the
//! mutation helpers the application service uses on the reminder tick.

use chrono::NaiveDateTime;
use log::{debug, info};

use crate::app::ports::Notifier;
use crate::records::Reminder;

/// Title passed to the notifier for every due reminder.
pub const REMINDER_TITLE: &str = "Reminder!";

/// Reminders whose trigger time has passed and that have not fired yet,
/// in input order.  Entries with a missing or unparseable time are skipped.
pub fn check_due(now: NaiveDateTime, reminders: &[Reminder]) -> Vec<&Reminder> {
    reminders.iter().filter(|r| is_due(now, r)).collect()
}

fn is_due(now: NaiveDateTime, reminder: &Reminder) -> bool {
    if reminder.fired {
        return false;
    }
    match reminder.trigger_time() {
        Some(at) => at <= now,
        None => {
            debug!("Skipping reminder '{}' with unreadable time", reminder.text);
            false
        }
    }
}

/// Notify once for each due reminder and mark it fired.
/// Returns how many fired.
pub fn fire_due(
    now: NaiveDateTime,
    reminders: &mut [Reminder],
    notifier: &mut impl Notifier,
) -> usize {
    let mut fired = 0;
    for reminder in reminders.iter_mut().filter(|r| is_due(now, r)) {
        info!("Reminder due: '{}'", reminder.text);
        notifier.notify(REMINDER_TITLE, &reminder.text);
        reminder.fired = true;
        fired += 1;
    }
    fired
}

/// Drop every reminder that has already fired.  Returns how many were removed.
pub fn prune_fired(reminders: &mut Vec<Reminder>) -> usize {
    let before = reminders.len();
    reminders.retain(|r| !r.fired);
    before - reminders.len()
}
