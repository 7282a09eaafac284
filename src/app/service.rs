//! Application service: the hexagonal core.
//!
//! [`AppService`] owns the motion controller (and through it the
//! animation FSM), the in-memory document, the countdown timer and the
//! live configuration.  All I/O flows through port traits passed in at
//! call sites, so the whole service runs under test with mock adapters.
//!
//! ```text
//!  pointer / drag ──▶ ┌──────────────────────────────┐ ──▶ EventSink
//!                     │         AppService           │ ──▶ Notifier
//!  Scheduler ticks ──▶│ Motion · FSM · Reminders     │ ◀─▶ DocumentStore
//!                     └──────────────────────────────┘
//! ```
//!
//! Every method takes `&mut self`.  A multi-threaded host must keep the
//! service behind a single mutex or on one owning thread.

use chrono::NaiveDateTime;
use log::{info, warn};

use crate::config::PetConfig;
use crate::countdown::{CountdownTick, CountdownTimer};
use crate::error::{Error, Result};
use crate::fsm::{PetState, Transition};
use crate::geometry::Point;
use crate::motion::MotionController;
use crate::records::{Document, Note, PeriodRecord, Reminder};
use crate::reminders;

use super::commands::AppCommand;
use super::events::AppEvent;
use super::ports::{DocumentStore, EventSink, Notifier};

/// Title of the notification shown when the countdown expires.
pub const COUNTDOWN_TITLE: &str = "Timer";
/// Body of the notification shown when the countdown expires.
pub const COUNTDOWN_BODY: &str = "Time's up!";

pub struct AppService {
    motion: MotionController,
    doc: Document,
    countdown: CountdownTimer,
    config: PetConfig,
    doc_dirty: bool,
    timing_changed: bool,
    motion_ticks: u64,
}

impl AppService {
    /// Construct the service.  Rejects invalid configuration.
    pub fn new(config: PetConfig, doc: Document, start: Point) -> Result<Self> {
        let motion = MotionController::new(&config, start)?;
        Ok(Self {
            motion,
            doc,
            countdown: CountdownTimer::new(),
            config,
            doc_dirty: false,
            timing_changed: false,
            motion_ticks: 0,
        })
    }

    // ── Lifecycle ─────────────────────────────────────────────

    pub fn start(&mut self, sink: &mut impl EventSink) {
        sink.emit(&AppEvent::Started {
            state: self.motion.state(),
            position: self.motion.position(),
        });
        info!(
            "AppService started in {:?} with {} notes, {} reminders",
            self.motion.state(),
            self.doc.notes.len(),
            self.doc.reminders.len()
        );
    }

    // ── Pointer and drag input ────────────────────────────────

    pub fn pointer_sample(&mut self, pointer: Point, sink: &mut impl EventSink) {
        let t = self.motion.on_pointer_sample(pointer);
        self.emit_transition(t, sink);
    }

    /// Primary button pressed on the pet.
    pub fn press(&mut self, at: Point, sink: &mut impl EventSink) {
        let t = self.motion.begin_drag(at);
        self.emit_transition(t, sink);
    }

    /// Pointer moved while the pet is held.  `pos` is the pet's new
    /// top-left position, already corrected for the grab offset.
    pub fn drag_to(&mut self, pos: Point, sink: &mut impl EventSink) {
        let before = self.motion.position();
        self.motion.update_drag(pos);
        if self.motion.position() != before {
            sink.emit(&AppEvent::Moved(self.motion.position()));
        }
    }

    pub fn release(&mut self, sink: &mut impl EventSink) {
        let t = self.motion.end_drag();
        self.emit_transition(t, sink);
    }

    // ── Periodic ticks ────────────────────────────────────────

    /// One motion step.  No I/O happens here.
    pub fn motion_tick(&mut self, sink: &mut impl EventSink) {
        self.motion_ticks += 1;
        let before = self.motion.position();
        let t = self.motion.tick();
        if self.motion.position() != before {
            sink.emit(&AppEvent::Moved(self.motion.position()));
        }
        self.emit_transition(t, sink);
    }

    /// Fire every due reminder, then persist once if anything fired.
    /// Returns how many fired.
    pub fn reminder_tick(
        &mut self,
        now: NaiveDateTime,
        notifier: &mut impl Notifier,
        store: &impl DocumentStore,
        sink: &mut impl EventSink,
    ) -> usize {
        let due: Vec<String> = reminders::check_due(now, &self.doc.reminders)
            .into_iter()
            .map(|r| r.text.clone())
            .collect();
        if due.is_empty() {
            return 0;
        }

        let fired = reminders::fire_due(now, &mut self.doc.reminders, notifier);
        for text in due {
            sink.emit(&AppEvent::ReminderFired { text });
        }
        if self.config.prune_fired_reminders {
            reminders::prune_fired(&mut self.doc.reminders);
        }
        self.doc_dirty = true;
        self.save_if_dirty(store, sink);
        fired
    }

    /// One countdown second.
    pub fn countdown_tick(&mut self, notifier: &mut impl Notifier, sink: &mut impl EventSink) {
        match self.countdown.tick_second() {
            CountdownTick::Idle => {}
            CountdownTick::Running { .. } => {
                sink.emit(&AppEvent::CountdownUpdated(self.countdown.display()));
            }
            CountdownTick::Finished => {
                notifier.notify(COUNTDOWN_TITLE, COUNTDOWN_BODY);
                sink.emit(&AppEvent::CountdownFinished);
            }
        }
    }

    // ── Command handling ──────────────────────────────────────

    /// Process a command from the host's menus and dialogs.
    pub fn handle_command(
        &mut self,
        cmd: AppCommand,
        now: NaiveDateTime,
        store: &impl DocumentStore,
        sink: &mut impl EventSink,
    ) -> Result<()> {
        match cmd {
            AppCommand::SetFollow(flag) => {
                self.config.follow_enabled = flag;
                let t = self.motion.set_follow_enabled(flag);
                self.emit_transition(t, sink);
            }
            AppCommand::SetSpeed(px) => {
                self.motion.set_speed(px)?;
                self.config.move_speed_px = px;
                info!("Speed set to {}px/tick", px);
            }
            AppCommand::UpdateConfig(new_config) => {
                let t = self.motion.apply_config(&new_config)?;
                self.emit_transition(t, sink);
                if !same_timing(&self.config, &new_config) {
                    info!(
                        "Tick intervals changed: motion {}ms, pointer {}ms, reminders {}s",
                        new_config.motion_tick_ms,
                        new_config.pointer_poll_ms,
                        new_config.reminder_check_secs
                    );
                    self.timing_changed = true;
                }
                self.config = new_config;
                info!("Configuration updated at runtime");
            }
            AppCommand::AddNote(text) => {
                self.doc.add_note(Note::new(&text, now)?);
                self.doc_dirty = true;
            }
            AppCommand::DeleteNote(index) => {
                self.doc.delete_note(index)?;
                self.doc_dirty = true;
            }
            AppCommand::RecordPeriodDate(date) => {
                self.doc.record_period_date(date)?;
                self.doc_dirty = true;
            }
            AppCommand::AddPeriod { start, end } => {
                self.doc.add_period(PeriodRecord::new(start, end)?);
                self.doc_dirty = true;
            }
            AppCommand::DeletePeriod(index) => {
                self.doc.delete_period(index)?;
                self.doc_dirty = true;
            }
            AppCommand::AddReminder { text, at } => {
                self.doc.add_reminder(Reminder::new(&text, at)?);
                self.doc_dirty = true;
            }
            AppCommand::DeleteReminder(index) => {
                self.doc.delete_reminder(index)?;
                self.doc_dirty = true;
            }
            AppCommand::StartCountdown { minutes } => {
                self.countdown
                    .start(minutes.unwrap_or(self.config.countdown_default_minutes))?;
                sink.emit(&AppEvent::CountdownUpdated(self.countdown.display()));
            }
            AppCommand::CancelCountdown => {
                self.countdown.cancel();
                sink.emit(&AppEvent::CountdownUpdated(self.countdown.display()));
            }
            AppCommand::Save => {
                self.doc_dirty = true;
                if !self.save_if_dirty(store, sink) {
                    return Err(Error::Storage("document save failed"));
                }
                return Ok(());
            }
        }
        // Dialog edits persist immediately, like the dialogs they replace.
        self.save_if_dirty(store, sink);
        Ok(())
    }

    // ── Persistence ───────────────────────────────────────────

    /// Save the document if it has unsaved changes.  On failure the dirty
    /// flag stays set so a later call retries.  Returns `true` if saved.
    pub fn save_if_dirty(&mut self, store: &impl DocumentStore, sink: &mut impl EventSink) -> bool {
        if !self.doc_dirty {
            return false;
        }
        match store.save(&self.doc) {
            Ok(()) => {
                self.doc_dirty = false;
                sink.emit(&AppEvent::DocumentSaved);
                true
            }
            Err(e) => {
                warn!("Document save failed: {}", e);
                false
            }
        }
    }

    /// `true` once after an `UpdateConfig` that changed a tick interval.
    /// The host then re-times its scheduler from [`Self::current_config`].
    pub fn take_timing_change(&mut self) -> bool {
        std::mem::take(&mut self.timing_changed)
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn state(&self) -> PetState {
        self.motion.state()
    }

    pub fn position(&self) -> Point {
        self.motion.position()
    }

    pub fn current_clip(&self) -> &'static str {
        self.motion.fsm().current_clip()
    }

    pub fn motion(&self) -> &MotionController {
        &self.motion
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn countdown(&self) -> &CountdownTimer {
        &self.countdown
    }

    pub fn current_config(&self) -> PetConfig {
        self.config.clone()
    }

    pub fn is_dirty(&self) -> bool {
        self.doc_dirty
    }

    /// Motion ticks executed since startup.
    pub fn motion_ticks(&self) -> u64 {
        self.motion_ticks
    }

    // ── Internal ──────────────────────────────────────────────

    fn emit_transition(&self, t: Option<Transition>, sink: &mut impl EventSink) {
        if let Some(Transition { from, to }) = t {
            sink.emit(&AppEvent::StateChanged {
                from,
                to,
                clip: self.motion.fsm().clip_for(to),
            });
        }
    }
}

fn same_timing(a: &PetConfig, b: &PetConfig) -> bool {
    a.motion_tick_ms == b.motion_tick_ms
        && a.pointer_poll_ms == b.pointer_poll_ms
        && a.reminder_check_secs == b.reminder_check_secs
}
