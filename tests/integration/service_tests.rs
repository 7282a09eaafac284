//! Integration tests: AppService → MotionController → FSM → events.

use chrono::NaiveDate;
use deskpet::adapters::memory::MemoryStore;
use deskpet::app::commands::AppCommand;
use deskpet::app::events::AppEvent;
use deskpet::app::ports::{ScheduleFiredKind, SchedulerDelegate, TickKind};
use deskpet::app::service::{AppService, COUNTDOWN_BODY, COUNTDOWN_TITLE};
use deskpet::config::PetConfig;
use deskpet::fsm::PetState;
use deskpet::geometry::{Point, Size, distance};
use deskpet::records::{Document, Reminder};
use deskpet::reminders::REMINDER_TITLE;
use deskpet::scheduler::Scheduler;

use super::mock_host::{RecordingNotifier, RecordingSink, at};

const PET: Size = Size::new(64.0, 64.0);

fn config() -> PetConfig {
    PetConfig {
        pet_size: PET,
        ..PetConfig::default()
    }
}

fn service_at(start: Point) -> AppService {
    AppService::new(config(), Document::default(), start).unwrap()
}

/// Pointer position that centres the pet on `top_left`.
fn pointer_for(top_left: Point) -> Point {
    top_left.offset(PET.width / 2.0, PET.height / 2.0)
}

// ── Motion ────────────────────────────────────────────────────

#[test]
fn follows_pointer_and_settles() {
    let mut app = service_at(Point::ORIGIN);
    let mut sink = RecordingSink::new();

    app.pointer_sample(pointer_for(Point::new(300.0, 0.0)), &mut sink);
    for _ in 0..60 {
        app.motion_tick(&mut sink);
    }

    assert_eq!(app.position(), Point::new(300.0, 0.0));
    assert_eq!(app.state(), PetState::Idle);
    assert_eq!(
        sink.transitions(),
        [
            (PetState::Idle, PetState::Moving),
            (PetState::Moving, PetState::Idle)
        ]
    );
    assert_eq!(sink.count(|e| matches!(e, AppEvent::Moved(_))), 60);
    assert_eq!(sink.last_position(), Some(Point::new(300.0, 0.0)));
}

#[test]
fn idle_tick_emits_nothing() {
    let mut app = service_at(Point::ORIGIN);
    let mut sink = RecordingSink::new();
    for _ in 0..10 {
        app.motion_tick(&mut sink);
    }
    assert!(sink.events.is_empty());
    assert_eq!(app.motion_ticks(), 10);
}

#[test]
fn drag_interrupts_travel_and_release_goes_idle() {
    let mut app = service_at(Point::ORIGIN);
    let mut sink = RecordingSink::new();

    app.pointer_sample(pointer_for(Point::new(400.0, 400.0)), &mut sink);
    app.motion_tick(&mut sink);
    app.press(app.position(), &mut sink);
    assert_eq!(app.state(), PetState::Reacting);
    assert!(app.motion().target().is_none());

    let held = app.position();
    app.motion_tick(&mut sink);
    assert_eq!(app.position(), held);

    app.drag_to(Point::new(10.0, 20.0), &mut sink);
    assert_eq!(sink.last_position(), Some(Point::new(10.0, 20.0)));

    app.release(&mut sink);
    assert_eq!(app.state(), PetState::Idle);
    assert_eq!(
        sink.transitions(),
        [
            (PetState::Idle, PetState::Moving),
            (PetState::Moving, PetState::Reacting),
            (PetState::Reacting, PetState::Idle)
        ]
    );
}

#[test]
fn follow_toggle_via_command() {
    let mut app = service_at(Point::ORIGIN);
    let mut sink = RecordingSink::new();
    let store = MemoryStore::new();
    let now = at("2024-06-01 12:00:00");

    app.pointer_sample(pointer_for(Point::new(500.0, 0.0)), &mut sink);
    app.handle_command(AppCommand::SetFollow(false), now, &store, &mut sink)
        .unwrap();
    assert_eq!(app.state(), PetState::Idle);
    assert!(!app.current_config().follow_enabled);

    app.pointer_sample(pointer_for(Point::new(900.0, 0.0)), &mut sink);
    assert_eq!(app.state(), PetState::Idle);
}

#[test]
fn update_config_changes_speed_and_threshold() {
    let mut app = service_at(Point::ORIGIN);
    let mut sink = RecordingSink::new();
    let store = MemoryStore::new();
    let now = at("2024-06-01 12:00:00");

    let new_config = PetConfig {
        move_speed_px: 10.0,
        activation_threshold_px: 500.0,
        ..config()
    };
    app.handle_command(AppCommand::UpdateConfig(new_config), now, &store, &mut sink)
        .unwrap();

    app.pointer_sample(pointer_for(Point::new(400.0, 0.0)), &mut sink);
    assert_eq!(app.state(), PetState::Idle, "400px is inside the new threshold");

    app.pointer_sample(pointer_for(Point::new(600.0, 0.0)), &mut sink);
    app.motion_tick(&mut sink);
    assert_eq!(app.position(), Point::new(10.0, 0.0));
}

#[test]
fn invalid_config_update_is_rejected_without_side_effects() {
    let mut app = service_at(Point::ORIGIN);
    let mut sink = RecordingSink::new();
    let store = MemoryStore::new();
    let bad = PetConfig {
        pet_size: Size::new(0.0, 0.0),
        ..config()
    };
    assert!(
        app.handle_command(
            AppCommand::UpdateConfig(bad),
            at("2024-06-01 12:00:00"),
            &store,
            &mut sink
        )
        .is_err()
    );
    assert_eq!(app.current_config(), config());
}

// ── Reminders ─────────────────────────────────────────────────

#[test]
fn due_reminders_notify_prune_and_save_once() {
    let mut doc = Document::default();
    doc.add_reminder(Reminder::new("water plants", at("2024-06-01 09:00:00")).unwrap());
    doc.add_reminder(Reminder::new("call mom", at("2024-06-01 18:00:00")).unwrap());
    let mut app = AppService::new(config(), doc, Point::ORIGIN).unwrap();

    let store = MemoryStore::new();
    let mut sink = RecordingSink::new();
    let mut notifier = RecordingNotifier::default();

    let fired = app.reminder_tick(at("2024-06-01 12:00:00"), &mut notifier, &store, &mut sink);
    assert_eq!(fired, 1);
    assert_eq!(
        notifier.shown,
        [(REMINDER_TITLE.to_string(), "water plants".to_string())]
    );
    assert_eq!(app.document().reminders.len(), 1);
    assert_eq!(store.save_count(), 1);
    assert_eq!(store.stored().unwrap().reminders[0].text, "call mom");

    // Nothing new due: no notification, no save.
    app.reminder_tick(at("2024-06-01 12:01:00"), &mut notifier, &store, &mut sink);
    assert_eq!(notifier.shown.len(), 1);
    assert_eq!(store.save_count(), 1);
}

#[test]
fn fired_reminders_kept_when_pruning_disabled() {
    let mut doc = Document::default();
    doc.add_reminder(Reminder::new("stretch", at("2024-06-01 09:00:00")).unwrap());
    let cfg = PetConfig {
        prune_fired_reminders: false,
        ..config()
    };
    let mut app = AppService::new(cfg, doc, Point::ORIGIN).unwrap();
    let store = MemoryStore::new();
    let mut sink = RecordingSink::new();
    let mut notifier = RecordingNotifier::default();

    app.reminder_tick(at("2024-06-01 12:00:00"), &mut notifier, &store, &mut sink);
    app.reminder_tick(at("2024-06-01 12:01:00"), &mut notifier, &store, &mut sink);

    assert_eq!(notifier.shown.len(), 1);
    assert!(app.document().reminders[0].fired);
}

#[test]
fn malformed_reminder_is_skipped_not_fatal() {
    let mut doc = Document::default();
    doc.reminders.push(Reminder {
        text: "garbled".into(),
        datetime: Some("not a time".into()),
        fired: false,
    });
    let mut app = AppService::new(config(), doc, Point::ORIGIN).unwrap();
    let store = MemoryStore::new();
    let mut sink = RecordingSink::new();
    let mut notifier = RecordingNotifier::default();

    assert_eq!(
        app.reminder_tick(at("2030-01-01 00:00:00"), &mut notifier, &store, &mut sink),
        0
    );
    assert_eq!(app.document().reminders.len(), 1);
    assert_eq!(store.save_count(), 0);
}

// ── Document commands ─────────────────────────────────────────

#[test]
fn dialog_edits_persist_immediately() {
    let mut app = service_at(Point::ORIGIN);
    let store = MemoryStore::new();
    let mut sink = RecordingSink::new();
    let now = at("2024-06-01 12:00:00");

    app.handle_command(AppCommand::AddNote("buy milk".into()), now, &store, &mut sink)
        .unwrap();
    app.handle_command(
        AppCommand::RecordPeriodDate(NaiveDate::from_ymd_opt(2024, 5, 28).unwrap()),
        now,
        &store,
        &mut sink,
    )
    .unwrap();
    app.handle_command(
        AppCommand::AddReminder {
            text: "dentist".into(),
            at: at("2024-06-03 15:30:00"),
        },
        now,
        &store,
        &mut sink,
    )
    .unwrap();

    assert_eq!(store.save_count(), 3);
    assert!(!app.is_dirty());
    let saved = store.stored().unwrap();
    assert_eq!(saved.notes[0].timestamp, "2024-06-01 12:00:00");
    assert_eq!(saved.period_records.len(), 1);
    assert_eq!(
        saved.reminders[0].datetime.as_deref(),
        Some("2024-06-03 15:30:00")
    );

    app.handle_command(AppCommand::DeleteNote(0), now, &store, &mut sink)
        .unwrap();
    assert!(store.stored().unwrap().notes.is_empty());
}

#[test]
fn rejected_edit_does_not_save() {
    let mut app = service_at(Point::ORIGIN);
    let store = MemoryStore::new();
    let mut sink = RecordingSink::new();
    let now = at("2024-06-01 12:00:00");

    assert!(
        app.handle_command(AppCommand::AddNote("   ".into()), now, &store, &mut sink)
            .is_err()
    );
    assert!(
        app.handle_command(AppCommand::DeleteReminder(4), now, &store, &mut sink)
            .is_err()
    );
    assert_eq!(store.save_count(), 0);
}

// ── Countdown ─────────────────────────────────────────────────

#[test]
fn countdown_notifies_once_when_done() {
    let mut app = service_at(Point::ORIGIN);
    let store = MemoryStore::new();
    let mut sink = RecordingSink::new();
    let mut notifier = RecordingNotifier::default();

    app.handle_command(
        AppCommand::StartCountdown { minutes: Some(1) },
        at("2024-06-01 12:00:00"),
        &store,
        &mut sink,
    )
    .unwrap();
    for _ in 0..70 {
        app.countdown_tick(&mut notifier, &mut sink);
    }

    assert_eq!(
        notifier.shown,
        [(COUNTDOWN_TITLE.to_string(), COUNTDOWN_BODY.to_string())]
    );
    assert_eq!(sink.count(|e| *e == AppEvent::CountdownFinished), 1);
    assert!(!app.countdown().is_running());
}

// ── Scheduler-driven loop ─────────────────────────────────────

struct Driver<'a> {
    app: &'a mut AppService,
    sink: RecordingSink,
    pointer: Point,
}

impl SchedulerDelegate for Driver<'_> {
    fn on_schedule_fired(&mut self, tick: TickKind, _kind: ScheduleFiredKind) {
        match tick {
            TickKind::Motion => self.app.motion_tick(&mut self.sink),
            TickKind::PointerPoll => self.app.pointer_sample(self.pointer, &mut self.sink),
            TickKind::ReminderCheck | TickKind::Countdown => {}
        }
    }
}

#[test]
fn scheduler_drives_pet_until_within_range() {
    let cfg = config();
    let goal = Point::new(400.0, 0.0);
    let mut app = service_at(Point::ORIGIN);
    let mut sched = Scheduler::for_pet(&cfg);
    let mut driver = Driver {
        app: &mut app,
        sink: RecordingSink::new(),
        pointer: pointer_for(goal),
    };

    // Polling keeps re-checking the range, so travel stops once the pet
    // is within the activation threshold of the pointer.
    for _ in 0..500 {
        sched.tick(10, &mut driver);
    }
    let transitions = driver.sink.transitions();
    let gap = distance(app.position(), goal);
    assert_eq!(app.state(), PetState::Idle);
    assert!(gap <= cfg.activation_threshold_px, "gap {gap}");
    assert!(gap > cfg.activation_threshold_px - 2.0 * cfg.move_speed_px);
    assert_eq!(
        transitions,
        [
            (PetState::Idle, PetState::Moving),
            (PetState::Moving, PetState::Idle)
        ]
    );
}
