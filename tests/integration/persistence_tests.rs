//! Integration tests: JsonStore on a real filesystem.

use std::fs;

use chrono::NaiveDate;
use deskpet::adapters::json_store::{DOCUMENT_FILE, JsonStore};
use deskpet::app::commands::AppCommand;
use deskpet::app::ports::{ConfigPort, DocumentStore};
use deskpet::app::service::AppService;
use deskpet::config::PetConfig;
use deskpet::geometry::Point;
use deskpet::records::{Document, Reminder};

use super::mock_host::{RecordingNotifier, RecordingSink, at};

#[test]
fn document_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    let mut sink = RecordingSink::new();
    let now = at("2024-06-01 12:00:00");

    {
        let mut app =
            AppService::new(PetConfig::default(), DocumentStore::load(&store), Point::ORIGIN)
                .unwrap();
        app.handle_command(AppCommand::AddNote("first".into()), now, &store, &mut sink)
            .unwrap();
        app.handle_command(
            AppCommand::AddPeriod {
                start: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
                end: NaiveDate::from_ymd_opt(2024, 5, 5).unwrap(),
            },
            now,
            &store,
            &mut sink,
        )
        .unwrap();
    }

    let reloaded = DocumentStore::load(&store);
    assert_eq!(reloaded.notes.len(), 1);
    assert_eq!(reloaded.notes[0].text, "first");
    assert_eq!(reloaded.period_records[0].days(), 5);
}

#[test]
fn corrupt_file_falls_back_to_empty_and_is_overwritten() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    fs::write(dir.path().join(DOCUMENT_FILE), b"\x00\x01 definitely not json").unwrap();

    let doc = DocumentStore::load(&store);
    assert_eq!(doc, Document::default());

    let mut app = AppService::new(PetConfig::default(), doc, Point::ORIGIN).unwrap();
    let mut sink = RecordingSink::new();
    app.handle_command(
        AppCommand::AddNote("fresh start".into()),
        at("2024-06-01 12:00:00"),
        &store,
        &mut sink,
    )
    .unwrap();

    assert_eq!(DocumentStore::load(&store).notes[0].text, "fresh start");
}

#[test]
fn hand_edited_file_with_bad_reminder_still_loads() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    fs::write(
        dir.path().join(DOCUMENT_FILE),
        r#"{
            "notes": [{"timestamp": "2024-01-01 08:00:00", "text": "hello"}],
            "reminders": [
                {"text": "good", "datetime": "2024-01-01 09:00:00", "completed": false},
                {"text": "bad", "datetime": "9am-ish"},
                {"text": "none"}
            ]
        }"#,
    )
    .unwrap();

    let doc = DocumentStore::load(&store);
    assert_eq!(doc.notes.len(), 1);
    assert_eq!(doc.reminders.len(), 3);
    assert!(doc.period_records.is_empty());

    let mut app = AppService::new(PetConfig::default(), doc, Point::ORIGIN).unwrap();
    let mut notifier = RecordingNotifier::default();
    let mut sink = RecordingSink::new();
    let fired = app.reminder_tick(at("2024-01-02 00:00:00"), &mut notifier, &store, &mut sink);
    assert_eq!(fired, 1);

    let saved = DocumentStore::load(&store);
    let texts: Vec<_> = saved.reminders.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, ["bad", "none"]);
}

#[test]
fn legacy_file_with_date_string_periods_loads() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    fs::write(
        dir.path().join(DOCUMENT_FILE),
        r#"{
            "notes": [{"timestamp": "2024-01-01 08:00:00", "text": "keep me"}],
            "period_records": ["2024-03-01", "2024-02-01"],
            "reminders": [{"text": "later", "datetime": "2030-01-01 09:00:00", "completed": false}]
        }"#,
    )
    .unwrap();

    let doc = DocumentStore::load(&store);
    assert_eq!(doc.notes.len(), 1);
    assert_eq!(doc.reminders.len(), 1);
    let history: Vec<_> = doc.period_history().iter().map(|p| p.start_date).collect();
    assert_eq!(
        history,
        [
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        ]
    );

    // The first edit must not lose anything that was already there.
    let mut app = AppService::new(PetConfig::default(), doc, Point::ORIGIN).unwrap();
    let mut sink = RecordingSink::new();
    app.handle_command(
        AppCommand::AddNote("new".into()),
        at("2024-06-01 12:00:00"),
        &store,
        &mut sink,
    )
    .unwrap();
    let saved = DocumentStore::load(&store);
    assert_eq!(saved.notes.len(), 2);
    assert_eq!(saved.period_records.len(), 2);
    assert_eq!(saved.reminders.len(), 1);
}

#[test]
fn non_string_reminder_time_keeps_the_rest_of_the_document() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    fs::write(
        dir.path().join(DOCUMENT_FILE),
        r#"{
            "notes": [{"timestamp": "2024-01-01 08:00:00", "text": "keep me"}],
            "reminders": [
                {"text": "ok", "datetime": "2030-01-01 09:00:00"},
                {"text": "bad", "datetime": 1700000000},
                {"datetime": "2030-01-01 09:00:00"}
            ]
        }"#,
    )
    .unwrap();

    let doc = DocumentStore::load(&store);
    assert_eq!(doc.notes.len(), 1);
    assert_eq!(doc.reminders.len(), 3);
    assert_eq!(doc.reminders[1].datetime, None);
    assert_eq!(doc.reminders[2].text, "");

    let mut app = AppService::new(PetConfig::default(), doc, Point::ORIGIN).unwrap();
    let mut notifier = RecordingNotifier::default();
    let mut sink = RecordingSink::new();
    assert_eq!(
        app.reminder_tick(at("2031-01-01 00:00:00"), &mut notifier, &store, &mut sink),
        2
    );
    let saved = DocumentStore::load(&store);
    assert_eq!(saved.notes.len(), 1);
    let texts: Vec<_> = saved.reminders.iter().map(|r| r.text.as_str()).collect();
    assert_eq!(texts, ["bad"]);
}

#[test]
fn settings_roundtrip_through_json() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());
    let cfg = PetConfig {
        move_speed_px: 12.0,
        follow_enabled: false,
        ..PetConfig::default()
    };
    ConfigPort::save(&store, &cfg).unwrap();
    assert_eq!(ConfigPort::load(&store), Ok(cfg));
}

#[test]
fn save_is_last_write_wins() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonStore::new(dir.path());

    let mut a = Document::default();
    a.add_reminder(Reminder::new("from a", at("2024-01-01 09:00:00")).unwrap());
    let mut b = Document::default();
    b.add_reminder(Reminder::new("from b", at("2024-01-01 09:00:00")).unwrap());

    DocumentStore::save(&store, &a).unwrap();
    DocumentStore::save(&store, &b).unwrap();
    assert_eq!(DocumentStore::load(&store), b);
}
