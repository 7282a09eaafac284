//! Persisted record types and the document that groups them.
//!
//! The document is a user-editable JSON file, so reminder trigger times are
//! kept as the raw persisted string.  A malformed time survives a load and
//! is simply never due.  An entry that cannot be read at all is dropped on
//! its own; the rest of the document still loads.

use chrono::{NaiveDate, NaiveDateTime};
use log::warn;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, RecordError, Result};

/// Wall-clock format used for every persisted timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp the way the document stores it.
pub fn format_timestamp(at: NaiveDateTime) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse a stored timestamp.  `None` on any malformed input.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), TIMESTAMP_FORMAT).ok()
}

fn non_empty(text: &str) -> Result<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(RecordError::EmptyText.into());
    }
    Ok(trimmed.to_owned())
}

// ───────────────────────────────────────────────────────────────
// Note
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub timestamp: String,
    pub text: String,
}

impl Note {
    pub fn new(text: &str, at: NaiveDateTime) -> Result<Self> {
        Ok(Self {
            timestamp: format_timestamp(at),
            text: non_empty(text)?,
        })
    }
}

// ───────────────────────────────────────────────────────────────
// Period record
// ───────────────────────────────────────────────────────────────

/// Older data files store each period day as a bare `"YYYY-MM-DD"` string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "StoredPeriod")]
pub struct PeriodRecord {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredPeriod {
    Day(NaiveDate),
    Range {
        start_date: NaiveDate,
        end_date: NaiveDate,
    },
}

impl TryFrom<StoredPeriod> for PeriodRecord {
    type Error = Error;

    fn try_from(stored: StoredPeriod) -> Result<Self> {
        match stored {
            StoredPeriod::Day(date) => Ok(Self::single_day(date)),
            StoredPeriod::Range {
                start_date,
                end_date,
            } => Self::new(start_date, end_date),
        }
    }
}

impl PeriodRecord {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Result<Self> {
        if end_date < start_date {
            return Err(RecordError::ReversedDateRange.into());
        }
        Ok(Self {
            start_date,
            end_date,
        })
    }

    /// A record covering one calendar day.
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start_date: date,
            end_date: date,
        }
    }

    /// Length in days, inclusive of both ends.
    pub fn days(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }
}

// ───────────────────────────────────────────────────────────────
// Reminder
// ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reminder {
    #[serde(default)]
    pub text: String,
    /// Trigger time in [`TIMESTAMP_FORMAT`].  May be missing or malformed
    /// in hand-edited files; a non-string value loads as `None`.
    #[serde(default, deserialize_with = "string_or_none")]
    pub datetime: Option<String>,
    #[serde(default, alias = "completed")]
    pub fired: bool,
}

impl Reminder {
    pub fn new(text: &str, at: NaiveDateTime) -> Result<Self> {
        Ok(Self {
            text: non_empty(text)?,
            datetime: Some(format_timestamp(at)),
            fired: false,
        })
    }

    /// Parsed trigger time, if present and well-formed.
    pub fn trigger_time(&self) -> Option<NaiveDateTime> {
        self.datetime.as_deref().and_then(parse_timestamp)
    }
}

// ───────────────────────────────────────────────────────────────
// Document
// ───────────────────────────────────────────────────────────────

/// Everything the pet persists.  Missing sections load as empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    #[serde(deserialize_with = "skip_unreadable")]
    pub notes: Vec<Note>,
    #[serde(deserialize_with = "skip_unreadable")]
    pub period_records: Vec<PeriodRecord>,
    #[serde(deserialize_with = "skip_unreadable")]
    pub reminders: Vec<Reminder>,
}

fn string_or_none<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(raw) => Some(raw),
        _ => None,
    })
}

/// Deserialize a list entry by entry, dropping the entries that fail.
/// A section that is not a list at all loads as empty.
fn skip_unreadable<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        warn!("Document section is not a list, ignoring it");
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(entry) => Some(entry),
            Err(e) => {
                warn!("Skipping unreadable document entry: {}", e);
                None
            }
        })
        .collect())
}

impl Document {
    pub fn add_note(&mut self, note: Note) {
        self.notes.push(note);
    }

    pub fn delete_note(&mut self, index: usize) -> Result<Note> {
        if index >= self.notes.len() {
            return Err(RecordError::IndexOutOfRange.into());
        }
        Ok(self.notes.remove(index))
    }

    /// Record a single day.  A date that is already covered is rejected.
    pub fn record_period_date(&mut self, date: NaiveDate) -> Result<()> {
        let covered = self
            .period_records
            .iter()
            .any(|r| r.start_date <= date && date <= r.end_date);
        if covered {
            return Err(RecordError::DuplicateDate.into());
        }
        self.period_records.push(PeriodRecord::single_day(date));
        Ok(())
    }

    pub fn add_period(&mut self, record: PeriodRecord) {
        self.period_records.push(record);
    }

    pub fn delete_period(&mut self, index: usize) -> Result<PeriodRecord> {
        if index >= self.period_records.len() {
            return Err(RecordError::IndexOutOfRange.into());
        }
        Ok(self.period_records.remove(index))
    }

    /// Period history, newest first.
    pub fn period_history(&self) -> Vec<PeriodRecord> {
        let mut history = self.period_records.clone();
        history.sort_by(|a, b| b.start_date.cmp(&a.start_date));
        history
    }

    pub fn add_reminder(&mut self, reminder: Reminder) {
        self.reminders.push(reminder);
    }

    pub fn delete_reminder(&mut self, index: usize) -> Result<Reminder> {
        if index >= self.reminders.len() {
            return Err(RecordError::IndexOutOfRange.into());
        }
        Ok(self.reminders.remove(index))
    }

    /// Reminders ordered by trigger time.  Entries without a readable time
    /// sort last, in their stored order.
    pub fn reminders_by_time(&self) -> Vec<&Reminder> {
        let mut sorted: Vec<&Reminder> = self.reminders.iter().collect();
        sorted.sort_by_key(|r| (r.trigger_time().is_none(), r.trigger_time()));
        sorted
    }
}
