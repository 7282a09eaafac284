//! Unified error types for the pet core.
//!
//! A single `Error` enum that every subsystem converts into, so the host
//! loop handles failures uniformly.  All variants are `Copy`; none of them
//! is fatal, and callers degrade to "do nothing this tick".

use core::fmt;

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A configuration value is out of range.  Carries the field name.
    Config(&'static str),
    /// A record failed constructor validation or a lookup missed.
    Record(RecordError),
    /// Persisting the document failed.
    Storage(&'static str),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(field) => write!(f, "config: invalid {field}"),
            Self::Record(e) => write!(f, "record: {e}"),
            Self::Storage(msg) => write!(f, "storage: {msg}"),
        }
    }
}

impl std::error::Error for Error {}

// ---------------------------------------------------------------------------
// Record errors
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordError {
    /// Text is empty after trimming.
    EmptyText,
    /// Period end date precedes its start date.
    ReversedDateRange,
    /// The date is already recorded.
    DuplicateDate,
    /// No record at the given index.
    IndexOutOfRange,
}

impl fmt::Display for RecordError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyText => write!(f, "text is empty"),
            Self::ReversedDateRange => write!(f, "end date before start date"),
            Self::DuplicateDate => write!(f, "date already recorded"),
            Self::IndexOutOfRange => write!(f, "index out of range"),
        }
    }
}

impl From<RecordError> for Error {
    fn from(e: RecordError) -> Self {
        Self::Record(e)
    }
}

// ---------------------------------------------------------------------------
// Convenience Result alias
// ---------------------------------------------------------------------------

/// Crate-wide `Result` alias.
pub type Result<T> = core::result::Result<T, Error>;
