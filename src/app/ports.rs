//! Port traits: the hexagonal boundary between the pet core and the host.
//!
//! ```text
//!   Adapter ──▶ Port trait ──▶ AppService (domain)
//! ```
//!
//! Driven adapters (document store, notifier, event sink, clock, pointer)
//! implement these traits.  The [`AppService`](super::service::AppService)
//! consumes them via generics, so the core never touches a GUI toolkit,
//! the filesystem or the system clock directly.

use chrono::NaiveDateTime;

use crate::config::PetConfig;
use crate::geometry::Point;
use crate::records::Document;

// ───────────────────────────────────────────────────────────────
// Document store (driven adapter: domain ↔ JSON file)
// ───────────────────────────────────────────────────────────────

/// Loads and saves the pet's [`Document`].
///
/// Last write wins.  There is no locking against concurrent external
/// writers and no transactional guarantee.
pub trait DocumentStore {
    /// Load the document.  A missing or unreadable store yields
    /// [`Document::default()`]; loading never fails.
    fn load(&self) -> Document;

    /// Overwrite the stored document.
    fn save(&self, doc: &Document) -> Result<(), StorageError>;
}

// ───────────────────────────────────────────────────────────────
// Configuration port
// ───────────────────────────────────────────────────────────────

/// Loads and persists [`PetConfig`].
///
/// Implementations MUST validate before persisting and reject invalid
/// values with [`ConfigError::ValidationFailed`] rather than clamping.
pub trait ConfigPort {
    /// Returns [`PetConfig::default()`] if no stored config exists.
    fn load(&self) -> Result<PetConfig, ConfigError>;

    fn save(&self, config: &PetConfig) -> Result<(), ConfigError>;
}

// ───────────────────────────────────────────────────────────────
// Notifier port (driven adapter: domain → desktop notification)
// ───────────────────────────────────────────────────────────────

/// Shows a message to the user.  Invoked once per newly due reminder and
/// once per finished countdown.
pub trait Notifier {
    fn notify(&mut self, title: &str, body: &str);
}

// ───────────────────────────────────────────────────────────────
// Event sink port (driven adapter: domain → renderer / logging)
// ───────────────────────────────────────────────────────────────

/// The domain emits structured [`AppEvent`](super::events::AppEvent)s
/// through this port.  The rendering collaborator listens here for
/// position and animation changes.
pub trait EventSink {
    fn emit(&mut self, event: &super::events::AppEvent);
}

// ───────────────────────────────────────────────────────────────
// Clock port
// ───────────────────────────────────────────────────────────────

pub trait Clock {
    /// Local wall-clock time, used for reminders and note timestamps.
    fn now(&self) -> NaiveDateTime;

    /// Monotonic milliseconds since the clock was created.
    fn uptime_ms(&self) -> u64;
}

// ───────────────────────────────────────────────────────────────
// Pointer source (driving adapter: host input → domain)
// ───────────────────────────────────────────────────────────────

/// Samples the global pointer position.  `None` when no sample is
/// available (pointer off-screen, input source exhausted).
pub trait PointerSource {
    fn sample(&mut self) -> Option<Point>;
}

// ───────────────────────────────────────────────────────────────
// Scheduler delegate (decouples scheduler from the service)
// ───────────────────────────────────────────────────────────────

/// Callback trait that the [`Scheduler`](crate::scheduler::Scheduler)
/// invokes when a schedule fires.  The host loop implements it by calling
/// the matching `AppService` tick method.
pub trait SchedulerDelegate {
    fn on_schedule_fired(&mut self, tick: TickKind, kind: ScheduleFiredKind);
}

/// Which periodic callback a schedule drives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickKind {
    /// Step the pet toward its target.
    Motion,
    /// Sample the pointer and maybe pick a new target.
    PointerPoll,
    /// Look for due reminders.
    ReminderCheck,
    /// Advance the countdown timer by one second.
    Countdown,
}

/// Discriminant passed to [`SchedulerDelegate::on_schedule_fired`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScheduleFiredKind {
    Periodic,
    /// A one-shot schedule fired (auto-disables after).
    OneShot,
}

// ───────────────────────────────────────────────────────────────
// Error types
// ───────────────────────────────────────────────────────────────

/// Errors from [`ConfigPort`] operations.
#[derive(Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Stored config could not be deserialized.
    Corrupted,
    /// A config field failed range validation.  Names the field.
    ValidationFailed(&'static str),
    /// Generic I/O error from the storage backend.
    IoError,
}

/// Errors from [`DocumentStore::save`].
#[derive(Debug, PartialEq, Eq)]
pub enum StorageError {
    /// The document could not be serialized.
    Serialize,
    /// Writing the file failed.
    IoError,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Corrupted => write!(f, "config corrupted"),
            Self::ValidationFailed(field) => write!(f, "validation failed: {}", field),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl core::fmt::Display for StorageError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Serialize => write!(f, "serialization failed"),
            Self::IoError => write!(f, "I/O error"),
        }
    }
}

impl std::error::Error for ConfigError {}
impl std::error::Error for StorageError {}

impl From<crate::error::Error> for ConfigError {
    fn from(e: crate::error::Error) -> Self {
        match e {
            crate::error::Error::Config(field) => Self::ValidationFailed(field),
            _ => Self::Corrupted,
        }
    }
}
