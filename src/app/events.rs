//! Outbound application events.
//!
//! The [`AppService`](super::service::AppService) emits these through the
//! [`EventSink`](super::ports::EventSink) port.  The rendering collaborator
//! moves the window and swaps the animation clip; a log adapter just
//! prints them.

use crate::fsm::PetState;
use crate::geometry::Point;

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    /// The service has started (carries initial state and position).
    Started { state: PetState, position: Point },

    /// The animation state changed.  `clip` is the new state's animation.
    StateChanged {
        from: PetState,
        to: PetState,
        clip: &'static str,
    },

    /// The pet moved.
    Moved(Point),

    /// A reminder became due and was shown to the user.
    ReminderFired { text: String },

    /// The countdown display changed (`mm:ss`).
    CountdownUpdated(String),

    /// The countdown expired.
    CountdownFinished,

    /// The document was written to the store.
    DocumentSaved,
}
