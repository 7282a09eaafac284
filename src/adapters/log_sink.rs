//! Log-based event sink adapter.
//!
//! Implements [`EventSink`] by writing application events to the `log`
//! facade.  The headless host uses it in place of a renderer; a GUI host
//! implements the same trait to move its window and swap animations.

use log::{debug, info};

use crate::app::events::AppEvent;
use crate::app::ports::EventSink;

/// Adapter that logs every [`AppEvent`].
#[derive(Default)]
pub struct LogEventSink;

impl LogEventSink {
    pub fn new() -> Self {
        Self
    }
}

impl EventSink for LogEventSink {
    fn emit(&mut self, event: &AppEvent) {
        match event {
            AppEvent::Started { state, position } => {
                info!(
                    "START | state={:?} | pos=({:.0}, {:.0})",
                    state, position.x, position.y
                );
            }
            AppEvent::StateChanged { from, to, clip } => {
                info!("STATE | {:?} -> {:?} | clip={}", from, to, clip);
            }
            // Emitted every motion tick while travelling.
            AppEvent::Moved(p) => {
                debug!("MOVE  | ({:.1}, {:.1})", p.x, p.y);
            }
            AppEvent::ReminderFired { text } => {
                info!("REMIND| {}", text);
            }
            AppEvent::CountdownUpdated(display) => {
                debug!("TIMER | {}", display);
            }
            AppEvent::CountdownFinished => {
                info!("TIMER | finished");
            }
            AppEvent::DocumentSaved => {
                info!("SAVE  | document written");
            }
        }
    }
}
