//! Log-based notifier.
//!
//! The headless host has no desktop to pop a message box on, so
//! notifications go to the log at `warn` to stand out from routine output.

use log::warn;

use crate::app::ports::Notifier;

#[derive(Default)]
pub struct LogNotifier {
    sent: usize,
}

impl LogNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notifications shown so far.
    pub fn sent(&self) -> usize {
        self.sent
    }
}

impl Notifier for LogNotifier {
    fn notify(&mut self, title: &str, body: &str) {
        self.sent += 1;
        warn!("NOTIFY | {}: {}", title, body);
    }
}
