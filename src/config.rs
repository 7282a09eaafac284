//! Pet configuration parameters
//!
//! All tunable parameters for the pet core.  Values are loaded from
//! `settings.json` in the data directory and can be changed at runtime
//! through [`AppCommand::UpdateConfig`](crate::app::commands::AppCommand).

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::geometry::Size;

/// Name of the per-user data directory under the home directory.
pub const DATA_DIR_NAME: &str = ".desktop_pet";

/// Core configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PetConfig {
    // --- Motion ---
    /// Travel speed in pixels per motion tick
    pub move_speed_px: f64,
    /// Pointer must be further than this (pixels) before the pet follows
    pub activation_threshold_px: f64,
    /// Whether the pet tracks the pointer at all
    pub follow_enabled: bool,
    /// Pet bounding box, used to centre the pet on the pointer
    pub pet_size: Size,

    // --- Timing ---
    /// Motion step interval (milliseconds)
    pub motion_tick_ms: u32,
    /// Pointer polling interval (milliseconds)
    pub pointer_poll_ms: u32,
    /// Reminder due-check interval (seconds)
    pub reminder_check_secs: u32,

    // --- Reminders ---
    /// Remove reminders from the document once they have fired
    pub prune_fired_reminders: bool,

    // --- Countdown ---
    /// Default countdown length offered to the user (minutes)
    pub countdown_default_minutes: u32,
}

impl Default for PetConfig {
    fn default() -> Self {
        Self {
            // Motion
            move_speed_px: 5.0,
            activation_threshold_px: 100.0,
            follow_enabled: true,
            pet_size: Size::new(128.0, 128.0),

            // Timing
            motion_tick_ms: 50,       // 20 Hz
            pointer_poll_ms: 100,     // 10 Hz
            reminder_check_secs: 60,  // 1/min

            // Reminders
            prune_fired_reminders: true,

            // Countdown
            countdown_default_minutes: 25,
        }
    }
}

impl PetConfig {
    /// Range-check every field.  Invalid values are rejected, not clamped.
    pub fn validate(&self) -> Result<()> {
        if !self.move_speed_px.is_finite() || self.move_speed_px <= 0.0 {
            return Err(Error::Config("move_speed_px"));
        }
        if !self.activation_threshold_px.is_finite() || self.activation_threshold_px < 0.0 {
            return Err(Error::Config("activation_threshold_px"));
        }
        if !self.pet_size.is_valid() {
            return Err(Error::Config("pet_size"));
        }
        if self.motion_tick_ms == 0 {
            return Err(Error::Config("motion_tick_ms"));
        }
        if self.pointer_poll_ms == 0 {
            return Err(Error::Config("pointer_poll_ms"));
        }
        if self.reminder_check_secs == 0 {
            return Err(Error::Config("reminder_check_secs"));
        }
        if !crate::countdown::MINUTES_RANGE.contains(&self.countdown_default_minutes) {
            return Err(Error::Config("countdown_default_minutes"));
        }
        Ok(())
    }

}

/// `~/.desktop_pet`, the directory holding `pet_data.json` and
/// `settings.json`.  Falls back to the working directory when no home
/// directory can be determined.
pub fn default_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(DATA_DIR_NAME)
}
