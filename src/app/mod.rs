//! Application core: pure domain logic, zero I/O.
//!
//! This module holds the rules that tie the pet together: motion and
//! animation, reminders, the countdown timer and document edits.  All
//! interaction with the host happens through **port traits** defined in
//! [`ports`], keeping this layer testable without a GUI.

pub mod commands;
pub mod events;
pub mod ports;
pub mod service;
