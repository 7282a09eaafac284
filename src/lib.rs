//! DeskPet core library.
//!
//! Toolkit-agnostic logic for a cursor-following desktop pet: motion and
//! animation state, reminders, a countdown timer and the persisted
//! notes/period/reminder document.  A host UI drives it through
//! [`app::service::AppService`] and the port traits in [`app::ports`].

#![deny(unused_must_use)]

pub mod adapters;
pub mod app;
pub mod config;
pub mod countdown;
pub mod error;
pub mod fsm;
pub mod geometry;
pub mod motion;
pub mod records;
pub mod reminders;
pub mod scheduler;
