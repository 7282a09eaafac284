//! State table and per-state event handlers.
//!
//! Each handler is a pure `fn(PetEvent) -> Option<PetState>`.  Returning
//! `None` means "stay"; the engine treats a same-state return the same way.

use super::{PetEvent, PetState, StateDescriptor};

/// Build the state table, indexed by `PetState as usize`.
pub fn build_state_table() -> [StateDescriptor; PetState::COUNT] {
    [
        StateDescriptor {
            id: PetState::Idle,
            name: "Idle",
            clip: "idle",
            on_event: idle_on_event,
        },
        StateDescriptor {
            id: PetState::Reacting,
            name: "Reacting",
            clip: "happy",
            on_event: reacting_on_event,
        },
        StateDescriptor {
            id: PetState::Moving,
            name: "Moving",
            clip: "moving",
            on_event: moving_on_event,
        },
    ]
}

// ═══════════════════════════════════════════════════════════════
//  IDLE: resting, animation loops in place
// ═══════════════════════════════════════════════════════════════

fn idle_on_event(event: PetEvent) -> Option<PetState> {
    match event {
        PetEvent::DragBegan => Some(PetState::Reacting),
        PetEvent::TargetAcquired => Some(PetState::Moving),
        PetEvent::DragEnded | PetEvent::TargetReached | PetEvent::TravelCancelled => None,
    }
}

// ═══════════════════════════════════════════════════════════════
//  REACTING: held by the user; only a release leaves this state
// ═══════════════════════════════════════════════════════════════

fn reacting_on_event(event: PetEvent) -> Option<PetState> {
    match event {
        PetEvent::DragEnded => Some(PetState::Idle),
        PetEvent::DragBegan
        | PetEvent::TargetAcquired
        | PetEvent::TargetReached
        | PetEvent::TravelCancelled => None,
    }
}

// ═══════════════════════════════════════════════════════════════
//  MOVING: travelling toward the pointer
// ═══════════════════════════════════════════════════════════════

fn moving_on_event(event: PetEvent) -> Option<PetState> {
    match event {
        PetEvent::DragBegan => Some(PetState::Reacting),
        PetEvent::DragEnded | PetEvent::TargetReached | PetEvent::TravelCancelled => {
            Some(PetState::Idle)
        }
        PetEvent::TargetAcquired => None,
    }
}
