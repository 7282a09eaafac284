//! Function-pointer animation state machine.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │  StateTable                                          │
//! │  ┌──────────┬─────────┬────────────────────────────┐ │
//! │  │ PetState │ clip    │ on_event                   │ │
//! │  ├──────────┼─────────┼────────────────────────────┤ │
//! │  │ Idle     │ idle    │ fn(PetEvent)->Option<>     │ │
//! │  │ Reacting │ happy   │ fn(PetEvent)->Option<>     │ │
//! │  │ Moving   │ moving  │ fn(PetEvent)->Option<>     │ │
//! │  └──────────┴─────────┴────────────────────────────┘ │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! Events come from the [`MotionController`](crate::motion::MotionController)
//! and from direct user input.  The engine asks the **current** state's
//! `on_event` handler for the next state.  A handler returning the current
//! state (or `None`) is a no-op: the state's presentation clock keeps
//! running, so re-entering a state never restarts its animation.

pub mod states;

use log::info;

// ---------------------------------------------------------------------------
// State identity
// ---------------------------------------------------------------------------

/// Every animation state the pet can be in.
/// Must stay in sync with the table built in [`states::build_state_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PetState {
    Idle = 0,
    Reacting = 1,
    Moving = 2,
}

impl PetState {
    /// Total number of states.  Sizes the table array.
    pub const COUNT: usize = 3;

    /// Convert a table index back to `PetState`.  Out-of-range indices
    /// assert in debug builds and fall back to `Idle` in release.
    pub fn from_index(idx: usize) -> Self {
        match idx {
            0 => Self::Idle,
            1 => Self::Reacting,
            2 => Self::Moving,
            _ => {
                debug_assert!(false, "invalid state index: {idx}");
                Self::Idle
            }
        }
    }
}

/// Inputs that can move the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PetEvent {
    /// The user pressed on the pet and started dragging it.
    DragBegan,
    /// The user released the pet.
    DragEnded,
    /// The motion controller picked a new travel target.
    TargetAcquired,
    /// The pet arrived at its travel target.
    TargetReached,
    /// Travel was abandoned: pointer came back in range or follow was disabled.
    TravelCancelled,
}

/// Per-event transition handler.
/// Returns `Some(next)` to change state, or `None` to stay.
pub type StateEventFn = fn(PetEvent) -> Option<PetState>;

/// Static descriptor for a single state.
pub struct StateDescriptor {
    pub id: PetState,
    pub name: &'static str,
    /// Animation clip the renderer plays while in this state.
    pub clip: &'static str,
    pub on_event: StateEventFn,
}

/// A state change that actually happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub from: PetState,
    pub to: PetState,
}

// ---------------------------------------------------------------------------
// FSM engine
// ---------------------------------------------------------------------------

pub struct Fsm {
    /// Fixed-size table indexed by `PetState as usize`.
    table: [StateDescriptor; PetState::COUNT],
    current: usize,
    /// Monotonic tick counter, advanced once per motion tick.
    tick_count: u64,
    /// Tick at which the current state was entered.
    state_entry_tick: u64,
}

impl Default for Fsm {
    fn default() -> Self {
        Self::new(states::build_state_table(), PetState::Idle)
    }
}

impl Fsm {
    pub fn new(table: [StateDescriptor; PetState::COUNT], initial: PetState) -> Self {
        Self {
            table,
            current: initial as usize,
            tick_count: 0,
            state_entry_tick: 0,
        }
    }

    /// Feed an event.  Returns the transition if the state changed.
    pub fn handle(&mut self, event: PetEvent) -> Option<Transition> {
        let next = (self.table[self.current].on_event)(event)?;
        self.force_transition(next)
    }

    /// Jump straight to `next`.  Same-state requests are no-ops.
    pub fn force_transition(&mut self, next: PetState) -> Option<Transition> {
        if next as usize == self.current {
            return None;
        }
        let from = self.current_state();
        info!(
            "FSM transition: {} -> {}",
            self.table[self.current].name, self.table[next as usize].name
        );
        self.current = next as usize;
        self.state_entry_tick = self.tick_count;
        Some(Transition { from, to: next })
    }

    /// Advance the presentation clock by one tick.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
    }

    pub fn current_state(&self) -> PetState {
        PetState::from_index(self.current)
    }

    /// Animation clip for the current state.
    pub fn current_clip(&self) -> &'static str {
        self.table[self.current].clip
    }

    /// Animation clip for any state.
    pub fn clip_for(&self, state: PetState) -> &'static str {
        self.table[state as usize].clip
    }

    /// Ticks spent in the current state.  Not reset by same-state events.
    pub fn ticks_in_current_state(&self) -> u64 {
        self.tick_count.wrapping_sub(self.state_entry_tick)
    }
}
