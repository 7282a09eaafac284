//! Pointer-following motion controller.
//!
//! The controller owns the [`MotionContext`] and the animation [`Fsm`].
//! The host feeds it pointer samples, motion ticks and drag input; it
//! answers with the pet's next position and any state transition.
//!
//! Invariant: the FSM is in `Moving` exactly when a target is set and the
//! pet is not being dragged.  While dragging, no autonomous motion happens.

use log::debug;

use crate::config::PetConfig;
use crate::error::{Error, Result};
use crate::fsm::{Fsm, PetEvent, PetState, Transition};
use crate::geometry::{Point, Size, distance, step_toward};

/// Mutable motion state.  Owned by [`MotionController`] only.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionContext {
    pub current_position: Point,
    pub target_position: Option<Point>,
    /// Pixels per tick, always > 0.
    pub speed: f64,
    pub follow_enabled: bool,
    pub is_dragging: bool,
    pub pet_size: Size,
    pub activation_threshold: f64,
}

pub struct MotionController {
    ctx: MotionContext,
    fsm: Fsm,
}

impl MotionController {
    /// Build a controller at `start` from validated configuration.
    pub fn new(config: &PetConfig, start: Point) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            ctx: MotionContext {
                current_position: start,
                target_position: None,
                speed: config.move_speed_px,
                follow_enabled: config.follow_enabled,
                is_dragging: false,
                pet_size: config.pet_size,
                activation_threshold: config.activation_threshold_px,
            },
            fsm: Fsm::default(),
        })
    }

    // ── Input ─────────────────────────────────────────────────

    /// Consider a new pointer position.
    ///
    /// Sets a travel target when the pointer-centred position is further
    /// than the activation threshold, and cancels travel when it is back
    /// within range.
    pub fn on_pointer_sample(&mut self, pointer: Point) -> Option<Transition> {
        if self.ctx.is_dragging || !self.ctx.follow_enabled {
            return None;
        }
        let desired = self.ctx.pet_size.top_left_centered_on(pointer);
        let dist = distance(self.ctx.current_position, desired);

        if dist > self.ctx.activation_threshold {
            self.ctx.target_position = Some(desired);
            self.fsm.handle(PetEvent::TargetAcquired)
        } else if self.fsm.current_state() == PetState::Moving {
            debug!("Pointer back in range ({:.1}px), stopping", dist);
            self.ctx.target_position = None;
            self.fsm.handle(PetEvent::TravelCancelled)
        } else {
            None
        }
    }

    /// Advance one motion tick toward the target.
    pub fn tick(&mut self) -> Option<Transition> {
        self.fsm.tick();
        if self.ctx.is_dragging {
            return None;
        }
        let target = self.ctx.target_position?;

        let next = step_toward(self.ctx.current_position, target, self.ctx.speed);
        self.ctx.current_position = next;

        if next == target {
            self.ctx.target_position = None;
            return self.fsm.handle(PetEvent::TargetReached);
        }
        None
    }

    /// The user grabbed the pet.  Drag always interrupts travel.
    pub fn begin_drag(&mut self, at: Point) -> Option<Transition> {
        debug!("Drag began at ({:.0}, {:.0})", at.x, at.y);
        self.ctx.is_dragging = true;
        self.ctx.target_position = None;
        self.fsm.handle(PetEvent::DragBegan)
    }

    /// Move the pet directly while it is held.  Ignored otherwise.
    pub fn update_drag(&mut self, new_pos: Point) {
        if self.ctx.is_dragging {
            self.ctx.current_position = new_pos;
        }
    }

    /// The user released the pet.  Any prior target stays discarded.
    pub fn end_drag(&mut self) -> Option<Transition> {
        self.ctx.is_dragging = false;
        self.ctx.target_position = None;
        self.fsm.handle(PetEvent::DragEnded)
    }

    // ── Configuration ─────────────────────────────────────────

    /// Disabling follow while travelling stops the pet where it is.
    pub fn set_follow_enabled(&mut self, flag: bool) -> Option<Transition> {
        self.ctx.follow_enabled = flag;
        if !flag && self.ctx.target_position.take().is_some() {
            return self.fsm.handle(PetEvent::TravelCancelled);
        }
        None
    }

    pub fn set_speed(&mut self, px: f64) -> Result<()> {
        if !px.is_finite() || px <= 0.0 {
            return Err(Error::Config("move_speed_px"));
        }
        self.ctx.speed = px;
        Ok(())
    }

    pub fn set_pet_size(&mut self, size: Size) -> Result<()> {
        if !size.is_valid() {
            return Err(Error::Config("pet_size"));
        }
        self.ctx.pet_size = size;
        Ok(())
    }

    pub fn set_activation_threshold(&mut self, px: f64) -> Result<()> {
        if !px.is_finite() || px < 0.0 {
            return Err(Error::Config("activation_threshold_px"));
        }
        self.ctx.activation_threshold = px;
        Ok(())
    }

    /// Re-apply motion settings from a (new) configuration.
    pub fn apply_config(&mut self, config: &PetConfig) -> Result<Option<Transition>> {
        config.validate()?;
        self.set_speed(config.move_speed_px)?;
        self.set_pet_size(config.pet_size)?;
        self.set_activation_threshold(config.activation_threshold_px)?;
        Ok(self.set_follow_enabled(config.follow_enabled))
    }

    // ── Queries ───────────────────────────────────────────────

    pub fn position(&self) -> Point {
        self.ctx.current_position
    }

    pub fn target(&self) -> Option<Point> {
        self.ctx.target_position
    }

    pub fn state(&self) -> PetState {
        self.fsm.current_state()
    }

    pub fn context(&self) -> &MotionContext {
        &self.ctx
    }

    pub fn fsm(&self) -> &Fsm {
        &self.fsm
    }
}
