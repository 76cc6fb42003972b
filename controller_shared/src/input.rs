//! Input handling.
//!
//! Raw polling lives outside this crate. What arrives here is a level sample
//! per tick (`RawInput`), which the `InputSampler` turns into the immutable
//! `InputSnapshot` the controller consumes. Edge fields are true for exactly
//! one tick per press.

use serde::{Deserialize, Serialize};

use crate::math::Vec2;

/// Button and axis levels at a moment in time.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawInput {
    pub move_axis: Vec2,
    pub jump: bool,
    pub crouch: bool,
    pub roll: bool,
    pub aim: bool,
    pub fire: bool,
    pub use_item: bool,
    pub sprint: bool,
    pub reload: bool,
}

/// Logical input for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InputSnapshot {
    /// Each component in `[-1, 1]`; x is strafe, y is forward.
    pub move_axis: Vec2,
    pub jump_pressed: bool,
    pub crouch_pressed: bool,
    pub roll_pressed: bool,
    pub aim_held: bool,
    pub fire_pressed: bool,
    pub use_item_pressed: bool,
    pub sprint_held: bool,
    pub reload_pressed: bool,
}

impl InputSnapshot {
    /// No buttons, centered stick.
    pub fn idle() -> Self {
        Self::default()
    }

    pub fn with_axis(mut self, x: f32, y: f32) -> Self {
        self.move_axis = Vec2::new(x, y).clamped_unit();
        self
    }
}

/// Derives edge-triggered presses from successive level samples.
#[derive(Debug, Clone, Default)]
pub struct InputSampler {
    previous: RawInput,
}

impl InputSampler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Produces the snapshot for this tick and remembers `raw` for the next.
    pub fn sample(&mut self, raw: &RawInput) -> InputSnapshot {
        let prev = std::mem::replace(&mut self.previous, *raw);
        InputSnapshot {
            move_axis: raw.move_axis.clamped_unit(),
            jump_pressed: raw.jump && !prev.jump,
            crouch_pressed: raw.crouch && !prev.crouch,
            roll_pressed: raw.roll && !prev.roll,
            aim_held: raw.aim,
            fire_pressed: raw.fire && !prev.fire,
            use_item_pressed: raw.use_item && !prev.use_item,
            sprint_held: raw.sprint,
            reload_pressed: raw.reload && !prev.reload,
        }
    }
}
