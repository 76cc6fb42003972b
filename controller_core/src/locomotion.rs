//! Locomotion solver.
//!
//! Turns the stick axis and the resolved action state into a movement intent
//! and a facing rotation. Never mutates state.

use controller_shared::{
    config::ControllerConfig,
    input::InputSnapshot,
    math::{Quat, Vec3},
};

use crate::state::ActionState;

/// Movement requested for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionIntent {
    /// Unit vector on the horizontal plane, or zero.
    pub direction: Vec3,
    /// Units per second, never negative.
    pub speed_scale: f32,
}

impl MotionIntent {
    pub const ZERO: Self = Self {
        direction: Vec3::ZERO,
        speed_scale: 0.0,
    };

    /// Position delta for a tick of `dt` seconds.
    pub fn displacement(&self, dt: f32) -> Vec3 {
        self.direction * (self.speed_scale * dt)
    }

    /// Speed actually requested, zero when there is no direction.
    pub fn magnitude(&self) -> f32 {
        self.direction.length() * self.speed_scale
    }
}

/// Computes motion from input and state.
#[derive(Debug, Clone)]
pub struct LocomotionSolver {
    move_speed: f32,
    sprint_multiplier: f32,
    crouch_multiplier: f32,
    turn_rate: f32,
    lock_steering_while_rolling: bool,
}

impl Default for LocomotionSolver {
    fn default() -> Self {
        Self::from_config(&ControllerConfig::default())
    }
}

impl LocomotionSolver {
    pub fn from_config(cfg: &ControllerConfig) -> Self {
        Self {
            move_speed: cfg.move_speed,
            sprint_multiplier: cfg.sprint_multiplier,
            crouch_multiplier: cfg.crouch_multiplier,
            turn_rate: cfg.turn_rate,
            lock_steering_while_rolling: cfg.lock_steering_while_rolling,
        }
    }

    pub fn compute_intent(&self, input: &InputSnapshot, state: &ActionState) -> MotionIntent {
        let ActionState::Alive(stance) = state else {
            return MotionIntent::ZERO;
        };
        if self.lock_steering_while_rolling && stance.activity.is_rolling() {
            return MotionIntent::ZERO;
        }

        let axis = input.move_axis.clamped_unit();
        let direction = Vec3::new(axis.x, 0.0, axis.y).normalize_or_zero();

        let mut speed_scale = self.move_speed;
        if stance.sprinting {
            speed_scale *= self.sprint_multiplier;
        }
        if stance.crouched {
            speed_scale *= self.crouch_multiplier;
        }

        MotionIntent {
            direction,
            speed_scale,
        }
    }

    /// Turns `current` toward `direction`. A zero direction keeps the current
    /// rotation.
    pub fn compute_facing(&self, direction: Vec3, current: Quat, dt: f32) -> Quat {
        if direction.is_zero() {
            return current;
        }
        let target = Quat::look_rotation(direction, Vec3::UP);
        current.slerp(target, (dt * self.turn_rate).min(1.0))
    }
}
