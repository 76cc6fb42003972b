//! Physics abstraction.
//!
//! The controller never integrates physics itself. It drives a rigid body
//! through `PhysicsBody` and learns about landings from the contacts the body
//! reports after each step.

use tracing::trace;

use crate::math::{Quat, Vec3};

/// Physics parameters.
#[derive(Debug, Clone, Copy)]
pub struct PhysicsConfig {
    pub gravity: Vec3,
    /// Height of the flat ground plane.
    pub ground_height: f32,
    pub mass: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: Vec3::new(0.0, -9.81, 0.0),
            ground_height: 0.0,
            mass: 1.0,
        }
    }
}

/// A collision with walkable ground reported by the physics step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroundContact {
    pub point: Vec3,
}

/// Rigid-body collaborator driven by the controller.
pub trait PhysicsBody: Send {
    fn position(&self) -> Vec3;
    fn rotation(&self) -> Quat;
    /// Translates the body by `delta`.
    fn move_position(&mut self, delta: Vec3);
    /// Sets the body's orientation.
    fn move_rotation(&mut self, target: Quat);
    fn apply_impulse(&mut self, impulse: Vec3);
    /// Advances the simulation, returning a contact if the body landed.
    fn step(&mut self, dt_sec: f32) -> Option<GroundContact>;
}

/// Point-mass body over a flat ground plane.
#[derive(Debug, Clone)]
pub struct KinematicBody {
    pub cfg: PhysicsConfig,
    position: Vec3,
    rotation: Quat,
    velocity: Vec3,
    on_ground: bool,
}

impl Default for KinematicBody {
    fn default() -> Self {
        Self::new(PhysicsConfig::default(), Vec3::ZERO)
    }
}

impl KinematicBody {
    pub fn new(cfg: PhysicsConfig, position: Vec3) -> Self {
        Self {
            on_ground: position.y <= cfg.ground_height,
            cfg,
            position,
            rotation: Quat::IDENTITY,
            velocity: Vec3::ZERO,
        }
    }

    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    pub fn on_ground(&self) -> bool {
        self.on_ground
    }
}

impl PhysicsBody for KinematicBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn move_position(&mut self, delta: Vec3) {
        self.position += delta;
    }

    fn move_rotation(&mut self, target: Quat) {
        self.rotation = target.normalize();
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * (1.0 / self.cfg.mass);
    }

    fn step(&mut self, dt_sec: f32) -> Option<GroundContact> {
        if self.on_ground && self.velocity.y <= 0.0 {
            self.velocity.y = 0.0;
            return None;
        }

        self.on_ground = false;
        self.velocity += self.cfg.gravity * dt_sec;
        self.position += self.velocity * dt_sec;

        if self.position.y <= self.cfg.ground_height && self.velocity.y <= 0.0 {
            self.position.y = self.cfg.ground_height;
            self.velocity.y = 0.0;
            self.on_ground = true;
            trace!(x = self.position.x, z = self.position.z, "Body landed");
            return Some(GroundContact {
                point: self.position,
            });
        }
        None
    }
}

/// Body that records every call, for tests and replays.
#[derive(Debug, Clone, Default)]
pub struct RecordingBody {
    position: Vec3,
    rotation: Quat,
    pub moves: Vec<Vec3>,
    pub rotations: Vec<Quat>,
    pub impulses: Vec<Vec3>,
}

impl RecordingBody {
    pub fn new() -> Self {
        Self::default()
    }
}

impl PhysicsBody for RecordingBody {
    fn position(&self) -> Vec3 {
        self.position
    }

    fn rotation(&self) -> Quat {
        self.rotation
    }

    fn move_position(&mut self, delta: Vec3) {
        self.position += delta;
        self.moves.push(delta);
    }

    fn move_rotation(&mut self, target: Quat) {
        self.rotation = target;
        self.rotations.push(target);
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.impulses.push(impulse);
    }

    fn step(&mut self, _dt_sec: f32) -> Option<GroundContact> {
        None
    }
}
