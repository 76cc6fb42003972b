//! Animation abstraction.
//!
//! This crate does not depend on an animation runtime. The controller talks
//! to a rig through named parameters, the way an animator state machine is
//! usually driven.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tracing::trace;

/// Parameter and trigger names understood by the rig.
pub mod params {
    pub const ON_GROUND: &str = "OnGround";
    pub const SPEED: &str = "Speed";
    pub const CROUCH: &str = "Crouch";
    pub const AIMING: &str = "Aiming";
    pub const SPRINT: &str = "Sprint";

    pub const JUMP: &str = "Jump";
    pub const ROLL: &str = "Roll";
    pub const SHOOT: &str = "Shoot";
    pub const USE: &str = "Use";
    pub const RELOAD: &str = "Reload";
    pub const DEATH: &str = "Death";
}

/// Sink for animation parameters.
pub trait AnimationSink: Send {
    fn set_bool(&mut self, name: &str, value: bool);
    fn set_float(&mut self, name: &str, value: f32);
    /// One-shot trigger.
    fn set_trigger(&mut self, name: &str);
}

/// Sink that forwards everything to `tracing` at trace level.
#[derive(Debug, Default)]
pub struct TracingAnimator;

impl AnimationSink for TracingAnimator {
    fn set_bool(&mut self, name: &str, value: bool) {
        trace!(param = name, value, "anim bool");
    }

    fn set_float(&mut self, name: &str, value: f32) {
        trace!(param = name, value, "anim float");
    }

    fn set_trigger(&mut self, name: &str) {
        trace!(param = name, "anim trigger");
    }
}

/// Everything a `RecordingAnimator` has received.
#[derive(Debug, Clone, Default)]
pub struct AnimationLog {
    pub bools: HashMap<String, bool>,
    pub floats: HashMap<String, f32>,
    /// Triggers in the order they fired.
    pub triggers: Vec<String>,
}

impl AnimationLog {
    pub fn bool(&self, name: &str) -> Option<bool> {
        self.bools.get(name).copied()
    }

    pub fn float(&self, name: &str) -> Option<f32> {
        self.floats.get(name).copied()
    }

    /// How many times `name` has fired.
    pub fn trigger_count(&self, name: &str) -> usize {
        self.triggers.iter().filter(|t| t.as_str() == name).count()
    }
}

/// Sink that keeps the latest parameter values and the trigger history.
///
/// Clones share the same log, so a test can keep one handle and give the
/// other to the controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingAnimator {
    log: Arc<Mutex<AnimationLog>>,
}

impl RecordingAnimator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the log so far.
    pub fn snapshot(&self) -> AnimationLog {
        self.log.lock().map(|log| log.clone()).unwrap_or_default()
    }
}

impl AnimationSink for RecordingAnimator {
    fn set_bool(&mut self, name: &str, value: bool) {
        if let Ok(mut log) = self.log.lock() {
            log.bools.insert(name.to_string(), value);
        }
    }

    fn set_float(&mut self, name: &str, value: f32) {
        if let Ok(mut log) = self.log.lock() {
            log.floats.insert(name.to_string(), value);
        }
    }

    fn set_trigger(&mut self, name: &str) {
        if let Ok(mut log) = self.log.lock() {
            log.triggers.push(name.to_string());
        }
    }
}
