//! `controller_shared`
//!
//! Types shared by the controller runtime and its collaborators.
//!
//! Design goals:
//! - Deterministic: no wall clock, no hidden global state.
//! - Collaborators (physics, animation, input) sit behind small traits so the
//!   controller can run headless in tests.
//! - No `unsafe`.

pub mod animation;
pub mod config;
pub mod event;
pub mod input;
pub mod math;
pub mod physics;

pub mod prelude {
    //! Commonly used exports.

    pub use crate::animation::{AnimationSink, RecordingAnimator};
    pub use crate::config::*;
    pub use crate::input::*;
    pub use crate::math::*;
    pub use crate::physics::{GroundContact, KinematicBody, PhysicsBody};
}
