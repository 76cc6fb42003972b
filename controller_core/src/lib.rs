//! `controller_core`
//!
//! Third-person character controller:
//! - `ActionStateMachine`: which actions may start, block or expire
//! - `LocomotionSolver`: movement intent and facing from input + state
//! - `CharacterController`: per-tick orchestration over physics and animation
//! - `FixedStepRunner`: fixed-timestep driver with scripted input
//!
//! Determinism notes:
//! - Keep simulation in a fixed timestep.
//! - Timed actions are countdowns advanced by tick `dt`, never wall clock.
//! - Asynchronous ground contacts are buffered and merged once per tick.

pub mod controller;
pub mod locomotion;
pub mod machine;
pub mod runner;
pub mod script;
pub mod state;

pub use controller::{ActionEvent, CharacterController, ControllerBuilder, TickReport};
pub use locomotion::{LocomotionSolver, MotionIntent};
pub use machine::{ActionStateMachine, ActionTimings};
pub use runner::{FixedStepRunner, InputSource};
pub use script::{InputScript, ScriptedInput};
pub use state::{ActionState, Activity, Slot, Stance, Transition, Triggers};
