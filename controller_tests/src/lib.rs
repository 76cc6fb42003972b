//! Helpers shared by the integration tests.

use controller_core::CharacterController;
use controller_shared::{
    animation::RecordingAnimator,
    config::ControllerConfig,
    input::InputSnapshot,
    physics::{KinematicBody, PhysicsBody, RecordingBody},
};

/// Installs a test-friendly subscriber once per process.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("info")
        .with_test_writer()
        .try_init();
}

/// Controller over a `RecordingBody`, plus a handle on its animation log.
pub fn recording_controller(
    cfg: ControllerConfig,
) -> anyhow::Result<(CharacterController<RecordingBody>, RecordingAnimator)> {
    build_with(cfg, RecordingBody::new())
}

/// Controller over a `KinematicBody` resting on the ground plane.
pub fn kinematic_controller(
    cfg: ControllerConfig,
) -> anyhow::Result<(CharacterController<KinematicBody>, RecordingAnimator)> {
    build_with(cfg, KinematicBody::default())
}

fn build_with<P: PhysicsBody>(
    cfg: ControllerConfig,
    body: P,
) -> anyhow::Result<(CharacterController<P>, RecordingAnimator)> {
    let anim = RecordingAnimator::new();
    let ctl = CharacterController::builder(cfg)
        .physics(body)
        .animation(anim.clone())
        .build()?;
    Ok((ctl, anim))
}

/// Snapshot with the fields set by `f`.
pub fn input(f: impl FnOnce(&mut InputSnapshot)) -> InputSnapshot {
    let mut snap = InputSnapshot::idle();
    f(&mut snap);
    snap
}
