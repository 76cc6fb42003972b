//! Scripted runs through the fixed-step runner on a kinematic body.

use controller_core::{ActionEvent, FixedStepRunner, InputScript, ScriptedInput, Slot};
use controller_shared::{
    animation::params, config::ControllerConfig, input::RawInput, math::Vec2,
    physics::PhysicsBody,
};
use controller_tests::{init_tracing, kinematic_controller};

fn walk() -> RawInput {
    RawInput {
        move_axis: Vec2::new(0.0, 1.0),
        ..Default::default()
    }
}

#[test]
fn jump_lands_through_physics_and_jumps_again() -> anyhow::Result<()> {
    init_tracing();
    let cfg = ControllerConfig::default();
    let runner = FixedStepRunner::new(cfg.tick_hz);
    let (mut ctl, anim) = kinematic_controller(cfg)?;

    let jump = RawInput {
        jump: true,
        ..Default::default()
    };
    let script = InputScript::default()
        .hold(1, jump)
        .hold(10, RawInput::default())
        .hold(1, jump)
        .hold(80, RawInput::default())
        .hold(1, jump)
        .hold(80, RawInput::default());
    let ticks = script.total_ticks();
    let mut input = ScriptedInput::new(script);

    // Airborne after the first tick.
    runner.run_ticks(1, &mut ctl, &mut input);
    assert!(!ctl.state().is_grounded());
    assert!(ctl.body().position().y > 0.0);

    runner.run_ticks(ticks - 1, &mut ctl, &mut input);

    // The mid-air press is ignored, the one after landing is not.
    assert_eq!(
        ctl.drain_events(),
        vec![ActionEvent::Jumped, ActionEvent::Jumped]
    );
    assert!(ctl.state().is_grounded());
    assert_eq!(ctl.body().position().y, 0.0);
    assert_eq!(ctl.body().velocity().y, 0.0);
    assert_eq!(anim.snapshot().bool(params::ON_GROUND), Some(true));
    assert!(input.is_finished());
    Ok(())
}

#[test]
fn empty_magazine_reloads_before_the_next_shot() -> anyhow::Result<()> {
    let cfg = ControllerConfig {
        magazine_size: Some(1),
        ..ControllerConfig::default()
    };
    let runner = FixedStepRunner::new(cfg.tick_hz);
    let (mut ctl, _anim) = kinematic_controller(cfg)?;

    let aim = RawInput {
        aim: true,
        ..Default::default()
    };
    let fire = RawInput { fire: true, ..aim };
    let script = InputScript::default()
        .hold(5, aim)
        .hold(1, fire)
        .hold(20, aim)
        // Still reloading: dropped.
        .hold(1, fire)
        .hold(100, aim)
        .hold(1, fire)
        .hold(1, aim);
    let mut input = ScriptedInput::new(script.clone());

    let reports = runner.run_ticks(script.total_ticks(), &mut ctl, &mut input);
    assert!(reports.iter().any(|r| r.slot == Slot::Reloading));
    assert_eq!(
        ctl.drain_events(),
        vec![
            ActionEvent::ShotFired,
            ActionEvent::ReloadStarted,
            ActionEvent::ShotFired
        ]
    );
    Ok(())
}

#[test]
fn sprint_roll_and_crouch_walk_cover_ground() -> anyhow::Result<()> {
    let cfg = ControllerConfig::default();
    let runner = FixedStepRunner::new(cfg.tick_hz);
    let (mut ctl, _anim) = kinematic_controller(cfg)?;

    let sprint = RawInput {
        sprint: true,
        ..walk()
    };
    let script = InputScript::default()
        .hold(50, walk())
        .hold(1, RawInput { roll: true, ..sprint })
        .hold(49, sprint)
        .hold(1, RawInput { crouch: true, ..walk() })
        .hold(49, walk());
    let mut input = ScriptedInput::new(script);

    let reports = runner.run_ticks(150, &mut ctl, &mut input);
    let rolling = reports.iter().filter(|r| r.slot == Slot::Rolling).count();
    assert_eq!(rolling, 25);
    assert_eq!(ctl.slot(), Slot::Crouching);

    // 1 s walking, 0.5 s rolling at walk speed, 0.5 s sprinting, 1 s crouched.
    let expected = 5.0 + 2.5 + 3.75 + 2.5;
    assert!((ctl.body().position().z - expected).abs() < 1e-2);
    assert_eq!(ctl.drain_events(), vec![ActionEvent::RollStarted]);
    Ok(())
}

#[test]
fn variable_frames_become_fixed_ticks() -> anyhow::Result<()> {
    let cfg = ControllerConfig::default();
    let mut runner = FixedStepRunner::new(cfg.tick_hz);
    let (mut ctl, _anim) = kinematic_controller(cfg)?;
    let mut input = ScriptedInput::new(InputScript::default().hold(1_000, walk()));

    for frame in 0..120 {
        let frame_dt = if frame % 2 == 0 { 1.0 / 60.0 } else { 1.0 / 30.0 };
        runner.advance(frame_dt, &mut ctl, &mut input);
    }

    // 3 s of frames at 50 Hz.
    let ticks = ctl.ticks();
    assert!((149..=150).contains(&ticks), "ran {ticks} ticks");
    let z = ctl.body().position().z;
    assert!((z - ticks as f32 * 0.1).abs() < 1e-2);
    Ok(())
}

#[test]
fn json_script_drives_the_controller() -> anyhow::Result<()> {
    let script = InputScript::from_json_str(
        r#"{ "segments": [
            { "ticks": 10, "input": { "move_axis": { "x": 1.0, "y": 0.0 } } },
            { "ticks": 1, "input": { "use_item": true } },
            { "ticks": 30 }
        ] }"#,
    )?;
    let cfg = ControllerConfig::default();
    let runner = FixedStepRunner::new(cfg.tick_hz);
    let (mut ctl, _anim) = kinematic_controller(cfg)?;
    let mut input = ScriptedInput::new(script.clone());

    let reports = runner.run_ticks(script.total_ticks(), &mut ctl, &mut input);
    assert_eq!(reports[10].slot, Slot::UsingItem);
    assert_eq!(reports.last().map(|r| r.slot), Some(Slot::Idle));
    assert!((ctl.body().position().x - 1.0).abs() < 1e-3);
    assert_eq!(ctl.drain_events(), vec![ActionEvent::ItemUsed]);
    Ok(())
}
