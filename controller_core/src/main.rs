//! Headless controller binary.
//!
//! Usage:
//!   cargo run -p controller_core -- [--config cfg.json] [--script input.json]
//!                                   [--ticks N] [--die-at N] [--headless] [--realtime]
//!
//! Replays an input script (or a built-in demo) through the character
//! controller on a kinematic body and logs every action transition.
//! `RUST_LOG=debug` shows transitions, `trace` shows animation parameters.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use controller_core::{CharacterController, FixedStepRunner, InputScript, ScriptedInput};
use controller_shared::{
    animation::TracingAnimator,
    config::{AnimationMode, ControllerConfig},
    input::RawInput,
    math::Vec2,
    physics::{KinematicBody, PhysicsBody},
};
use tracing::info;

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    script: Option<PathBuf>,
    ticks: Option<u64>,
    die_at: Option<u64>,
    headless: bool,
    realtime: bool,
}

fn parse_args() -> Args {
    let mut out = Args::default();
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--config" if i + 1 < args.len() => {
                out.config = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--script" if i + 1 < args.len() => {
                out.script = Some(PathBuf::from(&args[i + 1]));
                i += 2;
            }
            "--ticks" if i + 1 < args.len() => {
                out.ticks = args[i + 1].parse().ok();
                i += 2;
            }
            "--die-at" if i + 1 < args.len() => {
                out.die_at = args[i + 1].parse().ok();
                i += 2;
            }
            "--headless" => {
                out.headless = true;
                i += 1;
            }
            "--realtime" => {
                out.realtime = true;
                i += 1;
            }
            _ => i += 1,
        }
    }
    out
}

/// Walk, sprint into a roll, crouch, aim and fire, use an item, jump.
fn demo_script() -> InputScript {
    let forward = Vec2::new(0.0, 1.0);
    let walk = RawInput {
        move_axis: forward,
        ..Default::default()
    };
    let sprint = RawInput {
        sprint: true,
        ..walk
    };
    let aim = RawInput {
        aim: true,
        ..Default::default()
    };

    InputScript::default()
        .hold(25, walk)
        .hold(25, sprint)
        .hold(1, RawInput { roll: true, ..sprint })
        .hold(30, sprint)
        .hold(1, RawInput { crouch: true, ..walk })
        .hold(25, walk)
        .hold(1, RawInput { crouch: true, ..Default::default() })
        .hold(10, aim)
        .hold(1, RawInput { fire: true, ..aim })
        .hold(10, aim)
        .hold(1, RawInput { use_item: true, ..Default::default() })
        .hold(30, RawInput::default())
        .hold(1, RawInput { jump: true, ..walk })
        .hold(60, walk)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = parse_args();
    let mut cfg = match &args.config {
        Some(path) => ControllerConfig::load(path)?,
        None => ControllerConfig::default(),
    };
    if args.headless {
        cfg.animation = AnimationMode::Headless;
    }

    let script = match &args.script {
        Some(path) => InputScript::load(path)?,
        None => demo_script(),
    };
    let ticks = args.ticks.unwrap_or_else(|| script.total_ticks());
    info!(ticks, tick_hz = cfg.tick_hz, realtime = args.realtime, "Starting controller");

    let mut builder = CharacterController::builder(cfg).physics(KinematicBody::default());
    if !args.headless {
        builder = builder.animation(TracingAnimator);
    }
    let mut controller = builder.build().context("build controller")?;
    let mut input = ScriptedInput::new(script);
    let runner = FixedStepRunner::new(controller.config().tick_hz);

    let tick_interval = Duration::from_secs_f32(controller.config().fixed_dt());
    let mut next_tick = tokio::time::Instant::now();

    for tick in 0..ticks {
        if args.die_at == Some(tick) {
            controller.die();
        }

        for report in runner.run_ticks(1, &mut controller, &mut input) {
            if !report.fired.is_empty() {
                info!(tick = report.tick, slot = ?report.slot, fired = ?report.fired, "Action");
            }
        }
        for event in controller.drain_events() {
            info!(tick, ?event, "Gameplay event");
        }

        if args.realtime {
            next_tick += tick_interval;
            tokio::time::sleep_until(next_tick).await;
        }
    }

    let pos = controller.body().position();
    info!(
        ticks = controller.ticks(),
        slot = ?controller.slot(),
        x = pos.x,
        y = pos.y,
        z = pos.z,
        finished = input.is_finished(),
        "Simulation complete"
    );
    Ok(())
}
