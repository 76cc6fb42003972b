//! Fixed-timestep runner.
//!
//! Frames arrive with variable duration; the controller only ever sees fixed
//! ticks. Leftover time carries over to the next frame. Each tick samples the
//! input source, ticks the controller and then steps the body's physics, so a
//! landing reported by physics is merged at the start of the following tick.

use controller_shared::{input::InputSnapshot, physics::PhysicsBody};
use tracing::warn;

use crate::controller::{CharacterController, TickReport};

/// Per-tick supplier of logical input.
pub trait InputSource {
    fn sample(&mut self) -> InputSnapshot;
}

/// Accumulates frame time into fixed ticks.
#[derive(Debug, Clone)]
pub struct FixedStepRunner {
    dt: f32,
    accumulator: f32,
    max_steps_per_frame: u32,
}

impl FixedStepRunner {
    /// Default cap on catch-up ticks in a single frame.
    pub const DEFAULT_MAX_STEPS: u32 = 8;

    pub fn new(tick_hz: u32) -> Self {
        Self {
            dt: 1.0 / tick_hz.max(1) as f32,
            accumulator: 0.0,
            max_steps_per_frame: Self::DEFAULT_MAX_STEPS,
        }
    }

    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps_per_frame = max_steps.max(1);
        self
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Time carried over to the next frame.
    pub fn pending(&self) -> f32 {
        self.accumulator
    }

    /// Consumes `frame_dt` seconds and runs as many whole ticks as fit.
    pub fn advance<P, I>(
        &mut self,
        frame_dt: f32,
        controller: &mut CharacterController<P>,
        input: &mut I,
    ) -> Vec<TickReport>
    where
        P: PhysicsBody,
        I: InputSource + ?Sized,
    {
        self.accumulator += frame_dt.max(0.0);
        let mut reports = Vec::new();
        while self.accumulator >= self.dt {
            if reports.len() as u32 >= self.max_steps_per_frame {
                warn!(
                    dropped_sec = self.accumulator,
                    max_steps = self.max_steps_per_frame,
                    "Simulation fell behind, dropping time"
                );
                self.accumulator = 0.0;
                break;
            }
            reports.push(step_once(controller, input, self.dt));
            self.accumulator -= self.dt;
        }
        reports
    }

    /// Runs exactly `ticks` ticks, ignoring wall time.
    pub fn run_ticks<P, I>(
        &self,
        ticks: u64,
        controller: &mut CharacterController<P>,
        input: &mut I,
    ) -> Vec<TickReport>
    where
        P: PhysicsBody,
        I: InputSource + ?Sized,
    {
        (0..ticks)
            .map(|_| step_once(controller, input, self.dt))
            .collect()
    }
}

fn step_once<P, I>(controller: &mut CharacterController<P>, input: &mut I, dt: f32) -> TickReport
where
    P: PhysicsBody,
    I: InputSource + ?Sized,
{
    let snapshot = input.sample();
    let report = controller.tick(&snapshot, dt);
    controller.step_physics(dt);
    report
}
