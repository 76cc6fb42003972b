//! Character controller.
//!
//! Owns one `ActionState` and drives the physics and animation collaborators
//! from it, one fixed tick at a time:
//!
//! 0. merge ground contacts buffered since the last tick
//! 1. resolve action transitions
//! 2. compute motion from the resolved state
//! 3. move and turn the body, apply the jump impulse
//! 4. emit animation parameters and triggers
//! 5. commit the new state

use anyhow::bail;
use controller_shared::{
    animation::{params, AnimationSink},
    config::{AnimationMode, ControllerConfig},
    event::EventBus,
    input::InputSnapshot,
    math::Vec3,
    physics::{GroundContact, PhysicsBody},
};
use tracing::{debug, info, warn};

use crate::{
    locomotion::{LocomotionSolver, MotionIntent},
    machine::ActionStateMachine,
    state::{ActionState, Slot, Triggers},
};

/// Trigger flags and the rig trigger each one drives.
const TRIGGER_PARAMS: [(Triggers, &str); 6] = [
    (Triggers::JUMP, params::JUMP),
    (Triggers::ROLL, params::ROLL),
    (Triggers::SHOOT, params::SHOOT),
    (Triggers::USE, params::USE),
    (Triggers::RELOAD, params::RELOAD),
    (Triggers::DEATH, params::DEATH),
];

/// Gameplay-facing notifications, drained by the owner after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEvent {
    Jumped,
    RollStarted,
    ShotFired,
    ReloadStarted,
    ItemUsed,
    Died,
}

impl ActionEvent {
    fn from_triggers(fired: Triggers) -> impl Iterator<Item = ActionEvent> {
        [
            (Triggers::JUMP, ActionEvent::Jumped),
            (Triggers::ROLL, ActionEvent::RollStarted),
            (Triggers::SHOOT, ActionEvent::ShotFired),
            (Triggers::RELOAD, ActionEvent::ReloadStarted),
            (Triggers::USE, ActionEvent::ItemUsed),
            (Triggers::DEATH, ActionEvent::Died),
        ]
        .into_iter()
        .filter(move |(flag, _)| fired.contains(*flag))
        .map(|(_, event)| event)
    }
}

/// Summary of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    pub tick: u64,
    pub slot: Slot,
    pub intent: MotionIntent,
    pub fired: Triggers,
}

/// Third-person character controller.
pub struct CharacterController<P: PhysicsBody> {
    cfg: ControllerConfig,
    machine: ActionStateMachine,
    solver: LocomotionSolver,
    state: ActionState,
    body: P,
    animator: Option<Box<dyn AnimationSink>>,
    /// Contacts reported between ticks.
    inbox: EventBus,
    /// Gameplay events for the owner.
    outbox: EventBus,
    tick: u64,
}

impl<P: PhysicsBody> CharacterController<P> {
    pub fn builder(cfg: ControllerConfig) -> ControllerBuilder<P> {
        ControllerBuilder {
            cfg,
            body: None,
            animator: None,
        }
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.cfg
    }

    pub fn state(&self) -> &ActionState {
        &self.state
    }

    pub fn slot(&self) -> Slot {
        self.state.slot()
    }

    pub fn body(&self) -> &P {
        &self.body
    }

    /// Ticks completed so far.
    pub fn ticks(&self) -> u64 {
        self.tick
    }

    pub fn is_headless(&self) -> bool {
        self.animator.is_none()
    }

    /// Buffers a landing. It is merged at the start of the next tick, before
    /// any jump request is evaluated.
    pub fn on_ground_contact(&mut self) {
        self.inbox.push(GroundContact {
            point: self.body.position(),
        });
    }

    /// Kills the character. Timed activities are discarded immediately and
    /// the death trigger fires once; later calls do nothing.
    pub fn die(&mut self) {
        let transition = self.machine.die(&self.state);
        if transition.fired.is_empty() {
            return;
        }
        info!(tick = self.tick, slot = ?self.state.slot(), "Character died");
        self.state = transition.state;
        self.emit_triggers(transition.fired);
        self.queue_events(transition.fired);
    }

    /// Advances the body's own simulation and buffers any landing it reports.
    pub fn step_physics(&mut self, dt_sec: f32) {
        if let Some(contact) = self.body.step(dt_sec) {
            self.inbox.push(contact);
        }
    }

    /// Gameplay events queued since the last drain, oldest first.
    pub fn drain_events(&mut self) -> Vec<ActionEvent> {
        self.outbox.drain::<ActionEvent>()
    }

    /// Runs one fixed tick.
    pub fn tick(&mut self, input: &InputSnapshot, dt_sec: f32) -> TickReport {
        let contacts = self.inbox.drain::<GroundContact>();
        if !contacts.is_empty() && !self.state.is_grounded() {
            debug!(tick = self.tick, contacts = contacts.len(), "Ground contact merged");
        }
        if !contacts.is_empty() {
            self.state = self.machine.land(&self.state);
        }

        let transition = self.machine.step(&self.state, input, dt_sec);
        let next = transition.state;
        let intent = self.solver.compute_intent(input, &next);

        if !next.is_dead() {
            self.apply_motion(&intent, dt_sec);
            if transition.fired.contains(Triggers::JUMP) {
                self.body.apply_impulse(Vec3::UP * self.cfg.jump_force);
            }
            self.emit_parameters(&next, &intent);
            self.emit_triggers(transition.fired);
        }
        self.queue_events(transition.fired);

        self.state = next;
        let report = TickReport {
            tick: self.tick,
            slot: next.slot(),
            intent,
            fired: transition.fired,
        };
        self.tick += 1;
        report
    }

    fn apply_motion(&mut self, intent: &MotionIntent, dt_sec: f32) {
        self.body.move_position(intent.displacement(dt_sec));
        if !intent.direction.is_zero() {
            let facing = self
                .solver
                .compute_facing(intent.direction, self.body.rotation(), dt_sec);
            self.body.move_rotation(facing);
        }
    }

    fn emit_parameters(&mut self, state: &ActionState, intent: &MotionIntent) {
        let Some(anim) = self.animator.as_mut() else {
            return;
        };
        anim.set_bool(params::ON_GROUND, state.is_grounded());
        anim.set_float(params::SPEED, intent.magnitude());
        // A roll hides the crouch pose but keeps the flag.
        anim.set_bool(
            params::CROUCH,
            state.is_crouched() && state.slot() != Slot::Rolling,
        );
        anim.set_bool(params::AIMING, state.is_aiming());
        anim.set_bool(params::SPRINT, state.is_sprinting());
    }

    fn emit_triggers(&mut self, fired: Triggers) {
        let Some(anim) = self.animator.as_mut() else {
            return;
        };
        for (flag, name) in TRIGGER_PARAMS {
            if fired.contains(flag) {
                anim.set_trigger(name);
            }
        }
    }

    fn queue_events(&mut self, fired: Triggers) {
        for event in ActionEvent::from_triggers(fired) {
            self.outbox.push(event);
        }
    }
}

/// Collects collaborators and validates them before a controller exists.
pub struct ControllerBuilder<P: PhysicsBody> {
    cfg: ControllerConfig,
    body: Option<P>,
    animator: Option<Box<dyn AnimationSink>>,
}

impl<P: PhysicsBody> ControllerBuilder<P> {
    pub fn physics(mut self, body: P) -> Self {
        self.body = Some(body);
        self
    }

    pub fn animation(mut self, sink: impl AnimationSink + 'static) -> Self {
        self.animator = Some(Box::new(sink));
        self
    }

    /// Fails on an invalid config, a missing body, or a missing animation
    /// sink in strict mode.
    pub fn build(self) -> anyhow::Result<CharacterController<P>> {
        self.cfg.validate()?;

        let Some(body) = self.body else {
            bail!("controller requires a physics body");
        };

        if self.animator.is_none() {
            match self.cfg.animation {
                AnimationMode::Strict => {
                    bail!("controller requires an animation sink in strict mode")
                }
                AnimationMode::Headless => {
                    warn!("No animation sink attached; running headless")
                }
            }
        }

        info!(
            tick_hz = self.cfg.tick_hz,
            move_speed = self.cfg.move_speed,
            magazine = ?self.cfg.magazine_size,
            headless = self.animator.is_none(),
            "Character controller ready"
        );

        Ok(CharacterController {
            machine: ActionStateMachine::from_config(&self.cfg),
            solver: LocomotionSolver::from_config(&self.cfg),
            cfg: self.cfg,
            state: ActionState::default(),
            body,
            animator: self.animator,
            inbox: EventBus::default(),
            outbox: EventBus::default(),
            tick: 0,
        })
    }
}
