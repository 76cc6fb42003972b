//! Action state machine.
//!
//! The only code allowed to change an `ActionState`. Resolution is a pure
//! function of (state, input, dt); the machine itself holds nothing but the
//! timing parameters it was built with.
//!
//! Rule order each tick:
//! 1. dead stays dead
//! 2. timed activities count down and free the slot on expiry
//! 3. jump, 4. crouch toggle, 5. roll
//! 6. aim (level)
//! 7. shoot, then reload request
//! 8. use item
//! 9. sprint (level)
//!
//! Start requests are gated on the state after step 2, never on a state built
//! earlier in the same tick. Level modifiers follow the tick's final slot.
//! When several exclusive starts pass their gates together, the first one in
//! rule order takes the slot.

use controller_shared::{config::ControllerConfig, input::InputSnapshot};
use tracing::debug;

use crate::state::{ActionState, Activity, Stance, Transition, Triggers};

/// Remaining times at or below this count as expired, so a duration that is
/// a whole number of fixed steps ends on the expected tick.
pub const EXPIRY_EPSILON: f32 = 1e-4;

/// Durations and magazine rules taken from the config.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionTimings {
    pub roll: f32,
    pub shoot_flash: f32,
    pub use_item: f32,
    pub reload: f32,
    pub magazine_size: Option<u32>,
}

impl From<&ControllerConfig> for ActionTimings {
    fn from(cfg: &ControllerConfig) -> Self {
        Self {
            roll: cfg.roll_duration,
            shoot_flash: cfg.shoot_flash_duration,
            use_item: cfg.use_duration,
            reload: cfg.reload_duration,
            magazine_size: cfg.magazine_size,
        }
    }
}

impl Default for ActionTimings {
    fn default() -> Self {
        Self::from(&ControllerConfig::default())
    }
}

/// Resolves action transitions.
#[derive(Debug, Clone, Default)]
pub struct ActionStateMachine {
    timings: ActionTimings,
}

impl ActionStateMachine {
    pub fn new(timings: ActionTimings) -> Self {
        Self { timings }
    }

    pub fn from_config(cfg: &ControllerConfig) -> Self {
        Self::new(ActionTimings::from(cfg))
    }

    pub fn timings(&self) -> &ActionTimings {
        &self.timings
    }

    /// Next state for this tick.
    pub fn resolve(&self, current: &ActionState, input: &InputSnapshot, dt: f32) -> ActionState {
        self.step(current, input, dt).state
    }

    /// Next state plus the one-shot transitions that fired.
    pub fn step(&self, current: &ActionState, input: &InputSnapshot, dt: f32) -> Transition {
        let ActionState::Alive(stance) = current else {
            return Transition::quiet(ActionState::Dead);
        };

        let mut fired = Triggers::empty();
        let pre = self.expire(*stance, dt, &mut fired);
        let mut next = pre;
        let mut slot_claimed = false;

        if input.jump_pressed && pre.grounded && pre.activity.is_idle() {
            next.grounded = false;
            fired |= Triggers::JUMP;
        }

        if input.crouch_pressed && !pre.activity.is_rolling() && !pre.activity.is_reloading() {
            next.crouched = !next.crouched;
            debug!(crouched = next.crouched, "Crouch toggled");
        }

        if input.roll_pressed && pre.grounded && pre.activity.is_idle() {
            next.activity = Activity::Rolling {
                remaining: self.timings.roll,
            };
            slot_claimed = true;
            fired |= Triggers::ROLL;
        }

        if input.fire_pressed && !slot_claimed && self.can_shoot(&pre) {
            next.activity = Activity::Shooting {
                remaining: self.timings.shoot_flash,
            };
            if self.timings.magazine_size.is_some() {
                next.rounds_fired += 1;
            }
            slot_claimed = true;
            fired |= Triggers::SHOOT;
        }

        if input.reload_pressed && !slot_claimed && self.can_reload(&pre) {
            next.activity = Activity::Reloading {
                remaining: self.timings.reload,
            };
            slot_claimed = true;
            fired |= Triggers::RELOAD;
        }

        if input.use_item_pressed && !slot_claimed && pre.activity.is_idle() {
            next.activity = Activity::UsingItem {
                remaining: self.timings.use_item,
            };
            fired |= Triggers::USE;
        }

        next.aiming = input.aim_held && !next.activity.is_rolling();
        next.sprinting = input.sprint_held && next.activity.is_idle();

        if !fired.is_empty() {
            debug!(?fired, activity = ?next.activity, "Action transition");
        }

        Transition {
            state: ActionState::Alive(next),
            fired,
        }
    }

    /// Unconditional death. Idempotent: an already dead state fires nothing.
    pub fn die(&self, current: &ActionState) -> Transition {
        match current {
            ActionState::Dead => Transition::quiet(ActionState::Dead),
            ActionState::Alive(_) => Transition {
                state: ActionState::Dead,
                fired: Triggers::DEATH,
            },
        }
    }

    /// Marks a living character as grounded.
    pub fn land(&self, current: &ActionState) -> ActionState {
        match current {
            ActionState::Alive(stance) => ActionState::Alive(Stance {
                grounded: true,
                ..*stance
            }),
            ActionState::Dead => ActionState::Dead,
        }
    }

    fn can_shoot(&self, pre: &Stance) -> bool {
        let has_round = match self.timings.magazine_size {
            Some(size) => pre.rounds_fired < size,
            None => true,
        };
        pre.aiming
            && has_round
            && matches!(pre.activity, Activity::Idle | Activity::Shooting { .. })
    }

    fn can_reload(&self, pre: &Stance) -> bool {
        self.timings.magazine_size.is_some() && pre.activity.is_idle() && pre.rounds_fired > 0
    }

    /// Counts down the timed activity and frees the slot when it runs out.
    fn expire(&self, mut stance: Stance, dt: f32, fired: &mut Triggers) -> Stance {
        let Some(remaining) = stance.activity.remaining() else {
            return stance;
        };
        let left = remaining - dt;
        if left > EXPIRY_EPSILON {
            stance.activity = match stance.activity {
                Activity::Rolling { .. } => Activity::Rolling { remaining: left },
                Activity::Shooting { .. } => Activity::Shooting { remaining: left },
                Activity::Reloading { .. } => Activity::Reloading { remaining: left },
                Activity::UsingItem { .. } => Activity::UsingItem { remaining: left },
                Activity::Idle => Activity::Idle,
            };
            return stance;
        }

        stance.activity = match stance.activity {
            Activity::Shooting { .. } if self.magazine_empty(&stance) => {
                fired.insert(Triggers::RELOAD);
                debug!(rounds = stance.rounds_fired, "Magazine empty, reloading");
                Activity::Reloading {
                    remaining: self.timings.reload,
                }
            }
            Activity::Reloading { .. } => {
                stance.rounds_fired = 0;
                Activity::Idle
            }
            _ => Activity::Idle,
        };
        stance
    }

    fn magazine_empty(&self, stance: &Stance) -> bool {
        self.timings
            .magazine_size
            .is_some_and(|size| stance.rounds_fired >= size)
    }
}
