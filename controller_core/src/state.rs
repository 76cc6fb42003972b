//! Action state.
//!
//! A character is either dead or alive with a `Stance`. The stance holds one
//! exclusive `Activity` plus orthogonal flags. Death carries no flags at all,
//! so combinations like "dead and sprinting" cannot be built.

use serde::{Deserialize, Serialize};

/// The exclusive timed activity of a living character. Remaining times are in
/// seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub enum Activity {
    #[default]
    Idle,
    Rolling { remaining: f32 },
    Shooting { remaining: f32 },
    Reloading { remaining: f32 },
    UsingItem { remaining: f32 },
}

impl Activity {
    pub fn is_idle(&self) -> bool {
        matches!(self, Activity::Idle)
    }

    pub fn is_rolling(&self) -> bool {
        matches!(self, Activity::Rolling { .. })
    }

    pub fn is_reloading(&self) -> bool {
        matches!(self, Activity::Reloading { .. })
    }

    /// Seconds left, `None` for `Idle`.
    pub fn remaining(&self) -> Option<f32> {
        match *self {
            Activity::Idle => None,
            Activity::Rolling { remaining }
            | Activity::Shooting { remaining }
            | Activity::Reloading { remaining }
            | Activity::UsingItem { remaining } => Some(remaining),
        }
    }
}

/// Everything about a living character that the action rules track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Stance {
    pub activity: Activity,
    /// Persists underneath timed activities.
    pub crouched: bool,
    pub aiming: bool,
    pub sprinting: bool,
    pub grounded: bool,
    /// Shots since the last reload. Only meaningful with a magazine.
    pub rounds_fired: u32,
}

impl Stance {
    /// State at spawn: idle, standing, on the ground.
    pub fn spawn() -> Self {
        Self {
            activity: Activity::Idle,
            crouched: false,
            aiming: false,
            sprinting: false,
            grounded: true,
            rounds_fired: 0,
        }
    }
}

impl Default for Stance {
    fn default() -> Self {
        Self::spawn()
    }
}

/// Full action state of a character.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ActionState {
    Alive(Stance),
    /// Terminal.
    Dead,
}

impl Default for ActionState {
    fn default() -> Self {
        ActionState::Alive(Stance::spawn())
    }
}

impl ActionState {
    pub fn stance(&self) -> Option<&Stance> {
        match self {
            ActionState::Alive(stance) => Some(stance),
            ActionState::Dead => None,
        }
    }

    pub fn is_dead(&self) -> bool {
        matches!(self, ActionState::Dead)
    }

    pub fn is_crouched(&self) -> bool {
        self.stance().is_some_and(|s| s.crouched)
    }

    pub fn is_aiming(&self) -> bool {
        self.stance().is_some_and(|s| s.aiming)
    }

    pub fn is_sprinting(&self) -> bool {
        self.stance().is_some_and(|s| s.sprinting)
    }

    pub fn is_grounded(&self) -> bool {
        self.stance().is_some_and(|s| s.grounded)
    }

    /// The single exclusive slot this state occupies.
    pub fn slot(&self) -> Slot {
        let ActionState::Alive(stance) = self else {
            return Slot::Dead;
        };
        match stance.activity {
            Activity::Idle if stance.crouched => Slot::Crouching,
            Activity::Idle => Slot::Idle,
            Activity::Rolling { .. } => Slot::Rolling,
            Activity::Shooting { .. } => Slot::Shooting,
            Activity::Reloading { .. } => Slot::Reloading,
            Activity::UsingItem { .. } => Slot::UsingItem,
        }
    }
}

/// Combined exclusive slot, as seen from outside the state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Slot {
    Idle,
    Crouching,
    Rolling,
    Shooting,
    Reloading,
    UsingItem,
    Dead,
}

bitflags::bitflags! {
    /// One-shot transitions that fired during a tick.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct Triggers: u8 {
        const JUMP = 1 << 0;
        const ROLL = 1 << 1;
        const SHOOT = 1 << 2;
        const USE = 1 << 3;
        const RELOAD = 1 << 4;
        const DEATH = 1 << 5;
    }
}

/// Result of one resolution step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transition {
    pub state: ActionState,
    pub fired: Triggers,
}

impl Transition {
    pub fn quiet(state: ActionState) -> Self {
        Self {
            state,
            fired: Triggers::empty(),
        }
    }
}
