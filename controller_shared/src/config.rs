//! Configuration system.
//!
//! Loads controller tuning from JSON strings/files. Every field has a default
//! so partial documents are accepted.

use std::path::Path;

use anyhow::{ensure, Context};
use serde::{Deserialize, Serialize};

/// How the controller treats a missing animation sink at build time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnimationMode {
    /// A missing sink is a configuration error.
    #[default]
    Strict,
    /// A missing sink is allowed; animation output is dropped.
    Headless,
}

/// Controller tuning shared by the state machine, solver and runner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Base ground speed in units per second.
    #[serde(default = "default_move_speed")]
    pub move_speed: f32,
    /// Upward impulse applied on jump.
    #[serde(default = "default_jump_force")]
    pub jump_force: f32,
    #[serde(default = "default_sprint_multiplier")]
    pub sprint_multiplier: f32,
    #[serde(default = "default_crouch_multiplier")]
    pub crouch_multiplier: f32,
    /// Slerp rate toward the movement direction, per second.
    #[serde(default = "default_turn_rate")]
    pub turn_rate: f32,
    /// Seconds.
    #[serde(default = "default_roll_duration")]
    pub roll_duration: f32,
    /// Seconds.
    #[serde(default = "default_shoot_flash_duration")]
    pub shoot_flash_duration: f32,
    /// Seconds.
    #[serde(default = "default_use_duration")]
    pub use_duration: f32,
    /// Seconds.
    #[serde(default = "default_reload_duration")]
    pub reload_duration: f32,
    /// Rounds per magazine. `None` disables reloading entirely.
    #[serde(default)]
    pub magazine_size: Option<u32>,
    /// Fixed simulation tick rate.
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,
    /// When set, movement input is ignored for the length of a roll.
    #[serde(default)]
    pub lock_steering_while_rolling: bool,
    #[serde(default)]
    pub animation: AnimationMode,
}

fn default_move_speed() -> f32 {
    5.0
}

fn default_jump_force() -> f32 {
    5.0
}

fn default_sprint_multiplier() -> f32 {
    1.5
}

fn default_crouch_multiplier() -> f32 {
    0.5
}

fn default_turn_rate() -> f32 {
    10.0
}

fn default_roll_duration() -> f32 {
    0.5
}

fn default_shoot_flash_duration() -> f32 {
    0.1
}

fn default_use_duration() -> f32 {
    0.5
}

fn default_reload_duration() -> f32 {
    1.5
}

fn default_tick_hz() -> u32 {
    50
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            move_speed: default_move_speed(),
            jump_force: default_jump_force(),
            sprint_multiplier: default_sprint_multiplier(),
            crouch_multiplier: default_crouch_multiplier(),
            turn_rate: default_turn_rate(),
            roll_duration: default_roll_duration(),
            shoot_flash_duration: default_shoot_flash_duration(),
            use_duration: default_use_duration(),
            reload_duration: default_reload_duration(),
            magazine_size: None,
            tick_hz: default_tick_hz(),
            lock_steering_while_rolling: false,
            animation: AnimationMode::Strict,
        }
    }
}

impl ControllerConfig {
    /// Parses config from JSON.
    pub fn from_json_str(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// Reads and validates a JSON config file.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("read config {}", path.display()))?;
        let cfg = Self::from_json_str(&text)
            .with_context(|| format!("parse config {}", path.display()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Fixed timestep in seconds.
    pub fn fixed_dt(&self) -> f32 {
        1.0 / self.tick_hz as f32
    }

    /// Rejects tunings the controller cannot run with.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(self.tick_hz > 0, "tick_hz must be positive");
        ensure!(self.move_speed >= 0.0, "move_speed must not be negative");
        ensure!(self.jump_force >= 0.0, "jump_force must not be negative");
        ensure!(
            self.sprint_multiplier > 0.0 && self.crouch_multiplier > 0.0,
            "speed multipliers must be positive"
        );
        ensure!(self.turn_rate > 0.0, "turn_rate must be positive");
        for (name, secs) in [
            ("roll_duration", self.roll_duration),
            ("shoot_flash_duration", self.shoot_flash_duration),
            ("use_duration", self.use_duration),
            ("reload_duration", self.reload_duration),
        ] {
            ensure!(secs > 0.0, "{name} must be positive, got {secs}");
        }
        ensure!(
            self.magazine_size != Some(0),
            "magazine_size must be at least 1 when set"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_uses_defaults() {
        let cfg = ControllerConfig::from_json_str(r#"{ "move_speed": 7.5, "animation": "headless" }"#)
            .unwrap();
        assert_eq!(cfg.move_speed, 7.5);
        assert_eq!(cfg.animation, AnimationMode::Headless);
        assert_eq!(cfg.roll_duration, 0.5);
        assert_eq!(cfg.magazine_size, None);
        assert_eq!(cfg.tick_hz, 50);
        cfg.validate().unwrap();
    }

    #[test]
    fn default_timestep_is_fifty_hertz() {
        let cfg = ControllerConfig::default();
        assert!((cfg.fixed_dt() - 0.02).abs() < 1e-6);
    }

    #[test]
    fn validate_rejects_bad_tuning() {
        let cfg = ControllerConfig {
            roll_duration: 0.0,
            ..Default::default()
        };
        let err = cfg.validate().unwrap_err();
        assert!(err.to_string().contains("roll_duration"));

        let cfg = ControllerConfig {
            magazine_size: Some(0),
            ..Default::default()
        };
        assert!(cfg.validate().is_err());

        let cfg = ControllerConfig {
            tick_hz: 0,
            ..Default::default()
        };
        assert!(cfg.validate().is_err());
    }
}
