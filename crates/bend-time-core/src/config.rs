//! Tunable parameters, loaded from JSON.

use serde::{Deserialize, Serialize};

use crate::physics::PHYSICS_DT;
use crate::scene::{DEFAULT_PLAYER_TOGGLE_RADIUS, DEFAULT_RAGDOLL_TOGGLE_RADIUS};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid value for '{field}': {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Configuration of the time-bending controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BendTimeConfig {
    #[serde(default = "default_true")]
    pub debug_mode: bool,
    /// Focus drained per second while time is frozen.
    #[serde(default = "default_focus_consumption")]
    pub focus_consumption: f32,
    /// Seconds between scheduling a deferred freeze and locking the body.
    #[serde(default = "default_deferred_freeze_delay")]
    pub deferred_freeze_delay: f32,
    /// Ragdoll toggle radius used while frozen.
    #[serde(default = "default_frozen_interaction_radius")]
    pub frozen_interaction_radius: f32,
    #[serde(default = "default_player_interaction_radius")]
    pub player_interaction_radius: f32,
    #[serde(default = "default_ragdoll_interaction_radius")]
    pub ragdoll_interaction_radius: f32,
    /// Item catalog ids skipped by the bulk freeze sweep.
    #[serde(default = "default_exempt_item_ids")]
    pub exempt_item_ids: Vec<String>,
    /// Squared speed above which a released free item re-arms its damage on resume.
    #[serde(default = "default_resume_damage_speed")]
    pub resume_damage_speed: f32,
    /// Physics step used to scale impact impulses.
    #[serde(default = "default_fixed_dt")]
    pub fixed_dt: f32,
    /// Play the slow-motion audio snapshot on transitions.
    #[serde(default)]
    pub slow_motion_audio: bool,
}

fn default_true() -> bool {
    true
}

fn default_focus_consumption() -> f32 {
    2.0
}

fn default_deferred_freeze_delay() -> f32 {
    0.2
}

fn default_frozen_interaction_radius() -> f32 {
    1000.0
}

fn default_player_interaction_radius() -> f32 {
    DEFAULT_PLAYER_TOGGLE_RADIUS
}

fn default_ragdoll_interaction_radius() -> f32 {
    DEFAULT_RAGDOLL_TOGGLE_RADIUS
}

fn default_exempt_item_ids() -> Vec<String> {
    [
        "GrooveSlinger.Dishonored.Bolt",
        "GrooveSlinger.Dishonored.SleepDart",
        "GrooveSlinger.Dishonored.StingBolt",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_resume_damage_speed() -> f32 {
    1.0
}

fn default_fixed_dt() -> f32 {
    PHYSICS_DT
}

impl Default for BendTimeConfig {
    fn default() -> Self {
        Self {
            debug_mode: default_true(),
            focus_consumption: default_focus_consumption(),
            deferred_freeze_delay: default_deferred_freeze_delay(),
            frozen_interaction_radius: default_frozen_interaction_radius(),
            player_interaction_radius: default_player_interaction_radius(),
            ragdoll_interaction_radius: default_ragdoll_interaction_radius(),
            exempt_item_ids: default_exempt_item_ids(),
            resume_damage_speed: default_resume_damage_speed(),
            fixed_dt: default_fixed_dt(),
            slow_motion_audio: false,
        }
    }
}

impl BendTimeConfig {
    /// Parses and validates a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(field: &'static str, value: f32, ok: bool, rule: &str) -> Result<(), ConfigError> {
            if ok && value.is_finite() {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: format!("{value} {rule}"),
                })
            }
        }

        check(
            "focus_consumption",
            self.focus_consumption,
            self.focus_consumption >= 0.0,
            "must be >= 0",
        )?;
        check(
            "deferred_freeze_delay",
            self.deferred_freeze_delay,
            self.deferred_freeze_delay > 0.0,
            "must be > 0",
        )?;
        check(
            "frozen_interaction_radius",
            self.frozen_interaction_radius,
            self.frozen_interaction_radius > 0.0,
            "must be > 0",
        )?;
        check(
            "player_interaction_radius",
            self.player_interaction_radius,
            self.player_interaction_radius > 0.0,
            "must be > 0",
        )?;
        check(
            "ragdoll_interaction_radius",
            self.ragdoll_interaction_radius,
            self.ragdoll_interaction_radius > 0.0,
            "must be > 0",
        )?;
        check(
            "resume_damage_speed",
            self.resume_damage_speed,
            self.resume_damage_speed >= 0.0,
            "must be >= 0",
        )?;
        check("fixed_dt", self.fixed_dt, self.fixed_dt > 0.0, "must be > 0")?;
        Ok(())
    }

    /// Returns true if the catalog id is skipped by the bulk sweep.
    pub fn is_exempt(&self, catalog_id: &str) -> bool {
        self.exempt_item_ids.iter().any(|id| id == catalog_id)
    }
}
