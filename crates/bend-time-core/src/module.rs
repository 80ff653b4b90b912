//! Bootstrap entry point for hosts without an ECS.
//!
//! [`BendTimeModule`] parses the configuration, installs logging and owns the
//! [`TimeController`]. If loading fails the module stays degraded: the error
//! is logged once and every later call does nothing.

use crate::config::{BendTimeConfig, ConfigError};
use crate::controller::{DrainOutcome, TimeCommand, TimeController};
use crate::feedback::FreezeFeedback;
use crate::focus::FocusPool;
use crate::logging;
use crate::reactions::{self, GameplayEvent};
use crate::scene::Scene;

#[derive(Debug)]
pub struct BendTimeModule {
    controller: Option<TimeController>,
}

impl BendTimeModule {
    /// Loads the module from a JSON configuration.
    pub fn load(json: &str) -> Self {
        match BendTimeConfig::from_json(json) {
            Ok(config) => Self::with_config(config),
            Err(e) => Self::degraded(&e),
        }
    }

    pub fn with_config(config: BendTimeConfig) -> Self {
        logging::init_logging(config.debug_mode);
        tracing::info!("[module] Bend time loaded");
        Self {
            controller: Some(TimeController::new(config)),
        }
    }

    fn degraded(error: &ConfigError) -> Self {
        tracing::warn!("[module] Failed to load bend time: {}", error);
        Self { controller: None }
    }

    pub fn is_degraded(&self) -> bool {
        self.controller.is_none()
    }

    pub fn controller(&self) -> Option<&TimeController> {
        self.controller.as_ref()
    }

    pub fn controller_mut(&mut self) -> Option<&mut TimeController> {
        self.controller.as_mut()
    }

    pub fn is_frozen(&self) -> bool {
        self.controller.as_ref().is_some_and(TimeController::is_frozen)
    }

    /// Applies a spell or host command.
    pub fn command(
        &mut self,
        command: TimeCommand,
        scene: &mut Scene,
        fx: &mut dyn FreezeFeedback,
    ) {
        if let Some(ctrl) = &mut self.controller {
            ctrl.apply_command(command, scene, fx);
        }
    }

    /// Forwards a gameplay event to the reaction rules.
    pub fn handle(&mut self, event: &GameplayEvent, scene: &mut Scene) {
        if let Some(ctrl) = &mut self.controller {
            reactions::react(ctrl, scene, event);
        }
    }

    /// Per-frame update: focus drain, per-tick rules, deferred freezes and bubble.
    pub fn update(
        &mut self,
        scene: &mut Scene,
        fx: &mut dyn FreezeFeedback,
        focus: &mut dyn FocusPool,
        dt: f32,
    ) -> DrainOutcome {
        let Some(ctrl) = &mut self.controller else {
            return DrainOutcome::Idle;
        };
        let outcome = ctrl.drain_focus(scene, fx, focus, dt);
        reactions::tick_rules(ctrl, scene);
        ctrl.tick(scene, fx, dt);
        outcome
    }
}
