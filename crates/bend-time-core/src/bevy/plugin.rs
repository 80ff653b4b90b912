//! Bevy plugins for bend time.
//!
//! Provides:
//! - `BendTimeHeadlessPlugin`: resources, messages and systems, no logging setup
//! - `BendTimePlugin`: `BendTimeHeadlessPlugin` + tracing subscriber installation

use bevy::prelude::*;

use crate::bevy::events::*;
use crate::bevy::resources::*;
use crate::bevy::systems;
use crate::config::BendTimeConfig;
use crate::logging;

/// Ordering of the fixed-step work.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum BendTimeSet {
    /// Gameplay messages into the reaction rules.
    Reactions,
    /// Per-tick item, bow, brain and speech rules.
    Rules,
    /// Focus drain.
    Drain,
    /// Deferred freezes and bubble routine.
    Upkeep,
    /// Physics step.
    Step,
}

// ============================================================================
// Headless Plugin
// ============================================================================

/// Plugin containing all bend time logic.
///
/// `SceneRes` and `FeedbackRes` are only inserted when the host has not
/// provided them already, so the host may insert its own before or after
/// adding the plugin.
pub struct BendTimeHeadlessPlugin {
    pub config: BendTimeConfig,
    pub command_queue: Option<TimeCommandQueue>,
}

impl Default for BendTimeHeadlessPlugin {
    fn default() -> Self {
        Self {
            config: BendTimeConfig::default(),
            command_queue: None,
        }
    }
}

impl Plugin for BendTimeHeadlessPlugin {
    fn build(&self, app: &mut App) {
        // ====================================================================
        // Physics
        // ====================================================================
        app.insert_resource(Time::<Fixed>::from_seconds(f64::from(self.config.fixed_dt)));

        // ====================================================================
        // Resources
        // ====================================================================
        app.insert_resource(TimeControllerRes::new(self.config.clone()))
            .insert_resource(self.command_queue.clone().unwrap_or_default())
            .init_resource::<SceneRes>()
            .init_resource::<FocusRes>()
            .init_resource::<FeedbackRes>();

        // ====================================================================
        // Messages
        // ====================================================================
        app.add_message::<GameplayMessage>();

        // Outgoing messages
        app.add_message::<TimeFrozenEvent>()
            .add_message::<TimeResumedEvent>();

        // ====================================================================
        // Systems
        // ====================================================================
        app.configure_sets(
            FixedUpdate,
            (
                BendTimeSet::Reactions,
                BendTimeSet::Rules,
                BendTimeSet::Drain,
                BendTimeSet::Upkeep,
                BendTimeSet::Step,
            )
                .chain(),
        );

        app.add_systems(
            FixedUpdate,
            systems::react_to_gameplay_events.in_set(BendTimeSet::Reactions),
        );
        app.add_systems(FixedUpdate, systems::run_tick_rules.in_set(BendTimeSet::Rules));
        app.add_systems(FixedUpdate, systems::drain_focus_system.in_set(BendTimeSet::Drain));
        app.add_systems(
            FixedUpdate,
            (
                systems::advance_deferred_freezes,
                systems::prune_stored_kinematics,
            )
                .chain()
                .in_set(BendTimeSet::Upkeep),
        );
        app.add_systems(FixedUpdate, systems::step_scene_physics.in_set(BendTimeSet::Step));

        app.add_systems(
            Update,
            (
                systems::process_time_commands,
                systems::resume_bubble_task,
                systems::publish_freeze_transitions,
            )
                .chain(),
        );
    }
}

// ============================================================================
// Full Plugin
// ============================================================================

/// Headless plugin plus tracing subscriber installation.
#[derive(Default)]
pub struct BendTimePlugin {
    pub config: BendTimeConfig,
    pub command_queue: Option<TimeCommandQueue>,
}

impl Plugin for BendTimePlugin {
    fn build(&self, app: &mut App) {
        logging::init_logging(self.config.debug_mode);
        tracing::info!("[module] Bend time plugin loaded");
        app.add_plugins(BendTimeHeadlessPlugin {
            config: self.config.clone(),
            command_queue: self.command_queue.clone(),
        });
    }
}
