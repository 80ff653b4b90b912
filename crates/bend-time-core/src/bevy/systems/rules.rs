//! Per-tick rules run once per physics step.

use bevy::prelude::*;

use crate::bevy::{SceneRes, TimeControllerRes};
use crate::reactions;

/// Runs the item, bow string, brain and speech rules over the scene.
pub fn run_tick_rules(mut controller: ResMut<TimeControllerRes>, mut scene: ResMut<SceneRes>) {
    reactions::tick_rules(&mut controller.controller, &mut scene.scene);
}
