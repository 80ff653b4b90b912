//! Physics stepping.

use bevy::prelude::*;

use crate::bevy::SceneRes;

/// Runs one physics simulation step.
pub fn step_scene_physics(mut scene: ResMut<SceneRes>) {
    scene.scene.physics.step();
}
