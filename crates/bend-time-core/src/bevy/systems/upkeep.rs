//! Deferred freezes, the bubble routine and stored-state pruning.

use bevy::prelude::*;

use crate::bevy::{FeedbackRes, SceneRes, TimeControllerRes};

/// Advances deferred freeze countdowns by the fixed step.
pub fn advance_deferred_freezes(
    time: Res<Time>,
    mut controller: ResMut<TimeControllerRes>,
    mut scene: ResMut<SceneRes>,
) {
    controller
        .controller
        .advance_deferred(&mut scene.scene, time.delta_secs());
}

/// Resumes the bubble routine once per frame.
pub fn resume_bubble_task(
    mut controller: ResMut<TimeControllerRes>,
    mut feedback: ResMut<FeedbackRes>,
) {
    controller.controller.resume_bubble(feedback.sink.as_mut());
}

/// Drops stored kinematics of removed bodies.
pub fn prune_stored_kinematics(mut controller: ResMut<TimeControllerRes>, scene: Res<SceneRes>) {
    controller.controller.prune(&scene.scene);
}
