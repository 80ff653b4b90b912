//! Command processing system.
//!
//! Processes spell commands pushed by the host.

use bevy::prelude::*;

use crate::bevy::{FeedbackRes, SceneRes, TimeCommandQueue, TimeControllerRes};

/// System to apply every pending command from the shared queue.
pub fn process_time_commands(
    queue: Res<TimeCommandQueue>,
    mut controller: ResMut<TimeControllerRes>,
    mut scene: ResMut<SceneRes>,
    mut feedback: ResMut<FeedbackRes>,
) {
    for command in queue.drain() {
        tracing::info!("[command] {:?}", command);
        controller
            .controller
            .apply_command(command, &mut scene.scene, feedback.sink.as_mut());
    }
}
