//! Focus drain system.

use bevy::prelude::*;

use crate::bevy::{FeedbackRes, FocusRes, SceneRes, TimeControllerRes};
use crate::controller::DrainOutcome;

/// Drains focus by one fixed step while time is frozen.
pub fn drain_focus_system(
    time: Res<Time>,
    mut controller: ResMut<TimeControllerRes>,
    mut scene: ResMut<SceneRes>,
    mut feedback: ResMut<FeedbackRes>,
    mut focus: ResMut<FocusRes>,
) {
    let outcome = controller.controller.drain_focus(
        &mut scene.scene,
        feedback.sink.as_mut(),
        &mut focus.focus,
        time.delta_secs(),
    );
    if outcome == DrainOutcome::Exhausted {
        tracing::debug!("[focus] Freeze ended by exhaustion");
    }
}
