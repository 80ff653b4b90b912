//! Gameplay messages into the reaction rules, in arrival order.

use bevy::prelude::*;

use crate::bevy::{GameplayMessage, SceneRes, TimeControllerRes};
use crate::reactions;

/// System to apply gameplay messages.
pub fn react_to_gameplay_events(
    mut controller: ResMut<TimeControllerRes>,
    mut scene: ResMut<SceneRes>,
    mut events: MessageReader<GameplayMessage>,
) {
    for GameplayMessage(event) in events.read() {
        tracing::debug!("[reaction] {:?}", event);
        reactions::react(&mut controller.controller, &mut scene.scene, event);
    }
}
