//! Outgoing transition messages.

use bevy::prelude::*;

use crate::bevy::{TimeControllerRes, TimeFrozenEvent, TimeResumedEvent};

/// Writes a message whenever the frozen flag changed since the last frame.
pub fn publish_freeze_transitions(
    controller: Res<TimeControllerRes>,
    mut was_frozen: Local<bool>,
    mut frozen_events: MessageWriter<TimeFrozenEvent>,
    mut resumed_events: MessageWriter<TimeResumedEvent>,
) {
    let frozen = controller.controller.is_frozen();
    if frozen == *was_frozen {
        return;
    }
    *was_frozen = frozen;
    if frozen {
        frozen_events.write(TimeFrozenEvent);
    } else {
        resumed_events.write(TimeResumedEvent);
    }
}
