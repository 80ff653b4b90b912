//! ECS Resources for bend time.

use std::collections::VecDeque;
use std::sync::Arc;

use bevy::prelude::*;
use parking_lot::Mutex;

use crate::config::BendTimeConfig;
use crate::controller::{TimeCommand, TimeController};
use crate::feedback::{FreezeFeedback, NoFeedback};
use crate::focus::Focus;
use crate::scene::Scene;

/// The time controller.
#[derive(Resource, Debug, Default)]
pub struct TimeControllerRes {
    pub controller: TimeController,
}

impl TimeControllerRes {
    pub fn new(config: BendTimeConfig) -> Self {
        Self {
            controller: TimeController::new(config),
        }
    }
}

/// Simulated objects and the physics world.
#[derive(Resource, Debug, Default)]
pub struct SceneRes {
    pub scene: Scene,
}

impl SceneRes {
    pub fn new(scene: Scene) -> Self {
        Self { scene }
    }
}

/// The player's focus meter.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FocusRes {
    pub focus: Focus,
}

impl Default for FocusRes {
    fn default() -> Self {
        Self {
            focus: Focus::new(100.0),
        }
    }
}

/// Effect and audio collaborator.
#[derive(Resource)]
pub struct FeedbackRes {
    pub sink: Box<dyn FreezeFeedback + Send + Sync>,
}

impl FeedbackRes {
    pub fn new(sink: impl FreezeFeedback + Send + Sync + 'static) -> Self {
        Self {
            sink: Box::new(sink),
        }
    }
}

impl Default for FeedbackRes {
    fn default() -> Self {
        Self::new(NoFeedback)
    }
}

/// Command queue shared with the host.
///
/// Clones share the same queue, so input code outside the app can push
/// spell commands that the app drains once per frame.
#[derive(Resource, Clone, Debug)]
pub struct TimeCommandQueue {
    inner: Arc<Mutex<VecDeque<TimeCommand>>>,
}

impl TimeCommandQueue {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(VecDeque::new())),
        }
    }

    /// Push a command to be processed.
    pub fn push(&self, command: TimeCommand) {
        self.inner.lock().push_back(command);
    }

    /// Drain all pending commands.
    pub fn drain(&self) -> Vec<TimeCommand> {
        self.inner.lock().drain(..).collect()
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }
}

impl Default for TimeCommandQueue {
    fn default() -> Self {
        Self::new()
    }
}
