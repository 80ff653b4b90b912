//! Test utilities for headless Bevy integration tests.
//!
//! Provides `TestApp`, a wrapper around `bevy::app::App` that uses
//! `MinimalPlugins` + `BendTimeHeadlessPlugin` for testing freeze logic
//! without any host engine.

use bevy::ecs::message::Messages;
use bevy::prelude::*;

use crate::bevy::events::{GameplayMessage, TimeFrozenEvent, TimeResumedEvent};
use crate::bevy::plugin::BendTimeHeadlessPlugin;
use crate::bevy::resources::{SceneRes, TimeCommandQueue, TimeControllerRes};
use crate::config::BendTimeConfig;
use crate::controller::TimeCommand;
use crate::reactions::GameplayEvent;
use crate::scene::{CreatureId, ItemId, Scene};

/// A headless Bevy app wrapper for testing.
///
/// The scene starts with a single player creature.
pub(crate) struct TestApp {
    pub app: App,
    player: CreatureId,
}

impl TestApp {
    /// Create a new test app with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BendTimeConfig::default())
    }

    pub fn with_config(config: BendTimeConfig) -> Self {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(BendTimeHeadlessPlugin {
            config,
            command_queue: None,
        });
        // Pause virtual time so that only explicit step_physics calls
        // advance the fixed schedule.
        app.world_mut().resource_mut::<Time<Virtual>>().pause();

        let player = {
            let mut scene = app.world_mut().resource_mut::<SceneRes>();
            let player = scene.scene.spawn_creature(0.0, 0.0, 2);
            scene.scene.set_player(player);
            player
        };
        app.update();

        Self { app, player }
    }

    /// Run a single frame update.
    pub fn update(&mut self) {
        self.app.update();
    }

    /// Advance the fixed schedule by exactly `n` timesteps.
    ///
    /// Uses `Time<Fixed>::accumulate_overstep` to feed time directly into
    /// the fixed-timestep accumulator, bypassing virtual time.
    pub fn step_physics(&mut self, n: usize) {
        let dt = self.app.world().resource::<Time<Fixed>>().timestep();
        for _ in 0..n {
            self.app
                .world_mut()
                .resource_mut::<Time<Fixed>>()
                .accumulate_overstep(dt);
            self.app.update();
        }
    }

    /// Push a command to the command queue.
    pub fn push_command(&mut self, cmd: TimeCommand) {
        self.app.world().resource::<TimeCommandQueue>().push(cmd);
    }

    /// Write a gameplay message for the next fixed step.
    pub fn send(&mut self, event: GameplayEvent) {
        self.app.world_mut().write_message(GameplayMessage(event));
    }

    pub fn player(&self) -> CreatureId {
        self.player
    }

    pub fn is_frozen(&self) -> bool {
        self.app
            .world()
            .resource::<TimeControllerRes>()
            .controller
            .is_frozen()
    }

    pub fn scene(&self) -> &Scene {
        &self.app.world().resource::<SceneRes>().scene
    }

    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app.world_mut().resource_mut::<SceneRes>().into_inner().scene
    }

    pub fn item_locked(&self, id: ItemId) -> bool {
        let scene = self.scene();
        scene
            .item(id)
            .is_some_and(|item| scene.physics.is_locked(item.body))
    }

    pub fn creature_locked(&self, id: CreatureId) -> bool {
        let scene = self.scene();
        scene.creature(id).is_some_and(|creature| {
            creature
                .part_bodies()
                .iter()
                .all(|handle| scene.physics.is_locked(*handle))
        })
    }

    /// Number of buffered `TimeFrozenEvent` messages.
    pub fn frozen_messages(&self) -> usize {
        self.app.world().resource::<Messages<TimeFrozenEvent>>().len()
    }

    /// Number of buffered `TimeResumedEvent` messages.
    pub fn resumed_messages(&self) -> usize {
        self.app.world().resource::<Messages<TimeResumedEvent>>().len()
    }

    /// Get a reference to the World.
    pub fn world(&self) -> &World {
        self.app.world()
    }

    /// Get a mutable reference to the World.
    pub fn world_mut(&mut self) -> &mut World {
        self.app.world_mut()
    }
}
