//! The global time state machine.
//!
//! [`TimeController`] owns the frozen flag together with the kinematic store
//! and the deferred-freeze table. It is passed explicitly to whatever needs
//! it; there is no global instance. Bulk sweeps happen only on explicit
//! [`TimeController::freeze`] / [`TimeController::unfreeze`] calls, never per
//! frame, so a per-object override made by an event rule stays in place until
//! the next transition.

use rapier2d::prelude::Vector;

use crate::bubble::{BubbleTask, TaskStatus};
use crate::config::BendTimeConfig;
use crate::feedback::{FreezeFeedback, SpellEffect};
use crate::focus::{FocusPool, inverse_lerp};
use crate::kinematics::KinematicStore;
use crate::policy;
use crate::scene::{BodyRef, CreatureId, ItemId, Scene};
use crate::scheduler::DeferredFreezeScheduler;

/// Global frozen/running flag.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FreezeState {
    frozen: bool,
}

impl FreezeState {
    pub fn is_frozen(self) -> bool {
        self.frozen
    }
}

/// Requests coming from the spell or the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeCommand {
    Freeze,
    Unfreeze,
    /// Spell cast: freeze when running, unfreeze when frozen.
    Toggle,
    /// Spell unloaded: stop effects and restart time.
    Unload,
}

/// Result of one focus-drain tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DrainOutcome {
    /// Time is running; nothing drained.
    Idle,
    Drained,
    /// The pool ran out and time was restarted.
    Exhausted,
}

#[derive(Debug)]
pub struct TimeController {
    config: BendTimeConfig,
    state: FreezeState,
    store: KinematicStore,
    scheduler: DeferredFreezeScheduler,
    bubble: Option<BubbleTask>,
}

impl Default for TimeController {
    fn default() -> Self {
        Self::new(BendTimeConfig::default())
    }
}

impl TimeController {
    pub fn new(config: BendTimeConfig) -> Self {
        Self {
            config,
            state: FreezeState::default(),
            store: KinematicStore::new(),
            scheduler: DeferredFreezeScheduler::new(),
            bubble: None,
        }
    }

    pub fn is_frozen(&self) -> bool {
        self.state.is_frozen()
    }

    pub fn state(&self) -> FreezeState {
        self.state
    }

    pub fn config(&self) -> &BendTimeConfig {
        &self.config
    }

    pub fn store(&self) -> &KinematicStore {
        &self.store
    }

    pub fn scheduler(&self) -> &DeferredFreezeScheduler {
        &self.scheduler
    }

    pub fn has_bubble(&self) -> bool {
        self.bubble.is_some()
    }

    /// Sets the frozen flag through the matching transition.
    pub fn set_frozen(&mut self, frozen: bool, scene: &mut Scene, fx: &mut dyn FreezeFeedback) {
        if frozen {
            self.freeze(scene, fx);
        } else {
            self.unfreeze(scene, fx);
        }
    }

    // ========== Global transitions ==========

    /// Freezes every eligible body. Returns `false` if already frozen.
    pub fn freeze(&mut self, scene: &mut Scene, fx: &mut dyn FreezeFeedback) -> bool {
        if self.state.frozen {
            return false;
        }
        self.state.frozen = true;

        let mut items = 0usize;
        for id in scene.item_ids() {
            let exempt = scene
                .item(id)
                .is_some_and(|item| policy::is_bulk_exempt(&self.config, item));
            if !exempt && self.freeze_item(scene, id) {
                items += 1;
            }
        }

        let mut creatures = 0usize;
        for id in scene.creature_ids() {
            if let Some(creature) = scene.creature_mut(id) {
                creature.ragdoll.player_toggle_radius = self.config.frozen_interaction_radius;
                creature.ragdoll.ragdoll_toggle_radius = self.config.frozen_interaction_radius;
            }
            if self.freeze_creature(scene, id) {
                creatures += 1;
            }
        }

        fx.pause_ambient();
        for id in scene.creature_ids() {
            if scene.creature(id).is_some_and(|c| c.has_speaker) {
                fx.keep_speaker_playing(id);
            }
        }
        fx.set_desaturation(1.0);
        if self.bubble.is_none() {
            self.bubble = Some(BubbleTask::start(fx));
        }
        if self.config.slow_motion_audio {
            fx.slow_motion_audio(true);
        }

        tracing::info!(
            "[freeze] Time frozen ({} items, {} creatures locked)",
            items,
            creatures
        );
        true
    }

    /// Releases every body. Returns `false` if time was already running.
    pub fn unfreeze(&mut self, scene: &mut Scene, fx: &mut dyn FreezeFeedback) -> bool {
        if !self.state.frozen {
            return false;
        }
        self.state.frozen = false;

        for id in scene.item_ids() {
            self.unfreeze_item(scene, id);
        }

        for id in scene.creature_ids() {
            if let Some(creature) = scene.creature_mut(id) {
                creature.ragdoll.player_toggle_radius = self.config.player_interaction_radius;
                creature.ragdoll.ragdoll_toggle_radius = self.config.ragdoll_interaction_radius;
            }
            self.unfreeze_creature(scene, id);
        }

        self.scheduler.clear();

        fx.resume_ambient();
        fx.set_desaturation(0.0);
        if self.config.slow_motion_audio {
            fx.slow_motion_audio(false);
        }

        tracing::info!("[freeze] Time resumed");
        true
    }

    // ========== Per-object transitions ==========

    /// Locks an item if policy allows. Returns `true` if it was locked now.
    pub fn freeze_item(&mut self, scene: &mut Scene, id: ItemId) -> bool {
        let Some(item) = scene.item(id) else {
            tracing::debug!("[freeze] Item {:?} no longer exists", id);
            return false;
        };
        if !policy::should_freeze_item(scene, item) {
            return false;
        }
        let handle = item.body;
        let Some(body) = scene.physics.get_rigid_body_mut(handle) else {
            return false;
        };
        self.store.capture_and_lock(handle, body);
        tracing::debug!("[freeze] Locked item {:?}", id);
        true
    }

    /// Unlocks an item unconditionally and cancels its pending deferred freeze.
    ///
    /// A fast free item re-arms its damage collision so it still hits on resume.
    pub fn unfreeze_item(&mut self, scene: &mut Scene, id: ItemId) {
        self.scheduler.cancel(BodyRef::Item(id));

        let Some(item) = scene.item(id) else {
            return;
        };
        let handle = item.body;
        let free_flying = !item.is_held() && !item.telekinesis_held;
        let Some(body) = scene.physics.get_rigid_body_mut(handle) else {
            return;
        };
        if !self.store.restore_and_unlock(handle, body) {
            return;
        }
        tracing::debug!("[freeze] Unlocked item {:?}", id);

        let v = body.linvel();
        let speed_sq = v.x * v.x + v.y * v.y;
        if free_flying && speed_sq > self.config.resume_damage_speed {
            if let Some(item) = scene.item_mut(id) {
                item.damage_armed = true;
            }
        }
    }

    /// Suspends a creature and locks its ragdoll unless it is grabbed.
    ///
    /// The player creature is never touched. Returns `true` if the ragdoll
    /// was locked.
    pub fn freeze_creature(&mut self, scene: &mut Scene, id: CreatureId) -> bool {
        if scene.is_player(id) {
            return false;
        }
        let Some(creature) = scene.creature_mut(id) else {
            tracing::debug!("[freeze] Creature {:?} no longer exists", id);
            return false;
        };
        policy::suspend_creature(creature);

        let Some(creature) = scene.creature(id) else {
            return false;
        };
        if !policy::should_freeze_creature(scene, creature) {
            return false;
        }

        for handle in creature.part_bodies() {
            if let Some(body) = scene.physics.get_rigid_body_mut(handle) {
                self.store.capture_and_lock(handle, body);
            }
        }
        tracing::debug!("[freeze] Locked creature {:?}", id);
        true
    }

    /// Resumes a creature and unlocks all of its ragdoll parts.
    pub fn unfreeze_creature(&mut self, scene: &mut Scene, id: CreatureId) {
        if scene.is_player(id) {
            return;
        }
        self.scheduler.cancel(BodyRef::Creature(id));

        let Some(creature) = scene.creature_mut(id) else {
            return;
        };
        policy::resume_creature(creature);
        let parts = creature.part_bodies();

        let mut unlocked = false;
        for handle in parts {
            if let Some(body) = scene.physics.get_rigid_body_mut(handle) {
                unlocked |= self.store.restore_and_unlock(handle, body);
            }
        }
        if unlocked {
            tracing::debug!("[freeze] Unlocked creature {:?}", id);
        }
    }

    /// Freezes whatever body `target` resolves to.
    pub fn freeze_target(&mut self, scene: &mut Scene, target: BodyRef) -> bool {
        match target {
            BodyRef::Item(id) => self.freeze_item(scene, id),
            BodyRef::Creature(id) => self.freeze_creature(scene, id),
        }
    }

    /// Adds a velocity change to a locked body's stored kinematics.
    pub fn add_velocity_delta(
        &mut self,
        scene: &Scene,
        handle: rapier2d::prelude::RigidBodyHandle,
        delta: Vector,
    ) -> bool {
        if !scene.physics.is_locked(handle) {
            return false;
        }
        self.store.add_velocity_delta(handle, delta)
    }

    // ========== Deferred freezes ==========

    /// Schedules a freeze of `target` after the configured settling delay.
    pub fn schedule_freeze(&mut self, target: BodyRef) {
        self.scheduler
            .schedule(target, self.config.deferred_freeze_delay);
    }

    pub fn cancel_deferred(&mut self, target: BodyRef) -> bool {
        self.scheduler.cancel(target)
    }

    /// Advances deferred freezes by `dt` and locks the expired ones.
    ///
    /// Tickets whose body is gone, or that expire while time is running, are
    /// dropped.
    pub fn advance_deferred(&mut self, scene: &mut Scene, dt: f32) {
        for target in self.scheduler.advance(dt) {
            if !self.state.frozen {
                tracing::debug!("[deferred] Dropping {:?}, time is running", target);
                continue;
            }
            if !scene.contains(target) {
                tracing::debug!("[deferred] Dropping {:?}, body is gone", target);
                continue;
            }
            self.freeze_target(scene, target);
        }
    }

    // ========== Per-frame upkeep ==========

    /// Resumes the bubble routine once.
    pub fn resume_bubble(&mut self, fx: &mut dyn FreezeFeedback) {
        let frozen = self.state.frozen;
        if let Some(task) = &mut self.bubble {
            if task.resume(frozen, fx) == TaskStatus::Finished {
                self.bubble = None;
            }
        }
    }

    /// Drops stored kinematics of bodies that no longer exist.
    pub fn prune(&mut self, scene: &Scene) {
        self.store
            .retain_live(|handle| scene.physics.get_rigid_body(handle).is_some());
    }

    /// Frame upkeep: deferred freezes, bubble routine and pruning.
    pub fn tick(&mut self, scene: &mut Scene, fx: &mut dyn FreezeFeedback, dt: f32) {
        self.advance_deferred(scene, dt);
        self.resume_bubble(fx);
        self.prune(scene);
    }

    /// Drains the focus pool while frozen; restarts time once it runs out.
    pub fn drain_focus(
        &mut self,
        scene: &mut Scene,
        fx: &mut dyn FreezeFeedback,
        pool: &mut dyn FocusPool,
        dt: f32,
    ) -> DrainOutcome {
        if !self.state.frozen {
            return DrainOutcome::Idle;
        }

        fx.set_drain_intensity(inverse_lerp(pool.max(), 0.0, pool.current()));
        if pool.consume(self.config.focus_consumption * dt) {
            return DrainOutcome::Drained;
        }

        tracing::info!("[focus] Focus exhausted, restarting time");
        self.unfreeze(scene, fx);
        DrainOutcome::Exhausted
    }

    // ========== Commands ==========

    /// Applies a spell or host command.
    pub fn apply_command(
        &mut self,
        command: TimeCommand,
        scene: &mut Scene,
        fx: &mut dyn FreezeFeedback,
    ) {
        match command {
            TimeCommand::Freeze => {
                self.freeze(scene, fx);
            }
            TimeCommand::Unfreeze => {
                self.unfreeze(scene, fx);
            }
            TimeCommand::Toggle if self.state.frozen => {
                self.unfreeze(scene, fx);
                fx.stop_spell_effect(SpellEffect::Loop);
                fx.play_spell_effect(SpellEffect::End);
            }
            TimeCommand::Toggle => {
                self.freeze(scene, fx);
                fx.play_spell_effect(SpellEffect::Start);
                fx.play_spell_effect(SpellEffect::Loop);
            }
            TimeCommand::Unload => {
                fx.stop_spell_effect(SpellEffect::Loop);
                self.unfreeze(scene, fx);
                tracing::info!("[freeze] Spell unloaded");
            }
        }
    }
}
