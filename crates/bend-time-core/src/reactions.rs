//! Per-object overrides driven by gameplay events.
//!
//! The host reports what happened through [`GameplayEvent`]s. [`react`]
//! records the change on the [`Scene`] (grab lists, telekinesis flags, bow
//! seats) and then applies the matching freeze rule. Rules only act while
//! time is frozen; bookkeeping always happens.

use rapier2d::prelude::{ColliderHandle, Vector};

use crate::controller::TimeController;
use crate::scene::{BodyRef, BowId, CreatureId, Hand, ItemId, Scene};

/// Where an arrow sits on a bow string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArrowSeat {
    Rest,
    Nock,
}

/// Force parameters of a damage impact.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactForce {
    pub add_force: f32,
    /// Multiplier for the struck part.
    pub part_multiplier: f32,
    /// Multiplier for every other part of the ragdoll.
    pub other_multiplier: f32,
    /// Use the unit direction of the impact velocity instead of the velocity.
    pub normalize: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GameplayEvent {
    CreatureSpawned {
        creature: CreatureId,
    },
    RagdollGrabbed {
        creature: CreatureId,
        hand: Hand,
    },
    RagdollReleased {
        creature: CreatureId,
        hand: Hand,
    },
    CreatureDespawnRequested {
        creature: CreatureId,
    },
    ItemGrabbed {
        item: ItemId,
        hand: Hand,
    },
    ItemReleased {
        item: ItemId,
        hand: Hand,
    },
    ItemTelekinesisGrabbed {
        item: ItemId,
    },
    ItemTelekinesisReleased {
        item: ItemId,
    },
    DamageImpact {
        creature: CreatureId,
        struck_collider: ColliderHandle,
        velocity: Vector,
        force: ImpactForce,
    },
    ArrowSeated {
        bow: BowId,
        arrow: ItemId,
        seat: ArrowSeat,
    },
    /// Arrow let go from the string by a shot.
    ArrowShot {
        arrow: ItemId,
    },
    /// Arrow left its rest or nock without being shot.
    ArrowDetached {
        arrow: ItemId,
        seat: ArrowSeat,
    },
    BoltFired {
        bolt: ItemId,
    },
}

/// Records `event` on the scene and applies its freeze rule.
pub fn react(ctrl: &mut TimeController, scene: &mut Scene, event: &GameplayEvent) {
    let frozen = ctrl.is_frozen();
    match *event {
        GameplayEvent::CreatureSpawned { creature } => {
            if let Some(c) = scene.creature_mut(creature) {
                c.has_speaker = true;
            }
            if frozen && !scene.is_player(creature) {
                tracing::debug!("[reaction] Creature {:?} spawned while frozen", creature);
                ctrl.schedule_freeze(BodyRef::Creature(creature));
            }
        }
        GameplayEvent::RagdollGrabbed { creature, hand } => {
            scene.grab_ragdoll(creature, hand);
            if frozen {
                ctrl.unfreeze_creature(scene, creature);
            }
        }
        GameplayEvent::RagdollReleased { creature, hand } => {
            scene.release_ragdoll(creature, hand);
            let telekinesis = scene
                .creature(creature)
                .is_some_and(|c| c.ragdoll.telekinesis_grabbed);
            if frozen && !telekinesis {
                ctrl.freeze_creature(scene, creature);
            }
        }
        GameplayEvent::CreatureDespawnRequested { creature } => {
            if frozen {
                ctrl.unfreeze_creature(scene, creature);
            }
            ctrl.cancel_deferred(BodyRef::Creature(creature));
            if scene.remove_creature(creature).is_some() {
                ctrl.prune(scene);
                tracing::debug!("[reaction] Creature {:?} despawned", creature);
            }
        }
        GameplayEvent::ItemGrabbed { item, hand } => {
            scene.grab_item(item, hand);
            if frozen && scene.is_player_hand(hand) {
                ctrl.unfreeze_item(scene, item);
                yoink(scene, item);
            }
        }
        GameplayEvent::ItemReleased { item, hand } => {
            scene.release_item(item, hand);
            if frozen {
                ctrl.freeze_item(scene, item);
            }
        }
        GameplayEvent::ItemTelekinesisGrabbed { item } => {
            scene.set_item_telekinesis(item, true);
            if frozen {
                ctrl.unfreeze_item(scene, item);
            }
        }
        GameplayEvent::ItemTelekinesisReleased { item } => {
            scene.set_item_telekinesis(item, false);
            let unheld = scene.item(item).is_some_and(|i| !i.is_held());
            if frozen && unheld {
                ctrl.freeze_item(scene, item);
            }
        }
        GameplayEvent::DamageImpact {
            creature,
            struck_collider,
            velocity,
            force,
        } => {
            if frozen {
                accumulate_impact(ctrl, scene, creature, struck_collider, velocity, force);
            }
        }
        GameplayEvent::ArrowSeated { bow, arrow, seat } => {
            if let Some(string) = scene.bow_mut(bow) {
                match seat {
                    ArrowSeat::Rest => string.rested_arrow = Some(arrow),
                    ArrowSeat::Nock => string.nocked_arrow = Some(arrow),
                }
            }
        }
        GameplayEvent::ArrowShot { arrow } => {
            unseat_arrow(scene, arrow, None);
            if frozen {
                ctrl.unfreeze_item(scene, arrow);
            }
        }
        GameplayEvent::ArrowDetached { arrow, seat } => {
            unseat_arrow(scene, arrow, Some(seat));
            if frozen {
                ctrl.unfreeze_item(scene, arrow);
                ctrl.schedule_freeze(BodyRef::Item(arrow));
            }
        }
        GameplayEvent::BoltFired { bolt } => {
            if frozen {
                ctrl.schedule_freeze(BodyRef::Item(bolt));
            }
        }
    }
}

/// Forces every non-player hand off an item the player just took.
fn yoink(scene: &mut Scene, item: ItemId) {
    let Some(player) = scene.player() else {
        return;
    };
    if let Some(target) = scene.item_mut(item) {
        let before = target.handlers.len();
        target.handlers.retain(|hand| hand.creature == player);
        if target.handlers.len() != before {
            tracing::debug!("[reaction] Yoinked item {:?} from other holders", item);
        }
    }
}

fn unseat_arrow(scene: &mut Scene, arrow: ItemId, seat: Option<ArrowSeat>) {
    for id in scene.bow_ids() {
        let Some(string) = scene.bow_mut(id) else {
            continue;
        };
        if seat != Some(ArrowSeat::Nock) && string.rested_arrow == Some(arrow) {
            string.rested_arrow = None;
        }
        if seat != Some(ArrowSeat::Rest) && string.nocked_arrow == Some(arrow) {
            string.nocked_arrow = None;
        }
    }
}

/// Adds an impact impulse to the stored velocities of a locked ragdoll.
fn accumulate_impact(
    ctrl: &mut TimeController,
    scene: &Scene,
    creature: CreatureId,
    struck_collider: ColliderHandle,
    velocity: Vector,
    force: ImpactForce,
) {
    let Some(target) = scene.creature(creature) else {
        tracing::warn!("[reaction] Impact on missing creature {:?}", creature);
        return;
    };

    let direction = if force.normalize {
        let len = (velocity.x * velocity.x + velocity.y * velocity.y).sqrt();
        if len <= f32::EPSILON {
            return;
        }
        Vector::new(velocity.x / len, velocity.y / len)
    } else {
        velocity
    };

    let fixed_dt = ctrl.config().fixed_dt;
    for part in &target.ragdoll.parts {
        let multiplier = if part.collider == struck_collider && force.part_multiplier > 0.0 {
            force.part_multiplier
        } else {
            force.other_multiplier
        };
        if multiplier <= 0.0 {
            continue;
        }
        let Some(body) = scene.physics.get_rigid_body(part.body) else {
            continue;
        };
        let mass = body.mass();
        if mass <= 0.0 {
            continue;
        }
        let scale = force.add_force * multiplier * fixed_dt / mass;
        let delta = Vector::new(direction.x * scale, direction.y * scale);
        ctrl.add_velocity_delta(scene, part.body, delta);
    }
}

// ========== Per-tick rules ==========

/// Item update rule: penetration, exempt projectiles and held items.
pub fn item_tick(ctrl: &mut TimeController, scene: &mut Scene, id: ItemId) {
    if !ctrl.is_frozen() {
        return;
    }
    let Some(item) = scene.item(id) else {
        return;
    };

    // a destroyed target no longer carries the item
    let pierces_moving = item.penetrations.iter().any(|target| {
        scene
            .physics
            .get_rigid_body(*target)
            .is_some_and(|body| !crate::kinematics::is_locked(body))
    });
    if pierces_moving {
        ctrl.unfreeze_item(scene, id);
        return;
    }

    let exempt = ctrl.config().is_exempt(&item.catalog_id);
    if exempt && item.handlers.is_empty() && !ctrl.scheduler().is_pending(BodyRef::Item(id)) {
        ctrl.freeze_item(scene, id);
    } else if item.is_held() {
        ctrl.unfreeze_item(scene, id);
    }
}

/// Bow string rule: seated arrows follow the lock state of the bow handle.
pub fn bow_string_tick(ctrl: &mut TimeController, scene: &mut Scene, id: BowId) {
    if !ctrl.is_frozen() {
        return;
    }
    let Some(string) = scene.bow(id) else {
        return;
    };
    let arrows: Vec<ItemId> = string.arrows().collect();
    let handle_locked = scene
        .item(string.handle_item)
        .is_some_and(|handle| scene.physics.is_locked(handle.body));

    for arrow in arrows {
        if handle_locked {
            ctrl.freeze_item(scene, arrow);
        } else {
            ctrl.unfreeze_item(scene, arrow);
        }
    }
}

/// Runs a creature's brain unless time is frozen. Returns `true` if it ran.
pub fn brain_tick(ctrl: &TimeController, scene: &mut Scene, id: CreatureId) -> bool {
    let Some(creature) = scene.creature_mut(id) else {
        return false;
    };
    if ctrl.is_frozen() {
        return false;
    }
    creature.brain.ticks += 1;
    true
}

/// Runs a creature's speech, pausing its audio while frozen.
pub fn speech_tick(ctrl: &TimeController, scene: &mut Scene, id: CreatureId) -> bool {
    let frozen = ctrl.is_frozen();
    let Some(speech) = scene.creature_mut(id).and_then(|c| c.speech.as_mut()) else {
        return false;
    };
    speech.audio_paused = frozen;
    if frozen {
        return false;
    }
    speech.ticks += 1;
    true
}

/// Runs every per-tick rule over the scene once.
pub fn tick_rules(ctrl: &mut TimeController, scene: &mut Scene) {
    for id in scene.item_ids() {
        item_tick(ctrl, scene, id);
    }
    for id in scene.bow_ids() {
        bow_string_tick(ctrl, scene, id);
    }
    for id in scene.creature_ids() {
        brain_tick(ctrl, scene, id);
        speech_tick(ctrl, scene, id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::NoFeedback;
    use crate::scene::{ItemKind, Side};

    const BOLT: &str = "GrooveSlinger.Dishonored.Bolt";

    fn setup() -> (TimeController, Scene, CreatureId) {
        let mut scene = Scene::new();
        let player = scene.spawn_creature(0.0, 0.0, 2);
        scene.set_player(player);
        (TimeController::default(), scene, player)
    }

    fn frozen_setup() -> (TimeController, Scene, CreatureId) {
        let (mut ctrl, mut scene, player) = setup();
        ctrl.freeze(&mut scene, &mut NoFeedback);
        (ctrl, scene, player)
    }

    fn item_locked(scene: &Scene, id: ItemId) -> bool {
        scene.physics.is_locked(scene.item(id).unwrap().body)
    }

    fn creature_locked(scene: &Scene, id: CreatureId) -> bool {
        scene
            .creature(id)
            .unwrap()
            .part_bodies()
            .iter()
            .all(|h| scene.physics.is_locked(*h))
    }

    #[test]
    fn test_rules_are_noops_while_running() {
        let (mut ctrl, mut scene, player) = setup();
        let sword = scene.spawn_item("Sword", ItemKind::Weapon, 1.0, 1.0);
        let goblin = scene.spawn_creature(3.0, 0.0, 2);

        react(
            &mut ctrl,
            &mut scene,
            &GameplayEvent::ItemReleased {
                item: sword,
                hand: Hand::new(player, Side::Left),
            },
        );
        react(&mut ctrl, &mut scene, &GameplayEvent::CreatureSpawned { creature: goblin });
        react(&mut ctrl, &mut scene, &GameplayEvent::BoltFired { bolt: sword });

        assert!(!item_locked(&scene, sword));
        assert!(ctrl.scheduler().is_empty());
        // bookkeeping still happens
        assert!(scene.creature(goblin).unwrap().has_speaker);
    }

    #[test]
    fn test_spawn_while_frozen_schedules_deferred_freeze() {
        let (mut ctrl, mut scene, _) = frozen_setup();
        let goblin = scene.spawn_creature(3.0, 0.0, 2);

        react(&mut ctrl, &mut scene, &GameplayEvent::CreatureSpawned { creature: goblin });
        assert!(ctrl.scheduler().is_pending(BodyRef::Creature(goblin)));
        assert!(!creature_locked(&scene, goblin));

        ctrl.tick(&mut scene, &mut NoFeedback, 0.25);
        assert!(creature_locked(&scene, goblin));
    }

    #[test]
    fn test_ragdoll_grab_and_release() {
        let (mut ctrl, mut scene, player) = setup();
        let goblin = scene.spawn_creature(3.0, 0.0, 3);
        ctrl.freeze(&mut scene, &mut NoFeedback);
        let left = Hand::new(player, Side::Left);
        assert!(creature_locked(&scene, goblin));

        let grabbed = GameplayEvent::RagdollGrabbed { creature: goblin, hand: left };
        react(&mut ctrl, &mut scene, &grabbed);
        assert!(!creature_locked(&scene, goblin));
        assert!(scene.creature(goblin).unwrap().ragdoll.is_grabbed());

        let released = GameplayEvent::RagdollReleased { creature: goblin, hand: left };
        react(&mut ctrl, &mut scene, &released);
        assert!(creature_locked(&scene, goblin));
    }

    #[test]
    fn test_ragdoll_release_while_telekinesis_held_stays_free() {
        let (mut ctrl, mut scene, player) = setup();
        let goblin = scene.spawn_creature(3.0, 0.0, 2);
        ctrl.freeze(&mut scene, &mut NoFeedback);
        let left = Hand::new(player, Side::Left);

        let grabbed = GameplayEvent::RagdollGrabbed { creature: goblin, hand: left };
        react(&mut ctrl, &mut scene, &grabbed);
        scene.creature_mut(goblin).unwrap().ragdoll.telekinesis_grabbed = true;
        let released = GameplayEvent::RagdollReleased { creature: goblin, hand: left };
        react(&mut ctrl, &mut scene, &released);

        assert!(!creature_locked(&scene, goblin));
    }

    #[test]
    fn test_despawn_unfreezes_then_removes() {
        let (mut ctrl, mut scene, _) = setup();
        let goblin = scene.spawn_creature(3.0, 0.0, 2);
        ctrl.freeze(&mut scene, &mut NoFeedback);
        assert_eq!(ctrl.store().len(), 2);

        react(
            &mut ctrl,
            &mut scene,
            &GameplayEvent::CreatureDespawnRequested { creature: goblin },
        );

        assert!(scene.creature(goblin).is_none());
        assert!(ctrl.store().is_empty());
    }

    #[test]
    fn test_player_grab_unfreezes_and_yoinks() {
        let (mut ctrl, mut scene, player) = setup();
        let guard = scene.spawn_creature(3.0, 0.0, 1);
        let spear = scene.spawn_item("Spear", ItemKind::Weapon, 2.0, 1.0);
        let guard_hand = Hand::new(guard, Side::Right);
        scene.grab_item(spear, guard_hand);
        ctrl.freeze(&mut scene, &mut NoFeedback);
        assert!(item_locked(&scene, spear));

        let right = Hand::new(player, Side::Right);
        let grabbed = GameplayEvent::ItemGrabbed { item: spear, hand: right };
        react(&mut ctrl, &mut scene, &grabbed);

        assert!(!item_locked(&scene, spear));
        assert_eq!(scene.item(spear).unwrap().handlers, vec![right]);
    }

    #[test]
    fn test_item_release_freezes() {
        let (mut ctrl, mut scene, player) = frozen_setup();
        let sword = scene.spawn_item("Sword", ItemKind::Weapon, 1.0, 1.0);
        let left = Hand::new(player, Side::Left);

        let grabbed = GameplayEvent::ItemGrabbed { item: sword, hand: left };
        react(&mut ctrl, &mut scene, &grabbed);
        assert!(!item_locked(&scene, sword));

        let released = GameplayEvent::ItemReleased { item: sword, hand: left };
        react(&mut ctrl, &mut scene, &released);
        assert!(item_locked(&scene, sword));
    }

    #[test]
    fn test_telekinesis_grab_and_release() {
        let (mut ctrl, mut scene, _) = setup();
        let rock = scene.spawn_item("Rock", ItemKind::Misc, 1.0, 1.0);
        ctrl.freeze(&mut scene, &mut NoFeedback);

        let grabbed = GameplayEvent::ItemTelekinesisGrabbed { item: rock };
        react(&mut ctrl, &mut scene, &grabbed);
        assert!(!item_locked(&scene, rock));
        assert!(scene.item(rock).unwrap().telekinesis_held);

        let released = GameplayEvent::ItemTelekinesisReleased { item: rock };
        react(&mut ctrl, &mut scene, &released);
        assert!(item_locked(&scene, rock));
    }

    #[test]
    fn test_telekinesis_release_into_hand_stays_free() {
        let (mut ctrl, mut scene, player) = frozen_setup();
        let rock = scene.spawn_item("Rock", ItemKind::Misc, 1.0, 1.0);

        let grabbed = GameplayEvent::ItemTelekinesisGrabbed { item: rock };
        react(&mut ctrl, &mut scene, &grabbed);
        scene.grab_item(rock, Hand::new(player, Side::Left));
        let released = GameplayEvent::ItemTelekinesisReleased { item: rock };
        react(&mut ctrl, &mut scene, &released);

        assert!(!item_locked(&scene, rock));
    }

    #[test]
    fn test_damage_impact_accumulates_on_locked_parts() {
        let (mut ctrl, mut scene, _) = setup();
        let goblin = scene.spawn_creature(3.0, 0.0, 2);
        ctrl.freeze(&mut scene, &mut NoFeedback);

        let parts = scene.creature(goblin).unwrap().ragdoll.parts.clone();
        let struck = parts[0];
        let mass = scene.physics.get_rigid_body(struck.body).unwrap().mass();

        react(
            &mut ctrl,
            &mut scene,
            &GameplayEvent::DamageImpact {
                creature: goblin,
                struck_collider: struck.collider,
                velocity: Vector::new(3.0, 4.0),
                force: ImpactForce {
                    add_force: 2.0,
                    part_multiplier: 1.0,
                    other_multiplier: 0.0,
                    normalize: true,
                },
            },
        );

        let expected = 2.0 * ctrl.config().fixed_dt / mass;
        let stored = ctrl.store().get(struck.body).unwrap().pending_delta;
        assert!((stored.x - 0.6 * expected).abs() < 1e-5);
        assert!((stored.y - 0.8 * expected).abs() < 1e-5);

        let other = ctrl.store().get(parts[1].body).unwrap().pending_delta;
        assert_eq!((other.x, other.y), (0.0, 0.0));
    }

    #[test]
    fn test_damage_impact_reaches_other_parts() {
        let (mut ctrl, mut scene, _) = setup();
        let goblin = scene.spawn_creature(3.0, 0.0, 3);
        ctrl.freeze(&mut scene, &mut NoFeedback);

        let parts = scene.creature(goblin).unwrap().ragdoll.parts.clone();
        let force = ImpactForce {
            add_force: 1.0,
            part_multiplier: 2.0,
            other_multiplier: 0.5,
            normalize: false,
        };
        react(
            &mut ctrl,
            &mut scene,
            &GameplayEvent::DamageImpact {
                creature: goblin,
                struck_collider: parts[0].collider,
                velocity: Vector::new(1.0, 0.0),
                force,
            },
        );

        let dt = ctrl.config().fixed_dt;
        for (i, part) in parts.iter().enumerate() {
            let mass = scene.physics.get_rigid_body(part.body).unwrap().mass();
            let multiplier = if i == 0 { 2.0 } else { 0.5 };
            let stored = ctrl.store().get(part.body).unwrap().pending_delta;
            assert!((stored.x - multiplier * dt / mass).abs() < 1e-5);
            assert_eq!(stored.y, 0.0);
        }
    }

    #[test]
    fn test_struck_part_without_own_multiplier_uses_other() {
        let (mut ctrl, mut scene, _) = setup();
        let goblin = scene.spawn_creature(3.0, 0.0, 2);
        ctrl.freeze(&mut scene, &mut NoFeedback);

        let struck = scene.creature(goblin).unwrap().ragdoll.parts[0];
        let mass = scene.physics.get_rigid_body(struck.body).unwrap().mass();
        react(
            &mut ctrl,
            &mut scene,
            &GameplayEvent::DamageImpact {
                creature: goblin,
                struck_collider: struck.collider,
                velocity: Vector::new(0.0, 2.0),
                force: ImpactForce {
                    add_force: 1.0,
                    part_multiplier: 0.0,
                    other_multiplier: 0.25,
                    normalize: false,
                },
            },
        );

        let expected = 2.0 * 0.25 * ctrl.config().fixed_dt / mass;
        let stored = ctrl.store().get(struck.body).unwrap().pending_delta;
        assert!((stored.y - expected).abs() < 1e-5);
    }

    #[test]
    fn test_penetrating_item_follows_unlocked_target() {
        let (mut ctrl, mut scene, player) = setup();
        let goblin = scene.spawn_creature(3.0, 0.0, 1);
        let arrow = scene.spawn_item("Arrow", ItemKind::Arrow, 3.0, 0.5);
        let part = scene.creature(goblin).unwrap().ragdoll.parts[0].body;
        scene.item_mut(arrow).unwrap().penetrations.push(part);
        ctrl.freeze(&mut scene, &mut NoFeedback);

        item_tick(&mut ctrl, &mut scene, arrow);
        assert!(item_locked(&scene, arrow));

        react(
            &mut ctrl,
            &mut scene,
            &GameplayEvent::RagdollGrabbed {
                creature: goblin,
                hand: Hand::new(player, Side::Left),
            },
        );
        item_tick(&mut ctrl, &mut scene, arrow);
        assert!(!item_locked(&scene, arrow));
    }

    #[test]
    fn test_arrow_in_destroyed_body_stays_frozen() {
        let (mut ctrl, mut scene, _) = setup();
        let goblin = scene.spawn_creature(3.0, 0.0, 1);
        let arrow = scene.spawn_item("Arrow", ItemKind::Arrow, 3.0, 0.5);
        let part = scene.creature(goblin).unwrap().ragdoll.parts[0].body;
        scene.item_mut(arrow).unwrap().penetrations.push(part);
        ctrl.freeze(&mut scene, &mut NoFeedback);

        // the host destroys the body without telling the scene
        scene.physics.remove_rigid_body(part);
        item_tick(&mut ctrl, &mut scene, arrow);
        assert!(item_locked(&scene, arrow));
    }

    #[test]
    fn test_despawned_creature_drops_its_weapon() {
        let (mut ctrl, mut scene, _) = setup();
        let guard = scene.spawn_creature(3.0, 0.0, 1);
        let axe = scene.spawn_item("Axe", ItemKind::Weapon, 2.0, 1.0);
        let arrow = scene.spawn_item("Arrow", ItemKind::Arrow, 3.0, 0.5);
        scene.grab_item(axe, Hand::new(guard, Side::Left));
        let part = scene.creature(guard).unwrap().ragdoll.parts[0].body;
        scene.item_mut(arrow).unwrap().penetrations.push(part);

        react(
            &mut ctrl,
            &mut scene,
            &GameplayEvent::CreatureDespawnRequested { creature: guard },
        );
        ctrl.freeze(&mut scene, &mut NoFeedback);
        tick_rules(&mut ctrl, &mut scene);

        assert!(scene.item(axe).unwrap().handlers.is_empty());
        assert!(item_locked(&scene, axe));
        assert!(item_locked(&scene, arrow));
    }

    #[test]
    fn test_exempt_projectile_freezes_after_deferred_delay() {
        let (mut ctrl, mut scene, _) = frozen_setup();
        let bolt = scene.spawn_item(BOLT, ItemKind::Arrow, 1.0, 1.0);

        react(&mut ctrl, &mut scene, &GameplayEvent::BoltFired { bolt });
        item_tick(&mut ctrl, &mut scene, bolt);
        assert!(!item_locked(&scene, bolt));

        ctrl.tick(&mut scene, &mut NoFeedback, 0.25);
        assert!(item_locked(&scene, bolt));
    }

    #[test]
    fn test_exempt_projectile_without_ticket_freezes_on_tick() {
        let (mut ctrl, mut scene, _) = frozen_setup();
        let bolt = scene.spawn_item(BOLT, ItemKind::Arrow, 1.0, 1.0);
        assert!(!item_locked(&scene, bolt));

        item_tick(&mut ctrl, &mut scene, bolt);
        assert!(item_locked(&scene, bolt));
    }

    #[test]
    fn test_held_item_is_unfrozen_on_tick() {
        let (mut ctrl, mut scene, _) = setup();
        let guard = scene.spawn_creature(3.0, 0.0, 1);
        let axe = scene.spawn_item("Axe", ItemKind::Weapon, 2.0, 1.0);
        ctrl.freeze(&mut scene, &mut NoFeedback);
        scene.grab_item(axe, Hand::new(guard, Side::Left));

        item_tick(&mut ctrl, &mut scene, axe);
        assert!(!item_locked(&scene, axe));
    }

    #[test]
    fn test_bow_string_follows_handle() {
        let (mut ctrl, mut scene, player) = setup();
        let bow_item = scene.spawn_item("Bow", ItemKind::Weapon, 1.0, 1.0);
        let arrow = scene.spawn_item("Arrow", ItemKind::Arrow, 1.0, 1.2);
        let bow = scene.add_bow(bow_item);
        react(
            &mut ctrl,
            &mut scene,
            &GameplayEvent::ArrowSeated { bow, arrow, seat: ArrowSeat::Nock },
        );
        scene.grab_item(bow_item, Hand::new(player, Side::Left));
        ctrl.freeze(&mut scene, &mut NoFeedback);
        assert!(item_locked(&scene, arrow));

        bow_string_tick(&mut ctrl, &mut scene, bow);
        assert!(!item_locked(&scene, arrow));

        scene.release_item(bow_item, Hand::new(player, Side::Left));
        ctrl.freeze_item(&mut scene, bow_item);
        bow_string_tick(&mut ctrl, &mut scene, bow);
        assert!(item_locked(&scene, arrow));
    }

    #[test]
    fn test_arrow_shot_unfreezes_and_unseats() {
        let (mut ctrl, mut scene, _) = setup();
        let bow_item = scene.spawn_item("Bow", ItemKind::Weapon, 1.0, 1.0);
        let arrow = scene.spawn_item("Arrow", ItemKind::Arrow, 1.0, 1.2);
        let bow = scene.add_bow(bow_item);
        react(
            &mut ctrl,
            &mut scene,
            &GameplayEvent::ArrowSeated { bow, arrow, seat: ArrowSeat::Rest },
        );
        ctrl.freeze(&mut scene, &mut NoFeedback);

        react(&mut ctrl, &mut scene, &GameplayEvent::ArrowShot { arrow });

        assert!(!item_locked(&scene, arrow));
        assert_eq!(scene.bow(bow).unwrap().rested_arrow, None);
        assert!(ctrl.scheduler().is_empty());
    }

    #[test]
    fn test_arrow_detached_refreezes_after_delay() {
        let (mut ctrl, mut scene, _) = setup();
        let bow_item = scene.spawn_item("Bow", ItemKind::Weapon, 1.0, 1.0);
        let arrow = scene.spawn_item("Arrow", ItemKind::Arrow, 1.0, 1.2);
        let bow = scene.add_bow(bow_item);
        react(
            &mut ctrl,
            &mut scene,
            &GameplayEvent::ArrowSeated { bow, arrow, seat: ArrowSeat::Nock },
        );
        ctrl.freeze(&mut scene, &mut NoFeedback);

        react(
            &mut ctrl,
            &mut scene,
            &GameplayEvent::ArrowDetached { arrow, seat: ArrowSeat::Nock },
        );
        assert!(!item_locked(&scene, arrow));
        assert_eq!(scene.bow(bow).unwrap().nocked_arrow, None);

        ctrl.tick(&mut scene, &mut NoFeedback, 0.25);
        assert!(item_locked(&scene, arrow));
    }

    #[test]
    fn test_brain_and_speech_gating() {
        let (mut ctrl, mut scene, player) = setup();
        let goblin = scene.spawn_creature(3.0, 0.0, 1);

        assert!(brain_tick(&ctrl, &mut scene, goblin));
        assert!(speech_tick(&ctrl, &mut scene, goblin));

        ctrl.freeze(&mut scene, &mut NoFeedback);
        assert!(!brain_tick(&ctrl, &mut scene, goblin));
        assert!(!speech_tick(&ctrl, &mut scene, goblin));
        assert!(scene.creature(goblin).unwrap().speech.unwrap().audio_paused);
        assert!(!brain_tick(&ctrl, &mut scene, player));
        assert!(!speech_tick(&ctrl, &mut scene, player));

        ctrl.unfreeze(&mut scene, &mut NoFeedback);
        assert!(speech_tick(&ctrl, &mut scene, goblin));
        let creature = scene.creature(goblin).unwrap();
        assert!(!creature.speech.unwrap().audio_paused);
        assert_eq!(creature.brain.ticks, 1);
        assert_eq!(creature.speech.unwrap().ticks, 2);
    }
}
