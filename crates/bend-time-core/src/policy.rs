//! Eligibility rules: which items and creatures may be frozen.

use crate::config::BendTimeConfig;
use crate::scene::{Creature, Item, ItemKind, Scene};

/// Returns true if the item may be locked right now.
///
/// Body parts, telekinesis-held items, items already locked and items held
/// in either of the player's hands are never frozen. An item whose rigid
/// body is gone has nothing to lock.
pub fn should_freeze_item(scene: &Scene, item: &Item) -> bool {
    if item.kind == ItemKind::Body || item.telekinesis_held {
        return false;
    }
    match scene.physics.get_rigid_body(item.body) {
        None => return false,
        Some(body) if crate::kinematics::is_locked(body) => return false,
        Some(_) => {}
    }
    !scene.is_held_by_player(item)
}

/// Returns true if the bulk sweep skips the item.
///
/// Exempt projectiles are frozen only by the per-tick item rule.
pub fn is_bulk_exempt(config: &BendTimeConfig, item: &Item) -> bool {
    config.is_exempt(&item.catalog_id)
}

/// Returns true if the creature's ragdoll may be locked.
pub fn should_freeze_creature(scene: &Scene, creature: &Creature) -> bool {
    !scene.is_player(creature.id) && !creature.ragdoll.is_grabbed()
}

/// Suspends behaviour subsystems independent of rigid-body locking.
///
/// The animator stays enabled at zero speed so its pose holds.
pub fn suspend_creature(creature: &mut Creature) {
    creature.brain.running = false;
    if let Some(animator) = &mut creature.animator {
        animator.enabled = true;
        animator.speed = 0.0;
    }
    if let Some(locomotion) = &mut creature.locomotion {
        locomotion.moving = false;
        locomotion.allow_turn = false;
    }
    if let Some(navigation) = &mut creature.navigation {
        navigation.stopped = true;
    }
}

/// Reverses [`suspend_creature`].
pub fn resume_creature(creature: &mut Creature) {
    creature.brain.running = true;
    if let Some(navigation) = &mut creature.navigation {
        navigation.enabled = true;
        navigation.stopped = false;
    }
    if let Some(animator) = &mut creature.animator {
        animator.speed = 1.0;
    }
    if let Some(locomotion) = &mut creature.locomotion {
        locomotion.allow_turn = true;
    }
}
