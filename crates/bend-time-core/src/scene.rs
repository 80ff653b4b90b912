//! Registry of simulated items, creatures and bow strings.
//!
//! The scene is the host-side view the freeze logic queries: who holds an
//! item, whether a ragdoll is grabbed, which rigid bodies make up a creature.
//! Objects are addressed by stable numeric ids; every lookup returns `Option`
//! because an object may be gone by the time an event about it is handled.

use std::collections::BTreeMap;

use rapier2d::prelude::*;

use crate::physics::PhysicsWorld;

/// Stable identifier of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub u32);

/// Stable identifier of a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CreatureId(pub u32);

/// Stable identifier of a bow string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BowId(pub u32);

/// A simulated body, resolved as either an item or a creature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BodyRef {
    Item(ItemId),
    Creature(CreatureId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    Left,
    Right,
}

/// A hand of a creature, used as a holder of items and ragdoll parts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Hand {
    pub creature: CreatureId,
    pub side: Side,
}

impl Hand {
    pub fn new(creature: CreatureId, side: Side) -> Self {
        Self { creature, side }
    }
}

/// Broad item category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Part of a creature's body; never frozen on its own.
    Body,
    Weapon,
    Arrow,
    Misc,
}

/// A handheld or thrown object backed by one rigid body.
#[derive(Debug, Clone)]
pub struct Item {
    pub id: ItemId,
    /// Catalog identifier of the item type.
    pub catalog_id: String,
    pub kind: ItemKind,
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
    /// Hands currently holding the item.
    pub handlers: Vec<Hand>,
    pub telekinesis_held: bool,
    /// Target bodies of active penetration joints (e.g. a blade stuck in a ragdoll).
    pub penetrations: Vec<RigidBodyHandle>,
    /// Set when the item's damage collision was re-armed on resume.
    pub damage_armed: bool,
}

impl Item {
    pub fn is_held(&self) -> bool {
        !self.handlers.is_empty()
    }
}

/// One rigid part of a creature's ragdoll.
#[derive(Debug, Clone, Copy)]
pub struct RagdollPart {
    pub body: RigidBodyHandle,
    pub collider: ColliderHandle,
}

#[derive(Debug, Clone)]
pub struct Ragdoll {
    pub parts: Vec<RagdollPart>,
    /// Hands currently holding any of the ragdoll's parts.
    pub grabbed_by: Vec<Hand>,
    pub telekinesis_grabbed: bool,
    /// Distance to the player under which ragdoll physics toggles on.
    pub player_toggle_radius: f32,
    /// Distance to other ragdolls under which ragdoll physics toggles on.
    pub ragdoll_toggle_radius: f32,
}

impl Ragdoll {
    pub fn is_grabbed(&self) -> bool {
        !self.grabbed_by.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animator {
    pub enabled: bool,
    pub speed: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locomotion {
    pub moving: bool,
    pub allow_turn: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavAgent {
    pub enabled: bool,
    pub stopped: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Brain {
    pub running: bool,
    /// Number of brain updates that were allowed to run.
    pub ticks: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Speech {
    pub audio_paused: bool,
    pub ticks: u64,
}

/// An articulated ragdoll with its behaviour subsystems.
#[derive(Debug, Clone)]
pub struct Creature {
    pub id: CreatureId,
    pub ragdoll: Ragdoll,
    pub animator: Option<Animator>,
    pub locomotion: Option<Locomotion>,
    pub navigation: Option<NavAgent>,
    pub brain: Brain,
    pub speech: Option<Speech>,
    /// Marks the jaw audio source as a speaker, exempt from ambient pausing.
    pub has_speaker: bool,
}

impl Creature {
    pub fn part_bodies(&self) -> Vec<RigidBodyHandle> {
        self.ragdoll.parts.iter().map(|part| part.body).collect()
    }
}

/// Bow string with its optional rested and nocked arrows.
#[derive(Debug, Clone, Copy)]
pub struct BowString {
    pub id: BowId,
    /// Item whose body carries the string handle.
    pub handle_item: ItemId,
    pub rested_arrow: Option<ItemId>,
    pub nocked_arrow: Option<ItemId>,
}

impl BowString {
    pub fn arrows(&self) -> impl Iterator<Item = ItemId> {
        self.rested_arrow.into_iter().chain(self.nocked_arrow)
    }
}

/// Default ragdoll toggle radius around the player.
pub const DEFAULT_PLAYER_TOGGLE_RADIUS: f32 = 5.0;
/// Default ragdoll toggle radius between ragdolls.
pub const DEFAULT_RAGDOLL_TOGGLE_RADIUS: f32 = 3.0;

const ITEM_RADIUS: f32 = 0.1;
const PART_RADIUS: f32 = 0.15;
const PART_SPACING: f32 = 0.35;

/// All simulated objects plus the physics world that moves them.
#[derive(Debug, Default)]
pub struct Scene {
    pub physics: PhysicsWorld,
    items: BTreeMap<ItemId, Item>,
    creatures: BTreeMap<CreatureId, Creature>,
    bows: BTreeMap<BowId, BowString>,
    player: Option<CreatureId>,
    next_item_id: u32,
    next_creature_id: u32,
    next_bow_id: u32,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Items ==========

    /// Spawns an item with a dynamic body at the given position.
    pub fn spawn_item(&mut self, catalog_id: &str, kind: ItemKind, x: f32, y: f32) -> ItemId {
        let id = ItemId(self.next_item_id);
        self.next_item_id += 1;

        let body = self.physics.add_rigid_body(
            RigidBodyBuilder::dynamic()
                .translation(Vector::new(x, y))
                .ccd_enabled(true)
                .build(),
        );
        let collider = self
            .physics
            .add_collider(ColliderBuilder::ball(ITEM_RADIUS).density(1.0).build(), body);

        self.items.insert(
            id,
            Item {
                id,
                catalog_id: catalog_id.to_string(),
                kind,
                body,
                collider,
                handlers: Vec::new(),
                telekinesis_held: false,
                penetrations: Vec::new(),
                damage_armed: false,
            },
        );
        id
    }

    /// Removes an item and its rigid body. Returns the removed item.
    pub fn remove_item(&mut self, id: ItemId) -> Option<Item> {
        let item = self.items.remove(&id)?;
        self.physics.remove_rigid_body(item.body);
        self.forget_bodies(&[item.body]);
        for bow in self.bows.values_mut() {
            if bow.rested_arrow == Some(id) {
                bow.rested_arrow = None;
            }
            if bow.nocked_arrow == Some(id) {
                bow.nocked_arrow = None;
            }
        }
        Some(item)
    }

    pub fn item(&self, id: ItemId) -> Option<&Item> {
        self.items.get(&id)
    }

    pub fn item_mut(&mut self, id: ItemId) -> Option<&mut Item> {
        self.items.get_mut(&id)
    }

    /// Snapshot of item ids, for sweeps that mutate the scene.
    pub fn item_ids(&self) -> Vec<ItemId> {
        self.items.keys().copied().collect()
    }

    /// Records a hand grabbing an item.
    pub fn grab_item(&mut self, id: ItemId, hand: Hand) -> bool {
        let Some(item) = self.items.get_mut(&id) else {
            return false;
        };
        if !item.handlers.contains(&hand) {
            item.handlers.push(hand);
        }
        true
    }

    /// Records a hand letting go of an item.
    pub fn release_item(&mut self, id: ItemId, hand: Hand) -> bool {
        let Some(item) = self.items.get_mut(&id) else {
            return false;
        };
        let before = item.handlers.len();
        item.handlers.retain(|h| *h != hand);
        item.handlers.len() != before
    }

    pub fn set_item_telekinesis(&mut self, id: ItemId, held: bool) -> bool {
        let Some(item) = self.items.get_mut(&id) else {
            return false;
        };
        item.telekinesis_held = held;
        true
    }

    // ========== Creatures ==========

    /// Spawns a creature whose ragdoll is a column of `part_count` parts.
    pub fn spawn_creature(&mut self, x: f32, y: f32, part_count: usize) -> CreatureId {
        let id = CreatureId(self.next_creature_id);
        self.next_creature_id += 1;

        let mut parts = Vec::with_capacity(part_count);
        for i in 0..part_count {
            #[allow(clippy::cast_precision_loss)]
            let offset = i as f32 * PART_SPACING;
            let body = self.physics.add_rigid_body(
                RigidBodyBuilder::dynamic()
                    .translation(Vector::new(x, y + offset))
                    .build(),
            );
            let collider = self
                .physics
                .add_collider(ColliderBuilder::ball(PART_RADIUS).density(1.0).build(), body);
            parts.push(RagdollPart { body, collider });
        }

        self.creatures.insert(
            id,
            Creature {
                id,
                ragdoll: Ragdoll {
                    parts,
                    grabbed_by: Vec::new(),
                    telekinesis_grabbed: false,
                    player_toggle_radius: DEFAULT_PLAYER_TOGGLE_RADIUS,
                    ragdoll_toggle_radius: DEFAULT_RAGDOLL_TOGGLE_RADIUS,
                },
                animator: Some(Animator {
                    enabled: true,
                    speed: 1.0,
                }),
                locomotion: Some(Locomotion {
                    moving: false,
                    allow_turn: true,
                }),
                navigation: Some(NavAgent {
                    enabled: true,
                    stopped: false,
                }),
                brain: Brain {
                    running: true,
                    ticks: 0,
                },
                speech: Some(Speech::default()),
                has_speaker: false,
            },
        );
        id
    }

    /// Removes a creature and all of its ragdoll bodies.
    pub fn remove_creature(&mut self, id: CreatureId) -> Option<Creature> {
        let creature = self.creatures.remove(&id)?;
        let bodies = creature.part_bodies();
        for body in &bodies {
            self.physics.remove_rigid_body(*body);
        }
        self.forget_bodies(&bodies);

        // its hands let go of everything
        for item in self.items.values_mut() {
            item.handlers.retain(|hand| hand.creature != id);
        }
        for other in self.creatures.values_mut() {
            other.ragdoll.grabbed_by.retain(|hand| hand.creature != id);
        }
        if self.player == Some(id) {
            self.player = None;
        }
        Some(creature)
    }

    /// Drops penetrations into bodies that were removed.
    fn forget_bodies(&mut self, bodies: &[RigidBodyHandle]) {
        for item in self.items.values_mut() {
            item.penetrations.retain(|target| !bodies.contains(target));
        }
    }

    pub fn creature(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    pub fn creature_mut(&mut self, id: CreatureId) -> Option<&mut Creature> {
        self.creatures.get_mut(&id)
    }

    pub fn creature_ids(&self) -> Vec<CreatureId> {
        self.creatures.keys().copied().collect()
    }

    pub fn grab_ragdoll(&mut self, id: CreatureId, hand: Hand) -> bool {
        let Some(creature) = self.creatures.get_mut(&id) else {
            return false;
        };
        if !creature.ragdoll.grabbed_by.contains(&hand) {
            creature.ragdoll.grabbed_by.push(hand);
        }
        true
    }

    pub fn release_ragdoll(&mut self, id: CreatureId, hand: Hand) -> bool {
        let Some(creature) = self.creatures.get_mut(&id) else {
            return false;
        };
        let before = creature.ragdoll.grabbed_by.len();
        creature.ragdoll.grabbed_by.retain(|h| *h != hand);
        creature.ragdoll.grabbed_by.len() != before
    }

    // ========== Player ==========

    /// Marks a creature as the player-controlled entity.
    pub fn set_player(&mut self, id: CreatureId) {
        self.player = Some(id);
    }

    pub fn player(&self) -> Option<CreatureId> {
        self.player
    }

    pub fn is_player(&self, id: CreatureId) -> bool {
        self.player == Some(id)
    }

    pub fn is_player_hand(&self, hand: Hand) -> bool {
        self.player == Some(hand.creature)
    }

    /// Returns true if either of the player's hands holds the item.
    pub fn is_held_by_player(&self, item: &Item) -> bool {
        item.handlers.iter().any(|hand| self.is_player_hand(*hand))
    }

    // ========== Bows ==========

    pub fn add_bow(&mut self, handle_item: ItemId) -> BowId {
        let id = BowId(self.next_bow_id);
        self.next_bow_id += 1;
        self.bows.insert(
            id,
            BowString {
                id,
                handle_item,
                rested_arrow: None,
                nocked_arrow: None,
            },
        );
        id
    }

    pub fn bow(&self, id: BowId) -> Option<&BowString> {
        self.bows.get(&id)
    }

    pub fn bow_mut(&mut self, id: BowId) -> Option<&mut BowString> {
        self.bows.get_mut(&id)
    }

    pub fn bow_ids(&self) -> Vec<BowId> {
        self.bows.keys().copied().collect()
    }

    /// Returns true if the referenced body still exists.
    pub fn contains(&self, body: BodyRef) -> bool {
        match body {
            BodyRef::Item(id) => self.items.contains_key(&id),
            BodyRef::Creature(id) => self.creatures.contains_key(&id),
        }
    }
}
