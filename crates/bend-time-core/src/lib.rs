//! Bend Time Core Library
//!
//! Selective time freezing for a physics sandbox built on `Rapier2D`.
//! Everything except the player is locked in place while its velocities are
//! kept aside, then released coherently when time restarts.
//!
//! Two layers:
//! - Plain core: [`TimeController`] over a [`Scene`], driven by explicit calls
//!   or through [`BendTimeModule`]
//! - Bevy integration: resources, an ordered gameplay message stream and
//!   fixed-step systems

#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod bubble;
pub mod config;
pub mod controller;
pub mod feedback;
pub mod focus;
pub mod kinematics;
pub mod logging;
pub mod module;
pub mod physics;
pub mod policy;
pub mod reactions;
pub mod scene;
pub mod scheduler;

// Bevy integration
pub mod bevy;

pub use config::{BendTimeConfig, ConfigError};
pub use controller::{DrainOutcome, FreezeState, TimeCommand, TimeController};
pub use feedback::{FeedbackCall, FreezeFeedback, NoFeedback, RecordingFeedback, SpellEffect};
pub use focus::{Focus, FocusPool};
pub use kinematics::{ConstraintMode, KinematicStore, StoredKinematics};
pub use module::BendTimeModule;
pub use physics::{PHYSICS_DT, PhysicsWorld, default_gravity};
pub use reactions::{ArrowSeat, GameplayEvent, ImpactForce};
pub use scene::{BodyRef, BowId, CreatureId, Hand, Item, ItemId, ItemKind, Scene, Side};
pub use scheduler::DeferredFreezeScheduler;
