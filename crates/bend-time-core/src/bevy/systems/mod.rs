//! Systems for bend time.
//!
//! Organized by functionality:
//! - command: Spell command queue processing
//! - reactions: Gameplay messages into the reaction rules
//! - rules: Per-tick item, bow, brain and speech rules
//! - focus: Focus drain while frozen
//! - upkeep: Deferred freezes, bubble routine, stored-state pruning
//! - physics: Physics stepping
//! - transitions: Outgoing frozen/resumed messages

pub mod command;
pub mod focus;
pub mod physics;
pub mod reactions;
pub mod rules;
pub mod transitions;
pub mod upkeep;

pub use command::*;
pub use focus::*;
pub use physics::*;
pub use reactions::*;
pub use rules::*;
pub use transitions::*;
pub use upkeep::*;
