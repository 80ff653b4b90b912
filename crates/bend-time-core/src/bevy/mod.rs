//! Bevy integration for bend time.
//!
//! The controller, the scene and the host collaborators live in resources.
//! Gameplay events arrive as one ordered message stream and the per-tick rules run in
//! `FixedUpdate`, one step per physics frame.

pub mod events;
pub mod plugin;
pub mod resources;
pub mod systems;

#[cfg(test)]
pub(crate) mod test_utils;

pub use events::*;
pub use plugin::{BendTimeHeadlessPlugin, BendTimePlugin, BendTimeSet};
pub use resources::*;
