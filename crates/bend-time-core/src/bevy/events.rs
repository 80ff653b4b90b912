//! ECS Messages for bend time.
//!
//! The host reports every gameplay event through a single
//! [`GameplayMessage`] stream so the reaction rules see them in the order
//! they happened. A release followed by a grab in the same frame must not be
//! replayed as grab-then-release.

use bevy::prelude::*;

use crate::reactions::GameplayEvent;

// ============================================================================
// Incoming messages
// ============================================================================

/// A gameplay event reported by the host.
#[derive(Message, Debug, Clone)]
pub struct GameplayMessage(pub GameplayEvent);

impl From<GameplayEvent> for GameplayMessage {
    fn from(event: GameplayEvent) -> Self {
        Self(event)
    }
}

// ============================================================================
// Outgoing messages
// ============================================================================

/// Fired after time stops.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct TimeFrozenEvent;

/// Fired after time restarts.
#[derive(Message, Debug, Clone, Copy, Default)]
pub struct TimeResumedEvent;
