//! Deferred freezes: a short per-object countdown before locking.
//!
//! Newly spawned creatures and freshly shot projectiles need a few frames of
//! free simulation before they can be locked. Each pending freeze is a ticket
//! keyed by the body it targets; the countdown advances once per simulation
//! frame and expired tickets are handed back to the caller.

use std::collections::BTreeMap;

use crate::scene::BodyRef;

/// Per-frame countdown table, at most one ticket per body.
#[derive(Debug, Clone, Default)]
pub struct DeferredFreezeScheduler {
    tickets: BTreeMap<BodyRef, f32>,
}

impl DeferredFreezeScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules a freeze of `target` in `delay` seconds.
    ///
    /// A pending ticket for the same body is restarted rather than stacked.
    /// Returns `true` if a ticket was already pending.
    pub fn schedule(&mut self, target: BodyRef, delay: f32) -> bool {
        let replaced = self.tickets.insert(target, delay).is_some();
        tracing::debug!(
            "[deferred] Scheduled {:?} in {:.3}s{}",
            target,
            delay,
            if replaced { " (restarted)" } else { "" }
        );
        replaced
    }

    /// Cancels the ticket of `target`. Returns `true` if one was pending.
    pub fn cancel(&mut self, target: BodyRef) -> bool {
        self.tickets.remove(&target).is_some()
    }

    pub fn is_pending(&self, target: BodyRef) -> bool {
        self.tickets.contains_key(&target)
    }

    /// Remaining delay of `target`'s ticket.
    pub fn remaining(&self, target: BodyRef) -> Option<f32> {
        self.tickets.get(&target).copied()
    }

    /// Advances every ticket by `dt` and removes the expired ones.
    ///
    /// Expired targets are returned in id order.
    pub fn advance(&mut self, dt: f32) -> Vec<BodyRef> {
        let mut expired = Vec::new();
        self.tickets.retain(|target, remaining| {
            *remaining -= dt;
            if *remaining <= 0.0 {
                expired.push(*target);
                false
            } else {
                true
            }
        });
        expired
    }

    /// Drops every pending ticket.
    pub fn clear(&mut self) {
        self.tickets.clear();
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
