//! Per-body capture and restore of kinematic state across a freeze.
//!
//! A frozen body is represented by a fully locked rigid body with gravity
//! disabled. The velocity it had when it was locked lives in a
//! [`KinematicStore`] keyed by rigid-body handle, so nothing is attached to
//! host-owned objects. Impacts received while locked accumulate into a
//! pending delta that is applied on top of the captured velocity when the
//! body is released.

use std::collections::HashMap;

use rapier2d::prelude::*;

/// Constraint state of a simulated rigid body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConstraintMode {
    /// Normal simulation.
    Free,
    /// Every translation and rotation axis locked, gravity disabled.
    FullyLocked,
}

/// Returns the constraint mode of a rigid body.
pub fn constraint_mode(body: &RigidBody) -> ConstraintMode {
    if body.locked_axes() == LockedAxes::all() {
        ConstraintMode::FullyLocked
    } else {
        ConstraintMode::Free
    }
}

/// Returns true if the body is fully locked.
pub fn is_locked(body: &RigidBody) -> bool {
    constraint_mode(body) == ConstraintMode::FullyLocked
}

fn zero() -> Vector {
    Vector::new(0.0, 0.0)
}

/// Velocity captured from a body at freeze time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StoredKinematics {
    /// Linear velocity at the moment of locking.
    pub linvel: Vector,
    /// Angular velocity at the moment of locking.
    pub angvel: f32,
    /// Velocity change accumulated from impacts while locked.
    pub pending_delta: Vector,
}

impl StoredKinematics {
    fn capture(body: &RigidBody) -> Self {
        let linvel = body.linvel();
        Self {
            linvel: Vector::new(linvel.x, linvel.y),
            angvel: body.angvel(),
            pending_delta: zero(),
        }
    }

    /// Linear velocity the body resumes with.
    pub fn resume_linvel(&self) -> Vector {
        self.linvel + self.pending_delta
    }
}

/// Arena of captured kinematics, one entry per rigid body that has been
/// frozen at least once.
#[derive(Debug, Default)]
pub struct KinematicStore {
    entries: HashMap<RigidBodyHandle, StoredKinematics>,
}

impl KinematicStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the body's velocity and locks it.
    ///
    /// A body that is already locked and has stored data keeps its stored
    /// data: a locked body reports no meaningful velocity.
    pub fn capture_and_lock(&mut self, handle: RigidBodyHandle, body: &mut RigidBody) {
        let already_locked = is_locked(body);
        match self.entries.get_mut(&handle) {
            Some(_) if already_locked => {}
            Some(stored) => *stored = StoredKinematics::capture(body),
            None => {
                self.entries.insert(handle, StoredKinematics::capture(body));
            }
        }

        body.set_locked_axes(LockedAxes::all(), false);
        body.set_gravity_scale(0.0, false);
        body.set_linvel(zero(), false);
        body.set_angvel(0.0, false);
    }

    /// Unlocks the body and writes its stored velocity back.
    ///
    /// Returns `false` if the body was already free. Without stored data the
    /// engine-assigned velocity is left untouched.
    pub fn restore_and_unlock(&mut self, handle: RigidBodyHandle, body: &mut RigidBody) -> bool {
        if constraint_mode(body) == ConstraintMode::Free {
            return false;
        }

        body.set_locked_axes(LockedAxes::empty(), true);
        body.set_gravity_scale(1.0, true);
        body.reset_forces(false);
        body.reset_torques(false);

        if let Some(stored) = self.entries.get_mut(&handle) {
            body.set_linvel(stored.resume_linvel(), true);
            body.set_angvel(stored.angvel, true);
            stored.pending_delta = zero();
        }
        true
    }

    /// Adds a velocity change to a frozen body's stored data.
    ///
    /// Returns `false` when the body has never been frozen.
    pub fn add_velocity_delta(&mut self, handle: RigidBodyHandle, delta: Vector) -> bool {
        let Some(stored) = self.entries.get_mut(&handle) else {
            return false;
        };
        stored.pending_delta = stored.pending_delta + delta;
        true
    }

    pub fn get(&self, handle: RigidBodyHandle) -> Option<&StoredKinematics> {
        self.entries.get(&handle)
    }

    pub fn contains(&self, handle: RigidBodyHandle) -> bool {
        self.entries.contains_key(&handle)
    }

    /// Keeps only entries for which `alive` returns true.
    pub fn retain_live(&mut self, mut alive: impl FnMut(RigidBodyHandle) -> bool) {
        self.entries.retain(|handle, _| alive(*handle));
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
