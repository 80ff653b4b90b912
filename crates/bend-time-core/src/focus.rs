//! Resource pool drained while time is frozen.

/// A consumable pool the host exposes (e.g. the player's focus meter).
pub trait FocusPool {
    fn current(&self) -> f32;
    fn max(&self) -> f32;
    /// Removes `amount` from the pool.
    ///
    /// Returns `false`, leaving the pool untouched, when the remainder would
    /// be zero or less.
    fn consume(&mut self, amount: f32) -> bool;
}

/// Plain focus meter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Focus {
    pub current: f32,
    pub max: f32,
}

impl Focus {
    pub fn new(max: f32) -> Self {
        Self { current: max, max }
    }
}

impl FocusPool for Focus {
    fn current(&self) -> f32 {
        self.current
    }

    fn max(&self) -> f32 {
        self.max
    }

    fn consume(&mut self, amount: f32) -> bool {
        let remaining = self.current - amount;
        if remaining <= 0.0 {
            return false;
        }
        self.current = remaining;
        true
    }
}

/// Position of `value` between `a` and `b`, clamped to `[0, 1]`.
pub fn inverse_lerp(a: f32, b: f32, value: f32) -> f32 {
    if (b - a).abs() < f32::EPSILON {
        return 0.0;
    }
    ((value - a) / (b - a)).clamp(0.0, 1.0)
}
