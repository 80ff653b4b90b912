//! The bubble effect routine that lives for the duration of a freeze.
//!
//! Modeled as a cooperative task: the owner resumes it once per frame with
//! the current frozen flag. The flag is re-read on every resumption, so the
//! routine ends cleanly whenever time restarts, even mid-frame.

use crate::feedback::FreezeFeedback;

/// Bubble intensity held while time is frozen.
pub const BUBBLE_HOLD_INTENSITY: f32 = 1000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    Pending,
    Finished,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BubblePhase {
    /// Spawned, waiting for the first resumption.
    Spawned,
    Holding,
    Finished,
}

#[derive(Debug, Clone)]
pub struct BubbleTask {
    phase: BubblePhase,
}

impl BubbleTask {
    /// Spawns the bubble at zero intensity.
    pub fn start(fx: &mut dyn FreezeFeedback) -> Self {
        fx.spawn_bubble();
        fx.set_bubble_intensity(0.0);
        Self {
            phase: BubblePhase::Spawned,
        }
    }

    /// Runs one step of the routine.
    pub fn resume(&mut self, frozen: bool, fx: &mut dyn FreezeFeedback) -> TaskStatus {
        if self.phase == BubblePhase::Finished {
            return TaskStatus::Finished;
        }

        if frozen {
            self.phase = BubblePhase::Holding;
            fx.set_bubble_intensity(BUBBLE_HOLD_INTENSITY);
            TaskStatus::Pending
        } else {
            fx.end_bubble();
            self.phase = BubblePhase::Finished;
            TaskStatus::Finished
        }
    }

    pub fn is_finished(&self) -> bool {
        self.phase == BubblePhase::Finished
    }
}
