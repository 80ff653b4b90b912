//! Fire-and-forget hooks into the visual and audio collaborators.
//!
//! The controller never depends on what these calls return. Every method has
//! an empty default so a host only implements the effects it has.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::scene::CreatureId;

/// Spell effect played on a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpellEffect {
    Start,
    Loop,
    End,
}

/// Visual and audio side effects of freezing time.
pub trait FreezeFeedback {
    /// Pauses particles and every audio source except speakers.
    fn pause_ambient(&mut self) {}
    /// Keeps a creature's speaker audible through `pause_ambient`.
    fn keep_speaker_playing(&mut self, _creature: CreatureId) {}
    fn resume_ambient(&mut self) {}
    /// Camera desaturation, `0.0` = none, `1.0` = full sepia.
    fn set_desaturation(&mut self, _amount: f32) {}
    fn spawn_bubble(&mut self) {}
    fn set_bubble_intensity(&mut self, _intensity: f32) {}
    fn end_bubble(&mut self) {}
    /// Audio snapshot transition into (`true`) or out of slow motion.
    fn slow_motion_audio(&mut self, _entering: bool) {}
    /// Intensity of the draining effect, `0.0` with a full pool.
    fn set_drain_intensity(&mut self, _intensity: f32) {}
    fn play_spell_effect(&mut self, _effect: SpellEffect) {}
    fn stop_spell_effect(&mut self, _effect: SpellEffect) {}
}

/// Feedback sink that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoFeedback;

impl FreezeFeedback for NoFeedback {}

/// A single recorded feedback call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedbackCall {
    PauseAmbient,
    KeepSpeaker(CreatureId),
    ResumeAmbient,
    Desaturation(f32),
    SpawnBubble,
    BubbleIntensity(f32),
    EndBubble,
    SlowMotionAudio(bool),
    DrainIntensity(f32),
    PlaySpell(SpellEffect),
    StopSpell(SpellEffect),
}

/// Feedback sink that records every call.
///
/// Clones share the same log, so a clone handed to the controller can be
/// inspected through another.
#[derive(Debug, Clone, Default)]
pub struct RecordingFeedback {
    calls: Arc<Mutex<Vec<FeedbackCall>>>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<FeedbackCall> {
        self.calls.lock().clone()
    }

    pub fn count(&self, call: FeedbackCall) -> usize {
        self.calls.lock().iter().filter(|c| **c == call).count()
    }

    pub fn last(&self) -> Option<FeedbackCall> {
        self.calls.lock().last().copied()
    }

    pub fn clear(&self) {
        self.calls.lock().clear();
    }

    fn push(&self, call: FeedbackCall) {
        self.calls.lock().push(call);
    }
}

impl FreezeFeedback for RecordingFeedback {
    fn pause_ambient(&mut self) {
        self.push(FeedbackCall::PauseAmbient);
    }

    fn keep_speaker_playing(&mut self, creature: CreatureId) {
        self.push(FeedbackCall::KeepSpeaker(creature));
    }

    fn resume_ambient(&mut self) {
        self.push(FeedbackCall::ResumeAmbient);
    }

    fn set_desaturation(&mut self, amount: f32) {
        self.push(FeedbackCall::Desaturation(amount));
    }

    fn spawn_bubble(&mut self) {
        self.push(FeedbackCall::SpawnBubble);
    }

    fn set_bubble_intensity(&mut self, intensity: f32) {
        self.push(FeedbackCall::BubbleIntensity(intensity));
    }

    fn end_bubble(&mut self) {
        self.push(FeedbackCall::EndBubble);
    }

    fn slow_motion_audio(&mut self, entering: bool) {
        self.push(FeedbackCall::SlowMotionAudio(entering));
    }

    fn set_drain_intensity(&mut self, intensity: f32) {
        self.push(FeedbackCall::DrainIntensity(intensity));
    }

    fn play_spell_effect(&mut self, effect: SpellEffect) {
        self.push(FeedbackCall::PlaySpell(effect));
    }

    fn stop_spell_effect(&mut self, effect: SpellEffect) {
        self.push(FeedbackCall::StopSpell(effect));
    }
}
