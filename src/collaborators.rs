//! Narrow contracts for the systems the engine drives but does not own.
//!
//! All of them are optional: the engine holds `Option<Box<dyn ...>>` and
//! skips the call when a collaborator is absent.

use crate::combat::types::Position;
use crate::effects::{EffectId, EffectKind};

/// Plays transient visual effects. Fire-and-forget.
pub trait EffectPlayer {
    fn play(&mut self, id: EffectId, kind: EffectKind, position: Position, critical: bool);

    /// The effect's lifetime elapsed; stop emitting but keep it visible.
    fn stop(&mut self, _id: EffectId) {}

    /// The effect is gone and its resources may be freed.
    fn release(&mut self, _id: EffectId) {}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundId {
    NormalHit,
    CriticalHit,
    Upgrade,
}

pub trait AudioPlayer {
    fn play(&mut self, sound: SoundId, volume: f32);
}

pub trait SceneNavigator {
    fn load(&mut self, scene_name: &str);
}

/// The optional outer systems, wired at the composition root.
#[derive(Default)]
pub struct Collaborators {
    pub renderer: Option<Box<dyn EffectPlayer>>,
    pub audio: Option<Box<dyn AudioPlayer>>,
    pub navigator: Option<Box<dyn SceneNavigator>>,
}

impl Collaborators {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_renderer(mut self, renderer: impl EffectPlayer + 'static) -> Self {
        self.renderer = Some(Box::new(renderer));
        self
    }

    pub fn with_audio(mut self, audio: impl AudioPlayer + 'static) -> Self {
        self.audio = Some(Box::new(audio));
        self
    }

    pub fn with_navigator(mut self, navigator: impl SceneNavigator + 'static) -> Self {
        self.navigator = Some(Box::new(navigator));
        self
    }
}
