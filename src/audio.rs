//! Sound effects for game events
//!
//! The simulation only signals events; a `SoundEngine` backend does the playing.
//! Playback is fire-and-forget and never feeds back into physics.

use serde::{Deserialize, Serialize};

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// A player fell off the surface
    Lose,
    /// A round was won
    WinRound,
    /// A pillar was knocked over
    Pillar,
    /// A round is starting
    StartRound,
    /// Match winner music
    FinalWinner,
}

impl SoundEffect {
    pub fn file_name(&self) -> &'static str {
        match self {
            SoundEffect::Lose => "EffectLose.wav",
            SoundEffect::WinRound => "EffectWinRound.wav",
            SoundEffect::Pillar => "EffectPillar.wav",
            SoundEffect::StartRound => "EffectStartRound.wav",
            SoundEffect::FinalWinner => "MusicWinner.wav",
        }
    }
}

/// Volume levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Volume {
    Mute,
    #[default]
    Low,
    Medium,
    High,
}

impl Volume {
    pub fn gain(&self) -> f32 {
        match self {
            Volume::Mute => 0.0,
            Volume::Low => 0.3,
            Volume::Medium => 0.6,
            Volume::High => 1.0,
        }
    }
}

/// Playback backend
pub trait SoundEngine {
    /// Play (or replay from the start) an effect
    fn play(&mut self, effect: SoundEffect, gain: f32);

    fn stop(&mut self, effect: SoundEffect);
}

/// Backend that plays nothing
#[derive(Debug, Default)]
pub struct SilentSound;

impl SoundEngine for SilentSound {
    fn play(&mut self, _effect: SoundEffect, _gain: f32) {}

    fn stop(&mut self, _effect: SoundEffect) {}
}

/// Backend that only logs what would play
#[derive(Debug, Default)]
pub struct LogSound;

impl SoundEngine for LogSound {
    fn play(&mut self, effect: SoundEffect, gain: f32) {
        log::info!("♪ {} (gain {:.1})", effect.file_name(), gain);
    }

    fn stop(&mut self, effect: SoundEffect) {
        log::debug!("■ {}", effect.file_name());
    }
}

/// Maps game events onto effects for a backend
pub struct AudioManager {
    engine: Box<dyn SoundEngine>,
}

impl AudioManager {
    pub fn new(engine: Box<dyn SoundEngine>) -> Self {
        Self { engine }
    }

    pub fn silent() -> Self {
        Self::new(Box::new(SilentSound))
    }

    /// Play whatever goes with `event`
    pub fn dispatch(&mut self, event: &GameEvent, volume: Volume) {
        match event {
            GameEvent::PlayerFell { .. } => self.play(SoundEffect::Lose, volume),
            GameEvent::PillarHit { .. } => self.play(SoundEffect::Pillar, volume),
            GameEvent::RoundStarted { .. } => {
                self.engine.stop(SoundEffect::FinalWinner);
                self.play(SoundEffect::StartRound, volume);
            }
            GameEvent::RoundWon { .. } => self.play(SoundEffect::WinRound, volume),
            GameEvent::FinalWinner { .. } => {
                self.engine.stop(SoundEffect::WinRound);
                self.play(SoundEffect::FinalWinner, volume);
            }
        }
    }

    fn play(&mut self, effect: SoundEffect, volume: Volume) {
        if volume == Volume::Mute {
            return;
        }
        self.engine.stop(effect);
        self.engine.play(effect, volume.gain());
    }
}
