//! Audio playback for announcements and feedback
//!
//! The manager owns volume and channel policy; the actual output is a
//! pluggable [`AudioBackend`]. Announcements try a recorded clip or speech
//! synthesis (in preference order) and fall back to silence. Audio failures
//! are logged, never propagated into the game.

use crate::error::AudioError;
use crate::settings::AudioSettings;
use crate::sim::FeedbackKind;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Target letter caught
    Correct,
    /// Decoy caught
    Wrong,
    /// Letter splashed into the water
    WaterDrop,
}

impl From<FeedbackKind> for SoundEffect {
    fn from(kind: FeedbackKind) -> Self {
        match kind {
            FeedbackKind::Positive => SoundEffect::Correct,
            FeedbackKind::Negative => SoundEffect::Wrong,
        }
    }
}

/// Which voice output carried an announcement
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceChannel {
    /// Pre-recorded clip keyed by phonetic name
    Clip,
    /// Speech synthesis of the glyph
    Speech,
}

/// Output device abstraction
pub trait AudioBackend {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError>;

    /// Start a recorded clip (e.g. `sounds/ka.mp3`)
    fn play_clip(&mut self, path: &str, rate: f32, volume: f32) -> Result<(), AudioError>;

    fn speak(&mut self, text: &str, lang: &str, rate: f32, volume: f32) -> Result<(), AudioError>;

    /// Cut off whatever voice output is playing
    fn stop_voice(&mut self);
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentBackend;

impl AudioBackend for SilentBackend {
    fn play_effect(&mut self, _effect: SoundEffect, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn play_clip(&mut self, _path: &str, _rate: f32, _volume: f32) -> Result<(), AudioError> {
        Ok(())
    }

    fn speak(
        &mut self,
        _text: &str,
        _lang: &str,
        _rate: f32,
        _volume: f32,
    ) -> Result<(), AudioError> {
        Ok(())
    }

    fn stop_voice(&mut self) {}
}

/// Writes every request to the log (headless runs)
#[derive(Debug, Clone, Copy, Default)]
pub struct LogBackend;

impl AudioBackend for LogBackend {
    fn play_effect(&mut self, effect: SoundEffect, volume: f32) -> Result<(), AudioError> {
        log::debug!("[audio] effect {effect:?} at {volume:.2}");
        Ok(())
    }

    fn play_clip(&mut self, path: &str, rate: f32, volume: f32) -> Result<(), AudioError> {
        log::debug!("[audio] clip {path} x{rate} at {volume:.2}");
        Ok(())
    }

    fn speak(&mut self, text: &str, lang: &str, rate: f32, volume: f32) -> Result<(), AudioError> {
        log::debug!("[audio] speak '{text}' ({lang}) x{rate} at {volume:.2}");
        Ok(())
    }

    fn stop_voice(&mut self) {
        log::debug!("[audio] stop voice");
    }
}

/// Recorded clip location for a phonetic key
pub fn clip_path(phonetic: &str) -> String {
    format!("sounds/{phonetic}.mp3")
}

/// Audio manager for the game
pub struct AudioManager<B: AudioBackend> {
    backend: B,
    settings: AudioSettings,
    active_voice: Option<VoiceChannel>,
}

impl<B: AudioBackend> AudioManager<B> {
    pub fn new(backend: B, settings: AudioSettings) -> Self {
        Self {
            backend,
            settings,
            active_voice: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn settings(&self) -> &AudioSettings {
        &self.settings
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.settings.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.settings.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio. Muting also cuts an announcement in progress.
    pub fn set_muted(&mut self, muted: bool) {
        self.settings.muted = muted;
        if muted {
            self.cancel_announce();
        }
    }

    /// Volume for voice output
    fn voice_volume(&self) -> f32 {
        if self.settings.muted {
            0.0
        } else {
            self.settings.master_volume
        }
    }

    /// Get effective volume
    fn effective_volume(&self) -> f32 {
        self.voice_volume() * self.settings.sfx_volume
    }

    /// Channel currently speaking, if any
    pub fn active_voice(&self) -> Option<VoiceChannel> {
        self.active_voice
    }

    /// Play a sound effect
    pub fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        if let Err(e) = self.backend.play_effect(effect, vol) {
            log::warn!("Sound effect {effect:?} failed: {e}");
        }
    }

    /// Pronounce a letter, falling back between clip and speech. Returns the
    /// channel that accepted it, or `None` if it stayed silent.
    pub fn announce(&mut self, glyph: &str, phonetic: &str) -> Option<VoiceChannel> {
        let vol = self.voice_volume();
        if vol <= 0.0 {
            return None;
        }

        let order = if self.settings.prefer_speech {
            [VoiceChannel::Speech, VoiceChannel::Clip]
        } else {
            [VoiceChannel::Clip, VoiceChannel::Speech]
        };

        for channel in order {
            let result = match channel {
                VoiceChannel::Clip => {
                    let path = clip_path(phonetic);
                    self.backend.play_clip(&path, self.settings.clip_rate, vol)
                }
                VoiceChannel::Speech => self.backend.speak(
                    glyph,
                    &self.settings.speech_lang,
                    self.settings.speech_rate,
                    vol,
                ),
            };
            match result {
                Ok(()) => {
                    self.active_voice = Some(channel);
                    return Some(channel);
                }
                Err(e) => log::warn!("Announcing '{phonetic}' via {channel:?} failed: {e}"),
            }
        }

        log::warn!("No voice output available, '{phonetic}' not announced");
        self.active_voice = None;
        None
    }

    /// Stop the current announcement, if one is playing
    pub fn cancel_announce(&mut self) {
        if self.active_voice.take().is_some() {
            self.backend.stop_voice();
        }
    }
}
