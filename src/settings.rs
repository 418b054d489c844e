//! Game configuration
//!
//! Fixed at session creation. Loaded from JSON; missing keys fall back to the
//! defaults in [`crate::consts`].

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Audio preferences handed to the audio manager
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioSettings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Feedback sound volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Silence everything
    pub muted: bool,
    /// Announce through speech synthesis instead of recorded clips
    pub prefer_speech: bool,
    /// Speech rate multiplier
    pub speech_rate: f32,
    /// Recorded clip playback rate
    pub clip_rate: f32,
    /// BCP-47 tag for the speech voice
    pub speech_lang: String,
}

impl Default for AudioSettings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            prefer_speech: true,
            speech_rate: 1.3,
            clip_rate: 1.5,
            speech_lang: "hi-IN".to_string(),
        }
    }
}

/// Session configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Playfield ===
    pub playfield_width: f32,
    pub playfield_height: f32,
    /// Waterline as a fraction of playfield height
    pub waterline_fraction: f32,

    // === Rules ===
    pub max_parachutes_at_once: usize,
    pub max_characters: usize,
    pub max_misses: u32,
    pub score_increment: u32,
    /// Vertical tolerance subtracted from a letter's bottom edge on paddle tests
    pub touch_offset_px: f32,
    /// Probability that slot 0 carries the target
    pub target_p0: f32,
    /// Probability that slot 1 carries the target (given slot 0 does not)
    pub target_p1: f32,

    // === Paddle ===
    pub paddle_width: f32,
    pub paddle_height: f32,
    pub paddle_speed: f32,

    // === Timings (ms) ===
    pub announce_interval_ms: f64,
    pub paddle_repair_delay_ms: f64,
    /// Restart the whole session after the paddle breaks
    pub auto_restart_on_break: bool,
    pub auto_restart_delay_ms: f64,

    // === Audio ===
    pub audio: AudioSettings,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            playfield_width: PLAYFIELD_WIDTH,
            playfield_height: PLAYFIELD_HEIGHT,
            waterline_fraction: WATERLINE_FRACTION,

            max_parachutes_at_once: MAX_PARACHUTES_AT_ONCE,
            max_characters: MAX_CHARACTERS,
            max_misses: MAX_MISSES,
            score_increment: SCORE_INCREMENT,
            touch_offset_px: PARACHUTE_TOUCH_OFFSET_PX,
            target_p0: TARGET_P0,
            target_p1: TARGET_P1,

            paddle_width: PADDLE_WIDTH,
            paddle_height: PADDLE_HEIGHT,
            paddle_speed: PADDLE_SPEED,

            announce_interval_ms: ANNOUNCE_INTERVAL_MS,
            paddle_repair_delay_ms: PADDLE_REPAIR_DELAY_MS,
            auto_restart_on_break: false,
            auto_restart_delay_ms: AUTO_RESTART_DELAY_MS,

            audio: AudioSettings::default(),
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON document
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot honour
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn check(
            name: &'static str,
            value: f64,
            ok: bool,
            expected: &'static str,
        ) -> Result<(), ConfigError> {
            if ok {
                Ok(())
            } else {
                Err(ConfigError::OutOfRange {
                    name,
                    value,
                    expected,
                })
            }
        }

        let w = self.playfield_width;
        check("playfield_width", w as f64, w > LETTER_WIDTH + 2.0 * SPAWN_MARGIN, "> 360")?;
        check(
            "playfield_height",
            self.playfield_height as f64,
            self.playfield_height > 0.0,
            "> 0",
        )?;
        check(
            "waterline_fraction",
            self.waterline_fraction as f64,
            self.waterline_fraction > 0.0 && self.waterline_fraction <= 1.0,
            "(0, 1]",
        )?;
        // The spawner lays out exactly three slots
        check(
            "max_parachutes_at_once",
            self.max_parachutes_at_once as f64,
            self.max_parachutes_at_once == MAX_PARACHUTES_AT_ONCE,
            "3",
        )?;
        check(
            "max_characters",
            self.max_characters as f64,
            self.max_characters >= 1,
            ">= 1",
        )?;
        check("max_misses", self.max_misses as f64, self.max_misses >= 1, ">= 1")?;
        check(
            "target_p0",
            self.target_p0 as f64,
            (0.0..=1.0).contains(&self.target_p0),
            "[0, 1]",
        )?;
        check(
            "target_p1",
            self.target_p1 as f64,
            (0.0..=1.0).contains(&self.target_p1),
            "[0, 1]",
        )?;
        check(
            "paddle_width",
            self.paddle_width as f64,
            self.paddle_width > 0.0 && self.paddle_width < w,
            "(0, playfield_width)",
        )?;
        check(
            "paddle_height",
            self.paddle_height as f64,
            self.paddle_height > 0.0,
            "> 0",
        )?;
        check(
            "paddle_speed",
            self.paddle_speed as f64,
            self.paddle_speed > 0.0,
            "> 0",
        )?;
        check(
            "touch_offset_px",
            self.touch_offset_px as f64,
            self.touch_offset_px >= 0.0,
            ">= 0",
        )?;
        check(
            "score_increment",
            self.score_increment as f64,
            self.score_increment >= 1,
            ">= 1",
        )?;
        check(
            "announce_interval_ms",
            self.announce_interval_ms,
            self.announce_interval_ms > 0.0,
            "> 0",
        )?;
        check(
            "paddle_repair_delay_ms",
            self.paddle_repair_delay_ms,
            self.paddle_repair_delay_ms >= 0.0,
            ">= 0",
        )?;
        check(
            "auto_restart_delay_ms",
            self.auto_restart_delay_ms,
            self.auto_restart_delay_ms >= 0.0,
            ">= 0",
        )?;
        check(
            "audio.master_volume",
            self.audio.master_volume as f64,
            (0.0..=1.0).contains(&self.audio.master_volume),
            "[0, 1]",
        )?;
        check(
            "audio.sfx_volume",
            self.audio.sfx_volume as f64,
            (0.0..=1.0).contains(&self.audio.sfx_volume),
            "[0, 1]",
        )?;
        Ok(())
    }

    /// Waterline y coordinate
    pub fn waterline_y(&self) -> f32 {
        self.playfield_height * self.waterline_fraction
    }

    /// Fixed paddle top edge
    pub fn paddle_y(&self) -> f32 {
        self.playfield_height * PADDLE_Y_FRACTION - PADDLE_Y_LIFT
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_rules() {
        let config = GameConfig::default();
        assert_eq!(config.max_parachutes_at_once, 3);
        assert_eq!(config.max_characters, 4);
        assert_eq!(config.max_misses, 4);
        assert_eq!(config.score_increment, 4);
        assert_eq!(config.touch_offset_px, 35.0);
        assert_eq!(config.paddle_repair_delay_ms, 2000.0);
        assert!(!config.auto_restart_on_break);
        assert!((config.waterline_y() - 560.0).abs() < 0.001);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config =
            GameConfig::from_json_str(r#"{ "max_misses": 6, "audio": { "muted": true } }"#)
                .unwrap();
        assert_eq!(config.max_misses, 6);
        assert_eq!(config.max_characters, 4);
        assert!(config.audio.muted);
        assert_eq!(config.audio.speech_lang, "hi-IN");
    }

    #[test]
    fn test_rejects_bad_json() {
        let err = GameConfig::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_rejects_out_of_range() {
        let err = GameConfig::from_json_str(r#"{ "waterline_fraction": 1.5 }"#).unwrap_err();
        match err {
            ConfigError::OutOfRange { name, .. } => assert_eq!(name, "waterline_fraction"),
            other => panic!("unexpected error: {other}"),
        }

        let err = GameConfig::from_json_str(r#"{ "max_misses": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { name: "max_misses", .. }));
    }

    #[test]
    fn test_rejects_bad_paddle_and_timing() {
        for (json, field) in [
            (r#"{ "paddle_speed": -5 }"#, "paddle_speed"),
            (r#"{ "paddle_height": 0 }"#, "paddle_height"),
            (r#"{ "touch_offset_px": -1 }"#, "touch_offset_px"),
            (r#"{ "score_increment": 0 }"#, "score_increment"),
            (r#"{ "paddle_repair_delay_ms": -10 }"#, "paddle_repair_delay_ms"),
            (r#"{ "auto_restart_delay_ms": -1200 }"#, "auto_restart_delay_ms"),
        ] {
            match GameConfig::from_json_str(json) {
                Err(ConfigError::OutOfRange { name, .. }) => assert_eq!(name, field),
                other => panic!("{json}: unexpected result {other:?}"),
            }
        }

        // Zero delays and a zero touch offset are allowed
        let config = GameConfig::from_json_str(
            r#"{ "touch_offset_px": 0, "paddle_repair_delay_ms": 0, "auto_restart_delay_ms": 0 }"#,
        )
        .unwrap();
        assert_eq!(config.touch_offset_px, 0.0);
    }

    #[test]
    fn test_missing_file() {
        let err = GameConfig::from_json_file("/nonexistent/letter-drop.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
