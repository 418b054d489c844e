//! Error types
//!
//! Neither kind is fatal to a running session: configuration errors surface
//! before a session exists, audio errors are absorbed by the audio manager.

use thiserror::Error;

/// Configuration loading/validation failures
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("config value `{name}` = {value} is out of range ({expected})")]
    OutOfRange {
        name: &'static str,
        value: f64,
        expected: &'static str,
    },
}

/// Audio collaborator failures (playback blocked, clip missing, no speech engine)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AudioError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),

    #[error("playback blocked until user interaction")]
    Blocked,

    #[error("no recorded clip for `{0}`")]
    ClipMissing(String),

    #[error("speech synthesis not supported")]
    SpeechUnsupported,
}
