//! Letter Drop - catch the announced letter before it hits the water
//!
//! Core modules:
//! - `sim`: Deterministic simulation (spawning, collisions, scoring, effects)
//! - `platform`: Host collaborator traits, apply step and frame driver
//! - `audio`: Announcement and feedback playback with fallback channels
//! - `settings`: Data-driven game configuration

pub mod audio;
pub mod error;
pub mod platform;
pub mod settings;
pub mod sim;

pub use error::{AudioError, ConfigError};
pub use settings::{AudioSettings, GameConfig};

/// Game configuration constants
pub mod consts {
    /// Host frame period (the simulation advances one tick per frame)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum ticks per host frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 4;

    /// Playfield dimensions
    pub const PLAYFIELD_WIDTH: f32 = 1200.0;
    pub const PLAYFIELD_HEIGHT: f32 = 800.0;
    /// Waterline as a fraction of playfield height
    pub const WATERLINE_FRACTION: f32 = 0.7;

    /// Batch and scoring rules
    pub const MAX_PARACHUTES_AT_ONCE: usize = 3;
    pub const MAX_CHARACTERS: usize = 4;
    pub const MAX_MISSES: u32 = 4;
    pub const SCORE_INCREMENT: u32 = 4;

    /// Shrinks the letter's bottom edge for paddle hits (sprite padding)
    pub const PARACHUTE_TOUCH_OFFSET_PX: f32 = 35.0;

    /// Letter parachute defaults
    pub const LETTER_WIDTH: f32 = 160.0;
    pub const LETTER_HEIGHT: f32 = 130.0;
    pub const LETTER_SPAWN_Y: f32 = -50.0;
    pub const LETTER_MIN_SPEED: f32 = 0.5;
    pub const LETTER_MAX_SPEED: f32 = 1.0;
    pub const SPAWN_MARGIN: f32 = 100.0;

    /// Target assignment odds (slot 2 is forced when neither fires)
    pub const TARGET_P0: f32 = 0.33;
    pub const TARGET_P1: f32 = 0.5;

    /// Paddle (slate) defaults
    pub const PADDLE_WIDTH: f32 = 100.0;
    pub const PADDLE_HEIGHT: f32 = 20.0;
    pub const PADDLE_SPEED: f32 = 5.0;
    /// Paddle top edge as a fraction of playfield height (minus a 10px lift)
    pub const PADDLE_Y_FRACTION: f32 = 0.57;
    pub const PADDLE_Y_LIFT: f32 = 10.0;

    /// Timings (wall-clock milliseconds)
    pub const ANNOUNCE_INTERVAL_MS: f64 = 1500.0;
    pub const PADDLE_REPAIR_DELAY_MS: f64 = 2000.0;
    pub const AUTO_RESTART_DELAY_MS: f64 = 1200.0;
}

