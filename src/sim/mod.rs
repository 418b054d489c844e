//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Seeded RNG only
//! - Wall-clock time only through the `now_ms` passed to [`tick`]
//! - Side effects leave as [`GameEvent`]s, never as direct calls
//! - No rendering, audio or platform dependencies

pub mod catalog;
pub mod collision;
pub mod effects;
pub mod scoring;
pub mod session;
pub mod spawner;
pub mod state;
pub mod target;
pub mod tick;
pub mod timer;

pub use catalog::{HINDI_LETTERS, LetterSpec};
pub use collision::Rect;
pub use effects::EffectPools;
pub use state::{
    CollectedCharacter, Direction, FeedbackKind, GameEvent, GamePhase, GameState, Letter, Paddle,
    SessionEvent, Snapshot, TargetState,
};
pub use tick::{TickInput, tick};
pub use timer::{TimerHandle, TimerKind, Timers};
