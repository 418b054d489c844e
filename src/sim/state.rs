//! Game state and core simulation types
//!
//! Everything a session mutates lives in [`GameState`]: counters, paddle,
//! letters, effect pools, timers and the outgoing event queue.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::Serialize;

use super::catalog::LetterSpec;
use super::collision::Rect;
use super::effects::EffectPools;
use super::timer::{TimerHandle, Timers};
use crate::settings::GameConfig;

/// Session state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GamePhase {
    /// No session running (before start, after restart)
    Idle,
    /// Spawn gate open, batch still being emitted
    Listening,
    /// All letters of the batch emitted, waiting for them to resolve
    BatchExhausted,
    /// Miss cap reached; only a restart leaves this
    GameOver,
}

impl GamePhase {
    /// Letters fall and collide in these phases
    pub fn is_running(self) -> bool {
        matches!(self, GamePhase::Listening | GamePhase::BatchExhausted)
    }
}

/// Short sound effect played after a catch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FeedbackKind {
    Positive,
    Negative,
}

/// Lifecycle notifications for UI overlays
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SessionEvent {
    Started,
    GameOver,
    Restarted,
}

/// Requests the pure update emits for the host to carry out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    /// Pronounce the target letter once
    Announce {
        glyph: &'static str,
        phonetic: &'static str,
    },
    /// Silence any announcement in progress
    CancelAnnounce,
    Feedback(FeedbackKind),
    /// A letter splashed into the water
    DropFeedback,
    Session(SessionEvent),
}

/// Horizontal movement intent
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// A letter hanging from a parachute
#[derive(Debug, Clone, Serialize)]
pub struct Letter {
    pub id: u32,
    pub rect: Rect,
    /// Fall speed in pixels per frame
    pub speed: f32,
    pub spec: &'static LetterSpec,
    pub is_target: bool,
    /// Set on the catch frame, right before the letter leaves `letters`; a
    /// live letter always reads false
    pub collected: bool,
}

impl Letter {
    pub fn glyph(&self) -> &'static str {
        self.spec.glyph
    }

    pub fn center_x(&self) -> f32 {
        self.rect.pos.x + self.rect.size.x / 2.0
    }
}

/// The player's slate
#[derive(Debug, Clone, Serialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    /// Top edge (fixed)
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Pixels per frame while a direction is held
    pub speed: f32,
    /// Wall-clock time at which a broken paddle repairs itself
    pub broken_until: Option<f64>,
}

impl Paddle {
    /// Centred horizontally, at the configured height
    pub fn new(config: &GameConfig) -> Self {
        Self {
            x: config.playfield_width / 2.0 - config.paddle_width / 2.0,
            y: config.paddle_y(),
            width: config.paddle_width,
            height: config.paddle_height,
            speed: config.paddle_speed,
            broken_until: None,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn is_broken(&self) -> bool {
        self.broken_until.is_some()
    }

    /// Step toward `direction`, stopping at the playfield edges
    pub fn step(&mut self, direction: Direction, playfield_width: f32) {
        match direction {
            Direction::Left if self.x > 0.0 => self.x -= self.speed,
            Direction::Right if self.x < playfield_width - self.width => self.x += self.speed,
            _ => {}
        }
    }

    /// Mark broken until `now_ms + repair_delay_ms`
    pub fn break_at(&mut self, now_ms: f64, repair_delay_ms: f64) {
        self.broken_until = Some(now_ms + repair_delay_ms);
    }

    /// Clear the broken flag once the repair time has passed. Returns true on repair.
    pub fn try_repair(&mut self, now_ms: f64) -> bool {
        match self.broken_until {
            Some(until) if now_ms > until => {
                self.broken_until = None;
                true
            }
            _ => false,
        }
    }
}

/// The letter the player is listening for
#[derive(Debug, Clone, Serialize)]
pub struct TargetState {
    pub current: &'static LetterSpec,
    /// Announcement has started for this target
    pub is_announced: bool,
    #[serde(skip)]
    pub(crate) announce_timer: Option<TimerHandle>,
}

/// A correctly caught letter riding on the paddle
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CollectedCharacter {
    pub glyph: &'static str,
    pub slot: usize,
}

/// Progress through the current batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BatchState {
    /// Letters emitted so far in this batch
    pub spawned: usize,
    /// Spawner may emit
    pub gate_open: bool,
    /// Slot that carries the target, once assigned
    pub target_slot: Option<usize>,
    /// Glyphs already used in this batch
    pub glyphs: Vec<&'static str>,
}

impl Default for BatchState {
    fn default() -> Self {
        Self {
            spawned: 0,
            gate_open: true,
            target_slot: None,
            glyphs: Vec::new(),
        }
    }
}

impl BatchState {
    /// Reopen the gate for a fresh batch
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub config: GameConfig,
    /// Seed the RNG was created from
    pub seed: u64,
    pub(crate) rng: Pcg32,
    pub phase: GamePhase,
    pub score: u32,
    pub misses: u32,
    /// Simulation tick counter (reset on restart)
    pub time_ticks: u64,
    pub paddle: Paddle,
    /// Live letters, in spawn order
    pub letters: Vec<Letter>,
    pub collected: Vec<CollectedCharacter>,
    pub target: Option<TargetState>,
    pub batch: BatchState,
    pub effects: EffectPools,
    pub timers: Timers,
    /// Letters and riders are hidden while an auto-restart is pending
    pub bodies_hidden: bool,
    pub(crate) restart_timer: Option<TimerHandle>,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create an idle session with the given seed
    pub fn new(config: GameConfig, seed: u64) -> Self {
        let paddle = Paddle::new(&config);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            phase: GamePhase::Idle,
            score: 0,
            misses: 0,
            time_ticks: 0,
            paddle,
            letters: Vec::new(),
            collected: Vec::new(),
            target: None,
            batch: BatchState::default(),
            effects: EffectPools::default(),
            timers: Timers::new(),
            bodies_hidden: false,
            restart_timer: None,
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn waterline_y(&self) -> f32 {
        self.config.waterline_y()
    }

    /// Queue an event for the host
    pub fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Charge one miss, saturating at the cap. Returns true when the cap is reached.
    pub fn charge_miss(&mut self) -> bool {
        self.misses = (self.misses + 1).min(self.config.max_misses);
        self.misses >= self.config.max_misses
    }

    /// Read-only view for the renderer
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            score: self.score,
            misses: self.misses,
            max_misses: self.config.max_misses,
            waterline_y: self.waterline_y(),
            paddle: &self.paddle,
            letters: if self.bodies_hidden { &[] } else { self.letters.as_slice() },
            collected: if self.bodies_hidden || self.paddle.is_broken() {
                &[]
            } else {
                self.collected.as_slice()
            },
            target: self.target.as_ref(),
            effects: &self.effects,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub score: u32,
    pub misses: u32,
    pub max_misses: u32,
    pub waterline_y: f32,
    pub paddle: &'a Paddle,
    pub letters: &'a [Letter],
    /// Riders drawn on the paddle (hidden while it is broken)
    pub collected: &'a [CollectedCharacter],
    pub target: Option<&'a TargetState>,
    pub effects: &'a EffectPools,
}
