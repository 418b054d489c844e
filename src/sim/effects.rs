//! Transient visual effects
//!
//! Each pool owns its entities outright. Kinematics are per frame (pixels per
//! tick), fades driven by wall-clock time use the `now_ms` passed to the tick.

use glam::Vec2;
use rand::Rng;
use serde::Serialize;

use super::collision::Rect;
use super::scoring;
use super::state::{GameState, Paddle};

/// Particles may fall this far below the playfield before being culled
const SPLASH_CULL_MARGIN: f32 = 50.0;
/// Horizontal damping applied on the one-time waterline bounce
const SPLASH_BOUNCE_DRAG: f32 = 0.8;
/// Continuous horizontal air drag
const SPLASH_AIR_DRAG: f32 = 0.99;
/// Life lost per frame
const SPLASH_LIFE_DECAY: f32 = 0.015;

const SPLASH_ANIM_SIZE: f32 = 100.0;
const SPLASH_ANIM_DURATION_MS: f64 = 2000.0;
const WRONG_ANIM_SIZE: f32 = 80.0;
const WRONG_ANIM_DURATION_MS: f64 = 1500.0;

const ROCK_SIZE: f32 = 30.0;
const ROCK_SPEED: f32 = 3.0;
const ROCK_SPIN: f32 = 0.1;

const FRAGMENT_DURATION_MS: f64 = 3000.0;
const FRAGMENT_GRAVITY: f32 = 0.1;

/// A water droplet (also used for paddle splinters)
#[derive(Debug, Clone, Serialize)]
pub struct SplashParticle {
    pub pos: Vec2,
    pub vel: Vec2,
    /// 0-1, decreases every frame
    pub life: f32,
    pub size: f32,
    pub gravity: f32,
    /// Fraction of vertical speed kept on the waterline bounce
    pub bounce: f32,
    pub has_bounced: bool,
}

impl SplashParticle {
    /// Advance one frame. Returns false once expired or off-screen.
    pub fn update(&mut self, waterline_y: f32, playfield_height: f32) -> bool {
        self.pos += self.vel;
        self.vel.y += self.gravity;

        if self.pos.y >= waterline_y && !self.has_bounced && self.vel.y > 0.0 {
            self.vel.y *= -self.bounce;
            self.vel.x *= SPLASH_BOUNCE_DRAG;
            self.has_bounced = true;
        }

        self.vel.x *= SPLASH_AIR_DRAG;
        self.life -= SPLASH_LIFE_DECAY;

        self.life > 0.0 && self.pos.y <= playfield_height + SPLASH_CULL_MARGIN
    }
}

/// A sprite animation that fades over a fixed wall-clock duration
#[derive(Debug, Clone, Serialize)]
pub struct TimedAnimation {
    /// Top-left corner
    pub pos: Vec2,
    pub size: Vec2,
    pub life: f32,
    pub duration_ms: f64,
    pub started_ms: f64,
}

impl TimedAnimation {
    /// Centred on `at`
    fn centered(at: Vec2, size: f32, duration_ms: f64, now_ms: f64) -> Self {
        Self {
            pos: at - Vec2::splat(size / 2.0),
            size: Vec2::splat(size),
            life: 1.0,
            duration_ms,
            started_ms: now_ms,
        }
    }

    /// Recompute life from elapsed time. Returns false once faded out.
    pub fn update(&mut self, now_ms: f64) -> bool {
        self.life = fade(now_ms - self.started_ms, self.duration_ms);
        self.life > 0.0
    }
}

/// Linear fade from 1 to 0 over `duration_ms`
fn fade(elapsed_ms: f64, duration_ms: f64) -> f32 {
    (1.0 - elapsed_ms / duration_ms).max(0.0) as f32
}

/// Punishment rock dropped onto the paddle after a wrong catch
#[derive(Debug, Clone, Serialize)]
pub struct Rock {
    pub rect: Rect,
    pub speed: f32,
    pub rotation: f32,
    pub rotation_speed: f32,
    /// Set on first paddle contact; a rock breaks the paddle at most once
    pub has_hit_slate: bool,
}

/// One half of a broken paddle
#[derive(Debug, Clone, Serialize)]
pub struct SlateFragment {
    pub rect: Rect,
    pub vel: Vec2,
    pub rotation: f32,
    pub rotation_speed: f32,
    pub life: f32,
    pub duration_ms: f64,
    pub started_ms: f64,
}

impl SlateFragment {
    /// Returns false once faded out or below the playfield
    pub fn update(&mut self, now_ms: f64, playfield_height: f32) -> bool {
        self.rect.pos += self.vel;
        self.rotation += self.rotation_speed;
        self.vel.y += FRAGMENT_GRAVITY;
        self.life = fade(now_ms - self.started_ms, self.duration_ms);
        self.life > 0.0 && self.rect.pos.y <= playfield_height
    }
}

/// All effect pools
#[derive(Debug, Clone, Default, Serialize)]
pub struct EffectPools {
    pub splashes: Vec<SplashParticle>,
    pub splash_animations: Vec<TimedAnimation>,
    pub wrong_letter_animations: Vec<TimedAnimation>,
    pub rocks: Vec<Rock>,
    pub fragments: Vec<SlateFragment>,
}

impl EffectPools {
    pub fn clear(&mut self) {
        self.splashes.clear();
        self.splash_animations.clear();
        self.wrong_letter_animations.clear();
        self.rocks.clear();
        self.fragments.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.splashes.is_empty()
            && self.splash_animations.is_empty()
            && self.wrong_letter_animations.is_empty()
            && self.rocks.is_empty()
            && self.fragments.is_empty()
    }

    /// Ring of 15 droplets plus 8 smaller ones thrown upward
    pub fn spawn_water_splash<R: Rng>(&mut self, at: Vec2, rng: &mut R) {
        for i in 0..15 {
            let angle = std::f32::consts::TAU * i as f32 / 15.0;
            let speed = rng.random::<f32>() * 8.0 + 4.0;
            self.splashes.push(SplashParticle {
                pos: at,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 3.0),
                life: 1.0,
                size: rng.random::<f32>() * 6.0 + 3.0,
                gravity: 0.4 + rng.random::<f32>() * 0.2,
                bounce: 0.3 + rng.random::<f32>() * 0.2,
                has_bounced: false,
            });
        }

        for _ in 0..8 {
            let jitter = (rng.random::<f32>() - 0.5) * 20.0;
            self.splashes.push(SplashParticle {
                pos: Vec2::new(at.x + jitter, at.y),
                vel: Vec2::new(
                    (rng.random::<f32>() - 0.5) * 12.0,
                    -rng.random::<f32>() * 8.0 - 4.0,
                ),
                life: 0.8,
                size: rng.random::<f32>() * 3.0 + 1.0,
                gravity: 0.5,
                bounce: 0.4,
                has_bounced: false,
            });
        }
    }

    /// Splinters thrown out when the paddle breaks
    pub fn spawn_break_burst<R: Rng>(&mut self, at: Vec2, rng: &mut R) {
        for i in 0..8 {
            let angle = std::f32::consts::TAU * i as f32 / 8.0;
            let speed = rng.random::<f32>() * 6.0 + 3.0;
            self.splashes.push(SplashParticle {
                pos: at,
                vel: Vec2::new(angle.cos() * speed, angle.sin() * speed - 2.0),
                life: 1.0,
                size: rng.random::<f32>() * 4.0 + 2.0,
                gravity: 0.3,
                bounce: 0.2,
                has_bounced: false,
            });
        }
    }

    pub fn spawn_splash_animation(&mut self, at: Vec2, now_ms: f64) {
        self.splash_animations.push(TimedAnimation::centered(
            at,
            SPLASH_ANIM_SIZE,
            SPLASH_ANIM_DURATION_MS,
            now_ms,
        ));
    }

    pub fn spawn_wrong_letter_animation(&mut self, at: Vec2, now_ms: f64) {
        self.wrong_letter_animations.push(TimedAnimation::centered(
            at,
            WRONG_ANIM_SIZE,
            WRONG_ANIM_DURATION_MS,
            now_ms,
        ));
    }

    /// Rock with its top-left corner at `(x, y)`
    pub fn spawn_rock(&mut self, x: f32, y: f32) {
        self.rocks.push(Rock {
            rect: Rect::new(x, y, ROCK_SIZE, ROCK_SIZE),
            speed: ROCK_SPEED,
            rotation: 0.0,
            rotation_speed: ROCK_SPIN,
            has_hit_slate: false,
        });
    }

    /// Replace any fragments with the two halves of `paddle`
    pub fn spawn_fragments(&mut self, paddle: &Paddle, now_ms: f64) {
        self.fragments.clear();
        let half = paddle.width / 2.0;
        for (offset, dir) in [(0.0, -1.0), (half, 1.0)] {
            self.fragments.push(SlateFragment {
                rect: Rect::new(paddle.x + offset, paddle.y, half, paddle.height),
                vel: Vec2::new(2.0 * dir, 1.0),
                rotation: 0.2 * dir,
                rotation_speed: -0.05 * dir,
                life: 1.0,
                duration_ms: FRAGMENT_DURATION_MS,
                started_ms: now_ms,
            });
        }
    }

    pub fn update_splashes(&mut self, waterline_y: f32, playfield_height: f32) {
        self.splashes
            .retain_mut(|p| p.update(waterline_y, playfield_height));
    }

    pub fn update_animations(&mut self, now_ms: f64) {
        self.splash_animations.retain_mut(|a| a.update(now_ms));
        self.wrong_letter_animations.retain_mut(|a| a.update(now_ms));
    }

    /// Move rocks; returns how many made first contact with `paddle` this frame
    pub fn update_rocks(&mut self, paddle: &Rect, playfield_height: f32) -> usize {
        let mut hits = 0;
        for rock in &mut self.rocks {
            rock.rect.pos.y += rock.speed;
            rock.rotation += rock.rotation_speed;
            if !rock.has_hit_slate && rock.rect.overlaps(paddle) {
                rock.has_hit_slate = true;
                hits += 1;
            }
        }
        self.rocks.retain(|r| r.rect.pos.y <= playfield_height);
        hits
    }

    pub fn update_fragments(&mut self, now_ms: f64, playfield_height: f32) {
        self.fragments
            .retain_mut(|f| f.update(now_ms, playfield_height));
    }
}

/// Advance every pool by one frame, breaking and repairing the paddle as needed
pub fn advance(state: &mut GameState, now_ms: f64) {
    let waterline = state.waterline_y();
    let height = state.config.playfield_height;

    state.effects.update_splashes(waterline, height);
    state.effects.update_animations(now_ms);

    let paddle_rect = state.paddle.rect();
    let hits = state.effects.update_rocks(&paddle_rect, height);
    for _ in 0..hits {
        scoring::break_paddle(state, now_ms);
    }

    if state.paddle.try_repair(now_ms) {
        state.effects.fragments.clear();
        log::debug!("Slate repaired");
    }

    state.effects.update_fragments(now_ms, height);
}
