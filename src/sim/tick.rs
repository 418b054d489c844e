//! Per-frame simulation tick
//!
//! Advances the session by one frame. Ordering within a frame is fixed:
//! timers, paddle, spawner, letters, batch completion, effects.

use super::effects;
use super::scoring::{self, Resolution};
use super::session;
use super::spawner;
use super::state::{Direction, GameEvent, GameState};
use super::target;
use super::timer::TimerKind;

/// Held-direction input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Demo mode: steer toward the target letter, ignoring `left`/`right`
    pub autopilot: bool,
}

impl TickInput {
    /// Key or touch press/release for one direction
    pub fn set(&mut self, direction: Direction, pressed: bool) {
        match direction {
            Direction::Left => self.left = pressed,
            Direction::Right => self.right = pressed,
        }
    }

    /// Net direction; opposing keys cancel out
    pub fn direction(&self) -> Option<Direction> {
        match (self.left, self.right) {
            (true, false) => Some(Direction::Left),
            (false, true) => Some(Direction::Right),
            _ => None,
        }
    }
}

/// Advance the game state by one frame and return the events it produced
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) -> Vec<GameEvent> {
    fire_timers(state, now_ms);

    if !state.phase.is_running() {
        return state.take_events();
    }

    state.time_ticks += 1;

    let direction = if input.autopilot {
        autopilot(state)
    } else {
        input.direction()
    };
    if let Some(direction) = direction {
        state.paddle.step(direction, state.config.playfield_width);
    }

    spawner::try_spawn(state, now_ms);

    if scoring::resolve_letters(state, now_ms) == Resolution::GameOver {
        return state.take_events();
    }

    scoring::complete_batch_if_resolved(state);

    effects::advance(state, now_ms);

    state.take_events()
}

fn fire_timers(state: &mut GameState, now_ms: f64) {
    for (handle, kind) in state.timers.poll(now_ms) {
        match kind {
            TimerKind::AnnounceRepeat => target::on_announce_timer(state, handle),
            TimerKind::AutoRestart => {
                if state.restart_timer != Some(handle) {
                    continue;
                }
                log::info!("Auto-restarting after broken slate");
                // Lands in Idle; the player starts the next session
                session::restart(state);
                // Restart cleared the queue; nothing else from this poll is live
                break;
            }
        }
    }
}

/// Steer the paddle under the target letter; hold still when none is falling
fn autopilot(state: &GameState) -> Option<Direction> {
    let target_x = state
        .letters
        .iter()
        .find(|l| l.is_target)?
        .center_x();
    let paddle_x = state.paddle.center().x;
    let dead_zone = state.paddle.speed;

    if target_x < paddle_x - dead_zone {
        Some(Direction::Left)
    } else if target_x > paddle_x + dead_zone {
        Some(Direction::Right)
    } else {
        None
    }
}
