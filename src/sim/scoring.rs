//! Catch and splash resolution
//!
//! Moves letters, resolves paddle and waterline contacts, updates the
//! collected sequence, score and misses, and breaks the paddle on rock hits.

use glam::Vec2;

use super::collision::{below_waterline, letter_touches_paddle};
use super::session;
use super::state::{CollectedCharacter, FeedbackKind, GameEvent, GamePhase, GameState, Letter};
use super::target;
use super::timer::TimerKind;

/// Rocks drop from this far above the paddle
const ROCK_DROP_HEIGHT: f32 = 100.0;

/// Outcome of resolving one frame of letters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Continue,
    /// Miss cap reached; the frame stops here
    GameOver,
}

/// Advance all letters one frame and resolve their contacts
pub fn resolve_letters(state: &mut GameState, now_ms: f64) -> Resolution {
    let paddle = state.paddle.rect();
    let waterline = state.waterline_y();
    let offset = state.config.touch_offset_px;

    let mut i = 0;
    while i < state.letters.len() {
        let letter = &mut state.letters[i];
        if !letter.collected {
            letter.rect.pos.y += letter.speed;

            if letter_touches_paddle(&letter.rect, &paddle, offset) {
                letter.collected = true;
                let letter = state.letters.remove(i);
                let resolution = if letter.is_target {
                    catch_target(state, &letter)
                } else {
                    catch_wrong(state, &letter, now_ms)
                };
                if resolution == Resolution::GameOver {
                    return resolution;
                }
                continue;
            }
        }

        if below_waterline(&state.letters[i].rect, waterline) {
            let letter = state.letters.remove(i);
            sink(state, &letter, now_ms);
            continue;
        }

        i += 1;
    }

    Resolution::Continue
}

/// Correct catch: ride the paddle, maybe complete a cycle
fn catch_target(state: &mut GameState, letter: &Letter) -> Resolution {
    target::stop_announcement(state);
    state.emit(GameEvent::Feedback(FeedbackKind::Positive));

    let slot = state.collected.len();
    state.collected.push(CollectedCharacter {
        glyph: letter.glyph(),
        slot,
    });
    log::info!("Correct letter collected: {}", letter.glyph());

    if state.collected.len() >= state.config.max_characters {
        state.score += state.config.score_increment;
        let capped = state.charge_miss();
        state.collected.clear();
        log::info!(
            "{} letters collected, score {} (chances used: {})",
            state.config.max_characters,
            state.score,
            state.misses
        );
        if capped {
            session::game_over(state);
            return Resolution::GameOver;
        }
    }

    target::select_new_target(state);
    Resolution::Continue
}

/// Wrong catch: lose progress, drop a rock on the paddle
fn catch_wrong(state: &mut GameState, letter: &Letter, now_ms: f64) -> Resolution {
    state.emit(GameEvent::Feedback(FeedbackKind::Negative));

    let paddle_top_center = Vec2::new(state.paddle.x + state.paddle.width / 2.0, state.paddle.y);
    state
        .effects
        .spawn_rock(paddle_top_center.x, paddle_top_center.y - ROCK_DROP_HEIGHT);
    state
        .effects
        .spawn_wrong_letter_animation(paddle_top_center, now_ms);

    let capped = state.charge_miss();
    state.collected.clear();
    log::info!(
        "Wrong letter collected: {} (chances used: {})",
        letter.glyph(),
        state.misses
    );
    if capped {
        session::game_over(state);
        return Resolution::GameOver;
    }
    Resolution::Continue
}

/// Uncaught letter reached the water
fn sink(state: &mut GameState, letter: &Letter, now_ms: f64) {
    let impact = Vec2::new(letter.center_x(), state.waterline_y());
    state.effects.spawn_water_splash(impact, &mut state.rng);
    state.effects.spawn_splash_animation(impact, now_ms);
    state.emit(GameEvent::DropFeedback);
    log::debug!("Parachute '{}' hit water at x:{}", letter.glyph(), impact.x);
}

/// Reopen the spawn gate once every letter of a closed batch has resolved
pub fn complete_batch_if_resolved(state: &mut GameState) -> bool {
    if !state.letters.is_empty() || state.batch.gate_open {
        return false;
    }
    state.batch.reset();
    if state.phase == GamePhase::BatchExhausted {
        state.phase = GamePhase::Listening;
    }
    log::debug!("All parachutes resolved, next batch");
    true
}

/// A rock landed on the paddle
pub fn break_paddle(state: &mut GameState, now_ms: f64) {
    state
        .paddle
        .break_at(now_ms, state.config.paddle_repair_delay_ms);
    let center = state.paddle.center();
    state.effects.spawn_break_burst(center, &mut state.rng);
    state.effects.spawn_fragments(&state.paddle, now_ms);
    log::info!("Rock hit slate, slate is broken");

    if state.config.auto_restart_on_break {
        state.bodies_hidden = true;
        target::stop_announcement(state);
        state.letters.clear();
        if state.restart_timer.is_none() {
            state.restart_timer = Some(state.timers.schedule_once(
                TimerKind::AutoRestart,
                now_ms,
                state.config.auto_restart_delay_ms,
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;
    use crate::sim::catalog::HINDI_LETTERS;
    use crate::sim::collision::Rect;
    use proptest::prelude::*;

    fn running_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 5);
        session::start(&mut state);
        state.take_events();
        state
    }

    /// A letter already overlapping the paddle (it falls one more step first)
    fn letter_on_paddle(state: &mut GameState, is_target: bool) {
        let id = state.next_entity_id();
        let x = state.paddle.x - 30.0;
        let y = state.paddle.y - 130.0 + 40.0;
        state.letters.push(Letter {
            id,
            rect: Rect::new(x, y, 160.0, 130.0),
            speed: 0.5,
            spec: &HINDI_LETTERS[10],
            is_target,
            collected: false,
        });
    }

    #[test]
    fn test_target_catch_appends_and_reselects() {
        let mut state = running_state();
        letter_on_paddle(&mut state, true);
        assert_eq!(resolve_letters(&mut state, 0.0), Resolution::Continue);
        assert!(state.letters.is_empty());
        assert_eq!(
            state.collected,
            vec![CollectedCharacter {
                glyph: "क",
                slot: 0
            }]
        );
        assert_eq!(state.score, 0);
        assert_eq!(state.misses, 0);
        let events = state.take_events();
        assert!(events.contains(&GameEvent::Feedback(FeedbackKind::Positive)));
        assert!(!state.target.as_ref().unwrap().is_announced);
    }

    #[test]
    fn test_fourth_catch_scores_and_charges_miss() {
        let mut state = running_state();
        for _ in 0..3 {
            letter_on_paddle(&mut state, true);
            resolve_letters(&mut state, 0.0);
        }
        assert_eq!(state.collected.len(), 3);
        assert_eq!(state.score, 0);

        letter_on_paddle(&mut state, true);
        resolve_letters(&mut state, 0.0);
        assert_eq!(state.score, 4);
        assert_eq!(state.misses, 1);
        assert!(state.collected.is_empty());
    }

    #[test]
    fn test_sixteen_catches_end_the_game() {
        let mut state = running_state();
        for n in 1..=16 {
            letter_on_paddle(&mut state, true);
            let resolution = resolve_letters(&mut state, 0.0);
            assert_eq!(resolution == Resolution::GameOver, n == 16);
        }
        assert_eq!(state.score, 16);
        assert_eq!(state.misses, 4);
        assert_eq!(state.phase, GamePhase::GameOver);
    }

    #[test]
    fn test_wrong_catch_clears_and_drops_rock() {
        let mut state = running_state();
        letter_on_paddle(&mut state, true);
        resolve_letters(&mut state, 0.0);
        letter_on_paddle(&mut state, true);
        resolve_letters(&mut state, 0.0);
        state.take_events();

        letter_on_paddle(&mut state, false);
        resolve_letters(&mut state, 500.0);
        assert!(state.collected.is_empty());
        assert_eq!(state.misses, 1);
        assert_eq!(state.score, 0);
        assert_eq!(state.effects.rocks.len(), 1);
        assert_eq!(state.effects.wrong_letter_animations.len(), 1);
        let rock = &state.effects.rocks[0];
        assert_eq!(rock.rect.pos.x, state.paddle.x + state.paddle.width / 2.0);
        assert_eq!(rock.rect.pos.y, state.paddle.y - 100.0);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::Feedback(FeedbackKind::Negative)]
        );
    }

    #[test]
    fn test_wrong_catch_at_last_chance_ends_game() {
        let mut state = running_state();
        state.misses = 3;
        letter_on_paddle(&mut state, false);
        letter_on_paddle(&mut state, true);
        assert_eq!(resolve_letters(&mut state, 0.0), Resolution::GameOver);
        assert_eq!(state.misses, 4);
        assert_eq!(state.phase, GamePhase::GameOver);
        // The frame halted before the second letter was looked at
        assert_eq!(state.letters.len(), 1);
        assert_eq!(state.timers.pending(), 0);
    }

    #[test]
    fn test_sink_splashes_without_scoring() {
        let mut state = running_state();
        let id = state.next_entity_id();
        state.letters.push(Letter {
            id,
            rect: Rect::new(100.0, 430.0, 160.0, 130.0),
            speed: 1.0,
            spec: &HINDI_LETTERS[0],
            is_target: true,
            collected: false,
        });
        resolve_letters(&mut state, 1000.0);
        assert!(state.letters.is_empty());
        assert_eq!(state.effects.splashes.len(), 23);
        assert_eq!(state.effects.splash_animations.len(), 1);
        let anim = &state.effects.splash_animations[0];
        assert_eq!(anim.pos, Vec2::new(180.0 - 50.0, 560.0 - 50.0));
        assert_eq!(state.take_events(), vec![GameEvent::DropFeedback]);
        assert_eq!(state.score, 0);
        assert_eq!(state.misses, 0);
    }

    #[test]
    fn test_batch_completion_reopens_gate() {
        let mut state = running_state();
        state.batch.gate_open = false;
        state.batch.spawned = 3;
        state.phase = GamePhase::BatchExhausted;
        letter_on_paddle(&mut state, false);
        assert!(!complete_batch_if_resolved(&mut state));

        state.letters.clear();
        assert!(complete_batch_if_resolved(&mut state));
        assert!(state.batch.gate_open);
        assert_eq!(state.batch.spawned, 0);
        assert_eq!(state.phase, GamePhase::Listening);

        // Open gate: nothing to do
        assert!(!complete_batch_if_resolved(&mut state));
    }

    #[test]
    fn test_break_paddle_spawns_fragments() {
        let mut state = running_state();
        break_paddle(&mut state, 1000.0);
        assert_eq!(state.paddle.broken_until, Some(3000.0));
        assert_eq!(state.effects.fragments.len(), 2);
        assert_eq!(state.effects.splashes.len(), 8);
        assert_eq!(state.timers.pending(), 0);
        assert!(!state.bodies_hidden);
    }

    #[test]
    fn test_break_paddle_auto_restart_policy() {
        let config = GameConfig {
            auto_restart_on_break: true,
            ..GameConfig::default()
        };
        let mut state = GameState::new(config, 5);
        session::start(&mut state);
        letter_on_paddle(&mut state, false);
        break_paddle(&mut state, 1000.0);
        assert!(state.bodies_hidden);
        assert!(state.letters.is_empty());
        assert!(state.restart_timer.is_some());

        // A second rock does not schedule a second restart
        break_paddle(&mut state, 1100.0);
        assert_eq!(state.timers.pending(), 1);
    }

    #[test]
    fn test_single_rock_breaks_once() {
        let mut state = running_state();
        letter_on_paddle(&mut state, false);
        resolve_letters(&mut state, 0.0);

        let mut breaks = 0;
        for frame in 0..120 {
            let was_broken = state.paddle.is_broken();
            crate::sim::effects::advance(&mut state, frame as f64);
            if !was_broken && state.paddle.is_broken() {
                breaks += 1;
            }
        }
        assert_eq!(breaks, 1);
        assert_eq!(state.effects.fragments.len(), 2);
    }

    proptest! {
        #[test]
        fn prop_misses_monotonic_and_capped(
            catches in proptest::collection::vec(any::<bool>(), 1..40)
        ) {
            let mut state = running_state();
            let mut last = 0;
            for is_target in catches {
                if state.phase == GamePhase::GameOver {
                    break;
                }
                letter_on_paddle(&mut state, is_target);
                resolve_letters(&mut state, 0.0);
                prop_assert!(state.misses >= last);
                prop_assert!(state.misses <= state.config.max_misses);
                prop_assert!(state.collected.len() < state.config.max_characters);
                last = state.misses;
            }
            prop_assert_eq!(
                state.phase == GamePhase::GameOver,
                state.misses == state.config.max_misses
            );
        }
    }
}
