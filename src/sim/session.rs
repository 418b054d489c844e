//! Session lifecycle: start, game over, restart

use super::state::{BatchState, GameEvent, GamePhase, GameState, Paddle, SessionEvent};
use super::target;

/// Leave `Idle` and open the spawn gate. Returns false if already started.
pub fn start(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Idle {
        return false;
    }
    state.phase = GamePhase::Listening;
    state.batch.reset();
    target::select_new_target(state);
    state.emit(GameEvent::Session(SessionEvent::Started));
    log::info!("Game started (seed {})", state.seed);
    true
}

/// Miss cap reached: freeze the session until a restart
pub fn game_over(state: &mut GameState) {
    state.phase = GamePhase::GameOver;
    target::stop_announcement(state);
    state.timers.cancel_all();
    state.restart_timer = None;
    state.emit(GameEvent::Session(SessionEvent::GameOver));
    log::info!(
        "Game over: score {}, chances used {}/{}",
        state.score,
        state.misses,
        state.config.max_misses
    );
}

/// Return to a fresh idle session. Valid from any phase; the RNG stream
/// continues so successive sessions differ.
pub fn restart(state: &mut GameState) {
    state.timers.cancel_all();
    state.emit(GameEvent::CancelAnnounce);

    state.letters.clear();
    state.collected.clear();
    state.effects.clear();
    state.score = 0;
    state.misses = 0;
    state.time_ticks = 0;
    state.paddle = Paddle::new(&state.config);
    state.batch = BatchState::default();
    state.target = None;
    state.bodies_hidden = false;
    state.restart_timer = None;
    state.phase = GamePhase::Idle;

    state.emit(GameEvent::Session(SessionEvent::Restarted));
    log::info!("Game restarted");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::GameConfig;

    #[test]
    fn test_start_only_from_idle() {
        let mut state = GameState::new(GameConfig::default(), 1);
        assert!(start(&mut state));
        assert_eq!(state.phase, GamePhase::Listening);
        assert!(state.target.is_some());
        assert_eq!(
            state.take_events(),
            vec![GameEvent::Session(SessionEvent::Started)]
        );
        assert!(!start(&mut state));
        assert!(state.take_events().is_empty());
    }

    #[test]
    fn test_game_over_cancels_timers() {
        let mut state = GameState::new(GameConfig::default(), 1);
        start(&mut state);
        target::start_announcement(&mut state, 0.0);
        state.take_events();
        game_over(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert_eq!(state.timers.pending(), 0);
        assert_eq!(
            state.take_events(),
            vec![
                GameEvent::CancelAnnounce,
                GameEvent::Session(SessionEvent::GameOver)
            ]
        );
    }

    #[test]
    fn test_restart_resets_everything() {
        let mut state = GameState::new(GameConfig::default(), 1);
        start(&mut state);
        target::start_announcement(&mut state, 0.0);
        state.score = 8;
        state.misses = 3;
        state.paddle.x = 10.0;
        state.paddle.break_at(0.0, 2000.0);
        state.effects.spawn_rock(0.0, 0.0);
        state.bodies_hidden = true;
        state.take_events();

        restart(&mut state);
        assert_eq!(state.phase, GamePhase::Idle);
        assert_eq!((state.score, state.misses), (0, 0));
        assert!(state.letters.is_empty() && state.collected.is_empty());
        assert!(state.effects.is_empty());
        assert!(!state.paddle.is_broken());
        assert!((state.paddle.x - 550.0).abs() < 0.001);
        assert!(state.target.is_none());
        assert!(!state.bodies_hidden);
        assert_eq!(state.timers.pending(), 0);
        assert_eq!(
            state.take_events(),
            vec![
                GameEvent::CancelAnnounce,
                GameEvent::Session(SessionEvent::Restarted)
            ]
        );
    }

    #[test]
    fn test_restart_is_idempotent() {
        let mut state = GameState::new(GameConfig::default(), 1);
        start(&mut state);
        restart(&mut state);
        let first = serde_json::to_string(&state.snapshot()).unwrap();
        restart(&mut state);
        let second = serde_json::to_string(&state.snapshot()).unwrap();
        assert_eq!(first, second);
    }
}
