//! Target selection and announcement
//!
//! The target glyph is picked when the previous one is caught. It is
//! announced once its parachute enters play, then repeated on a timer until
//! caught, restarted or the session ends.

use super::catalog;
use super::state::{GameEvent, GameState, TargetState};
use super::timer::{TimerHandle, TimerKind};

/// Pick a uniformly random glyph as the new target (not yet announced)
pub fn select_new_target(state: &mut GameState) {
    if let Some(handle) = state.target.as_mut().and_then(|t| t.announce_timer.take()) {
        state.timers.cancel(handle);
    }
    let spec = catalog::random_letter(&mut state.rng);
    state.target = Some(TargetState {
        current: spec,
        is_announced: false,
        announce_timer: None,
    });
    log::debug!("Target letter set: {} ({})", spec.phonetic, spec.glyph);
}

/// Announce the current target now and every `announce_interval_ms` after
pub fn start_announcement(state: &mut GameState, now_ms: f64) {
    let interval = state.config.announce_interval_ms;
    let Some(target) = state.target.as_mut() else {
        return;
    };
    if let Some(handle) = target.announce_timer.take() {
        state.timers.cancel(handle);
    }
    target.announce_timer = Some(
        state
            .timers
            .schedule_repeating(TimerKind::AnnounceRepeat, now_ms, interval),
    );
    target.is_announced = true;
    let event = GameEvent::Announce {
        glyph: target.current.glyph,
        phonetic: target.current.phonetic,
    };
    log::debug!("Announcing target {}", target.current.phonetic);
    state.emit(GameEvent::CancelAnnounce);
    state.emit(event);
}

/// Cancel the repeat timer and silence the host. Returns true if an
/// announcement was active.
pub fn stop_announcement(state: &mut GameState) -> bool {
    let Some(target) = state.target.as_mut() else {
        return false;
    };
    let was_active = target.is_announced;
    target.is_announced = false;
    if let Some(handle) = target.announce_timer.take() {
        state.timers.cancel(handle);
    }
    if was_active {
        state.emit(GameEvent::CancelAnnounce);
    }
    was_active
}

/// Repeat tick. Stale handles (from a superseded target) are ignored.
pub fn on_announce_timer(state: &mut GameState, handle: TimerHandle) {
    if !state.phase.is_running() {
        return;
    }
    let Some(target) = state.target.as_ref() else {
        return;
    };
    if target.announce_timer != Some(handle) {
        return;
    }
    let event = GameEvent::Announce {
        glyph: target.current.glyph,
        phonetic: target.current.phonetic,
    };
    state.emit(event);
}
