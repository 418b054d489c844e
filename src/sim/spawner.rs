//! Letter batches
//!
//! A batch is three parachutes emitted one per frame: left margin, right
//! margin, centre. Exactly one carries the target glyph, the others carry
//! distinct decoys. The next batch starts only after all three resolved.

use rand::Rng;

use super::catalog;
use super::collision::Rect;
use super::state::{GamePhase, GameState, Letter};
use super::target;
use crate::consts::{
    LETTER_HEIGHT, LETTER_MAX_SPEED, LETTER_MIN_SPEED, LETTER_SPAWN_Y, LETTER_WIDTH, SPAWN_MARGIN,
};

/// Decide whether batch slot `slot` carries the target.
///
/// `roll` is uniform in [0, 1). With no target assigned yet: slot 0 wins when
/// `roll < p0` (0.33 by default), slot 1 when `roll < p1` (0.5), slot 2 always.
/// Once a slot has the target every later slot returns false, so each batch
/// has exactly one target. Overall odds are p0, (1-p0)·p1, (1-p0)·(1-p1).
pub fn is_target_slot(slot: usize, target_assigned: bool, roll: f32, p0: f32, p1: f32) -> bool {
    if target_assigned {
        return false;
    }
    match slot {
        0 => roll < p0,
        1 => roll < p1,
        _ => true,
    }
}

/// Left edge for batch slot `slot`, kept inside the side margins
pub fn slot_x(slot: usize, playfield_width: f32) -> f32 {
    let x = match slot {
        0 => SPAWN_MARGIN,
        1 => playfield_width - LETTER_WIDTH - SPAWN_MARGIN,
        _ => (playfield_width - LETTER_WIDTH) / 2.0,
    };
    x.clamp(SPAWN_MARGIN, playfield_width - LETTER_WIDTH - SPAWN_MARGIN)
}

/// Emit the next letter of the batch if the gate is open. Returns the new
/// letter's id.
pub fn try_spawn(state: &mut GameState, now_ms: f64) -> Option<u32> {
    if !state.phase.is_running() || state.bodies_hidden || !state.batch.gate_open {
        return None;
    }
    let max = state.config.max_parachutes_at_once;
    if state.batch.spawned >= max {
        return None;
    }
    if state.target.is_none() {
        target::select_new_target(state);
    }
    let target_spec = state.target.as_ref()?.current;

    let slot = state.batch.spawned;
    let roll: f32 = state.rng.random();
    let is_target = is_target_slot(
        slot,
        state.batch.target_slot.is_some(),
        roll,
        state.config.target_p0,
        state.config.target_p1,
    );

    let spec = if is_target {
        target_spec
    } else {
        let mut exclude = state.batch.glyphs.clone();
        exclude.push(target_spec.glyph);
        catalog::random_letter_excluding(&mut state.rng, &exclude)
    };

    let speed = state.rng.random_range(LETTER_MIN_SPEED..LETTER_MAX_SPEED);
    let x = slot_x(slot, state.config.playfield_width);
    let id = state.next_entity_id();
    state.letters.push(Letter {
        id,
        rect: Rect::new(x, LETTER_SPAWN_Y, LETTER_WIDTH, LETTER_HEIGHT),
        speed,
        spec,
        is_target,
        collected: false,
    });
    state.batch.spawned += 1;
    state.batch.glyphs.push(spec.glyph);
    log::debug!(
        "Spawned parachute {}/{} '{}' at x:{} (target: {})",
        state.batch.spawned,
        max,
        spec.glyph,
        x,
        is_target
    );

    if is_target {
        state.batch.target_slot = Some(slot);
        target::start_announcement(state, now_ms);
    }

    if state.batch.spawned >= max {
        state.batch.gate_open = false;
        state.phase = GamePhase::BatchExhausted;
        log::debug!("Batch complete, spawning paused");
    }

    Some(id)
}
