//! Effective stats, recomputed on every query.
//!
//! Nothing here is cached: trait bonuses and status deltas are folded in
//! each time, so a status that expires mid-round is reflected immediately.

use crate::core::{CreatureId, GameState};
use crate::status::StatusTag;
use crate::traits::hooks;

/// `speed + trait bonuses + SpeedUp + round adjustments - Fatigued`, floored at 0.
#[must_use]
pub fn effective_speed(state: &GameState, id: CreatureId) -> i32 {
    let Some(c) = state.board.get(id) else {
        return 0;
    };
    let speed = c.speed
        + hooks::speed_bonus(state, id)
        + c.statuses.get_i32(StatusTag::SpeedUp)
        + c.ledger.speed_mod
        - c.statuses.get_i32(StatusTag::Fatigued);
    speed.max(0)
}

/// `body + BodyUp - Malnourished`, floored at 0.
#[must_use]
pub fn effective_body(state: &GameState, id: CreatureId) -> i32 {
    let Some(c) = state.board.get(id) else {
        return 0;
    };
    (c.body + c.statuses.get_i32(StatusTag::BodyUp) - c.statuses.get_i32(StatusTag::Malnourished)).max(0)
}

/// Body used when this creature picks attack targets.
#[must_use]
pub fn predator_body(state: &GameState, id: CreatureId) -> i32 {
    effective_body(state, id) + hooks::predator_body_bonus(state, id)
}

/// Food still wanted this round.
#[must_use]
pub fn unmet_need(state: &GameState, id: CreatureId) -> i32 {
    state
        .board
        .get(id)
        .map_or(0, |c| c.unmet_need(effective_body(state, id)))
}

/// Fastest first. Equal speeds are ordered by a draw from the match RNG,
/// never by board position.
pub fn speed_order(state: &mut GameState, ids: Vec<CreatureId>) -> Vec<CreatureId> {
    let mut keyed = Vec::with_capacity(ids.len());
    for id in ids {
        let speed = effective_speed(state, id);
        keyed.push((speed, state.rng.tie_break_key(), id));
    }
    keyed.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)).then(a.2.cmp(&b.2)));
    keyed.into_iter().map(|(_, _, id)| id).collect()
}
