//! Starvation and end-of-round scoring.
//!
//! Herbivores score what they ate. Carnivores and avians that ate shake off
//! Starvation (and gain 1 Fatigued if they had any); those that did not eat
//! gain a Starvation stack and take damage equal to their stacks. At the
//! lethal threshold they first take damage equal to their current health.
//! Both go through the normal damage pipeline, so shields and
//! death-prevention traits still apply.
//!
//! Every survivor then banks `max(0, damage dealt - healing undone)` for its
//! owner, and eaten counters reset.

use tracing::debug;

use crate::board::Species;
use crate::core::{CreatureId, GameState, PlayerMap};
use crate::status::StatusTag;

use super::damage;
use super::events::StepEvent;

/// Starvation step for one carnivore or avian.
pub fn apply_starvation(state: &mut GameState, id: CreatureId) {
    let ate = match state.creature(id) {
        Some(c) if c.is_alive() => c.eaten > 0,
        _ => return,
    };

    if ate {
        if state.clear_status(id, StatusTag::Starvation) > 0 {
            state.add_status(id, StatusTag::Fatigued, 1);
        }
        return;
    }

    state.add_status(id, StatusTag::Starvation, 1);
    let stacks = state.status(id, StatusTag::Starvation);
    debug!(creature = %id, stacks, "starving");
    state.emit(StepEvent::Starving { creature: id, stacks });

    if stacks >= state.config.lethal_starvation_stacks {
        let health = state.creature(id).map_or(0, |c| c.current_health());
        damage::deal_damage(state, id, health, None);
    }
    if state.is_alive(id) {
        let amount = stacks as i32 + state.weather.current().starvation_bonus();
        damage::deal_damage(state, id, amount, None);
    }
}

/// Run starvation, bank scores and reset eaten counters. Returns the points
/// each player gained.
pub fn starvation_and_scoring(state: &mut GameState) -> PlayerMap<i64> {
    let mut gained: PlayerMap<i64> = PlayerMap::with_value(state.player_count(), 0);

    for id in state.board.living() {
        let Some((owner, species, eaten)) = state.creature(id).map(|c| (c.owner, c.species, c.eaten)) else {
            continue;
        };
        match species {
            Species::Herbivore => gained[owner] += i64::from(eaten.max(0)),
            Species::Carnivore | Species::Avian => apply_starvation(state, id),
        }
    }

    for id in state.board.living() {
        if let Some(c) = state.creature(id) {
            gained[c.owner] += i64::from(c.ledger.net_score());
        }
    }

    for id in state.board.all_ids() {
        if let Some(c) = state.creature_mut(id) {
            c.eaten = 0;
        }
    }

    let players: Vec<_> = state.players().collect();
    for player in players {
        let points = gained[player];
        if points > 0 {
            state.scores[player] += points;
            state.emit(StepEvent::Scored { player, points });
        }
    }
    gained
}
