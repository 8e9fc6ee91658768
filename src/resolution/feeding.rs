//! Food consumption against the shared pile.
//!
//! Every grant goes through [`crate::board::FoodPile::take`], so nothing can
//! eat more than the pile holds.

use tracing::debug;

use crate::board::Species;
use crate::core::{CreatureId, GameState};
use crate::status::StatusTag;
use crate::traits::hooks;

use super::events::StepEvent;
use super::stats;

fn take_food(state: &mut GameState, id: CreatureId, amount: i32) -> i32 {
    let taken = state.food.take(amount);
    state.feed(id, taken);
    taken
}

/// Stunned, NoForage and trait vetoes keep a creature off the pile.
#[must_use]
pub fn may_forage(state: &GameState, id: CreatureId) -> bool {
    state.is_alive(id)
        && !state.has_status(id, StatusTag::Stunned)
        && !state.has_status(id, StatusTag::NoForage)
        && hooks::can_forage(state, id)
}

/// Traits that skim the pile before herbivores eat, fastest first.
pub fn pre_herbivore_steals(state: &mut GameState) {
    let living = state.board.living();
    let order = stats::speed_order(state, living);
    for id in order {
        if !state.is_alive(id) {
            continue;
        }
        let steal = hooks::pre_herbivore_pile_steal(state, id).max(0);
        if steal == 0 {
            continue;
        }
        let taken = take_food(state, id, steal);
        if taken > 0 {
            debug!(creature = %id, taken, "stole food");
            state.emit(StepEvent::Stole {
                creature: id,
                amount: taken,
            });
        }
    }
}

/// Herbivores eat up to their unmet need, fastest first.
pub fn feed_herbivores(state: &mut GameState) {
    let herbivores: Vec<CreatureId> = state
        .board
        .living()
        .into_iter()
        .filter(|id| state.is_species(*id, Species::Herbivore))
        .collect();

    for id in stats::speed_order(state, herbivores) {
        if !may_forage(state, id) {
            continue;
        }
        let need = stats::unmet_need(state, id);
        if need == 0 {
            continue;
        }
        let desired = hooks::modify_herbivore_eat_amount(state, id, need).max(0);
        let taken = take_food(state, id, desired);
        if taken > 0 {
            debug!(creature = %id, taken, "herbivore ate");
            state.emit(StepEvent::Ate {
                creature: id,
                amount: taken,
            });
        }
        hooks::on_after_eat(state, id, taken);
    }
}

/// Foraging reactions, then every hungry avian takes one food.
pub fn forage(state: &mut GameState) {
    let living = state.board.living();
    let order = stats::speed_order(state, living);
    for id in order {
        hooks::on_foraging(state, id);

        if !state.is_species(id, Species::Avian) || !may_forage(state, id) {
            continue;
        }
        if stats::unmet_need(state, id) == 0 {
            continue;
        }
        let taken = take_food(state, id, 1);
        if taken > 0 {
            debug!(creature = %id, "avian foraged");
            state.emit(StepEvent::Ate {
                creature: id,
                amount: taken,
            });
        }
    }
}
