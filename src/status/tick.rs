//! Round-start and round-end status ticks.
//!
//! Round end runs in a fixed order:
//!
//! 1. Fatigued -1
//! 2. DamageUp cleared
//! 3. Regen heals by its stacks, then -1
//! 4. Bleeding deals its stacks as damage (no decay)
//! 5. Suppressed -1
//! 6. Stunned -1
//! 7. NoForage -1
//!
//! followed by the round-scoped buffs: Taunt and Absorb cleared, BodyUp,
//! SpeedUp and Malnourished -1.

use crate::core::{CreatureId, GameState};
use crate::resolution::damage::{deal_damage, heal};

use super::tag::StatusTag;

/// Infected deals 1 damage, then loses a stack.
pub fn round_start_tick(state: &mut GameState, id: CreatureId) {
    if !state.is_alive(id) {
        return;
    }
    if state.has_status(id, StatusTag::Infected) {
        deal_damage(state, id, 1, None);
        state.decrement_status(id, StatusTag::Infected, 1);
    }
}

/// End-of-round decay and damage for one creature.
pub fn round_end_tick(state: &mut GameState, id: CreatureId) {
    if !state.is_alive(id) {
        return;
    }

    state.decrement_status(id, StatusTag::Fatigued, 1);
    state.clear_status(id, StatusTag::DamageUp);

    let regen = state.status(id, StatusTag::Regen);
    if regen > 0 {
        heal(state, id, regen as i32);
        state.decrement_status(id, StatusTag::Regen, 1);
    }

    let bleeding = state.status(id, StatusTag::Bleeding);
    if bleeding > 0 {
        deal_damage(state, id, bleeding as i32, None);
    }

    for tag in [StatusTag::Suppressed, StatusTag::Stunned, StatusTag::NoForage] {
        state.decrement_status(id, tag, 1);
    }

    state.clear_status(id, StatusTag::Taunt);
    state.clear_status(id, StatusTag::Absorb);
    for tag in [StatusTag::BodyUp, StatusTag::SpeedUp, StatusTag::Malnourished] {
        state.decrement_status(id, tag, 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{CreatureTemplate, Species};
    use crate::core::{MatchConfig, SlotId};

    fn setup(health: i32) -> (GameState, CreatureId) {
        let mut state = GameState::new(MatchConfig::new(5));
        let t = CreatureTemplate::new("Target", Species::Herbivore, 2, 2, health);
        let id = state.board.place(SlotId(0), &t).unwrap();
        (state, id)
    }

    fn health(state: &GameState, id: CreatureId) -> i32 {
        state.creature(id).map_or(-1, |c| c.current_health())
    }

    #[test]
    fn test_infected_ticks_at_round_start() {
        let (mut state, id) = setup(5);
        state.add_status(id, StatusTag::Infected, 2);
        round_start_tick(&mut state, id);
        assert_eq!(health(&state, id), 4);
        assert_eq!(state.status(id, StatusTag::Infected), 1);
    }

    #[test]
    fn test_shield_blocks_infection_damage() {
        let (mut state, id) = setup(5);
        state.add_status(id, StatusTag::Infected, 1);
        state.add_status(id, StatusTag::Shielded, 1);
        round_start_tick(&mut state, id);
        assert_eq!(health(&state, id), 5);
        assert_eq!(state.status(id, StatusTag::Infected), 0);
    }

    #[test]
    fn test_regen_before_bleeding() {
        let (mut state, id) = setup(6);
        state.creature_mut(id).unwrap().lose_health(3);
        state.add_status(id, StatusTag::Fatigued, 1);
        state.add_status(id, StatusTag::Regen, 2);
        state.add_status(id, StatusTag::Bleeding, 1);

        round_end_tick(&mut state, id);

        assert_eq!(health(&state, id), 3 + 2 - 1);
        assert_eq!(state.status(id, StatusTag::Fatigued), 0);
        assert_eq!(state.status(id, StatusTag::Regen), 1);
        assert_eq!(state.status(id, StatusTag::Bleeding), 1);
    }

    #[test]
    fn test_regen_cannot_save_from_bleeding_at_full_health() {
        let (mut state, id) = setup(2);
        state.add_status(id, StatusTag::Regen, 3);
        state.add_status(id, StatusTag::Bleeding, 2);
        round_end_tick(&mut state, id);
        assert!(!state.is_alive(id));
    }

    #[test]
    fn test_decays_and_clears() {
        let (mut state, id) = setup(5);
        state.add_status(id, StatusTag::DamageUp, 3);
        state.add_status(id, StatusTag::Suppressed, 2);
        state.add_status(id, StatusTag::Stunned, 1);
        state.add_status(id, StatusTag::NoForage, 1);
        state.add_status(id, StatusTag::Taunt, 1);
        state.add_status(id, StatusTag::Absorb, 4);
        state.add_status(id, StatusTag::BodyUp, 2);
        state.add_status(id, StatusTag::Stealth, 1);
        state.add_status(id, StatusTag::Shielded, 1);

        round_end_tick(&mut state, id);

        let store = &state.creature(id).unwrap().statuses;
        let left: Vec<_> = store.iter().collect();
        assert_eq!(
            left,
            vec![
                (StatusTag::Shielded, 1),
                (StatusTag::Suppressed, 1),
                (StatusTag::Stealth, 1),
                (StatusTag::BodyUp, 1),
            ]
        );
    }

    #[test]
    fn test_dead_creature_does_not_tick() {
        let (mut state, id) = setup(1);
        state.add_status(id, StatusTag::Infected, 2);
        state.creature_mut(id).unwrap().lose_health(1);
        round_start_tick(&mut state, id);
        assert_eq!(state.status(id, StatusTag::Infected), 2);
    }
}
