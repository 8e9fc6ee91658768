//! Status tick ordering and interception.

use primal_arena::status::{round_end_tick, round_start_tick, AddOutcome};
use primal_arena::{CreatureId, CreatureTemplate, GameState, MatchConfig, SlotId, Species, StatusTag};

fn setup() -> (GameState, CreatureId) {
    let mut state = GameState::new(MatchConfig::new(40));
    let id = state
        .board
        .place(SlotId(0), &CreatureTemplate::new("Grazer", Species::Herbivore, 2, 1, 10))
        .unwrap_or_else(|| panic!("slot 0 should be free"));
    (state, id)
}

fn health(state: &GameState, id: CreatureId) -> i32 {
    state.creature(id).map_or(0, |c| c.current_health())
}

#[test]
fn test_regen_heals_before_bleeding() {
    let (mut state, id) = setup();
    if let Some(c) = state.creature_mut(id) {
        c.lose_health(5);
    }
    state.add_status(id, StatusTag::Fatigued, 1);
    state.add_status(id, StatusTag::Regen, 2);
    state.add_status(id, StatusTag::Bleeding, 1);

    round_end_tick(&mut state, id);

    assert_eq!(health(&state, id), 6);
    assert_eq!(state.status(id, StatusTag::Fatigued), 0);
    assert_eq!(state.status(id, StatusTag::Regen), 1);
    assert_eq!(state.status(id, StatusTag::Bleeding), 1);
}

#[test]
fn test_regen_at_full_health_still_decays() {
    let (mut state, id) = setup();
    state.add_status(id, StatusTag::Regen, 3);
    round_end_tick(&mut state, id);
    assert_eq!(health(&state, id), 10);
    assert_eq!(state.status(id, StatusTag::Regen), 2);
}

#[test]
fn test_infection_ticks_at_round_start() {
    let (mut state, id) = setup();
    state.add_status(id, StatusTag::Infected, 2);
    round_start_tick(&mut state, id);
    assert_eq!(health(&state, id), 9);
    assert_eq!(state.status(id, StatusTag::Infected), 1);
}

#[test]
fn test_immune_blocks_one_negative() {
    let (mut state, id) = setup();
    state.add_status(id, StatusTag::Immune, 1);

    assert_eq!(state.add_status(id, StatusTag::Stunned, 1), AddOutcome::Blocked);
    assert!(!state.has_status(id, StatusTag::Stunned));
    assert!(!state.has_status(id, StatusTag::Immune));

    assert!(matches!(state.add_status(id, StatusTag::Stunned, 1), AddOutcome::Applied(1)));
}

#[test]
fn test_round_scoped_buffs_expire() {
    let (mut state, id) = setup();
    state.add_status(id, StatusTag::Taunt, 1);
    state.add_status(id, StatusTag::DamageUp, 3);
    state.add_status(id, StatusTag::Stunned, 1);

    round_end_tick(&mut state, id);

    assert!(!state.has_status(id, StatusTag::Taunt));
    assert!(!state.has_status(id, StatusTag::DamageUp));
    assert!(!state.has_status(id, StatusTag::Stunned));
}
