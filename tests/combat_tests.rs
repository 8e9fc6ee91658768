//! Attack eligibility and damage through the public combat API.

use primal_arena::resolution::combat::{self, AttackOutcome};
use primal_arena::{CreatureId, CreatureTemplate, GameState, MatchConfig, SlotId, Species, StatusTag};

fn place(state: &mut GameState, slot: u16, template: CreatureTemplate) -> CreatureId {
    state
        .board
        .place(SlotId(slot), &template)
        .unwrap_or_else(|| panic!("slot {slot} should be free"))
}

fn health(state: &GameState, id: CreatureId) -> i32 {
    state.creature(id).map_or(0, |c| c.current_health())
}

#[test]
fn test_fast_avian_harasses_for_one() {
    let mut state = GameState::new(MatchConfig::new(30));
    let bird = place(&mut state, 0, CreatureTemplate::new("Glider", Species::Avian, 1, 5, 3));
    let big = place(&mut state, 3, CreatureTemplate::new("Longneck", Species::Herbivore, 4, 3, 6));

    assert!(combat::is_harass(&state, bird, big));
    let outcome = combat::take_turn(&mut state, bird);
    assert_eq!(outcome, AttackOutcome::Hit { damage: 1, killed: false });
    assert_eq!(health(&state, big), 5);
}

#[test]
fn test_taunt_restricts_the_pool() {
    let mut state = GameState::new(MatchConfig::new(31));
    let near = place(&mut state, 0, CreatureTemplate::new("Near", Species::Herbivore, 1, 1, 4));
    let taunter = place(&mut state, 2, CreatureTemplate::new("Taunter", Species::Herbivore, 1, 1, 4));
    let hunter = place(&mut state, 3, CreatureTemplate::new("Hunter", Species::Carnivore, 3, 2, 5));
    state.add_status(taunter, StatusTag::Taunt, 1);

    assert_eq!(combat::valid_targets(&state, hunter), vec![taunter]);
    assert_eq!(combat::find_best_target(&state, hunter), Some(taunter));

    combat::take_turn(&mut state, hunter);
    assert_eq!(health(&state, near), 4);
    assert_eq!(health(&state, taunter), 1);
}

#[test]
fn test_smaller_carnivore_finds_no_target() {
    let mut state = GameState::new(MatchConfig::new(32));
    place(&mut state, 0, CreatureTemplate::new("Wall", Species::Herbivore, 5, 1, 8));
    let hunter = place(&mut state, 3, CreatureTemplate::new("Runt", Species::Carnivore, 2, 2, 4));

    assert!(combat::valid_targets(&state, hunter).is_empty());
    assert_eq!(combat::take_turn(&mut state, hunter), AttackOutcome::Skipped);
    assert!(state.creature(hunter).is_some_and(|c| c.ledger.acted));
}

#[test]
fn test_stealth_waives_body_rule_once() {
    let mut state = GameState::new(MatchConfig::new(33));
    let wall = place(&mut state, 0, CreatureTemplate::new("Wall", Species::Herbivore, 5, 1, 8));
    let hunter = place(&mut state, 3, CreatureTemplate::new("Stalker", Species::Carnivore, 2, 2, 4));
    state.add_status(hunter, StatusTag::Stealth, 1);

    assert_eq!(combat::valid_targets(&state, hunter), vec![wall]);
    combat::take_turn(&mut state, hunter);
    assert_eq!(health(&state, wall), 7);
    assert!(!state.has_status(hunter, StatusTag::Stealth));
}

#[test]
fn test_attack_phase_gives_everyone_one_turn() {
    let mut state = GameState::new(MatchConfig::new(34));
    let a = place(&mut state, 0, CreatureTemplate::new("A", Species::Carnivore, 3, 3, 9));
    let b = place(&mut state, 3, CreatureTemplate::new("B", Species::Carnivore, 3, 3, 9));
    place(&mut state, 4, CreatureTemplate::new("Grazer", Species::Herbivore, 1, 1, 9));

    combat::resolve_attacks(&mut state);

    for id in state.board.living() {
        assert!(state.creature(id).is_some_and(|c| c.ledger.acted));
    }
    assert!(health(&state, a) <= 9 && health(&state, b) <= 9);
}
