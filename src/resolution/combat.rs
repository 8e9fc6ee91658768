//! Target eligibility and attack resolution.
//!
//! ## Eligibility
//!
//! The pool is every living enemy. If any enemy holds Taunt, only Taunt
//! holders are candidates and they are always valid. Otherwise:
//!
//! - carnivores are off limits unless the attacker can target anything
//! - avians may harass anything no faster than themselves
//! - everyone else needs a bigger body, or an equal one plus a grant
//! - Stealth waives the body requirement for one attack
//! - carnivores need at least the speed of an avian target, unless waived
//! - any `can_target` veto removes the candidate
//!
//! The nearest candidate is picked; `choose_attack_target` may redirect it.
//!
//! ## Resolution
//!
//! Pre-hit reactions run first and may kill either side. A turn attack spends
//! the attacker's Stealth at this point whatever happens next. Then the
//! target may negate, damage is computed and applied, and the kill and
//! resolve hooks fire.

use tracing::debug;

use crate::board::Species;
use crate::core::{CreatureId, GameState};
use crate::status::StatusTag;
use crate::traits::hooks;

use super::damage;
use super::events::StepEvent;
use super::stats;

/// How one attack attempt ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttackOutcome {
    /// The attacker could not or did not attack.
    Skipped,
    /// The attacker died to a pre-hit reaction.
    Aborted,
    Negated,
    Hit { damage: i32, killed: bool },
}

/// Where an attack comes from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Strike {
    /// The attacker's turn in the attack phase.
    Turn,
    /// Started by a trait mid-resolution.
    Immediate,
}

fn taunt_holders(state: &GameState, attacker: CreatureId) -> Vec<CreatureId> {
    state
        .board
        .enemies_of(attacker)
        .into_iter()
        .filter(|e| state.has_status(*e, StatusTag::Taunt))
        .collect()
}

/// Avian against a non-carnivore it is at least as fast as.
#[must_use]
pub fn is_harass(state: &GameState, attacker: CreatureId, target: CreatureId) -> bool {
    state.is_species(attacker, Species::Avian)
        && !state.is_species(target, Species::Carnivore)
        && stats::effective_speed(state, attacker) >= stats::effective_speed(state, target)
}

fn body_allows(state: &GameState, attacker: CreatureId, target: CreatureId) -> bool {
    let mine = stats::predator_body(state, attacker);
    let theirs = stats::effective_body(state, target);
    mine > theirs || (mine == theirs && hooks::can_target_equal_body(state, attacker, target))
}

/// Body, species and speed rules, ignoring Taunt.
fn passes_rules(state: &GameState, attacker: CreatureId, target: CreatureId) -> bool {
    if state.is_species(target, Species::Carnivore) && !hooks::can_target_any(state, attacker) {
        return false;
    }

    let stealthed = state.has_status(attacker, StatusTag::Stealth);
    let avian = state.is_species(attacker, Species::Avian);
    let fast_enough = stats::effective_speed(state, attacker) >= stats::effective_speed(state, target);
    if !(stealthed || (avian && fast_enough) || body_allows(state, attacker, target)) {
        return false;
    }

    if state.is_species(attacker, Species::Carnivore)
        && state.is_species(target, Species::Avian)
        && !fast_enough
        && !hooks::ignore_avian_speed_requirement(state, attacker, target)
    {
        return false;
    }

    hooks::can_target(state, attacker, target)
}

/// May `attacker` pick `target` right now?
#[must_use]
pub fn is_valid_target(state: &GameState, attacker: CreatureId, target: CreatureId) -> bool {
    let (Some(a), Some(t)) = (state.creature(attacker), state.creature(target)) else {
        return false;
    };
    if !a.is_alive() || !t.is_alive() || !a.owner.is_enemy_of(t.owner) {
        return false;
    }
    let taunting = taunt_holders(state, attacker);
    if !taunting.is_empty() {
        return taunting.contains(&target);
    }
    passes_rules(state, attacker, target)
}

/// Every enemy `attacker` may pick, in slot order.
#[must_use]
pub fn valid_targets(state: &GameState, attacker: CreatureId) -> Vec<CreatureId> {
    if !state.is_alive(attacker) {
        return Vec::new();
    }
    let taunting = taunt_holders(state, attacker);
    if !taunting.is_empty() {
        return taunting;
    }
    state
        .board
        .enemies_of(attacker)
        .into_iter()
        .filter(|t| passes_rules(state, attacker, *t))
        .collect()
}

/// Nearest valid target, after trait redirects.
#[must_use]
pub fn find_best_target(state: &GameState, attacker: CreatureId) -> Option<CreatureId> {
    let candidates = valid_targets(state, attacker);
    let picked = state.board.nearest(attacker, &candidates)?;
    Some(hooks::choose_attack_target(state, attacker, picked, &candidates).unwrap_or(picked))
}

/// Damage before any trait modifies it.
#[must_use]
pub fn base_damage(state: &GameState, attacker: CreatureId, target: CreatureId) -> i32 {
    if is_harass(state, attacker, target) {
        1
    } else {
        (stats::effective_body(state, attacker) - stats::effective_body(state, target) + 1).max(1)
    }
}

/// Final damage of one hit. Spends Rage.
fn attack_damage(state: &mut GameState, attacker: CreatureId, target: CreatureId) -> i32 {
    if let Some(fixed) = hooks::try_override_final_damage(state, attacker, target) {
        return fixed.max(0);
    }

    let base = base_damage(state, attacker, target);
    let outgoing = hooks::modify_outgoing_damage(state, attacker, target, base);
    let mut amount = hooks::modify_incoming_damage(state, target, attacker, outgoing);
    let bonus = state
        .creature(attacker)
        .map_or(0, |c| c.statuses.get_i32(StatusTag::DamageUp));
    amount = amount.saturating_add(bonus);
    if state.has_status(attacker, StatusTag::Rage) {
        amount = amount.saturating_mul(2);
        state.clear_status(attacker, StatusTag::Rage);
    }
    amount.max(0)
}

fn resolve_attack(state: &mut GameState, attacker: CreatureId, target: CreatureId, strike: Strike) -> AttackOutcome {
    debug!(%attacker, %target, ?strike, "attack");
    state.emit(StepEvent::Attacked { attacker, target });

    hooks::on_targeted_by_attack(state, target, attacker);
    for ally in state.board.allies_of(target) {
        if !state.is_alive(attacker) {
            break;
        }
        hooks::on_ally_targeted(state, ally, target, attacker);
    }
    if strike == Strike::Turn {
        state.clear_status(attacker, StatusTag::Stealth);
    }
    if !state.is_alive(attacker) || !state.is_alive(target) {
        return AttackOutcome::Aborted;
    }

    let negated = hooks::try_negate_attack(state, target, attacker);
    if negated {
        state.emit(StepEvent::AttackNegated { attacker, target });
        hooks::on_after_attack_resolved(state, attacker, target, true);
        return AttackOutcome::Negated;
    }

    let amount = attack_damage(state, attacker, target);
    let outcome = damage::apply_damage(state, target, amount, Some(attacker));
    if outcome.dealt > 0 {
        if let Some(c) = state.creature_mut(attacker).filter(|c| c.is(Species::Carnivore)) {
            c.eaten = c.eaten.max(1);
        }
        hooks::on_damage_dealt(state, attacker, target, outcome.dealt);
    }
    if outcome.lethal {
        damage::resolve_death(state, target, Some(attacker));
    }
    hooks::on_after_attack_resolved(state, attacker, target, false);

    AttackOutcome::Hit {
        damage: outcome.dealt,
        killed: outcome.lethal,
    }
}

/// One creature's attack turn. The creature is marked as having acted
/// whatever happens.
pub fn take_turn(state: &mut GameState, attacker: CreatureId) -> AttackOutcome {
    match state.creature_mut(attacker) {
        Some(c) if c.is_alive() => c.ledger.acted = true,
        _ => return AttackOutcome::Skipped,
    }

    if state.has_status(attacker, StatusTag::Stunned) || !hooks::can_attack(state, attacker) {
        return AttackOutcome::Skipped;
    }
    if state.is_species(attacker, Species::Herbivore) && !hooks::grants_attack(state, attacker) {
        return AttackOutcome::Skipped;
    }

    match find_best_target(state, attacker) {
        Some(target) => resolve_attack(state, attacker, target, Strike::Turn),
        None => {
            state.emit(StepEvent::NoTarget { attacker });
            AttackOutcome::Skipped
        }
    }
}

/// An out-of-turn attack started by a trait (counters, pack follow-ups).
///
/// Target rules are not checked and the attacker is not marked as acted.
/// Nested immediate attacks stop at the configured depth. Returns whether an
/// attack was made.
pub fn immediate_attack(state: &mut GameState, attacker: CreatureId, target: CreatureId) -> bool {
    let hostile = match (state.creature(attacker), state.creature(target)) {
        (Some(a), Some(t)) => a.is_alive() && t.is_alive() && a.owner.is_enemy_of(t.owner),
        _ => false,
    };
    if !hostile
        || state.has_status(attacker, StatusTag::Stunned)
        || state.attack_depth >= state.config.max_immediate_attack_depth
    {
        return false;
    }

    state.attack_depth += 1;
    resolve_attack(state, attacker, target, Strike::Immediate);
    state.attack_depth -= 1;
    true
}

/// The living creature that attacks next: highest effective speed among
/// those that have not acted, ties drawn from the match RNG.
pub fn next_actor(state: &mut GameState) -> Option<CreatureId> {
    let waiting: Vec<(CreatureId, i32)> = state
        .board
        .living()
        .into_iter()
        .filter(|id| state.creature(*id).is_some_and(|c| !c.ledger.acted))
        .map(|id| (id, stats::effective_speed(state, id)))
        .collect();
    let fastest = waiting.iter().map(|(_, s)| *s).max()?;
    let tied: Vec<CreatureId> = waiting
        .into_iter()
        .filter(|(_, s)| *s == fastest)
        .map(|(id, _)| id)
        .collect();
    let pick = state.rng.gen_index(tied.len())?;
    tied.get(pick).copied()
}

/// Run attack turns until every living creature has acted.
pub fn resolve_attacks(state: &mut GameState) {
    while let Some(actor) = next_actor(state) {
        take_turn(state, actor);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::CreatureTemplate;
    use crate::core::{MatchConfig, SlotId};
    use crate::traits::TraitKind;

    fn state() -> GameState {
        GameState::new(MatchConfig::new(9))
    }

    fn spawn(state: &mut GameState, slot: u16, t: CreatureTemplate) -> CreatureId {
        state.board.place(SlotId(slot), &t).unwrap()
    }

    fn health(state: &GameState, id: CreatureId) -> i32 {
        state.creature(id).map_or(0, |c| c.current_health())
    }

    #[test]
    fn test_body_rule() {
        let mut s = state();
        let hunter = spawn(&mut s, 0, CreatureTemplate::new("Hunter", Species::Carnivore, 3, 2, 5));
        let small = spawn(&mut s, 3, CreatureTemplate::new("Small", Species::Herbivore, 2, 1, 4));
        let equal = spawn(&mut s, 4, CreatureTemplate::new("Equal", Species::Herbivore, 3, 1, 4));
        let rival = spawn(&mut s, 5, CreatureTemplate::new("Rival", Species::Carnivore, 1, 1, 4));

        assert_eq!(valid_targets(&s, hunter), vec![small]);
        assert!(!is_valid_target(&s, hunter, equal));
        assert!(!is_valid_target(&s, hunter, rival));
    }

    #[test]
    fn test_equal_body_grant() {
        let mut s = state();
        let hunter = spawn(
            &mut s,
            0,
            CreatureTemplate::new("Hunter", Species::Carnivore, 3, 2, 5).with_trait(TraitKind::ApexPredator),
        );
        let equal = spawn(&mut s, 3, CreatureTemplate::new("Equal", Species::Herbivore, 3, 1, 4));
        assert!(is_valid_target(&s, hunter, equal));
    }

    #[test]
    fn test_stealth_waives_body_once() {
        let mut s = state();
        let hunter = spawn(&mut s, 0, CreatureTemplate::new("Hunter", Species::Carnivore, 2, 2, 5));
        let big = spawn(&mut s, 3, CreatureTemplate::new("Big", Species::Herbivore, 4, 1, 6));
        assert!(!is_valid_target(&s, hunter, big));

        s.add_status(hunter, StatusTag::Stealth, 1);
        assert!(is_valid_target(&s, hunter, big));
        take_turn(&mut s, hunter);
        assert!(!s.has_status(hunter, StatusTag::Stealth));
        assert_eq!(health(&s, big), 5);
    }

    /// Dies the moment it is targeted.
    #[derive(Debug)]
    struct Brittle;

    impl crate::traits::Trait for Brittle {
        fn kind(&self) -> TraitKind {
            TraitKind::Thorns
        }

        fn on_targeted_by_attack(&mut self, state: &mut GameState, me: CreatureId, _attacker: CreatureId) {
            damage::kill(state, me, None);
        }
    }

    #[test]
    fn test_stealth_spent_when_target_dies_before_hit() {
        let mut s = state();
        let hunter = spawn(&mut s, 0, CreatureTemplate::new("Hunter", Species::Carnivore, 2, 2, 5));
        let big = spawn(&mut s, 3, CreatureTemplate::new("Big", Species::Herbivore, 4, 1, 6));
        s.board
            .get_mut(big)
            .unwrap()
            .traits
            .attach_cell(TraitKind::Thorns, std::rc::Rc::new(std::cell::RefCell::new(Brittle)));
        s.add_status(hunter, StatusTag::Stealth, 1);

        assert_eq!(take_turn(&mut s, hunter), AttackOutcome::Aborted);
        assert!(s.is_alive(hunter));
        assert!(!s.has_status(hunter, StatusTag::Stealth));
    }

    #[test]
    fn test_damage_up_does_not_wrap() {
        let mut s = state();
        let hunter = spawn(&mut s, 0, CreatureTemplate::new("Hunter", Species::Carnivore, 3, 2, 5));
        let prey = spawn(&mut s, 3, CreatureTemplate::new("Prey", Species::Herbivore, 1, 1, 4));
        s.add_status(hunter, StatusTag::DamageUp, u32::MAX);
        s.add_status(hunter, StatusTag::Rage, 1);

        assert_eq!(attack_damage(&mut s, hunter, prey), i32::MAX);
    }

    #[test]
    fn test_taunt_restricts_pool() {
        let mut s = state();
        let hunter = spawn(&mut s, 1, CreatureTemplate::new("Hunter", Species::Carnivore, 3, 2, 5));
        let near = spawn(&mut s, 4, CreatureTemplate::new("Near", Species::Herbivore, 1, 1, 4));
        let far = spawn(&mut s, 5, CreatureTemplate::new("Far", Species::Herbivore, 5, 1, 4));
        s.add_status(far, StatusTag::Taunt, 1);

        assert_eq!(valid_targets(&s, hunter), vec![far]);
        assert!(!is_valid_target(&s, hunter, near));
        assert_eq!(find_best_target(&s, hunter), Some(far));
    }

    #[test]
    fn test_avian_harass_is_one_damage() {
        let mut s = state();
        let bird = spawn(&mut s, 0, CreatureTemplate::new("Raptor", Species::Avian, 1, 5, 3));
        let beast = spawn(&mut s, 3, CreatureTemplate::new("Beast", Species::Herbivore, 4, 3, 8));

        assert!(is_harass(&s, bird, beast));
        assert_eq!(take_turn(&mut s, bird), AttackOutcome::Hit { damage: 1, killed: false });
        assert_eq!(health(&s, beast), 7);
    }

    #[test]
    fn test_slow_avian_cannot_harass() {
        let mut s = state();
        let bird = spawn(&mut s, 0, CreatureTemplate::new("Raptor", Species::Avian, 1, 2, 3));
        let beast = spawn(&mut s, 3, CreatureTemplate::new("Beast", Species::Herbivore, 4, 3, 8));
        assert!(!is_valid_target(&s, bird, beast));
    }

    #[test]
    fn test_carnivore_needs_speed_for_avians() {
        let mut s = state();
        let hunter = spawn(&mut s, 0, CreatureTemplate::new("Hunter", Species::Carnivore, 3, 2, 5));
        let bird = spawn(&mut s, 3, CreatureTemplate::new("Raptor", Species::Avian, 1, 4, 3));
        assert!(!is_valid_target(&s, hunter, bird));

        s.add_status(hunter, StatusTag::SpeedUp, 2);
        assert!(is_valid_target(&s, hunter, bird));
    }

    #[test]
    fn test_body_difference_damage_and_rage() {
        let mut s = state();
        let hunter = spawn(&mut s, 0, CreatureTemplate::new("Hunter", Species::Carnivore, 4, 2, 5));
        let prey = spawn(&mut s, 3, CreatureTemplate::new("Prey", Species::Herbivore, 2, 1, 10));
        s.add_status(hunter, StatusTag::DamageUp, 1);
        s.add_status(hunter, StatusTag::Rage, 1);

        // (4 - 2 + 1 + 1) * 2
        assert_eq!(take_turn(&mut s, hunter), AttackOutcome::Hit { damage: 8, killed: false });
        assert!(!s.has_status(hunter, StatusTag::Rage));
        assert_eq!(s.creature(hunter).unwrap().eaten, 1);
        assert!(s.creature(hunter).unwrap().ledger.acted);
    }

    #[test]
    fn test_override_skips_modifiers() {
        let mut s = state();
        let bird = spawn(
            &mut s,
            0,
            CreatureTemplate::new("Striker", Species::Avian, 1, 5, 3).with_trait(TraitKind::PrecisionStrike),
        );
        let hunter = spawn(&mut s, 3, CreatureTemplate::new("Hunter", Species::Carnivore, 3, 2, 5));
        s.add_status(bird, StatusTag::DamageUp, 3);

        assert_eq!(take_turn(&mut s, bird), AttackOutcome::Hit { damage: 1, killed: false });
        assert!(s.has_status(hunter, StatusTag::Stunned));
    }

    #[test]
    fn test_negated_attack_still_acts() {
        let mut s = state();
        let hunter = spawn(&mut s, 0, CreatureTemplate::new("Hunter", Species::Carnivore, 3, 2, 5));
        let prey = spawn(
            &mut s,
            3,
            CreatureTemplate::new("Digger", Species::Herbivore, 1, 1, 3).with_trait(TraitKind::Burrow),
        );
        assert_eq!(take_turn(&mut s, hunter), AttackOutcome::Negated);
        assert_eq!(health(&s, prey), 3);
        assert!(s.creature(hunter).unwrap().ledger.acted);
        assert_eq!(s.creature(hunter).unwrap().eaten, 0);
    }

    #[test]
    fn test_stunned_and_grazers_skip() {
        let mut s = state();
        let hunter = spawn(&mut s, 0, CreatureTemplate::new("Hunter", Species::Carnivore, 3, 2, 5));
        let grazer = spawn(&mut s, 1, CreatureTemplate::new("Grazer", Species::Herbivore, 5, 2, 5));
        spawn(&mut s, 3, CreatureTemplate::new("Prey", Species::Herbivore, 1, 1, 3));
        s.add_status(hunter, StatusTag::Stunned, 1);

        assert_eq!(take_turn(&mut s, hunter), AttackOutcome::Skipped);
        assert_eq!(take_turn(&mut s, grazer), AttackOutcome::Skipped);
    }

    #[test]
    fn test_kill_fires_after_kill() {
        let mut s = state();
        let hunter = spawn(
            &mut s,
            0,
            CreatureTemplate::new("Hunter", Species::Carnivore, 3, 2, 5).with_trait(TraitKind::PredatoryRenewal),
        );
        let prey = spawn(&mut s, 3, CreatureTemplate::new("Prey", Species::Herbivore, 1, 1, 2));

        assert_eq!(take_turn(&mut s, hunter), AttackOutcome::Hit { damage: 2, killed: true });
        assert!(!s.is_alive(prey));
        assert_eq!(s.status(hunter, StatusTag::Regen), 1);
    }

    #[test]
    fn test_immediate_attack_depth_limit() {
        let mut s = state();
        let a = spawn(&mut s, 0, CreatureTemplate::new("A", Species::Carnivore, 3, 2, 5));
        let b = spawn(&mut s, 3, CreatureTemplate::new("B", Species::Herbivore, 1, 1, 9));

        s.attack_depth = s.config.max_immediate_attack_depth;
        assert!(!immediate_attack(&mut s, a, b));
        s.attack_depth = 0;
        assert!(immediate_attack(&mut s, a, b));
        assert_eq!(s.attack_depth, 0);
        assert!(!s.creature(a).unwrap().ledger.acted);
        assert!(!immediate_attack(&mut s, a, a));
    }

    #[test]
    fn test_attack_phase_terminates() {
        let mut s = state();
        for slot in 0..6 {
            spawn(&mut s, slot, CreatureTemplate::new("Brute", Species::Carnivore, 2, 2, 4));
        }
        resolve_attacks(&mut s);
        assert!(s.board.living().iter().all(|id| s.creature(*id).unwrap().ledger.acted));
    }
}
