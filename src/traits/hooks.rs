//! Hook dispatch over a creature's trait list.
//!
//! Every function here takes a snapshot of the owner's traits first and
//! iterates that, never the live list. A creature that is dying, missing or
//! Suppressed dispatches nothing. Cells already borrowed further up the call
//! stack are skipped.
//!
//! | Family | Combination |
//! |---|---|
//! | `speed_bonus`, `predator_body_bonus`, `pre_herbivore_pile_steal` | sum |
//! | `can_target_equal_body`, `can_target_any`, `ignore_avian_speed_requirement`, `grants_attack`, `try_negate_attack` | any |
//! | `can_target`, `can_attack`, `can_forage` | all (first false stops) |
//! | `modify_*` | fold in list order |
//! | `try_override_final_damage`, `choose_attack_target`, `try_prevent_death` | first answer wins |
//! | `on_*` | every trait, in order |

use crate::core::{CreatureId, GameState};
use crate::resolution::StepEvent;
use crate::status::StatusTag;

use super::{ApplyOutcome, Trait, TraitKind, TraitSnapshot};

/// Traits that currently answer hooks for `id`.
fn active(state: &GameState, id: CreatureId) -> TraitSnapshot {
    match state.board.get(id) {
        Some(c) if !c.is_dying() && !c.statuses.has(StatusTag::Suppressed) => c.traits.snapshot(),
        _ => TraitSnapshot::new(),
    }
}

fn sum(state: &GameState, id: CreatureId, f: impl Fn(&dyn Trait) -> i32) -> i32 {
    active(state, id)
        .iter()
        .filter_map(|cell| cell.try_borrow().ok().map(|t| f(&*t)))
        .sum()
}

fn any(state: &GameState, id: CreatureId, f: impl Fn(&dyn Trait) -> bool) -> bool {
    active(state, id)
        .iter()
        .any(|cell| cell.try_borrow().map(|t| f(&*t)).unwrap_or(false))
}

fn all(state: &GameState, id: CreatureId, f: impl Fn(&dyn Trait) -> bool) -> bool {
    active(state, id)
        .iter()
        .all(|cell| cell.try_borrow().map(|t| f(&*t)).unwrap_or(true))
}

fn first<T>(state: &GameState, id: CreatureId, f: impl Fn(&dyn Trait) -> Option<T>) -> Option<T> {
    active(state, id)
        .iter()
        .find_map(|cell| cell.try_borrow().ok().and_then(|t| f(&*t)))
}

fn fold(state: &GameState, id: CreatureId, init: i32, f: impl Fn(&dyn Trait, i32) -> i32) -> i32 {
    active(state, id).iter().fold(init, |acc, cell| match cell.try_borrow() {
        Ok(t) => f(&*t, acc),
        Err(_) => acc,
    })
}

fn fold_mut(
    state: &GameState,
    id: CreatureId,
    init: i32,
    mut f: impl FnMut(&mut dyn Trait, i32) -> i32,
) -> i32 {
    active(state, id).iter().fold(init, |acc, cell| match cell.try_borrow_mut() {
        Ok(mut t) => f(&mut *t, acc),
        Err(_) => acc,
    })
}

/// Run a reaction on every active trait of `id`, then drop spent traits.
fn react(state: &mut GameState, id: CreatureId, mut f: impl FnMut(&mut dyn Trait, &mut GameState)) {
    let snapshot = active(state, id);
    if snapshot.is_empty() {
        return;
    }
    for cell in &snapshot {
        if !state.board.contains(id) {
            break;
        }
        if let Ok(mut t) = cell.try_borrow_mut() {
            f(&mut *t, state);
        }
    }
    prune_spent(state, id);
}

/// Detach traits that report themselves spent.
pub fn prune_spent(state: &mut GameState, id: CreatureId) {
    let spent = match state.board.get_mut(id) {
        Some(c) => c.traits.prune_spent(),
        None => return,
    };
    for kind in spent {
        state.emit(StepEvent::TraitDetached { creature: id, kind });
    }
}

// === Queries ===

#[must_use]
pub fn speed_bonus(state: &GameState, id: CreatureId) -> i32 {
    sum(state, id, |t| t.speed_bonus(state, id))
}

#[must_use]
pub fn predator_body_bonus(state: &GameState, id: CreatureId) -> i32 {
    sum(state, id, |t| t.predator_body_bonus(state, id))
}

#[must_use]
pub fn can_target_equal_body(state: &GameState, id: CreatureId, target: CreatureId) -> bool {
    any(state, id, |t| t.can_target_equal_body(state, id, target))
}

#[must_use]
pub fn can_target_any(state: &GameState, id: CreatureId) -> bool {
    any(state, id, |t| t.can_target_any(state, id))
}

#[must_use]
pub fn ignore_avian_speed_requirement(state: &GameState, id: CreatureId, target: CreatureId) -> bool {
    any(state, id, |t| t.ignore_avian_speed_requirement(state, id, target))
}

#[must_use]
pub fn grants_attack(state: &GameState, id: CreatureId) -> bool {
    any(state, id, |t| t.grants_attack(state, id))
}

#[must_use]
pub fn can_target(state: &GameState, id: CreatureId, target: CreatureId) -> bool {
    all(state, id, |t| t.can_target(state, id, target))
}

#[must_use]
pub fn can_attack(state: &GameState, id: CreatureId) -> bool {
    all(state, id, |t| t.can_attack(state, id))
}

#[must_use]
pub fn can_forage(state: &GameState, id: CreatureId) -> bool {
    all(state, id, |t| t.can_forage(state, id))
}

/// Does any trait of the target cancel this attack?
///
/// Every trait is asked, so per-round gates on later traits are not spent
/// when an earlier one already negated.
pub fn try_negate_attack(state: &GameState, target: CreatureId, attacker: CreatureId) -> bool {
    let mut negated = false;
    for cell in &active(state, target) {
        if negated {
            break;
        }
        if let Ok(mut t) = cell.try_borrow_mut() {
            negated = t.try_negate_attack(state, target, attacker);
        }
    }
    negated
}

#[must_use]
pub fn try_override_final_damage(state: &GameState, id: CreatureId, target: CreatureId) -> Option<i32> {
    first(state, id, |t| t.try_override_final_damage(state, id, target))
}

pub fn modify_outgoing_damage(state: &GameState, id: CreatureId, target: CreatureId, damage: i32) -> i32 {
    fold_mut(state, id, damage, |t, acc| t.modify_outgoing_damage(state, id, target, acc))
}

pub fn modify_incoming_damage(state: &GameState, id: CreatureId, attacker: CreatureId, damage: i32) -> i32 {
    fold_mut(state, id, damage, |t, acc| t.modify_incoming_damage(state, id, attacker, acc))
}

#[must_use]
pub fn modify_herbivore_eat_amount(state: &GameState, id: CreatureId, amount: i32) -> i32 {
    fold(state, id, amount, |t, acc| t.modify_herbivore_eat_amount(state, id, acc))
}

#[must_use]
pub fn pre_herbivore_pile_steal(state: &GameState, id: CreatureId) -> i32 {
    sum(state, id, |t| t.pre_herbivore_pile_steal(state, id))
}

/// First redirect that names a valid candidate.
#[must_use]
pub fn choose_attack_target(
    state: &GameState,
    id: CreatureId,
    picked: CreatureId,
    candidates: &[CreatureId],
) -> Option<CreatureId> {
    first(state, id, |t| {
        t.choose_attack_target(state, id, picked, candidates)
            .filter(|c| candidates.contains(c))
    })
}

/// Ask traits to keep a creature at 0 health alive. First success wins.
pub fn try_prevent_death(state: &mut GameState, id: CreatureId) -> bool {
    let snapshot = match state.board.get(id) {
        Some(c) if !c.statuses.has(StatusTag::Suppressed) => c.traits.snapshot(),
        _ => return false,
    };
    for cell in &snapshot {
        if let Ok(mut t) = cell.try_borrow_mut() {
            if t.try_prevent_death(state, id) {
                return true;
            }
        }
    }
    false
}

// === Reactions ===

pub fn on_round_start(state: &mut GameState, id: CreatureId) {
    react(state, id, |t, s| t.on_round_start(s, id));
}

pub fn on_round_end(state: &mut GameState, id: CreatureId) {
    react(state, id, |t, s| t.on_round_end(s, id));
}

pub fn on_after_eat(state: &mut GameState, id: CreatureId, amount: i32) {
    react(state, id, |t, s| t.on_after_eat(s, id, amount));
}

pub fn on_after_kill(state: &mut GameState, id: CreatureId, victim: CreatureId) {
    react(state, id, |t, s| t.on_after_kill(s, id, victim));
}

pub fn on_any_death(state: &mut GameState, id: CreatureId, victim: CreatureId) {
    react(state, id, |t, s| t.on_any_death(s, id, victim));
}

pub fn on_damage_dealt(state: &mut GameState, id: CreatureId, target: CreatureId, amount: i32) {
    react(state, id, |t, s| t.on_damage_dealt(s, id, target, amount));
}

/// Fires even when the damage left the creature at 0 health, before it is
/// marked dying.
pub fn on_damage_taken(state: &mut GameState, id: CreatureId, attacker: Option<CreatureId>, amount: i32) {
    let snapshot = match state.board.get(id) {
        Some(c) if !c.statuses.has(StatusTag::Suppressed) => c.traits.snapshot(),
        _ => return,
    };
    for cell in &snapshot {
        if let Ok(mut t) = cell.try_borrow_mut() {
            t.on_damage_taken(state, id, attacker, amount);
        }
    }
    prune_spent(state, id);
}

pub fn on_any_damage(
    state: &mut GameState,
    id: CreatureId,
    victim: CreatureId,
    source: Option<CreatureId>,
    amount: i32,
) {
    react(state, id, |t, s| t.on_any_damage(s, id, victim, source, amount));
}

pub fn on_targeted_by_attack(state: &mut GameState, id: CreatureId, attacker: CreatureId) {
    react(state, id, |t, s| t.on_targeted_by_attack(s, id, attacker));
}

pub fn on_ally_targeted(state: &mut GameState, id: CreatureId, ally: CreatureId, attacker: CreatureId) {
    react(state, id, |t, s| t.on_ally_targeted(s, id, ally, attacker));
}

pub fn on_after_attack_resolved(state: &mut GameState, id: CreatureId, target: CreatureId, negated: bool) {
    react(state, id, |t, s| t.on_after_attack_resolved(s, id, target, negated));
}

pub fn on_foraging(state: &mut GameState, id: CreatureId) {
    react(state, id, |t, s| t.on_foraging(s, id));
}

// === Attachment ===

/// Attach an effect trait to a living creature and run its `on_apply`.
///
/// Returns false if the creature is missing or dying. A trait that consumes
/// itself on application is detached before this returns.
pub fn attach_effect_trait(
    state: &mut GameState,
    id: CreatureId,
    kind: TraitKind,
    remaining_rounds: Option<u32>,
) -> bool {
    let (instance, cell) = match state.board.get_mut(id) {
        Some(c) if c.is_alive() => {
            let instance = c.traits.attach(kind, remaining_rounds);
            match c.traits.cell(instance) {
                Some(cell) => (instance, cell),
                None => return false,
            }
        }
        _ => return false,
    };
    state.emit(StepEvent::TraitAttached {
        creature: id,
        kind,
        rounds: remaining_rounds,
    });

    let outcome = match cell.try_borrow_mut() {
        Ok(mut t) => t.on_apply(state, id),
        Err(_) => ApplyOutcome::Keep,
    };
    if outcome == ApplyOutcome::Consume {
        if let Some(c) = state.board.get_mut(id) {
            c.traits.detach(instance);
        }
        state.emit(StepEvent::TraitDetached { creature: id, kind });
    }
    true
}

/// Count down effect-trait lifetimes on one creature.
pub fn tick_trait_lifetimes(state: &mut GameState, id: CreatureId) {
    let expired = match state.board.get_mut(id) {
        Some(c) => c.traits.tick_lifetimes(),
        None => return,
    };
    for kind in expired {
        state.emit(StepEvent::TraitDetached { creature: id, kind });
    }
}
