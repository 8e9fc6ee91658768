//! Damage, healing and death.
//!
//! ## Damage pipeline
//!
//! [`apply_damage`] is the only way health goes down:
//!
//! 1. Dead or dying targets and non-positive amounts are ignored.
//! 2. Shielded spends one charge and negates the whole instance.
//! 3. Reflect spends one charge and sends the instance back to the source.
//! 4. Absorb soaks up to its stacks.
//! 5. Health drops, clamped at 0; the source's round ledger is credited.
//! 6. At 0 health, death-prevention traits get one chance to intervene.
//! 7. `on_damage_taken` fires on the target, `on_any_damage` on everyone else.
//! 8. A target still at 0 health is marked dying.
//!
//! Death hooks fire from [`resolve_death`]. Combat calls it itself so that
//! `on_damage_dealt` lands before `on_after_kill`; everything else goes
//! through [`deal_damage`], which does both steps.

use tracing::debug;

use crate::core::{CreatureId, GameState};
use crate::status::StatusTag;
use crate::traits::hooks;

use super::events::StepEvent;

/// What one damage instance did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DamageOutcome {
    /// Health actually removed from the target.
    pub dealt: i32,
    /// The target was brought to 0 health by this instance.
    pub lethal: bool,
}

/// Run one damage instance through the pipeline. Death hooks are not fired;
/// callers that see `lethal` must call [`resolve_death`].
pub fn apply_damage(
    state: &mut GameState,
    target: CreatureId,
    amount: i32,
    source: Option<CreatureId>,
) -> DamageOutcome {
    if amount <= 0 || !state.is_alive(target) {
        return DamageOutcome::default();
    }

    let (shielded, reflected) = match state.board.get_mut(target) {
        Some(c) => {
            if c.statuses.consume_charge(StatusTag::Shielded) {
                (true, false)
            } else {
                let reflect = source.is_some_and(|s| s != target)
                    && c.statuses.consume_charge(StatusTag::Reflect);
                (false, reflect)
            }
        }
        None => return DamageOutcome::default(),
    };

    if shielded {
        state.emit(StepEvent::DamageShielded { target, source });
        return DamageOutcome::default();
    }

    if let (true, Some(attacker)) = (reflected, source) {
        state.emit(StepEvent::DamageReflected {
            from: target,
            to: attacker,
        });
        deal_damage(state, attacker, amount, Some(target));
        return DamageOutcome::default();
    }

    let mut amount = amount;
    let soaked = match state.board.get_mut(target) {
        Some(c) => {
            let soaked = amount.min(c.statuses.get_i32(StatusTag::Absorb));
            c.statuses.decrement(StatusTag::Absorb, soaked.max(0) as u32);
            soaked.max(0)
        }
        None => 0,
    };
    if soaked > 0 {
        amount -= soaked;
        state.emit(StepEvent::DamageAbsorbed {
            target,
            amount: soaked,
        });
        if amount == 0 {
            return DamageOutcome::default();
        }
    }

    let (lost, at_zero) = match state.board.get_mut(target) {
        Some(c) => {
            let lost = c.lose_health(amount);
            (lost, c.current_health() == 0)
        }
        None => return DamageOutcome::default(),
    };
    state.emit(StepEvent::Damaged {
        target,
        source,
        amount: lost,
    });

    if let Some(src) = source.filter(|s| *s != target) {
        if let Some(attacker) = state.board.get_mut(src) {
            attacker.ledger.damage_dealt += lost;
            attacker.ledger.damaged.insert(target);
        }
    }

    if at_zero && hooks::try_prevent_death(state, target) {
        state.emit(StepEvent::DeathPrevented { creature: target });
    }

    hooks::on_damage_taken(state, target, source, lost);
    for other in state.board.living() {
        if other != target {
            hooks::on_any_damage(state, other, target, source, lost);
        }
    }

    let lethal = match state.board.get_mut(target) {
        Some(c) if c.current_health() == 0 && !c.is_dying() => {
            c.mark_dying();
            true
        }
        _ => false,
    };

    DamageOutcome { dealt: lost, lethal }
}

/// Fire death hooks for a creature that was just marked dying.
pub fn resolve_death(state: &mut GameState, victim: CreatureId, killer: Option<CreatureId>) {
    debug!(%victim, killer = ?killer, "creature died");
    state.emit(StepEvent::Died {
        creature: victim,
        killer,
    });

    if let Some(k) = killer.filter(|k| *k != victim) {
        if state.is_alive(k) {
            hooks::on_after_kill(state, k, victim);
        }
    }
    for other in state.board.living() {
        if other != victim {
            hooks::on_any_death(state, other, victim);
        }
    }
}

/// Apply damage and resolve the death it causes, if any.
pub fn deal_damage(
    state: &mut GameState,
    target: CreatureId,
    amount: i32,
    source: Option<CreatureId>,
) -> DamageOutcome {
    let outcome = apply_damage(state, target, amount, source);
    if outcome.lethal {
        resolve_death(state, target, source);
    }
    outcome
}

/// Kill outright, bypassing shields and death prevention.
pub fn kill(state: &mut GameState, target: CreatureId, killer: Option<CreatureId>) -> bool {
    match state.board.get_mut(target) {
        Some(c) if c.is_alive() => {
            c.set_health(0);
            c.mark_dying();
        }
        _ => return false,
    }
    resolve_death(state, target, killer);
    true
}

/// Heal a living creature. Returns the health restored.
///
/// Healing a creature undoes score for everyone who damaged it this round,
/// never beyond what each of them dealt.
pub fn heal(state: &mut GameState, target: CreatureId, amount: i32) -> i32 {
    let gained = match state.board.get_mut(target) {
        Some(c) if c.is_alive() => c.restore_health(amount),
        _ => return 0,
    };
    if gained == 0 {
        return 0;
    }
    state.emit(StepEvent::Healed {
        creature: target,
        amount: gained,
    });

    for id in state.board.all_ids() {
        if let Some(c) = state.board.get_mut(id) {
            if c.ledger.damaged.contains(&target) {
                c.ledger.healing_undone = (c.ledger.healing_undone + gained).min(c.ledger.damage_dealt);
            }
        }
    }
    gained
}
